use serde::{Deserialize, Serialize};

use crate::binary::{GetLedgerEntryRequest, GetLedgerEntryResponse, Status};
use crate::error::{RpcError, RpcResult};

pub const PROTOCOL_VERSION: u32 = 1;
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// All messages of the binary protocol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryMessage {
    GetLedgerEntryRequest(GetLedgerEntryRequest),
    GetLedgerEntryResponse(GetLedgerEntryResponse),
    Status(Status),
}

impl BinaryMessage {
    pub fn type_tag(&self) -> u8 {
        match self {
            Self::GetLedgerEntryRequest(_) => 1,
            Self::GetLedgerEntryResponse(_) => 2,
            Self::Status(_) => 255,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::GetLedgerEntryRequest(_) => "GetLedgerEntryRequest",
            Self::GetLedgerEntryResponse(_) => "GetLedgerEntryResponse",
            Self::Status(_) => "Status",
        }
    }

    /// Unwrap a request, or report what arrived instead.
    pub fn into_request(self) -> RpcResult<GetLedgerEntryRequest> {
        match self {
            Self::GetLedgerEntryRequest(req) => Ok(req),
            other => Err(RpcError::UnexpectedMessage {
                expected: "GetLedgerEntryRequest",
                actual: other.type_name(),
            }),
        }
    }
}

impl From<Result<GetLedgerEntryResponse, Status>> for BinaryMessage {
    fn from(result: Result<GetLedgerEntryResponse, Status>) -> Self {
        match result {
            Ok(resp) => Self::GetLedgerEntryResponse(resp),
            Err(status) => Self::Status(status),
        }
    }
}

/// Codec for binary protocol messages.
pub struct BinaryCodec;

impl BinaryCodec {
    /// Encode a message with framing: [4 bytes len][1 byte tag][payload]
    pub fn encode(msg: &BinaryMessage) -> RpcResult<Vec<u8>> {
        let payload = Self::encode_payload(msg)?;
        if payload.len() > MAX_MESSAGE_SIZE {
            return Err(RpcError::MessageTooLarge {
                size: payload.len(),
                max: MAX_MESSAGE_SIZE,
            });
        }
        let len = (payload.len() + 1) as u32;
        let mut buf = Vec::with_capacity(4 + 1 + payload.len());
        buf.extend_from_slice(&len.to_be_bytes());
        buf.push(msg.type_tag());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    /// Decode a framed message. Returns (message, bytes_consumed).
    pub fn decode(data: &[u8]) -> RpcResult<(BinaryMessage, usize)> {
        let [a, b, c, d, tag, ..] = *data else {
            return Err(RpcError::FramingError("too short".into()));
        };
        let len = u32::from_be_bytes([a, b, c, d]) as usize;
        if len < 1 {
            return Err(RpcError::FramingError("zero-length frame".into()));
        }
        if len - 1 > MAX_MESSAGE_SIZE {
            return Err(RpcError::MessageTooLarge {
                size: len - 1,
                max: MAX_MESSAGE_SIZE,
            });
        }
        let total = 4 + len;
        if data.len() < total {
            return Err(RpcError::FramingError(format!(
                "incomplete: have {}, need {}",
                data.len(),
                total
            )));
        }
        let msg = Self::decode_payload(&data[5..total])?;
        if msg.type_tag() != tag {
            return Err(RpcError::InvalidMessageType(tag));
        }
        Ok((msg, total))
    }

    /// Encode payload only (no framing).
    pub fn encode_payload(msg: &BinaryMessage) -> RpcResult<Vec<u8>> {
        bincode::serialize(msg).map_err(|e| RpcError::Serialization(e.to_string()))
    }

    /// Decode payload only (no framing).
    pub fn decode_payload(data: &[u8]) -> RpcResult<BinaryMessage> {
        bincode::deserialize(data).map_err(|e| RpcError::Deserialization(e.to_string()))
    }
}
