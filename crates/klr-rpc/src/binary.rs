//! Strict binary protocol: fetch an object by raw key.
//!
//! No expected-type check applies here. Failures are reported through a
//! [`Status`] that folds argument-class problems into
//! [`StatusCode::InvalidArgument`] and lookup-class problems into
//! [`StatusCode::NotFound`].

use std::fmt;

use klr_store::{LedgerSelector, LedgerSource};
use klr_types::LedgerKey;
use serde::{Deserialize, Serialize};

/// Request for the object stored at `key` in the selected ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetLedgerEntryRequest {
    /// Raw key bytes; anything but 32 bytes is rejected.
    pub key: Vec<u8>,
    pub ledger: LedgerSelector,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerObject {
    pub key: Vec<u8>,
    /// Canonical binary encoding of the object.
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetLedgerEntryResponse {
    pub ledger_object: LedgerObject,
    /// Echo of the request's ledger selector.
    pub ledger: LedgerSelector,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    InvalidArgument,
    NotFound,
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => f.write_str("INVALID_ARGUMENT"),
            Self::NotFound => f.write_str("NOT_FOUND"),
        }
    }
}

/// Failure status of a binary protocol call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub code: StatusCode,
    pub message: String,
}

impl Status {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::InvalidArgument,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::NotFound,
            message: message.into(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Serve one binary protocol request.
pub fn ledger_entry_binary(
    request: &GetLedgerEntryRequest,
    source: &dyn LedgerSource,
) -> Result<GetLedgerEntryResponse, Status> {
    let view = source.select(&request.ledger).map_err(|e| {
        if e.is_argument_error() {
            Status::invalid_argument(e.message())
        } else {
            Status::not_found(e.message())
        }
    })?;

    let key = LedgerKey::from_slice(&request.key)
        .map_err(|_| Status::invalid_argument("index malformed"))?;

    let entry = match view.read(&key) {
        Ok(Some(entry)) => entry,
        Ok(None) => return Err(Status::not_found("object not found")),
        Err(e) => {
            tracing::warn!(key = %key.short_hex(), error = %e, "ledger read failed");
            return Err(Status::not_found("object not found"));
        }
    };

    let data = entry.to_binary().map_err(|e| {
        tracing::warn!(key = %key.short_hex(), error = %e, "failed to encode entry");
        Status::not_found("object not found")
    })?;

    tracing::debug!(key = %key.short_hex(), seq = view.info().seq, "binary ledger entry served");

    Ok(GetLedgerEntryResponse {
        ledger_object: LedgerObject {
            key: request.key.clone(),
            data,
        },
        ledger: request.ledger,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use klr_keylet::Keylet;
    use klr_store::{InMemoryLedgerSource, InMemorySnapshot};
    use klr_types::{AccountId, LedgerEntry, LedgerEntryType};
    use proptest::prelude::*;

    fn hook_key() -> LedgerKey {
        Keylet::hook(&AccountId::from_bytes([3; 20])).key
    }

    fn source() -> InMemoryLedgerSource {
        let snapshot = InMemorySnapshot::builder(8)
            .validated(true)
            .with_entry(
                hook_key(),
                LedgerEntry::new(LedgerEntryType::Hook).with_field("Flags", 0),
            )
            .unwrap()
            .build()
            .unwrap();
        InMemoryLedgerSource::from(snapshot)
    }

    fn request(key: Vec<u8>) -> GetLedgerEntryRequest {
        GetLedgerEntryRequest {
            key,
            ledger: LedgerSelector::Validated,
        }
    }

    #[test]
    fn returns_object_data() {
        let req = request(hook_key().as_bytes().to_vec());
        let resp = ledger_entry_binary(&req, &source()).unwrap();
        assert_eq!(resp.ledger_object.key, req.key);
        assert_eq!(resp.ledger, LedgerSelector::Validated);
        let entry = LedgerEntry::from_binary(&resp.ledger_object.data).unwrap();
        assert_eq!(entry.entry_type(), LedgerEntryType::Hook);
    }

    #[test]
    fn wrong_key_length_is_invalid_argument() {
        for len in [0, 31, 33] {
            let err = ledger_entry_binary(&request(vec![1; len]), &source()).unwrap_err();
            assert_eq!(err, Status::invalid_argument("index malformed"));
        }
    }

    #[test]
    fn missing_object_is_not_found() {
        let err = ledger_entry_binary(&request(vec![9; 32]), &source()).unwrap_err();
        assert_eq!(err, Status::not_found("object not found"));
    }

    #[test]
    fn missing_ledger_is_not_found() {
        let req = GetLedgerEntryRequest {
            key: hook_key().as_bytes().to_vec(),
            ledger: LedgerSelector::Sequence(100),
        };
        let err = ledger_entry_binary(&req, &source()).unwrap_err();
        assert_eq!(err.code, StatusCode::NotFound);
    }

    #[test]
    fn shares_key_space_with_json_protocol() {
        use crate::ledger_entry::ledger_entry;
        use klr_keylet::StandardKeyDeriver;
        use serde_json::json;

        let source = source();
        let params = json!({"hook": {"account": AccountId::from_bytes([3; 20]).to_base58()}});
        let json = ledger_entry(params.as_object().unwrap(), &source, &StandardKeyDeriver);
        let key = LedgerKey::from_hex(json["index"].as_str().unwrap()).unwrap();

        let resp = ledger_entry_binary(&request(key.as_bytes().to_vec()), &source).unwrap();
        let entry = LedgerEntry::from_binary(&resp.ledger_object.data).unwrap();
        assert_eq!(entry.to_json(&key), json["node"]);
    }

    #[test]
    fn status_display() {
        assert_eq!(
            Status::invalid_argument("index malformed").to_string(),
            "INVALID_ARGUMENT: index malformed"
        );
    }

    proptest! {
        #[test]
        fn keys_of_other_lengths_are_malformed(key in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assume!(key.len() != 32);
            let err = ledger_entry_binary(&request(key), &source()).unwrap_err();
            prop_assert_eq!(err.code, StatusCode::InvalidArgument);
            prop_assert_eq!(err.message.as_str(), "index malformed");
        }
    }
}
