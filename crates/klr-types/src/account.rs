use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::TypeError;

/// Version byte prefixed to account identifiers before base58 encoding.
const ACCOUNT_ID_VERSION: u8 = 0x00;
const CHECKSUM_LEN: usize = 4;

/// 160-bit account identifier.
///
/// Accounts travel as base58check "classic addresses" using the ledger
/// alphabet (addresses start with `r`). Decoding verifies the version byte
/// and the double-SHA-256 checksum.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId([u8; 20]);

impl AccountId {
    pub const LEN: usize = 20;

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Decode a classic address.
    pub fn from_base58(address: &str) -> Result<Self, TypeError> {
        let raw = bs58::decode(address)
            .with_alphabet(bs58::Alphabet::RIPPLE)
            .into_vec()
            .map_err(|e| TypeError::InvalidAddress(e.to_string()))?;

        if raw.len() != 1 + Self::LEN + CHECKSUM_LEN {
            return Err(TypeError::InvalidAddress(format!(
                "decoded length {} is not {}",
                raw.len(),
                1 + Self::LEN + CHECKSUM_LEN
            )));
        }
        let (payload, checksum) = raw.split_at(1 + Self::LEN);
        if payload[0] != ACCOUNT_ID_VERSION {
            return Err(TypeError::InvalidAddress(format!(
                "unexpected version byte {:#04x}",
                payload[0]
            )));
        }
        if checksum != &double_sha256(payload)[..CHECKSUM_LEN] {
            return Err(TypeError::InvalidAddress("checksum mismatch".into()));
        }

        let mut id = [0u8; 20];
        id.copy_from_slice(&payload[1..]);
        Ok(Self(id))
    }

    /// Encode as a classic address.
    pub fn to_base58(&self) -> String {
        let mut raw = Vec::with_capacity(1 + Self::LEN + CHECKSUM_LEN);
        raw.push(ACCOUNT_ID_VERSION);
        raw.extend_from_slice(&self.0);
        let checksum = double_sha256(&raw);
        raw.extend_from_slice(&checksum[..CHECKSUM_LEN]);
        bs58::encode(raw)
            .with_alphabet(bs58::Alphabet::RIPPLE)
            .into_string()
    }
}

fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.to_base58())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl std::str::FromStr for AccountId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_base58())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_base58(&s).map_err(D::Error::custom)
        } else {
            <[u8; 20]>::deserialize(deserializer).map(Self)
        }
    }
}
