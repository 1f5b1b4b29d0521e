use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Canonical 256-bit key into the ledger's state map.
///
/// Every ledger object is stored under exactly one `LedgerKey`. Keys are
/// opaque: they are either supplied by the caller as hex or derived from
/// semantic identifiers by a keylet function.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LedgerKey([u8; 32]);

impl LedgerKey {
    /// Width of a key in bytes.
    pub const LEN: usize = 32;

    /// The zero key. Never addresses a stored object.
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Create a key from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Create a key from a slice that must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypeError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| TypeError::InvalidLength {
            expected: Self::LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// Parse from exactly 64 hex digits (either case).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        decode_hex_array::<32>(s).map(Self)
    }

    /// Returns `true` if every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Upper-case hex encoding, the form used on the wire.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode_upper(&self.0[..4])
    }
}

/// Decode exactly `2 * N` hex digits into a fixed-width array.
pub(crate) fn decode_hex_array<const N: usize>(s: &str) -> Result<[u8; N], TypeError> {
    if s.len() != N * 2 {
        return Err(TypeError::InvalidHex(format!(
            "expected {} hex digits, got {}",
            N * 2,
            s.len()
        )));
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(s, &mut out).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
    Ok(out)
}

impl Default for LedgerKey {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LedgerKey({})", self.short_hex())
    }
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for LedgerKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<LedgerKey> for [u8; 32] {
    fn from(key: LedgerKey) -> Self {
        key.0
    }
}

impl AsRef<[u8]> for LedgerKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Hex in human-readable formats (JSON fixtures), raw bytes otherwise (bincode).
impl Serialize for LedgerKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for LedgerKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(D::Error::custom)
        } else {
            <[u8; 32]>::deserialize(deserializer).map(Self)
        }
    }
}
