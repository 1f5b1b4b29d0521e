use std::fmt;

use crate::error::TypeError;

/// Length of every public key encoding the ledger recognizes.
pub const PUBLIC_KEY_LEN: usize = 33;

const ED25519_PREFIX: u8 = 0xED;

/// Signing algorithm implied by a public key's encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Compressed secp256k1 point (`0x02` / `0x03` prefix).
    Secp256k1,
    /// Ed25519 key with the `0xED` marker prefix.
    Ed25519,
}

impl KeyType {
    /// Classify an encoded public key, or `None` if the encoding is not one
    /// the ledger accepts.
    pub fn of(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != PUBLIC_KEY_LEN {
            return None;
        }
        match bytes[0] {
            0x02 | 0x03 => Some(Self::Secp256k1),
            ED25519_PREFIX => Some(Self::Ed25519),
            _ => None,
        }
    }
}

/// A validator or account public key in its 33-byte wire encoding.
///
/// Only the encoding is checked; the point itself is not validated.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LEN],
    key_type: KeyType,
}

impl PublicKey {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypeError> {
        let key_type = KeyType::of(bytes).ok_or(TypeError::InvalidPublicKey)?;
        let mut arr = [0u8; PUBLIC_KEY_LEN];
        arr.copy_from_slice(bytes);
        Ok(Self {
            bytes: arr,
            key_type,
        })
    }

    /// Parse from hex. Fails on bad hex or an unrecognized encoding.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PublicKey({:?}, {})",
            self.key_type,
            hex::encode_upper(self.bytes)
        )
    }
}
