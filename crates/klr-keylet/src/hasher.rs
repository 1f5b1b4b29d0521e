use klr_types::LedgerKey;
use sha2::{Digest, Sha512};

use crate::namespace::LedgerNamespace;

/// First half of the SHA-512 digest of `data`.
pub fn sha512_half(data: &[u8]) -> [u8; 32] {
    truncate(Sha512::digest(data).as_slice())
}

fn truncate(digest: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest[..32]);
    out
}

/// Namespace-separated SHA-512Half key builder.
///
/// Integers are appended big-endian; byte strings are appended raw,
/// without a length prefix.
pub struct KeyHasher {
    inner: Sha512,
}

impl KeyHasher {
    pub fn new(namespace: LedgerNamespace) -> Self {
        let mut inner = Sha512::new();
        inner.update(namespace.to_be_bytes());
        Self { inner }
    }

    pub fn bytes(mut self, data: impl AsRef<[u8]>) -> Self {
        self.inner.update(data.as_ref());
        self
    }

    pub fn u32(self, value: u32) -> Self {
        self.bytes(value.to_be_bytes())
    }

    pub fn u64(self, value: u64) -> Self {
        self.bytes(value.to_be_bytes())
    }

    pub fn finish(self) -> LedgerKey {
        LedgerKey::from_bytes(truncate(self.inner.finalize().as_slice()))
    }
}
