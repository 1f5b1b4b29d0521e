use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use klr_keylet::sha512_half;
use klr_types::{LedgerEntry, LedgerKey};

use crate::error::{LedgerSelectError, StoreError, StoreResult};
use crate::selector::LedgerSelector;
use crate::traits::{LedgerInfo, LedgerSource, ReadView};

/// Immutable, map-backed ledger snapshot.
///
/// Built once through [`SnapshotBuilder`]; the ledger hash commits to the
/// sequence number and every (key, entry) pair.
pub struct InMemorySnapshot {
    info: LedgerInfo,
    entries: BTreeMap<LedgerKey, LedgerEntry>,
}

impl InMemorySnapshot {
    pub fn builder(seq: u32) -> SnapshotBuilder {
        SnapshotBuilder::new(seq)
    }

    /// Number of entries in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &LedgerKey> {
        self.entries.keys()
    }
}

impl ReadView for InMemorySnapshot {
    fn info(&self) -> &LedgerInfo {
        &self.info
    }

    fn read(&self, key: &LedgerKey) -> StoreResult<Option<LedgerEntry>> {
        Ok(self.entries.get(key).cloned())
    }

    fn exists(&self, key: &LedgerKey) -> StoreResult<bool> {
        Ok(self.entries.contains_key(key))
    }
}

impl std::fmt::Debug for InMemorySnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySnapshot")
            .field("seq", &self.info.seq)
            .field("hash", &self.info.hash)
            .field("entry_count", &self.entries.len())
            .finish()
    }
}

/// Accumulates entries for an [`InMemorySnapshot`].
pub struct SnapshotBuilder {
    seq: u32,
    validated: bool,
    entries: BTreeMap<LedgerKey, LedgerEntry>,
}

impl SnapshotBuilder {
    pub fn new(seq: u32) -> Self {
        Self {
            seq,
            validated: false,
            entries: BTreeMap::new(),
        }
    }

    pub fn validated(mut self, validated: bool) -> Self {
        self.validated = validated;
        self
    }

    /// Add an entry. Zero keys and duplicate keys are rejected.
    pub fn insert(&mut self, key: LedgerKey, entry: LedgerEntry) -> StoreResult<()> {
        if key.is_zero() {
            return Err(StoreError::ZeroKey);
        }
        if self.entries.contains_key(&key) {
            return Err(StoreError::DuplicateKey(key));
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Builder-style [`Self::insert`].
    pub fn with_entry(mut self, key: LedgerKey, entry: LedgerEntry) -> StoreResult<Self> {
        self.insert(key, entry)?;
        Ok(self)
    }

    pub fn build(self) -> StoreResult<InMemorySnapshot> {
        let mut preimage = Vec::new();
        preimage.extend_from_slice(&self.seq.to_be_bytes());
        for (key, entry) in &self.entries {
            preimage.extend_from_slice(key.as_bytes());
            preimage.extend_from_slice(&entry.to_binary()?);
        }
        let hash = LedgerKey::from_bytes(sha512_half(&preimage));

        tracing::debug!(
            seq = self.seq,
            entries = self.entries.len(),
            hash = %hash.short_hex(),
            "built ledger snapshot"
        );

        Ok(InMemorySnapshot {
            info: LedgerInfo {
                seq: self.seq,
                hash,
                validated: self.validated,
            },
            entries: self.entries,
        })
    }
}

/// Set of snapshots addressable by sequence, hash, or name.
pub struct InMemoryLedgerSource {
    ledgers: RwLock<BTreeMap<u32, Arc<InMemorySnapshot>>>,
}

impl InMemoryLedgerSource {
    pub fn new() -> Self {
        Self {
            ledgers: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register a snapshot. Sequence numbers must be unique.
    pub fn insert(&self, snapshot: InMemorySnapshot) -> StoreResult<()> {
        let mut map = self.ledgers.write().expect("lock poisoned");
        let seq = snapshot.info().seq;
        if map.contains_key(&seq) {
            return Err(StoreError::DuplicateLedger(seq));
        }
        map.insert(seq, Arc::new(snapshot));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.ledgers.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.read().expect("lock poisoned").is_empty()
    }

    /// Sequence numbers of all registered ledgers, ascending.
    pub fn sequences(&self) -> Vec<u32> {
        self.ledgers
            .read()
            .expect("lock poisoned")
            .keys()
            .copied()
            .collect()
    }
}

impl Default for InMemoryLedgerSource {
    fn default() -> Self {
        Self::new()
    }
}

impl From<InMemorySnapshot> for InMemoryLedgerSource {
    fn from(snapshot: InMemorySnapshot) -> Self {
        let mut map = BTreeMap::new();
        map.insert(snapshot.info().seq, Arc::new(snapshot));
        Self {
            ledgers: RwLock::new(map),
        }
    }
}

impl LedgerSource for InMemoryLedgerSource {
    fn select(&self, selector: &LedgerSelector) -> Result<Arc<dyn ReadView>, LedgerSelectError> {
        let map = self.ledgers.read().expect("lock poisoned");
        let found = match selector {
            LedgerSelector::Current | LedgerSelector::Closed => map.values().next_back(),
            LedgerSelector::Validated => map.values().rev().find(|s| s.info().validated),
            LedgerSelector::Sequence(seq) => map.get(seq),
            LedgerSelector::Hash(hash) => map.values().find(|s| s.info().hash == *hash),
        };

        match found {
            Some(snapshot) => {
                let view: Arc<dyn ReadView> = snapshot.clone();
                Ok(view)
            }
            None => {
                tracing::debug!(%selector, "no ledger matches selector");
                Err(LedgerSelectError::NotFound("ledgerNotFound".into()))
            }
        }
    }
}

impl std::fmt::Debug for InMemoryLedgerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryLedgerSource")
            .field("ledger_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klr_types::LedgerEntryType;

    fn key(byte: u8) -> LedgerKey {
        LedgerKey::from_bytes([byte; 32])
    }

    fn entry(t: LedgerEntryType) -> LedgerEntry {
        LedgerEntry::new(t).with_field("Flags", 0)
    }

    fn snapshot(seq: u32, validated: bool) -> InMemorySnapshot {
        InMemorySnapshot::builder(seq)
            .validated(validated)
            .with_entry(key(1), entry(LedgerEntryType::AccountRoot))
            .unwrap()
            .build()
            .unwrap()
    }

    // -----------------------------------------------------------------------
    // Snapshot
    // -----------------------------------------------------------------------

    #[test]
    fn read_present_and_missing() {
        let snap = snapshot(1, true);
        let found = snap.read(&key(1)).unwrap().expect("should exist");
        assert_eq!(found.entry_type(), LedgerEntryType::AccountRoot);
        assert!(snap.read(&key(2)).unwrap().is_none());
        assert!(snap.exists(&key(1)).unwrap());
        assert!(!snap.exists(&key(2)).unwrap());
    }

    #[test]
    fn rejects_zero_and_duplicate_keys() {
        let mut builder = SnapshotBuilder::new(1);
        assert!(matches!(
            builder.insert(LedgerKey::zero(), entry(LedgerEntryType::Ticket)),
            Err(StoreError::ZeroKey)
        ));
        builder.insert(key(1), entry(LedgerEntryType::Ticket)).unwrap();
        assert!(matches!(
            builder.insert(key(1), entry(LedgerEntryType::Offer)),
            Err(StoreError::DuplicateKey(_))
        ));
    }

    #[test]
    fn hash_commits_to_contents() {
        let a = snapshot(1, false);
        let b = snapshot(1, false);
        assert_eq!(a.info().hash, b.info().hash);

        let c = InMemorySnapshot::builder(1)
            .with_entry(key(1), entry(LedgerEntryType::Offer))
            .unwrap()
            .build()
            .unwrap();
        assert_ne!(a.info().hash, c.info().hash);
        assert_ne!(a.info().hash, snapshot(2, false).info().hash);
    }

    #[test]
    fn keys_are_sorted() {
        let snap = InMemorySnapshot::builder(1)
            .with_entry(key(9), entry(LedgerEntryType::Hook))
            .unwrap()
            .with_entry(key(3), entry(LedgerEntryType::Hook))
            .unwrap()
            .build()
            .unwrap();
        let keys: Vec<_> = snap.keys().copied().collect();
        assert_eq!(keys, vec![key(3), key(9)]);
        assert_eq!(snap.len(), 2);
    }

    // -----------------------------------------------------------------------
    // Ledger source
    // -----------------------------------------------------------------------

    fn source() -> InMemoryLedgerSource {
        let source = InMemoryLedgerSource::new();
        source.insert(snapshot(5, true)).unwrap();
        source.insert(snapshot(6, true)).unwrap();
        source.insert(snapshot(7, false)).unwrap();
        source
    }

    #[test]
    fn current_is_newest() {
        let view = source().select(&LedgerSelector::Current).unwrap();
        assert_eq!(view.info().seq, 7);
    }

    #[test]
    fn validated_skips_unvalidated() {
        let view = source().select(&LedgerSelector::Validated).unwrap();
        assert_eq!(view.info().seq, 6);
        assert!(view.info().validated);
    }

    #[test]
    fn select_by_sequence_and_hash() {
        let source = source();
        let by_seq = source.select(&LedgerSelector::Sequence(5)).unwrap();
        let by_hash = source
            .select(&LedgerSelector::Hash(by_seq.info().hash))
            .unwrap();
        assert_eq!(by_hash.info().seq, 5);
    }

    #[test]
    fn missing_ledger_is_lookup_class() {
        let Err(err) = source().select(&LedgerSelector::Sequence(99)) else {
            panic!("ledger 99 should not exist");
        };
        assert!(!err.is_argument_error());
        assert_eq!(err.wire_name(), "lgrNotFound");
    }

    #[test]
    fn empty_source_has_no_current() {
        assert!(InMemoryLedgerSource::new()
            .select(&LedgerSelector::Current)
            .is_err());
    }

    #[test]
    fn duplicate_sequence_rejected() {
        let source = source();
        assert!(matches!(
            source.insert(snapshot(5, false)),
            Err(StoreError::DuplicateLedger(5))
        ));
        assert_eq!(source.sequences(), vec![5, 6, 7]);
    }

    #[test]
    fn concurrent_reads_are_safe() {
        use std::thread;

        let source = Arc::new(source());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let source = Arc::clone(&source);
                thread::spawn(move || {
                    let view = source.select(&LedgerSelector::Current).unwrap();
                    assert!(view.read(&key(1)).unwrap().is_some());
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }
}
