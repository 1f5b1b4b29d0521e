use std::sync::Arc;

use klr_types::{LedgerEntry, LedgerKey};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerSelectError, StoreResult};
use crate::selector::LedgerSelector;

/// Header information identifying one ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerInfo {
    pub seq: u32,
    pub hash: LedgerKey,
    pub validated: bool,
}

/// A consistent, read-only, point-in-time view of ledger state.
///
/// # Design Rules
///
/// 1. A view never changes after it is handed out.
/// 2. Concurrent reads are always safe.
/// 3. The view never interprets entry contents.
pub trait ReadView: Send + Sync {
    /// Header of the ledger this view belongs to.
    fn info(&self) -> &LedgerInfo;

    /// Read the entry stored at `key`, or `None` if absent.
    fn read(&self, key: &LedgerKey) -> StoreResult<Option<LedgerEntry>>;

    /// Returns `true` if an entry is stored at `key`.
    fn exists(&self, key: &LedgerKey) -> StoreResult<bool> {
        Ok(self.read(key)?.is_some())
    }
}

/// Resolves a [`LedgerSelector`] to a snapshot.
pub trait LedgerSource: Send + Sync {
    fn select(&self, selector: &LedgerSelector) -> Result<Arc<dyn ReadView>, LedgerSelectError>;
}
