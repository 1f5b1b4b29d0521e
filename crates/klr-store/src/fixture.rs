//! Snapshot fixtures stored as JSON files.
//!
//! ```json
//! {
//!   "ledger_index": 12,
//!   "validated": true,
//!   "entries": [
//!     { "index": "13F1A9…", "LedgerEntryType": "AccountRoot", "Balance": "100" }
//!   ]
//! }
//! ```
//!
//! Every member of an entry other than `index` and `LedgerEntryType` is kept
//! as an opaque field.

use std::path::Path;

use klr_types::entry::{ENTRY_TYPE_FIELD, INDEX_FIELD};
use klr_types::{LedgerEntry, LedgerEntryType, LedgerKey};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};
use crate::memory::{InMemoryLedgerSource, InMemorySnapshot};
use crate::traits::ReadView;

#[derive(Deserialize)]
struct FixtureFile {
    ledger_index: u32,
    #[serde(default)]
    validated: bool,
    #[serde(default)]
    entries: Vec<Map<String, Value>>,
}

/// Build a snapshot from fixture JSON text.
pub fn snapshot_from_str(text: &str) -> StoreResult<InMemorySnapshot> {
    let file: FixtureFile =
        serde_json::from_str(text).map_err(|e| StoreError::InvalidFixture(e.to_string()))?;
    build(file)
}

/// Build a snapshot from an already-parsed fixture value.
pub fn snapshot_from_json(value: Value) -> StoreResult<InMemorySnapshot> {
    let file: FixtureFile =
        serde_json::from_value(value).map_err(|e| StoreError::InvalidFixture(e.to_string()))?;
    build(file)
}

/// Read and build a snapshot from a fixture file on disk.
pub fn load_snapshot(path: impl AsRef<Path>) -> StoreResult<InMemorySnapshot> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let snapshot = snapshot_from_str(&text)?;
    tracing::info!(
        path = %path.display(),
        seq = snapshot.info().seq,
        entries = snapshot.len(),
        "loaded ledger fixture"
    );
    Ok(snapshot)
}

/// Load several fixture files into one ledger source.
pub fn load_source<P: AsRef<Path>>(paths: &[P]) -> StoreResult<InMemoryLedgerSource> {
    let source = InMemoryLedgerSource::new();
    for path in paths {
        source.insert(load_snapshot(path)?)?;
    }
    Ok(source)
}

fn build(file: FixtureFile) -> StoreResult<InMemorySnapshot> {
    let mut builder = InMemorySnapshot::builder(file.ledger_index).validated(file.validated);
    for (position, mut fields) in file.entries.into_iter().enumerate() {
        let key = match fields.remove(INDEX_FIELD) {
            Some(Value::String(hex)) => LedgerKey::from_hex(&hex)?,
            _ => {
                return Err(StoreError::InvalidFixture(format!(
                    "entry {position}: missing string `{INDEX_FIELD}`"
                )))
            }
        };
        let entry_type = match fields.remove(ENTRY_TYPE_FIELD) {
            Some(Value::String(name)) => LedgerEntryType::from_name(&name).ok_or_else(|| {
                StoreError::InvalidFixture(format!("entry {position}: unknown type `{name}`"))
            })?,
            _ => {
                return Err(StoreError::InvalidFixture(format!(
                    "entry {position}: missing string `{ENTRY_TYPE_FIELD}`"
                )))
            }
        };
        builder.insert(key, LedgerEntry::with_fields(entry_type, fields))?;
    }
    builder.build()
}
