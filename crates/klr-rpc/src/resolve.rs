use klr_locator::{ExpectedType, LocatorError, ValidationOutcome};
use klr_store::{ReadView, StoreResult};
use klr_types::{LedgerEntry, LedgerEntryType, LedgerKey};
use serde_json::{Map, Value};

/// Response field names of the JSON protocol.
pub mod field {
    pub const ERROR: &str = "error";
    pub const ERROR_MESSAGE: &str = "error_message";
    pub const INDEX: &str = "index";
    pub const NODE: &str = "node";
    pub const NODE_BINARY: &str = "node_binary";
    pub const LEDGER_INDEX: &str = "ledger_index";
    pub const LEDGER_HASH: &str = "ledger_hash";
    pub const VALIDATED: &str = "validated";
}

/// What a snapshot holds at a resolved key.
#[derive(Clone, Debug, PartialEq)]
pub enum LookupResult {
    Found(LedgerEntry),
    NotFound,
    /// An object exists but is not of the expected type.
    TypeMismatch { actual: LedgerEntryType },
}

/// Read `key` and apply the type-match policy.
pub fn lookup(
    view: &dyn ReadView,
    key: &LedgerKey,
    expected: ExpectedType,
) -> StoreResult<LookupResult> {
    let result = match view.read(key)? {
        None => LookupResult::NotFound,
        Some(entry) if !expected.accepts(entry.entry_type()) => LookupResult::TypeMismatch {
            actual: entry.entry_type(),
        },
        Some(entry) => LookupResult::Found(entry),
    };
    Ok(result)
}

/// Final per-request result of the JSON protocol, before ledger fields are
/// added.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderedResponse {
    Node { index: LedgerKey, node: Value },
    Binary { index: LedgerKey, node_binary: String },
    Error(LocatorError),
    /// The key was zero; nothing was looked up.
    Empty,
}

impl RenderedResponse {
    /// Response members: `{index, node}`, `{index, node_binary}`,
    /// `{error}`, or nothing.
    pub fn into_fields(self) -> Map<String, Value> {
        let mut out = Map::new();
        match self {
            Self::Node { index, node } => {
                out.insert(field::NODE.into(), node);
                out.insert(field::INDEX.into(), Value::String(index.to_hex()));
            }
            Self::Binary { index, node_binary } => {
                out.insert(field::NODE_BINARY.into(), Value::String(node_binary));
                out.insert(field::INDEX.into(), Value::String(index.to_hex()));
            }
            Self::Error(error) => {
                out.insert(field::ERROR.into(), Value::String(error.wire_name().into()));
            }
            Self::Empty => {}
        }
        out
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.clone().into_fields())
    }

    pub fn error(&self) -> Option<LocatorError> {
        match self {
            Self::Error(error) => Some(*error),
            _ => None,
        }
    }
}

/// Render a lookup result for `key`.
pub fn render(key: &LedgerKey, result: LookupResult, binary: bool) -> RenderedResponse {
    match result {
        LookupResult::NotFound => RenderedResponse::Error(LocatorError::EntryNotFound),
        LookupResult::TypeMismatch { .. } => {
            RenderedResponse::Error(LocatorError::UnexpectedLedgerType)
        }
        LookupResult::Found(entry) if binary => match entry.to_binary() {
            Ok(bytes) => RenderedResponse::Binary {
                index: *key,
                node_binary: hex::encode_upper(bytes),
            },
            Err(e) => {
                tracing::warn!(key = %key.short_hex(), error = %e, "failed to encode entry");
                RenderedResponse::Error(LocatorError::EntryNotFound)
            }
        },
        LookupResult::Found(entry) => RenderedResponse::Node {
            index: *key,
            node: entry.to_json(key),
        },
    }
}

/// Resolve a validation outcome against a snapshot.
///
/// Rejections and the zero key never touch the snapshot.
pub fn resolve(outcome: &ValidationOutcome, view: &dyn ReadView, binary: bool) -> RenderedResponse {
    let (key, expected) = match outcome {
        ValidationOutcome::Rejected { error, .. } => return RenderedResponse::Error(*error),
        ValidationOutcome::Resolved { key, .. } if key.is_zero() => {
            return RenderedResponse::Empty
        }
        ValidationOutcome::Resolved { key, expected, .. } => (key, *expected),
    };

    match lookup(view, key, expected) {
        Ok(result) => {
            tracing::debug!(
                key = %key.short_hex(),
                seq = view.info().seq,
                found = matches!(result, LookupResult::Found(_)),
                "ledger entry lookup"
            );
            render(key, result, binary)
        }
        Err(e) => {
            tracing::warn!(key = %key.short_hex(), error = %e, "ledger read failed");
            RenderedResponse::Error(LocatorError::EntryNotFound)
        }
    }
}
