use klr_types::{LedgerKey, TypeError};

/// Errors from snapshot construction and reads.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Two entries were inserted under the same key.
    #[error("duplicate entry for key {0}")]
    DuplicateKey(LedgerKey),

    /// Entries can never be stored under the zero key.
    #[error("cannot store entry under the zero key")]
    ZeroKey,

    /// A ledger with this sequence is already registered.
    #[error("ledger {0} already present")]
    DuplicateLedger(u32),

    /// A fixture file is structurally invalid.
    #[error("invalid fixture: {0}")]
    InvalidFixture(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("type error: {0}")]
    Type(#[from] TypeError),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Why a ledger could not be selected.
///
/// The two classes matter to callers: argument-class failures are the
/// client's fault, lookup-class failures mean the ledger is not available.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LedgerSelectError {
    #[error("invalid ledger selector: {0}")]
    InvalidParams(String),

    #[error("ledger not found: {0}")]
    NotFound(String),
}

impl LedgerSelectError {
    /// Error token reported by the JSON protocol.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::InvalidParams(_) => "invalidParams",
            Self::NotFound(_) => "lgrNotFound",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidParams(msg) | Self::NotFound(msg) => msg,
        }
    }

    pub fn is_argument_error(&self) -> bool {
        matches!(self, Self::InvalidParams(_))
    }
}
