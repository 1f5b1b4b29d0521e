use std::fmt;

use klr_types::{LedgerEntryType, LedgerKey};
use serde::Serialize;

use crate::error::LocatorError;
use crate::shape::ShapeKind;

/// The object type a resolved key is required to hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ExpectedType {
    /// Whatever is stored at the key is acceptable.
    Any,
    Type(LedgerEntryType),
}

impl ExpectedType {
    /// Whether an object of `actual` type satisfies this expectation.
    pub fn accepts(self, actual: LedgerEntryType) -> bool {
        match self {
            Self::Any => true,
            Self::Type(expected) => expected == actual,
        }
    }
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Type(t) => f.write_str(t.name()),
        }
    }
}

/// Result of classifying and validating one request. Never partial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Resolved {
        shape: ShapeKind,
        key: LedgerKey,
        expected: ExpectedType,
    },
    Rejected {
        shape: ShapeKind,
        error: LocatorError,
    },
}

impl ValidationOutcome {
    pub fn shape(&self) -> ShapeKind {
        match self {
            Self::Resolved { shape, .. } | Self::Rejected { shape, .. } => *shape,
        }
    }

    pub fn key(&self) -> Option<&LedgerKey> {
        match self {
            Self::Resolved { key, .. } => Some(key),
            Self::Rejected { .. } => None,
        }
    }

    pub fn error(&self) -> Option<LocatorError> {
        match self {
            Self::Resolved { .. } => None,
            Self::Rejected { error, .. } => Some(*error),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}
