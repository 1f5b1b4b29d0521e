use serde::{Serialize, Serializer};

/// Request-local failure kinds of the JSON protocol.
///
/// The first six are produced by classification; `EntryNotFound` and
/// `UnexpectedLedgerType` are produced once a resolved key has been looked
/// up. All of them are reported in-band by their [`wire_name`].
///
/// [`wire_name`]: LocatorError::wire_name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LocatorError {
    /// No recognized shape and no usable positional form.
    #[error("unknown option")]
    UnknownOption,

    /// Wrong types, missing or conflicting sub-fields, undecodable hex.
    #[error("malformed request")]
    MalformedRequest,

    #[error("malformed address")]
    MalformedAddress,

    #[error("malformed owner")]
    MalformedOwner,

    #[error("malformed authorized")]
    MalformedAuthorized,

    #[error("malformed currency")]
    MalformedCurrency,

    /// The key is valid but nothing is stored there.
    #[error("entry not found")]
    EntryNotFound,

    /// Something is stored at the key, but not the kind of object the
    /// request asked for.
    #[error("unexpected ledger type")]
    UnexpectedLedgerType,
}

impl LocatorError {
    /// The `error` token reported by the JSON protocol.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::UnknownOption => "unknownOption",
            Self::MalformedRequest => "malformedRequest",
            Self::MalformedAddress => "malformedAddress",
            Self::MalformedOwner => "malformedOwner",
            Self::MalformedAuthorized => "malformedAuthorized",
            Self::MalformedCurrency => "malformedCurrency",
            Self::EntryNotFound => "entryNotFound",
            Self::UnexpectedLedgerType => "unexpectedLedgerType",
        }
    }

    /// Whether the failure is the caller's fault rather than a lookup miss.
    pub const fn is_argument_error(self) -> bool {
        !matches!(self, Self::EntryNotFound | Self::UnexpectedLedgerType)
    }
}

impl Serialize for LocatorError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}
