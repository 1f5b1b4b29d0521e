use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use klr_types::LedgerEntryType;

use crate::outcome::ExpectedType;
use crate::request::{LocatorRequest, PARAMS_FIELD};

/// The request forms a locator can take.
///
/// Each triggered shape is selected by the presence of its own top-level
/// field; no two shapes share a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    ByIndex,
    AccountRoot,
    Check,
    DepositPreauth,
    Directory,
    Escrow,
    EmittedTxn,
    ImportVlSeq,
    Offer,
    PaymentChannel,
    UriToken,
    TrustLine,
    Ticket,
    Hook,
    HookDefinition,
    HookState,
    NftPage,
    /// `params: [<hex>]` with no trigger field present.
    LegacyPositional,
    Unrecognized,
}

impl ShapeKind {
    /// Triggered shapes in the order they are probed.
    pub const TRIGGERED: [ShapeKind; 17] = [
        Self::ByIndex,
        Self::AccountRoot,
        Self::Check,
        Self::DepositPreauth,
        Self::Directory,
        Self::Escrow,
        Self::EmittedTxn,
        Self::ImportVlSeq,
        Self::Offer,
        Self::PaymentChannel,
        Self::UriToken,
        Self::TrustLine,
        Self::Ticket,
        Self::Hook,
        Self::HookDefinition,
        Self::HookState,
        Self::NftPage,
    ];

    /// The top-level field that selects this shape.
    pub const fn trigger(self) -> Option<&'static str> {
        Some(match self {
            Self::ByIndex => "index",
            Self::AccountRoot => "account_root",
            Self::Check => "check",
            Self::DepositPreauth => "deposit_preauth",
            Self::Directory => "directory",
            Self::Escrow => "escrow",
            Self::EmittedTxn => "emitted_txn",
            Self::ImportVlSeq => "import_vlseq",
            Self::Offer => "offer",
            Self::PaymentChannel => "payment_channel",
            Self::UriToken => "uri_token",
            Self::TrustLine => "ripple_state",
            Self::Ticket => "ticket",
            Self::Hook => "hook",
            Self::HookDefinition => "hook_definition",
            Self::HookState => "hook_state",
            Self::NftPage => "nft_page",
            Self::LegacyPositional | Self::Unrecognized => return None,
        })
    }

    /// The object type a successful resolution must find at its key.
    pub const fn expected_type(self) -> ExpectedType {
        let t = match self {
            Self::ByIndex | Self::NftPage | Self::LegacyPositional | Self::Unrecognized => {
                return ExpectedType::Any
            }
            Self::AccountRoot => LedgerEntryType::AccountRoot,
            Self::Check => LedgerEntryType::Check,
            Self::DepositPreauth => LedgerEntryType::DepositPreauth,
            Self::Directory => LedgerEntryType::DirectoryNode,
            Self::Escrow => LedgerEntryType::Escrow,
            Self::EmittedTxn => LedgerEntryType::EmittedTxn,
            Self::ImportVlSeq => LedgerEntryType::ImportVlSeq,
            Self::Offer => LedgerEntryType::Offer,
            Self::PaymentChannel => LedgerEntryType::PayChannel,
            Self::UriToken => LedgerEntryType::UriToken,
            Self::TrustLine => LedgerEntryType::RippleState,
            Self::Ticket => LedgerEntryType::Ticket,
            Self::Hook => LedgerEntryType::Hook,
            Self::HookDefinition => LedgerEntryType::HookDefinition,
            Self::HookState => LedgerEntryType::HookState,
        };
        ExpectedType::Type(t)
    }

    /// Determine which shape a request uses.
    ///
    /// The first trigger field present wins. With none present, a `params`
    /// array holding exactly one string is the legacy positional form.
    pub fn detect(request: &LocatorRequest) -> Self {
        for shape in Self::TRIGGERED {
            if let Some(field) = shape.trigger() {
                if request.contains(field) {
                    return shape;
                }
            }
        }

        match request.get(PARAMS_FIELD) {
            Some(Value::Array(items)) if items.len() == 1 && items[0].is_string() => {
                Self::LegacyPositional
            }
            _ => Self::Unrecognized,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.trigger() {
            Some(field) => f.write_str(field),
            None if *self == Self::LegacyPositional => f.write_str("params"),
            None => f.write_str("unrecognized"),
        }
    }
}
