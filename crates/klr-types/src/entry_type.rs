use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

macro_rules! ledger_entry_types {
    ($($(#[$doc:meta])* $variant:ident = $code:literal, $name:literal;)+) => {
        /// Runtime type tag carried by every ledger object.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum LedgerEntryType {
            $($(#[$doc])* $variant,)+
        }

        impl LedgerEntryType {
            /// Every known entry type, in declaration order.
            pub const ALL: &'static [LedgerEntryType] = &[$(Self::$variant,)+];

            /// The 16-bit type code used in the binary encoding.
            pub const fn code(self) -> u16 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// The canonical name used in structured (JSON) output.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            pub fn from_code(code: u16) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

ledger_entry_types! {
    AccountRoot = 0x0061, "AccountRoot";
    /// Owner, offer book, or generic directory page.
    DirectoryNode = 0x0064, "DirectoryNode";
    /// Trust line between two accounts in one currency.
    RippleState = 0x0072, "RippleState";
    Ticket = 0x0054, "Ticket";
    SignerList = 0x0053, "SignerList";
    Offer = 0x006f, "Offer";
    LedgerHashes = 0x0068, "LedgerHashes";
    Amendments = 0x0066, "Amendments";
    FeeSettings = 0x0073, "FeeSettings";
    Escrow = 0x0075, "Escrow";
    PayChannel = 0x0078, "PayChannel";
    Check = 0x0043, "Check";
    DepositPreauth = 0x0070, "DepositPreauth";
    NegativeUnl = 0x004e, "NegativeUNL";
    NFTokenPage = 0x0050, "NFTokenPage";
    NFTokenOffer = 0x0037, "NFTokenOffer";
    Hook = 0x0048, "Hook";
    HookDefinition = 0x0044, "HookDefinition";
    HookState = 0x0076, "HookState";
    /// Transaction emitted by a hook, awaiting inclusion.
    EmittedTxn = 0x0045, "EmittedTxn";
    UriToken = 0x0055, "URIToken";
    /// Last imported validator-list sequence for one validator key.
    ImportVlSeq = 0x0049, "ImportVLSequence";
}

impl std::str::FromStr for LedgerEntryType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| TypeError::UnknownEntryType(s.to_string()))
    }
}

impl fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for LedgerEntryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(self.name())
        } else {
            serializer.serialize_u16(self.code())
        }
    }
}

impl<'de> Deserialize<'de> for LedgerEntryType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let name = String::deserialize(deserializer)?;
            name.parse().map_err(D::Error::custom)
        } else {
            let code = u16::deserialize(deserializer)?;
            Self::from_code(code).ok_or_else(|| {
                D::Error::custom(TypeError::UnknownEntryType(format!("{code:#06x}")))
            })
        }
    }
}
