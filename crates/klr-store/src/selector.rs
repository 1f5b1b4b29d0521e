use std::fmt;

use klr_types::LedgerKey;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LedgerSelectError;

pub const LEDGER_HASH_FIELD: &str = "ledger_hash";
pub const LEDGER_INDEX_FIELD: &str = "ledger_index";

/// Which ledger a request should be answered from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerSelector {
    /// The newest ledger known to the source.
    #[default]
    Current,
    /// The newest closed ledger.
    Closed,
    /// The newest ledger marked validated.
    Validated,
    Sequence(u32),
    Hash(LedgerKey),
}

impl LedgerSelector {
    /// Read the selector fields of a JSON request.
    ///
    /// `ledger_hash` wins over `ledger_index`; with neither present the
    /// current ledger is selected.
    pub fn from_params(params: &Map<String, Value>) -> Result<Self, LedgerSelectError> {
        if let Some(hash) = params.get(LEDGER_HASH_FIELD) {
            let hash = hash
                .as_str()
                .ok_or_else(|| LedgerSelectError::InvalidParams("ledgerHashNotString".into()))?;
            return LedgerKey::from_hex(hash)
                .map(Self::Hash)
                .map_err(|_| LedgerSelectError::InvalidParams("ledgerHashMalformed".into()));
        }

        match params.get(LEDGER_INDEX_FIELD) {
            None => Ok(Self::Current),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(Self::Sequence)
                .ok_or_else(|| LedgerSelectError::InvalidParams("ledgerIndexMalformed".into())),
            Some(Value::String(s)) => match s.as_str() {
                "current" => Ok(Self::Current),
                "closed" => Ok(Self::Closed),
                "validated" => Ok(Self::Validated),
                other => other
                    .parse::<u32>()
                    .map(Self::Sequence)
                    .map_err(|_| LedgerSelectError::InvalidParams("ledgerIndexMalformed".into())),
            },
            Some(_) => Err(LedgerSelectError::InvalidParams(
                "ledgerIndexMalformed".into(),
            )),
        }
    }
}

impl fmt::Display for LedgerSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Closed => write!(f, "closed"),
            Self::Validated => write!(f, "validated"),
            Self::Sequence(seq) => write!(f, "#{seq}"),
            Self::Hash(hash) => write!(f, "{}", hash.short_hex()),
        }
    }
}
