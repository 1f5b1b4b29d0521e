use klr_keylet::KeyDeriver;
use klr_locator::{classify, LocatorRequest};
use klr_store::{LedgerInfo, LedgerSelectError, LedgerSelector, LedgerSource};
use serde_json::{Map, Value};

use crate::resolve::{field, resolve};

/// JSON protocol entry point.
///
/// Selects the ledger, classifies the locator, resolves it, and returns
/// the response object. A ledger selection failure is returned as-is and
/// the locator is never examined.
pub fn ledger_entry(
    params: &Map<String, Value>,
    source: &dyn LedgerSource,
    deriver: &dyn KeyDeriver,
) -> Value {
    let view = match LedgerSelector::from_params(params)
        .and_then(|selector| source.select(&selector))
    {
        Ok(view) => view,
        Err(e) => {
            tracing::debug!(error = %e, "ledger selection failed");
            return selection_error(&e);
        }
    };

    let request = LocatorRequest::new(params.clone());
    let outcome = classify(&request, deriver);

    let mut out = ledger_fields(view.info());
    out.extend(resolve(&outcome, view.as_ref(), request.binary()).into_fields());
    Value::Object(out)
}

/// `{error, error_message}` for a failed ledger selection.
pub fn selection_error(error: &LedgerSelectError) -> Value {
    let mut out = Map::new();
    out.insert(field::ERROR.into(), Value::String(error.wire_name().into()));
    out.insert(
        field::ERROR_MESSAGE.into(),
        Value::String(error.message().into()),
    );
    Value::Object(out)
}

fn ledger_fields(info: &LedgerInfo) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert(field::LEDGER_INDEX.into(), Value::from(info.seq));
    out.insert(field::LEDGER_HASH.into(), Value::String(info.hash.to_hex()));
    out.insert(field::VALIDATED.into(), Value::Bool(info.validated));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use klr_keylet::{Keylet, StandardKeyDeriver};
    use klr_store::{InMemoryLedgerSource, InMemorySnapshot};
    use klr_types::{AccountId, Currency, LedgerEntry, LedgerEntryType, LedgerKey};
    use serde_json::json;

    fn alice() -> AccountId {
        AccountId::from_bytes([0xa1; 20])
    }

    fn bob() -> AccountId {
        AccountId::from_bytes([0xb0; 20])
    }

    fn usd() -> Currency {
        Currency::from_code("USD").unwrap()
    }

    /// Ledger 4 (validated) holds Alice's account root; ledger 5 adds a
    /// trust line stored where Alice's escrow 5 would live, plus the same
    /// trust line at its proper key.
    fn source() -> InMemoryLedgerSource {
        let account_root = LedgerEntry::new(LedgerEntryType::AccountRoot)
            .with_field("Account", alice().to_base58())
            .with_field("Balance", "1000");
        let trust_line = LedgerEntry::new(LedgerEntryType::RippleState)
            .with_field("Balance", json!({"currency": "USD", "value": "5"}));

        let source = InMemoryLedgerSource::new();
        source
            .insert(
                InMemorySnapshot::builder(4)
                    .validated(true)
                    .with_entry(Keylet::account(&alice()).key, account_root.clone())
                    .unwrap()
                    .build()
                    .unwrap(),
            )
            .unwrap();
        source
            .insert(
                InMemorySnapshot::builder(5)
                    .with_entry(Keylet::account(&alice()).key, account_root)
                    .unwrap()
                    .with_entry(Keylet::escrow(&alice(), 5).key, trust_line.clone())
                    .unwrap()
                    .with_entry(Keylet::line(&alice(), &bob(), &usd()).key, trust_line)
                    .unwrap()
                    .build()
                    .unwrap(),
            )
            .unwrap();
        source
    }

    fn call(params: Value) -> Value {
        ledger_entry(params.as_object().unwrap(), &source(), &StandardKeyDeriver)
    }

    #[test]
    fn account_root_found() {
        let out = call(json!({"account_root": alice().to_base58()}));
        assert_eq!(out["index"], Keylet::account(&alice()).key.to_hex());
        assert_eq!(out["node"]["Balance"], "1000");
        assert_eq!(out["node"]["LedgerEntryType"], "AccountRoot");
        assert_eq!(out["ledger_index"], 5);
        assert_eq!(out["validated"], false);
        assert!(out.get("error").is_none());
    }

    #[test]
    fn account_root_missing_is_entry_not_found() {
        let out = call(json!({"account_root": bob().to_base58()}));
        assert_eq!(out["error"], "entryNotFound");
        assert!(out.get("index").is_none());
        assert!(out.get("node").is_none());
    }

    #[test]
    fn escrow_holding_trust_line_is_unexpected_type() {
        let out = call(json!({"escrow": {"owner": alice().to_base58(), "seq": 5}}));
        assert_eq!(out["error"], "unexpectedLedgerType");
        assert!(out.get("node").is_none());
        assert!(out.get("node_binary").is_none());
        assert!(out.get("index").is_none());
    }

    #[test]
    fn zero_key_yields_no_index_or_node() {
        let out = call(json!({"params": ["00".repeat(32)]}));
        assert!(out.get("index").is_none());
        assert!(out.get("node").is_none());
        assert!(out.get("error").is_none());
        assert_eq!(out["ledger_index"], 5);
    }

    #[test]
    fn binary_flag_renders_node_binary() {
        let out = call(json!({"account_root": alice().to_base58(), "binary": true}));
        let hex = out["node_binary"].as_str().unwrap();
        let entry = LedgerEntry::from_binary(&hex::decode(hex).unwrap()).unwrap();
        assert_eq!(entry.entry_type(), LedgerEntryType::AccountRoot);
        assert!(out.get("node").is_none());
    }

    #[test]
    fn index_round_trip_returns_same_object() {
        let by_shape = call(json!({
            "ripple_state": {"accounts": [bob().to_base58(), alice().to_base58()], "currency": "USD"}
        }));
        let index = by_shape["index"].as_str().unwrap().to_string();
        let by_index = call(json!({ "index": index }));
        assert_eq!(by_shape["node"], by_index["node"]);
        assert_eq!(by_shape["index"], by_index["index"]);
    }

    #[test]
    fn ledger_selection_by_index() {
        let out = call(json!({"account_root": alice().to_base58(), "ledger_index": "validated"}));
        assert_eq!(out["ledger_index"], 4);
        assert_eq!(out["validated"], true);

        // The trust line only exists in ledger 5.
        let line = Keylet::line(&alice(), &bob(), &usd()).key.to_hex();
        let out = call(json!({"index": line, "ledger_index": 4}));
        assert_eq!(out["error"], "entryNotFound");
    }

    #[test]
    fn ledger_selection_by_hash() {
        let source = source();
        let view = source.select(&LedgerSelector::Sequence(4)).unwrap();
        let params = json!({
            "account_root": alice().to_base58(),
            "ledger_hash": view.info().hash.to_hex(),
        });
        let out = ledger_entry(params.as_object().unwrap(), &source, &StandardKeyDeriver);
        assert_eq!(out["ledger_index"], 4);
        assert_eq!(out["ledger_hash"], view.info().hash.to_hex());
    }

    #[test]
    fn selection_failure_is_returned_verbatim() {
        // The locator is malformed too, but selection fails first.
        let out = call(json!({"account_root": "bad", "ledger_index": 99}));
        assert_eq!(
            out,
            json!({"error": "lgrNotFound", "error_message": "ledgerNotFound"})
        );

        let out = call(json!({"account_root": "bad", "ledger_index": "latest"}));
        assert_eq!(out["error"], "invalidParams");
        assert!(out.get("ledger_index").is_none());
    }

    #[test]
    fn validation_error_keeps_ledger_fields() {
        let out = call(json!({"directory": {"owner": alice().to_base58(), "dir_root": LedgerKey::zero().to_hex()}}));
        assert_eq!(out["error"], "malformedRequest");
        assert_eq!(out["ledger_index"], 5);
    }

    #[test]
    fn emitted_txn_bad_hex_is_looked_up() {
        let out = call(json!({"emitted_txn": "zz"}));
        assert_eq!(out["error"], "entryNotFound");
        assert!(out.get("index").is_none());
    }

    #[test]
    fn unknown_option() {
        let out = call(json!({"nothing": 1}));
        assert_eq!(out["error"], "unknownOption");
    }
}
