//! Shape-specific validation.
//!
//! Two patterns recur. A *scalar-or-object* locator is either a hex key
//! used as-is or an object whose sub-fields identify the entry. A
//! *compound identity* is an object of several required sub-fields. In both,
//! structural checks (presence and JSON type) run before semantic checks,
//! and address fields are decoded before content fields such as currency,
//! key and namespace.

use klr_keylet::KeyletRequest;
use klr_types::{Currency, LedgerKey, PublicKey};
use serde_json::{Map, Value};

use crate::error::LocatorError;
use crate::fields::{self, FieldResult};
use crate::request::{LocatorRequest, PARAMS_FIELD};
use crate::shape::ShapeKind;

/// Where a validated locator points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Target {
    /// The caller supplied the key itself.
    Key(LedgerKey),
    /// The key must be derived from validated identifiers.
    Derive(KeyletRequest),
}

/// Validate the fields of `shape` in `request`.
pub(crate) fn validate(shape: ShapeKind, request: &LocatorRequest) -> FieldResult<Target> {
    let value = match shape {
        ShapeKind::Unrecognized => return Err(LocatorError::UnknownOption),
        ShapeKind::LegacyPositional => request
            .get(PARAMS_FIELD)
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .ok_or(LocatorError::UnknownOption)?,
        _ => shape
            .trigger()
            .and_then(|field| request.get(field))
            .ok_or(LocatorError::UnknownOption)?,
    };

    match shape {
        ShapeKind::ByIndex
        | ShapeKind::Check
        | ShapeKind::PaymentChannel
        | ShapeKind::NftPage
        | ShapeKind::LegacyPositional => fields::hex_key(value).map(Target::Key),
        ShapeKind::AccountRoot => account_root(value),
        ShapeKind::DepositPreauth => scalar_or_object(value, deposit_preauth),
        ShapeKind::Directory => directory(value),
        ShapeKind::Escrow => scalar_or_object(value, escrow),
        ShapeKind::EmittedTxn => emitted_txn(value),
        ShapeKind::ImportVlSeq => scalar_or_object(value, import_vlseq),
        ShapeKind::Offer => scalar_or_object(value, offer),
        ShapeKind::UriToken => scalar_or_object(value, uri_token),
        ShapeKind::TrustLine => trust_line(value),
        ShapeKind::Ticket => scalar_or_object(value, ticket),
        ShapeKind::Hook => scalar_or_object(value, hook),
        ShapeKind::HookDefinition => fields::hex_key(value)
            .map(|hash| Target::Derive(KeyletRequest::HookDefinition(hash))),
        ShapeKind::HookState => hook_state(value),
        ShapeKind::Unrecognized => Err(LocatorError::UnknownOption),
    }
}

/// An unparseable id still derives, from the zero id, and is looked up.
fn emitted_txn(value: &Value) -> FieldResult<Target> {
    if value.is_object() {
        return Err(LocatorError::MalformedRequest);
    }
    let id = fields::hex_key(value).unwrap_or_else(|_| LedgerKey::zero());
    Ok(Target::Derive(KeyletRequest::EmittedTxn(id)))
}

/// Hex key when `value` is not an object, otherwise `object_form`.
fn scalar_or_object(
    value: &Value,
    object_form: fn(&Map<String, Value>) -> FieldResult<Target>,
) -> FieldResult<Target> {
    match value {
        Value::Object(obj) => object_form(obj),
        scalar => fields::hex_key(scalar).map(Target::Key),
    }
}

fn account_root(value: &Value) -> FieldResult<Target> {
    let address = value.as_str().ok_or(LocatorError::MalformedAddress)?;
    let id = fields::account(address, LocatorError::MalformedAddress)?;
    if id.is_zero() {
        return Err(LocatorError::MalformedAddress);
    }
    Ok(Target::Derive(KeyletRequest::Account(id)))
}

fn deposit_preauth(obj: &Map<String, Value>) -> FieldResult<Target> {
    let owner = fields::required_str(obj, "owner")?;
    let authorized = fields::required_str(obj, "authorized")?;

    let owner = fields::account(owner, LocatorError::MalformedOwner)?;
    let authorized = fields::account(authorized, LocatorError::MalformedAuthorized)?;
    Ok(Target::Derive(KeyletRequest::DepositPreauth { owner, authorized }))
}

fn directory(value: &Value) -> FieldResult<Target> {
    let obj = match value {
        Value::Null => return Err(LocatorError::MalformedRequest),
        Value::Object(obj) => obj,
        scalar => return fields::hex_key(scalar).map(Target::Key),
    };

    let sub_index = match obj.get("sub_index") {
        Some(v) => fields::u64_field(v)?,
        None => 0,
    };

    match (obj.get("dir_root"), obj.get("owner")) {
        (Some(_), Some(_)) | (None, None) => Err(LocatorError::MalformedRequest),
        (Some(root), None) => {
            let root = fields::hex_key(root)?;
            Ok(Target::Derive(KeyletRequest::DirPage { root, sub_index }))
        }
        (None, Some(owner)) => {
            let owner = fields::string(owner)?;
            let owner = fields::account(owner, LocatorError::MalformedAddress)?;
            Ok(Target::Derive(KeyletRequest::OwnerDirPage { owner, sub_index }))
        }
    }
}

fn escrow(obj: &Map<String, Value>) -> FieldResult<Target> {
    let owner = fields::required_str(obj, "owner")?;
    let seq = fields::required_u32(obj, "seq")?;

    let owner = fields::account(owner, LocatorError::MalformedOwner)?;
    Ok(Target::Derive(KeyletRequest::Escrow { owner, seq }))
}

fn import_vlseq(obj: &Map<String, Value>) -> FieldResult<Target> {
    let hex = fields::required_str(obj, "public_key")?;
    let key = PublicKey::from_hex(hex).map_err(|_| LocatorError::MalformedRequest)?;
    Ok(Target::Derive(KeyletRequest::ImportVlSeq(key)))
}

fn offer(obj: &Map<String, Value>) -> FieldResult<Target> {
    let account = fields::required_str(obj, "account")?;
    let seq = fields::required_u32(obj, "seq")?;

    let account = fields::account(account, LocatorError::MalformedAddress)?;
    Ok(Target::Derive(KeyletRequest::Offer { account, seq }))
}

fn uri_token(obj: &Map<String, Value>) -> FieldResult<Target> {
    let issuer = fields::required_str(obj, "account")?;
    let uri = fields::required_str(obj, "uri")?;

    let issuer = fields::account(issuer, LocatorError::MalformedAddress)?;
    Ok(Target::Derive(KeyletRequest::UriToken {
        issuer,
        uri: uri.as_bytes().to_vec(),
    }))
}

fn trust_line(value: &Value) -> FieldResult<Target> {
    let obj = fields::object(value)?;
    let currency = fields::required_str(obj, "currency")?;
    let accounts = obj
        .get("accounts")
        .and_then(Value::as_array)
        .ok_or(LocatorError::MalformedRequest)?;
    let [first, second] = accounts.as_slice() else {
        return Err(LocatorError::MalformedRequest);
    };
    let (first, second) = (fields::string(first)?, fields::string(second)?);
    if first == second {
        return Err(LocatorError::MalformedRequest);
    }

    let a = fields::account(first, LocatorError::MalformedAddress)?;
    let b = fields::account(second, LocatorError::MalformedAddress)?;
    let currency = Currency::from_code(currency).map_err(|_| LocatorError::MalformedCurrency)?;
    Ok(Target::Derive(KeyletRequest::TrustLine {
        accounts: [a, b],
        currency,
    }))
}

fn ticket(obj: &Map<String, Value>) -> FieldResult<Target> {
    let account = fields::required_str(obj, "account")?;
    let ticket_seq = fields::required_u32(obj, "ticket_seq")?;

    let account = fields::account(account, LocatorError::MalformedAddress)?;
    Ok(Target::Derive(KeyletRequest::Ticket {
        account,
        ticket_seq,
    }))
}

fn hook(obj: &Map<String, Value>) -> FieldResult<Target> {
    let account = fields::required_str(obj, "account")?;
    let account = fields::account(account, LocatorError::MalformedAddress)?;
    Ok(Target::Derive(KeyletRequest::Hook(account)))
}

fn hook_state(value: &Value) -> FieldResult<Target> {
    let obj = fields::object(value)?;
    let account = fields::required_str(obj, "account")?;
    let key = fields::required_str(obj, "key")?;
    let namespace = fields::required_str(obj, "namespace_id")?;

    let account = fields::account(account, LocatorError::MalformedAddress)?;
    let key = LedgerKey::from_hex(key).map_err(|_| LocatorError::MalformedRequest)?;
    let namespace =
        LedgerKey::from_hex(namespace).map_err(|_| LocatorError::MalformedRequest)?;
    Ok(Target::Derive(KeyletRequest::HookState {
        account,
        key,
        namespace,
    }))
}
