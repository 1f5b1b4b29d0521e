//! Typed readers for the sub-fields of a locator.
//!
//! Each reader maps a missing or wrong-typed value to `MalformedRequest`.
//! Semantic failures (an address that does not decode) take the error kind
//! chosen by the caller.

use klr_types::{AccountId, LedgerKey};
use serde_json::{Map, Value};

use crate::error::LocatorError;

pub(crate) type FieldResult<T> = Result<T, LocatorError>;

/// A JSON object, or `MalformedRequest`.
pub(crate) fn object(value: &Value) -> FieldResult<&Map<String, Value>> {
    value.as_object().ok_or(LocatorError::MalformedRequest)
}

/// A string, or `MalformedRequest`.
pub(crate) fn string(value: &Value) -> FieldResult<&str> {
    value.as_str().ok_or(LocatorError::MalformedRequest)
}

/// A required string member of `obj`.
pub(crate) fn required_str<'a>(obj: &'a Map<String, Value>, field: &str) -> FieldResult<&'a str> {
    obj.get(field)
        .ok_or(LocatorError::MalformedRequest)
        .and_then(string)
}

/// A required `u32` member of `obj`.
pub(crate) fn required_u32(obj: &Map<String, Value>, field: &str) -> FieldResult<u32> {
    obj.get(field)
        .ok_or(LocatorError::MalformedRequest)
        .and_then(u32_field)
}

/// A 256-bit key written as exactly 64 hex digits.
pub(crate) fn hex_key(value: &Value) -> FieldResult<LedgerKey> {
    LedgerKey::from_hex(string(value)?).map_err(|_| LocatorError::MalformedRequest)
}

/// A base58 account address; decode failures map to `invalid`.
pub(crate) fn account(address: &str, invalid: LocatorError) -> FieldResult<AccountId> {
    AccountId::from_base58(address).map_err(|_| invalid)
}

/// A non-negative integer that fits in 32 bits.
pub(crate) fn u32_field(value: &Value) -> FieldResult<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(LocatorError::MalformedRequest)
}

/// A non-negative integer that fits in 64 bits.
pub(crate) fn u64_field(value: &Value) -> FieldResult<u64> {
    value.as_u64().ok_or(LocatorError::MalformedRequest)
}
