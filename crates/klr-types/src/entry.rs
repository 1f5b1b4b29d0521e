use serde_json::{Map, Value};

use crate::entry_type::LedgerEntryType;
use crate::error::TypeError;
use crate::key::LedgerKey;

/// Field name carrying the entry type in structured output.
pub const ENTRY_TYPE_FIELD: &str = "LedgerEntryType";
/// Field name carrying the entry's key in structured output.
pub const INDEX_FIELD: &str = "index";

/// A ledger object as read from a snapshot: a type tag plus its fields.
///
/// The store never interprets the fields. Two encoders are provided:
/// [`LedgerEntry::to_json`] for structured output and
/// [`LedgerEntry::to_binary`] for the canonical binary form.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerEntry {
    entry_type: LedgerEntryType,
    fields: Map<String, Value>,
}

impl LedgerEntry {
    pub fn new(entry_type: LedgerEntryType) -> Self {
        Self {
            entry_type,
            fields: Map::new(),
        }
    }

    pub fn with_fields(entry_type: LedgerEntryType, fields: Map<String, Value>) -> Self {
        Self { entry_type, fields }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn entry_type(&self) -> LedgerEntryType {
        self.entry_type
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Structured rendering: the fields plus `LedgerEntryType` and `index`.
    pub fn to_json(&self, index: &LedgerKey) -> Value {
        let mut out = self.fields.clone();
        out.insert(
            ENTRY_TYPE_FIELD.to_string(),
            Value::String(self.entry_type.name().to_string()),
        );
        out.insert(INDEX_FIELD.to_string(), Value::String(index.to_hex()));
        Value::Object(out)
    }

    /// Canonical binary form: `[u16 BE type code][UTF-8 JSON fields]`.
    pub fn to_binary(&self) -> Result<Vec<u8>, TypeError> {
        let payload =
            serde_json::to_vec(&self.fields).map_err(|e| TypeError::Serialization(e.to_string()))?;
        let mut buf = Vec::with_capacity(2 + payload.len());
        buf.extend_from_slice(&self.entry_type.code().to_be_bytes());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    /// Decode the canonical binary form.
    pub fn from_binary(data: &[u8]) -> Result<Self, TypeError> {
        if data.len() < 2 {
            return Err(TypeError::InvalidLength {
                expected: 2,
                actual: data.len(),
            });
        }
        let code = u16::from_be_bytes([data[0], data[1]]);
        let entry_type = LedgerEntryType::from_code(code)
            .ok_or_else(|| TypeError::UnknownEntryType(format!("{code:#06x}")))?;
        let fields: Map<String, Value> = serde_json::from_slice(&data[2..])
            .map_err(|e| TypeError::Serialization(e.to_string()))?;
        Ok(Self { entry_type, fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account_root() -> LedgerEntry {
        LedgerEntry::new(LedgerEntryType::AccountRoot)
            .with_field("Account", "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh")
            .with_field("Balance", "100000000")
            .with_field("Sequence", 7)
    }

    #[test]
    fn json_includes_type_and_index() {
        let key = LedgerKey::from_bytes([0x0f; 32]);
        let json = account_root().to_json(&key);
        assert_eq!(json["LedgerEntryType"], "AccountRoot");
        assert_eq!(json["index"], key.to_hex());
        assert_eq!(json["Sequence"], 7);
    }

    #[test]
    fn binary_starts_with_type_code() {
        let bytes = account_root().to_binary().unwrap();
        assert_eq!(&bytes[..2], &[0x00, 0x61]);
    }

    #[test]
    fn binary_decodes_to_same_entry() {
        let entry = account_root();
        let decoded = LedgerEntry::from_binary(&entry.to_binary().unwrap()).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn binary_rejects_truncated_input() {
        assert!(matches!(
            LedgerEntry::from_binary(&[0x00]),
            Err(TypeError::InvalidLength { .. })
        ));
    }

    #[test]
    fn binary_rejects_unknown_type_code() {
        let mut bytes = vec![0xff, 0xff];
        bytes.extend_from_slice(b"{}");
        assert!(matches!(
            LedgerEntry::from_binary(&bytes),
            Err(TypeError::UnknownEntryType(_))
        ));
    }

    #[test]
    fn field_accessors() {
        let entry = LedgerEntry::with_fields(
            LedgerEntryType::Ticket,
            json!({"TicketSequence": 3}).as_object().cloned().unwrap(),
        );
        assert_eq!(entry.entry_type(), LedgerEntryType::Ticket);
        assert_eq!(entry.field("TicketSequence"), Some(&json!(3)));
        assert!(entry.field("Missing").is_none());
        assert_eq!(entry.fields().len(), 1);
    }
}
