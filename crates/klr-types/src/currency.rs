use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::key::decode_hex_array;

/// Currency code of the native asset. Maps to the all-zero currency.
pub const NATIVE_CURRENCY_CODE: &str = "XAH";

/// Characters permitted in a three-letter currency code.
const ISO_CHARSET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789<>(){}[]|?!@#$%^&*";

/// Offset of the three code bytes inside the 160-bit currency.
const ISO_CODE_OFFSET: usize = 12;

/// 160-bit currency identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Currency([u8; 20]);

impl Currency {
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// The native currency (all zeros).
    pub const fn native() -> Self {
        Self([0u8; 20])
    }

    pub fn is_native(&self) -> bool {
        self.0 == [0u8; 20]
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse a currency code.
    ///
    /// Accepts the empty string or the native code (native currency), a
    /// three-character code from the ISO character set, or 40 hex digits.
    pub fn from_code(code: &str) -> Result<Self, TypeError> {
        if code.is_empty() || code == NATIVE_CURRENCY_CODE {
            return Ok(Self::native());
        }

        if code.len() == 3 && code.chars().all(|c| ISO_CHARSET.contains(c)) {
            let mut bytes = [0u8; 20];
            bytes[ISO_CODE_OFFSET..ISO_CODE_OFFSET + 3].copy_from_slice(code.as_bytes());
            return Ok(Self(bytes));
        }

        if code.len() == 40 {
            return decode_hex_array::<20>(code)
                .map(Self)
                .map_err(|_| TypeError::InvalidCurrency(code.to_string()));
        }

        Err(TypeError::InvalidCurrency(code.to_string()))
    }

    /// The three-letter code, if this currency is in standard form.
    pub fn iso_code(&self) -> Option<&str> {
        let (head, rest) = self.0.split_at(ISO_CODE_OFFSET);
        let (code, tail) = rest.split_at(3);
        if self.is_native() || head.iter().any(|b| *b != 0) || tail.iter().any(|b| *b != 0) {
            return None;
        }
        std::str::from_utf8(code).ok()
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({self})")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            return write!(f, "{NATIVE_CURRENCY_CODE}");
        }
        match self.iso_code() {
            Some(code) => write!(f, "{code}"),
            None => write!(f, "{}", hex::encode_upper(self.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_native_code_are_native() {
        assert!(Currency::from_code("").unwrap().is_native());
        assert!(Currency::from_code(NATIVE_CURRENCY_CODE).unwrap().is_native());
    }

    #[test]
    fn three_letter_code_layout() {
        let usd = Currency::from_code("USD").unwrap();
        let bytes = usd.as_bytes();
        assert_eq!(&bytes[12..15], b"USD");
        assert!(bytes[..12].iter().all(|b| *b == 0));
        assert!(bytes[15..].iter().all(|b| *b == 0));
        assert_eq!(usd.iso_code(), Some("USD"));
        assert_eq!(usd.to_string(), "USD");
    }

    #[test]
    fn three_letter_code_is_case_sensitive() {
        assert_ne!(
            Currency::from_code("usd").unwrap(),
            Currency::from_code("USD").unwrap()
        );
    }

    #[test]
    fn hex_code() {
        let hex = "0158415500000000C1F76FF6ECB0BAC600000000";
        let c = Currency::from_code(hex).unwrap();
        assert_eq!(c.iso_code(), None);
        assert_eq!(c.to_string(), hex);
    }

    #[test]
    fn rejects_bad_codes() {
        let not_hex = "Z".repeat(40);
        for bad in ["US", "USDX", "U D", "U-D", not_hex.as_str()] {
            assert!(
                matches!(Currency::from_code(bad), Err(TypeError::InvalidCurrency(_))),
                "{bad} should be rejected"
            );
        }
    }
}
