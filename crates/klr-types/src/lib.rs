//! Foundation types for KLR, the ledger entry locator and resolver.
//!
//! Every other KLR crate depends on `klr-types`. It owns the fixed-width
//! identifiers of the ledger and their textual codecs, plus the ledger
//! entry representation handed out by snapshots.
//!
//! # Key Types
//!
//! - [`LedgerKey`] -- 256-bit canonical key into the ledger state map
//! - [`AccountId`] -- 160-bit account identifier with base58check codec
//! - [`Currency`] -- 160-bit currency identifier
//! - [`PublicKey`] -- 33-byte public key encoding (secp256k1 or ed25519)
//! - [`LedgerEntryType`] -- runtime type tag of a ledger object
//! - [`LedgerEntry`] -- a ledger object with structured and binary encoders

pub mod account;
pub mod currency;
pub mod entry;
pub mod entry_type;
pub mod error;
pub mod key;
pub mod public_key;

pub use account::AccountId;
pub use currency::{Currency, NATIVE_CURRENCY_CODE};
pub use entry::LedgerEntry;
pub use entry_type::LedgerEntryType;
pub use error::TypeError;
pub use key::LedgerKey;
pub use public_key::{KeyType, PublicKey, PUBLIC_KEY_LEN};
