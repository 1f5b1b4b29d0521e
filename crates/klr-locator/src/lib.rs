//! Locator classification for KLR.
//!
//! A client identifies one ledger object by a loosely-typed JSON locator:
//! a raw index, an account, an account plus sequence, two accounts plus a
//! currency, and so on. This crate turns such a request into a
//! [`ValidationOutcome`]: either the canonical [`LedgerKey`] together with
//! the object type expected there, or a [`LocatorError`].
//!
//! # Pipeline
//!
//! 1. [`ShapeKind::detect`] picks the shape from the request's trigger field.
//! 2. Shape-specific validation checks the sub-fields.
//! 3. The injected [`KeyDeriver`] derives the key from validated identifiers.
//!
//! ```rust
//! use klr_locator::{Locator, LocatorRequest, ShapeKind};
//! use serde_json::json;
//!
//! let locator = Locator::standard();
//! let request = LocatorRequest::from_value(json!({
//!     "escrow": { "owner": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh", "seq": 5 }
//! })).unwrap();
//! let outcome = locator.classify(&request);
//! assert!(outcome.is_resolved());
//! assert_eq!(outcome.shape(), ShapeKind::Escrow);
//! ```
//!
//! [`LedgerKey`]: klr_types::LedgerKey
//! [`KeyDeriver`]: klr_keylet::KeyDeriver

pub mod classify;
pub mod error;
mod fields;
pub mod outcome;
pub mod request;
pub mod shape;
mod validate;

pub use classify::{classify, Locator};
pub use error::LocatorError;
pub use outcome::{ExpectedType, ValidationOutcome};
pub use request::{LocatorRequest, BINARY_FIELD, PARAMS_FIELD};
pub use shape::ShapeKind;
