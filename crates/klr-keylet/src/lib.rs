//! Keylet derivation for KLR.
//!
//! A keylet pairs a [`LedgerKey`](klr_types::LedgerKey) with the entry
//! type expected at that key. Keys are SHA-512Half digests over a 16-bit
//! ledger namespace followed by the object's identifying fields, so two
//! different kinds of object can never collide even when their fields do.
//!
//! The locator only ever sees the [`KeyDeriver`] trait; the standard
//! implementation is [`StandardKeyDeriver`].

pub mod deriver;
pub mod hasher;
pub mod keylet;
pub mod namespace;

pub use deriver::{KeyDeriver, KeyletRequest, StandardKeyDeriver};
pub use hasher::{sha512_half, KeyHasher};
pub use keylet::Keylet;
pub use namespace::LedgerNamespace;
