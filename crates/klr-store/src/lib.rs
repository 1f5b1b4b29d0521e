//! Read-only ledger snapshots for KLR.
//!
//! Resolution never mutates the ledger: it selects one point-in-time
//! snapshot and reads at most one entry from it. This crate defines those
//! two seams and an in-memory implementation of each.
//!
//! # Traits
//!
//! - [`ReadView`] -- a consistent snapshot answering `read(key)`
//! - [`LedgerSource`] -- turns a [`LedgerSelector`] into a snapshot
//!
//! # Backends
//!
//! - [`InMemorySnapshot`] -- immutable `BTreeMap` snapshot built with [`SnapshotBuilder`]
//! - [`InMemoryLedgerSource`] -- ordered set of snapshots keyed by sequence
//!
//! Snapshots can be loaded from JSON fixture files, see [`fixture`].
//!
//! # Design Rules
//!
//! 1. Snapshots are immutable once built.
//! 2. Concurrent reads are always safe.
//! 3. The store never interprets entry contents.

pub mod error;
pub mod fixture;
pub mod memory;
pub mod selector;
pub mod traits;

pub use error::{LedgerSelectError, StoreError, StoreResult};
pub use fixture::{load_snapshot, load_source, snapshot_from_json, snapshot_from_str};
pub use memory::{InMemoryLedgerSource, InMemorySnapshot, SnapshotBuilder};
pub use selector::{LedgerSelector, LEDGER_HASH_FIELD, LEDGER_INDEX_FIELD};
pub use traits::{LedgerInfo, LedgerSource, ReadView};
