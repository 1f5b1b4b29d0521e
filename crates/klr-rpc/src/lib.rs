//! Ledger entry resolution for KLR.
//!
//! Two entry points share one key space:
//!
//! - [`ledger_entry`] -- the JSON protocol. Selects a ledger, classifies the
//!   locator, looks the key up, applies the expected-type policy, and renders
//!   `{index, node}`, `{index, node_binary}` or `{error}`.
//! - [`ledger_entry_binary`] -- the strict binary protocol. Looks up a raw
//!   key with no type check and reports failures through a [`Status`].
//!   Messages are framed by [`BinaryCodec`].
//!
//! The building blocks [`lookup`], [`render`] and [`resolve`] are exposed
//! for callers that already hold a snapshot.

pub mod binary;
pub mod codec;
pub mod error;
pub mod ledger_entry;
pub mod resolve;

pub use binary::{
    ledger_entry_binary, GetLedgerEntryRequest, GetLedgerEntryResponse, LedgerObject, Status,
    StatusCode,
};
pub use codec::{BinaryCodec, BinaryMessage, MAX_MESSAGE_SIZE, PROTOCOL_VERSION};
pub use error::{RpcError, RpcResult};
pub use ledger_entry::{ledger_entry, selection_error};
pub use resolve::{lookup, render, resolve, LookupResult, RenderedResponse};
