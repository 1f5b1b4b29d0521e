//! HTTP server for KLR.
//!
//! Serves the JSON and binary ledger entry protocols over snapshots loaded
//! from fixture files.
//!
//! | Method | Path | Body |
//! |---|---|---|
//! | `GET` | `/v1/health` | -- |
//! | `GET` | `/v1/info` | -- |
//! | `POST` | `/v1/ledger_entry` | JSON locator; always HTTP 200 |
//! | `POST` | `/v1/ledger_entry/binary` | framed request; 400/404 on failure |

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::KlrServer;
pub use state::AppState;
