use std::sync::Arc;

use klr_keylet::{KeyDeriver, StandardKeyDeriver};
use klr_store::LedgerSource;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn LedgerSource>,
    pub deriver: Arc<dyn KeyDeriver>,
    pub default_binary: bool,
}

impl AppState {
    /// State using the standard key derivation.
    pub fn new(source: Arc<dyn LedgerSource>) -> Self {
        Self {
            source,
            deriver: Arc::new(StandardKeyDeriver),
            default_binary: false,
        }
    }

    pub fn with_default_binary(mut self, default_binary: bool) -> Self {
        self.default_binary = default_binary;
        self
    }
}
