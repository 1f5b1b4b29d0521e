use std::sync::Arc;

use tokio::net::TcpListener;

use klr_store::{load_source, LedgerSource};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Ledger entry server.
pub struct KlrServer {
    config: ServerConfig,
    state: AppState,
}

impl KlrServer {
    pub fn new(config: ServerConfig, source: Arc<dyn LedgerSource>) -> Self {
        let state = AppState::new(source).with_default_binary(config.default_binary);
        Self { config, state }
    }

    /// Build a server whose ledgers come from the configured fixture files.
    pub fn from_config(config: ServerConfig) -> ServerResult<Self> {
        if config.ledger_fixtures.is_empty() {
            return Err(ServerError::Config("no ledger fixtures configured".into()));
        }
        let source = load_source(&config.ledger_fixtures)?;
        Ok(Self::new(config, Arc::new(source)))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("KLR server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
