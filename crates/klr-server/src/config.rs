use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Server settings, usually read from a `klr.toml` file.
///
/// ```toml
/// bind_addr = "127.0.0.1:51234"
/// ledger_fixtures = ["ledgers/100.json", "ledgers/101.json"]
/// max_body_bytes = 1048576
/// default_binary = false
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Snapshot fixture files loaded at startup.
    pub ledger_fixtures: Vec<PathBuf>,
    /// Request body limit for both endpoints.
    pub max_body_bytes: usize,
    /// Render JSON responses in binary form when a request omits `binary`.
    pub default_binary: bool,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 51234)),
            ledger_fixtures: Vec::new(),
            max_body_bytes: 1024 * 1024,
            default_binary: false,
            enable_cors: false,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load a config file. Relative fixture paths are resolved against the
    /// file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(dir) = path.parent() {
            for fixture in &mut config.ledger_fixtures {
                if fixture.is_relative() {
                    *fixture = dir.join(&*fixture);
                }
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:51234".parse::<SocketAddr>().unwrap());
        assert_eq!(c.max_body_bytes, 1024 * 1024);
        assert!(c.ledger_fixtures.is_empty());
        assert!(!c.default_binary);
        assert!(!c.enable_cors);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml_str("default_binary = true").unwrap();
        assert!(c.default_binary);
        assert_eq!(c.max_body_bytes, ServerConfig::default().max_body_bytes);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 5").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn from_file_resolves_relative_fixtures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("klr.toml");
        std::fs::write(
            &path,
            "bind_addr = \"0.0.0.0:6000\"\nledger_fixtures = [\"l1.json\", \"/abs/l2.json\"]\n",
        )
        .unwrap();

        let c = ServerConfig::from_file(&path).unwrap();
        assert_eq!(c.bind_addr.port(), 6000);
        assert_eq!(c.ledger_fixtures[0], dir.path().join("l1.json"));
        assert_eq!(c.ledger_fixtures[1], PathBuf::from("/abs/l2.json"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ServerConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
