use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Artifact directory, created at startup
    pub output_dir: PathBuf,
}

impl ServerState {
    /// Create new server state.
    ///
    /// Creates the output directory before the server starts accepting
    /// requests, so handlers never race against first-write setup.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let output_dir = config.output_dir.clone();
        std::fs::create_dir_all(&output_dir).map_err(|err| {
            ServerError::Config(format!(
                "cannot create output directory {}: {err}",
                output_dir.display()
            ))
        })?;

        Ok(Self {
            config: Arc::new(config),
            output_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            output_dir: dir.path().join("scans/output"),
            ..ServerConfig::default()
        };

        let state = ServerState::new(config).unwrap();
        assert!(state.output_dir.is_dir());
    }
}
