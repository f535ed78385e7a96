//! Notes API
//!
//! A small CRUD HTTP API for short text notes:
//! - In-memory note storage, gone after a restart
//! - Request validation with per-field error details
//! - Paginated listing with case-insensitive keyword search
//! - A uniform JSON error envelope for every failure

pub mod api;
pub mod notes;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::{Context, Result};
use api::handlers::{NotesState, ServerState};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: ServerYamlConfig,
    pub logging: LoggingYamlConfig,
}

/// Server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerYamlConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerYamlConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingYamlConfig {
    /// `tracing_subscriber::EnvFilter` directives; `RUST_LOG` wins when set
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingYamlConfig {
    fn default() -> Self {
        Self {
            filter: "info,notes_api=debug,tower_http=debug".into(),
            json: false,
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub log_filter: String,
    pub log_json: bool,
    /// How the YAML layer was resolved
    pub source: ConfigSource,
}

/// Outcome of looking for the YAML config file
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// No readable file at this path
    Missing(PathBuf),
    /// The file exists but is not valid config
    Invalid { path: PathBuf, error: String },
}

impl ConfigSource {
    /// Report where the config came from. Call once a subscriber is installed.
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => {
                tracing::info!("Loaded config from {}", path.display());
            }
            ConfigSource::Missing(path) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
            }
            ConfigSource::Invalid { path, error } => {
                tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), error);
            }
        }
    }
}

impl Config {
    /// Load configuration from environment variables and `config.yaml` in CWD.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. A missing or
    /// unparsable file falls back to defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let (yaml, source) = Self::load_yaml(yaml_path);

        let server_port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("SERVER_PORT is not a valid port: {}", raw))?,
            Err(_) => yaml.server.port,
        };

        Ok(Self {
            server_host: std::env::var("SERVER_HOST").unwrap_or(yaml.server.host),
            server_port,
            log_filter: yaml.logging.filter,
            log_json: std::env::var("LOG_JSON")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(yaml.logging.json),
            source,
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> (YamlConfig, ConfigSource) {
        let path = yaml_path.unwrap_or(Path::new("config.yaml")).to_path_buf();

        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => (config, ConfigSource::File(path)),
                Err(e) => (
                    YamlConfig::default(),
                    ConfigSource::Invalid {
                        path,
                        error: e.to_string(),
                    },
                ),
            },
            Err(_) => (YamlConfig::default(), ConfigSource::Missing(path)),
        }
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

// ============================================================================
// Server
// ============================================================================

/// Bind to the configured address and serve until Ctrl-C / SIGTERM
pub async fn start_server(config: Config) -> Result<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    serve(listener, Arc::new(ServerState::in_memory())).await
}

/// Serve the API on an already-bound listener until a shutdown signal arrives
pub async fn serve(listener: TcpListener, state: NotesState) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("Notes API listening on http://{}", addr);

    axum::serve(listener, api::create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod config_tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_yaml_config_loading() {
        let yaml = r#"
server:
  host: 127.0.0.1
  port: 9090

logging:
  filter: warn
  json: true
"#;

        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.filter, "warn");
        assert!(config.logging.json);
    }

    #[test]
    fn test_yaml_defaults() {
        let config = YamlConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.logging.filter.contains("notes_api=debug"));
        assert!(!config.logging.json);
    }

    #[test]
    fn test_partial_yaml_keeps_section_defaults() {
        let yaml = r#"
server:
  port: 8081
"#;
        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(!config.logging.json);
    }

    /// Combined test for YAML file loading and env var overrides.
    /// Runs as a single test to avoid parallel env var race conditions.
    #[test]
    fn test_yaml_and_env_lifecycle() {
        fn clear_env() {
            for var in &["SERVER_HOST", "SERVER_PORT", "LOG_JSON"] {
                std::env::remove_var(var);
            }
        }

        // --- Phase 1: YAML values loaded correctly ---
        let yaml = r#"
server:
  host: 127.0.0.1
  port: 9999
logging:
  json: false
"#;
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&file_path).unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        clear_env();

        let config = Config::from_yaml_and_env(Some(&file_path)).unwrap();
        assert_eq!(config.server_port, 9999);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.bind_addr(), "127.0.0.1:9999");
        assert!(!config.log_json);
        assert_eq!(config.source, ConfigSource::File(file_path.clone()));

        // --- Phase 2: Env vars override YAML ---
        std::env::set_var("SERVER_PORT", "7777");
        std::env::set_var("LOG_JSON", "true");

        let config = Config::from_yaml_and_env(Some(&file_path)).unwrap();
        assert_eq!(config.server_port, 7777);
        assert!(config.log_json);
        // YAML value still used where no env override
        assert_eq!(config.server_host, "127.0.0.1");

        // --- Phase 3: Invalid port in env is an error ---
        std::env::set_var("SERVER_PORT", "not-a-port");
        assert!(Config::from_yaml_and_env(Some(&file_path)).is_err());

        clear_env();

        // --- Phase 4: Unparsable YAML → defaults ---
        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "server: [unclosed").unwrap();
        let config = Config::from_yaml_and_env(Some(&broken)).unwrap();
        assert_eq!(config.server_port, 3000);
        assert!(matches!(
            config.source,
            ConfigSource::Invalid { ref path, ref error } if *path == broken && !error.is_empty()
        ));

        // --- Phase 5: No YAML file → defaults ---
        let nonexistent = Path::new("/tmp/nonexistent-notes-config-12345.yaml");
        let config = Config::from_yaml_and_env(Some(nonexistent)).unwrap();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.source, ConfigSource::Missing(nonexistent.to_path_buf()));
    }
}
