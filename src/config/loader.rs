//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ApiConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", "))]
    Validation(Vec<ValidationError>),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ApiConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ApiConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Write a fully commented default configuration file if none exists.
///
/// Returns true when a file was created. An existing file is never
/// touched, so operator edits survive restarts.
pub fn ensure_config_file(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, DEFAULT_CONFIG_FILE)?;
    Ok(true)
}

/// The shipped configuration file, written on first start.
const DEFAULT_CONFIG_FILE: &str = r#"# WebInfoAPI configuration
# This file was created automatically; edit it as needed and restart
# the server for changes to take effect.

[api]
# Master switch for the whole API.
enabled = true
# Bind address (0.0.0.0 for all interfaces) and port.
host = "0.0.0.0"
port = 8080

# Each endpoint can be disabled individually. Disabled endpoints are
# not registered at all and respond 404.
[endpoints]
health = true
status = true
players = true
server_info = true
world_info = true
system = true

[cors]
enabled = true
# "*" allows any origin; otherwise a comma-separated list.
allowed_origins = "*"
allowed_methods = "GET, POST, OPTIONS"
allowed_headers = "Content-Type, Authorization, X-API-Key"
max_age_secs = 3600

[rate_limit]
enabled = true
# Per client IP, over a trailing 60-second window.
requests_per_minute = 60

[security]
# When true, protected endpoints require the API key below via
# "Authorization: Bearer <key>" or "X-API-Key: <key>".
# NOTE: authentication stays disabled while api_key is left at the
# placeholder value, even with require_auth = true.
require_auth = false
api_key = "your-secure-api-key-here"

[thread_pool]
workers = 4
max_blocking = 8
keep_alive_secs = 60

[logging]
# trace/debug/info/warn/error; RUST_LOG overrides.
level = "info"
log_requests = true

[metrics]
# Optional Prometheus exposition listener.
enabled = false
address = "127.0.0.1:9091"

[data]
# Optional field groups in /players responses.
include_coordinates = true
include_player_stats = true
"#;
