//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the API.
//! All types derive Serde traits for deserialization from config files.
//! Every section carries defaults so a missing or partial file still
//! produces a usable configuration. The loaded config is immutable for
//! the life of the process; it is shared by `Arc` and read without locks.

use serde::{Deserialize, Serialize};

/// Root configuration for the embedded web API.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ApiConfig {
    /// Listener settings (master switch, bind host, port).
    pub api: ApiSection,

    /// Per-endpoint enablement flags.
    pub endpoints: EndpointsConfig,

    /// Cross-origin resource sharing policy.
    pub cors: CorsConfig,

    /// Per-client rate limiting.
    pub rate_limit: RateLimitConfig,

    /// Authentication settings.
    pub security: SecurityConfig,

    /// Worker pool sizing.
    pub thread_pool: ThreadPoolConfig,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// Metrics exposition settings.
    pub metrics: MetricsConfig,

    /// Data-field visibility toggles for player payloads.
    pub data: DataConfig,
}

impl ApiConfig {
    /// The address the listener binds, e.g. "0.0.0.0:8080".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// Basic API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiSection {
    /// Master switch; when false the API never starts.
    pub enabled: bool,

    /// Bind host ("0.0.0.0" for all interfaces).
    pub host: String,

    /// Bind port.
    pub port: u16,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Per-endpoint enablement. Disabled endpoints are never registered;
/// requests to their paths get the transport's default 404.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub health: bool,
    pub status: bool,
    pub players: bool,
    pub server_info: bool,
    pub world_info: bool,
    pub system: bool,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            health: true,
            status: true,
            players: true,
            server_info: true,
            world_info: true,
            system: true,
        }
    }
}

/// CORS policy, applied identically to every response including errors.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable the CORS layer.
    pub enabled: bool,

    /// Allowed origins: "*" or a comma-separated list.
    pub allowed_origins: String,

    /// Allowed methods, comma-separated.
    pub allowed_methods: String,

    /// Allowed request headers, comma-separated.
    pub allowed_headers: String,

    /// Preflight cache lifetime in seconds.
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: "*".to_string(),
            allowed_methods: "GET, POST, OPTIONS".to_string(),
            allowed_headers: "Content-Type, Authorization, X-API-Key".to_string(),
            max_age_secs: 3600,
        }
    }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting on protected endpoints.
    pub enabled: bool,

    /// Maximum requests per trailing 60-second window, per client IP.
    pub requests_per_minute: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_minute: 60,
        }
    }
}

/// Authentication configuration.
///
/// The shipped default `api_key` is a placeholder; while it (or an empty
/// key) is configured, authentication is not enforced even when
/// `require_auth` is true. This fail-open behavior prevents operators from
/// locking themselves out with an unconfigured default, and is surfaced as
/// a startup warning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Require credentials on protected endpoints.
    pub require_auth: bool,

    /// Shared-secret key matched against `Authorization: Bearer <key>`
    /// or `X-API-Key: <key>`.
    pub api_key: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            require_auth: false,
            api_key: crate::security::auth::PLACEHOLDER_API_KEY.to_string(),
        }
    }
}

/// Worker pool sizing for the API runtime.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThreadPoolConfig {
    /// Number of runtime worker threads.
    pub workers: usize,

    /// Maximum blocking threads.
    pub max_blocking: usize,

    /// Idle thread keep-alive in seconds.
    pub keep_alive_secs: u64,
}

impl Default for ThreadPoolConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            max_blocking: 8,
            keep_alive_secs: 60,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level for the crate (trace/debug/info/warn/error).
    /// `RUST_LOG` in the environment overrides this.
    pub level: String,

    /// Emit a structured log line per request.
    pub log_requests: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_requests: true,
        }
    }
}

/// Metrics exposition configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Enable the Prometheus exposition listener.
    pub enabled: bool,

    /// Address for the exposition listener.
    pub address: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: "127.0.0.1:9091".to_string(),
        }
    }
}

/// Visibility toggles for optional player-payload field groups.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// Include `position` and `biome` per player.
    pub include_coordinates: bool,

    /// Include `health`, `mana`, `player_level`, `experience` per player.
    pub include_player_stats: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            include_coordinates: true,
            include_player_stats: true,
        }
    }
}
