//! WebInfoAPI: embedded HTTP telemetry API for a game server host.
//!
//! The host process implements [`host::GameHost`] and drives
//! [`lifecycle::ApiService`] from its start/stop hooks. Everything else
//! (endpoint enablement, authentication, per-client rate limiting, CORS)
//! is decided by the loaded [`config::ApiConfig`].

// Core subsystems
pub mod config;
pub mod host;
pub mod http;
pub mod telemetry;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::ApiConfig;
pub use host::GameHost;
pub use lifecycle::ApiService;

/// Version string reported by `/health`, `/status` and `/world-info`.
pub const API_VERSION: &str = "2.0.0";
