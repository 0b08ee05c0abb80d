//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     ensure_config_file (write commented defaults on first run)
//!     → loader.rs (read + parse TOML)
//!     → validation.rs (semantic checks, all errors collected)
//!     → schema.rs types, frozen behind Arc for the process lifetime
//! ```
//!
//! # Design Decisions
//! - No hot reload: the config is immutable once accepted, so every
//!   subsystem reads it without synchronization
//! - Missing sections and fields fall back to shipped defaults

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ensure_config_file, load_config, ConfigError};
pub use schema::ApiConfig;
