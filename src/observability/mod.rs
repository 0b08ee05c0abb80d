//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms via the metrics facade)
//!
//! Consumers:
//!     → Log output (stdout, level from config or RUST_LOG)
//!     → Optional Prometheus scrape listener
//! ```
//!
//! # Design Decisions
//! - Request ID flows through all admission logs
//! - Metric updates are cheap (atomic increments)
//! - Exposition is opt-in so a default install has no extra listener

pub mod logging;
pub mod metrics;
