//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Host "started" notification (service.rs):
//!     Build runtime → Bind listener → Build routes → Serve → Running
//!
//! Host "stopped" notification (service.rs):
//!     Stop accepting → Drain in-flight (bounded grace) → Release socket
//! ```
//!
//! # Design Decisions
//! - The host drives the API from sync code; the API owns its runtime
//! - Stop is fanned out over a broadcast channel owned by the service
//! - Bind failure disables the API for the session, never the host

pub mod service;

pub use service::{ApiService, ServiceState, StartError};
