//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → request.rs (request ID, metrics)
//!     → CORS layer / preflight short-circuit
//!     → middleware/ (auth, rate limit; protected routes only)
//!     → handlers.rs (read host snapshot, build JSON payload)
//!     → response.rs (structured error bodies on denial)
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use response::ApiError;
pub use server::ApiServer;
