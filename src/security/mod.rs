//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request on a protected endpoint:
//!     → auth.rs (validate shared-secret credential)
//!     → rate_limit.rs (per-IP sliding-window admission)
//!     → Pass to handler
//! ```
//!
//! # Design Decisions
//! - Auth runs before rate limiting so rejected requests never consume
//!   quota
//! - Fail open on an unset/placeholder API key (operator safety valve,
//!   warned at startup), fail closed on everything else

pub mod auth;
pub mod rate_limit;

pub use auth::Authenticator;
pub use rate_limit::RateLimiter;
