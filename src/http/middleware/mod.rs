//! Request-admission middleware for protected routes.
//!
//! Strict per-request order, outermost first:
//! 1. CORS preflight short-circuit (see `http::server`)
//! 2. auth.rs: 401 before any other work
//! 3. rate_limit.rs: 429 before the handler runs
//!
//! Public routes (`/health`, `/server-info`) skip both stages.

pub mod auth;
pub mod rate_limit;

pub use auth::auth_middleware;
pub use rate_limit::rate_limit_middleware;
