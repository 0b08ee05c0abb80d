//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router from endpoint enablement flags, exactly once
//! - Wire up the admission pipeline (CORS preflight → auth → rate limit)
//! - Attach the ambient layers (tracing, request IDs, metrics)
//! - Serve connections until the shutdown signal
//!
//! Route construction order matters: `/health` and `/server-info` are
//! registered on a public sub-router with no admission layers (liveness
//! probes must not burn quota), everything else goes through the full
//! pipeline. The CORS layer is outermost so its headers land on every
//! response, error bodies included.

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::schema::{ApiConfig, CorsConfig};
use crate::host::HostHandle;
use crate::http::handlers;
use crate::http::middleware::{auth_middleware, rate_limit_middleware};
use crate::http::request::track_request_middleware;
use crate::security::{Authenticator, RateLimiter};
use crate::telemetry::SystemProbe;

/// Application state injected into handlers and admission middleware.
///
/// Built once at startup; everything inside is immutable or internally
/// synchronized, so clones are cheap handle copies.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub limiter: Arc<RateLimiter>,
    pub authenticator: Arc<Authenticator>,
    pub host: HostHandle,
    pub probe: Arc<SystemProbe>,
}

impl AppState {
    pub fn new(config: Arc<ApiConfig>, host: HostHandle) -> Self {
        let limiter = Arc::new(RateLimiter::new(config.rate_limit.requests_per_minute));
        let authenticator = Arc::new(Authenticator::new(&config.security));
        Self {
            config,
            limiter,
            authenticator,
            host,
            probe: Arc::new(SystemProbe::new()),
        }
    }
}

/// Build the complete router from configuration. Called exactly once,
/// before the listener starts; the route table is immutable thereafter.
pub fn build_router(config: &ApiConfig, state: AppState) -> Router {
    let mut public = Router::new();
    if config.endpoints.health {
        public = public.route("/health", get(handlers::health));
    }
    if config.endpoints.server_info {
        public = public.route("/server-info", get(handlers::server_info));
    }

    let mut protected = Router::new();
    if config.endpoints.status {
        protected = protected.route("/status", get(handlers::status));
    }
    if config.endpoints.players {
        protected = protected.route("/players", get(handlers::players));
    }
    if config.endpoints.world_info {
        protected = protected.route("/world-info", get(handlers::world_info));
    }
    if config.endpoints.system {
        protected = protected.route("/system", get(handlers::system));
    }

    // Auth is layered outside the rate limiter: unauthenticated requests
    // must never consume quota.
    let protected = protected
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let mut app = public
        .merge(protected)
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=UTF-8"),
        ))
        .layer(middleware::from_fn(preflight_middleware));

    if config.cors.enabled {
        app = app.layer(build_cors_layer(&config.cors));
    }
    app = app.layer(middleware::from_fn(track_request_middleware));
    if config.logging.log_requests {
        app = app.layer(TraceLayer::new_for_http());
    }
    app
}

/// Short-circuit OPTIONS with an empty 200 before any admission or
/// handler work. Sits just inside the CORS layer, which decorates the
/// response with the configured headers.
async fn preflight_middleware(request: Request<Body>, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}

fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new().max_age(Duration::from_secs(config.max_age_secs));

    layer = if config.allowed_origins.trim() == "*" {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = parse_list(&config.allowed_origins, |s| {
            HeaderValue::from_str(s).ok()
        });
        layer.allow_origin(AllowOrigin::list(origins))
    };

    let methods: Vec<Method> = parse_list(&config.allowed_methods, |s| Method::from_str(s).ok());
    let headers: Vec<HeaderName> =
        parse_list(&config.allowed_headers, |s| HeaderName::from_str(s).ok());

    layer
        .allow_methods(AllowMethods::list(methods))
        .allow_headers(AllowHeaders::list(headers))
}

fn parse_list<T>(raw: &str, parse: impl Fn(&str) -> Option<T>) -> Vec<T> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match parse(s) {
            Some(value) => Some(value),
            None => {
                tracing::warn!(value = %s, "Ignoring unparseable CORS config entry");
                None
            }
        })
        .collect()
}

/// HTTP server for the embedded API.
pub struct ApiServer {
    router: Router,
    bind_address: String,
}

impl ApiServer {
    /// Build the router and remember the configured bind address.
    pub fn new(config: Arc<ApiConfig>, host: HostHandle) -> Self {
        let bind_address = config.bind_address();
        let state = AppState::new(config.clone(), host);
        let router = build_router(&config, state);
        Self {
            router,
            bind_address,
        }
    }

    /// Bind the configured address. Kept separate from [`run`](Self::run)
    /// so the lifecycle layer can report bind failures synchronously.
    pub async fn bind(&self) -> std::io::Result<TcpListener> {
        TcpListener::bind(&self.bind_address).await
    }

    /// Serve connections until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
