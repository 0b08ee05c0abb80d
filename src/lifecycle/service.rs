//! Host-facing service facade and state machine.
//!
//! The embedding game server is not async: it hands the API a start/stop
//! notification from its own threads. [`ApiService`] owns a dedicated
//! tokio runtime sized from `[thread_pool]` and walks the state machine
//! `Stopped → Starting → Running → Stopping → Stopped`.
//!
//! Bind failures are fatal to the API only: the error is logged and
//! returned to the embedder, the state returns to `Stopped`, and the host
//! process keeps running with the API disabled for the session.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::{Builder, Runtime};
use tokio::sync::broadcast;

use crate::config::schema::ApiConfig;
use crate::host::{GameHost, HostHandle};
use crate::http::server::ApiServer;
use crate::observability::metrics;
use crate::security::auth::PLACEHOLDER_API_KEY;

/// How long in-flight requests get to finish after a stop notification.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Lifecycle states of the API subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

/// Errors starting the API subsystem. None of these may take the host
/// process down.
#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error("API runtime could not be built: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("API server is already running")]
    AlreadyRunning,
}

/// Sync facade the host process drives.
pub struct ApiService {
    config: Arc<ApiConfig>,
    host: HostHandle,
    /// Fans the stop notification out to the server task. Outlives any
    /// single start/stop cycle; each start takes a fresh receiver.
    shutdown_tx: broadcast::Sender<()>,
    state: Mutex<ServiceState>,
    runtime: Mutex<Option<Runtime>>,
    bound: Mutex<Option<SocketAddr>>,
}

impl ApiService {
    pub fn new(config: ApiConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            config: Arc::new(config),
            host: HostHandle::default(),
            shutdown_tx,
            state: Mutex::new(ServiceState::Stopped),
            runtime: Mutex::new(None),
            bound: Mutex::new(None),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ServiceState {
        *self.state.lock().expect("service state lock poisoned")
    }

    /// The address actually bound, once Running. With a configured port
    /// of 0 this is where the ephemeral port shows up.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        *self.bound.lock().expect("service state lock poisoned")
    }

    /// React to the host's "started" notification: bind, build routes,
    /// serve. With `api.enabled = false` this logs and does nothing.
    pub fn notify_host_started(&self, host: Arc<dyn GameHost>) -> Result<(), StartError> {
        if !self.config.api.enabled {
            tracing::info!("API disabled by configuration");
            return Ok(());
        }

        let mut state = self.state.lock().expect("service state lock poisoned");
        if *state != ServiceState::Stopped {
            return Err(StartError::AlreadyRunning);
        }
        *state = ServiceState::Starting;

        self.warn_on_lax_security();

        let runtime = match self.build_runtime() {
            Ok(rt) => rt,
            Err(error) => {
                *state = ServiceState::Stopped;
                return Err(StartError::Runtime(error));
            }
        };

        self.host.attach(host);
        let server = ApiServer::new(self.config.clone(), self.host.clone());

        let listener = match runtime.block_on(server.bind()) {
            Ok(listener) => listener,
            Err(source) => {
                let addr = self.config.bind_address();
                tracing::error!(
                    address = %addr,
                    error = %source,
                    "Failed to bind API listener; API disabled for this session"
                );
                self.host.detach();
                *state = ServiceState::Stopped;
                return Err(StartError::Bind { addr, source });
            }
        };

        let local_addr = match listener.local_addr() {
            Ok(addr) => addr,
            Err(error) => {
                self.host.detach();
                *state = ServiceState::Stopped;
                return Err(StartError::Runtime(error));
            }
        };
        *self.bound.lock().expect("service state lock poisoned") = Some(local_addr);

        if self.config.metrics.enabled {
            if let Ok(addr) = self.config.metrics.address.parse() {
                runtime.block_on(async { metrics::init_metrics(addr) });
            } else {
                tracing::error!(
                    metrics_address = %self.config.metrics.address,
                    "Failed to parse metrics address"
                );
            }
        }

        let shutdown_rx = self.shutdown_tx.subscribe();
        runtime.spawn(async move {
            if let Err(error) = server.run(listener, shutdown_rx).await {
                tracing::error!(error = %error, "API server terminated abnormally");
            }
        });

        *self.runtime.lock().expect("service state lock poisoned") = Some(runtime);
        *state = ServiceState::Running;
        tracing::info!(address = %local_addr, "WebInfoAPI started");
        Ok(())
    }

    /// React to the host's "stopped" notification: stop accepting, drain
    /// in-flight requests up to the grace period, release the socket.
    ///
    /// Must be called from a host thread, never from inside the API
    /// runtime.
    pub fn notify_host_stopped(&self) {
        let mut state = self.state.lock().expect("service state lock poisoned");
        if *state != ServiceState::Running {
            return;
        }
        *state = ServiceState::Stopping;

        self.host.detach();
        let _ = self.shutdown_tx.send(());

        if let Some(runtime) = self
            .runtime
            .lock()
            .expect("service state lock poisoned")
            .take()
        {
            runtime.shutdown_timeout(SHUTDOWN_GRACE);
        }

        *self.bound.lock().expect("service state lock poisoned") = None;
        *state = ServiceState::Stopped;
        tracing::info!("WebInfoAPI stopped");
    }

    fn build_runtime(&self) -> std::io::Result<Runtime> {
        let pool = &self.config.thread_pool;
        Builder::new_multi_thread()
            .worker_threads(pool.workers)
            .max_blocking_threads(pool.max_blocking)
            .thread_keep_alive(Duration::from_secs(pool.keep_alive_secs))
            .thread_name("webapi-worker")
            .enable_all()
            .build()
    }

    /// Operator caveat for the deliberate fail-open on unconfigured keys.
    fn warn_on_lax_security(&self) {
        let security = &self.config.security;
        if security.require_auth
            && (security.api_key.is_empty() || security.api_key == PLACEHOLDER_API_KEY)
        {
            tracing::warn!(
                "require_auth is set but api_key is unset or still the placeholder; \
                 authentication will NOT be enforced"
            );
        }
    }
}

impl Drop for ApiService {
    fn drop(&mut self) {
        // A service dropped while Running must not leak its runtime.
        if let Ok(mut slot) = self.runtime.lock() {
            if let Some(runtime) = slot.take() {
                let _ = self.shutdown_tx.send(());
                runtime.shutdown_timeout(SHUTDOWN_GRACE);
            }
        }
    }
}
