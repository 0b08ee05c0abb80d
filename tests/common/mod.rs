//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::broadcast;
use uuid::Uuid;

use webinfo_api::config::ApiConfig;
use webinfo_api::host::{GameHost, HostHandle, PlayerSnapshot, ServerSnapshot, WorldSnapshot};
use webinfo_api::http::server::{build_router, AppState};

/// A running API over an ephemeral port. Dropping the shutdown handle
/// does not stop the server; tests simply let the task die with the
/// runtime.
pub struct TestApi {
    pub addr: SocketAddr,
    #[allow(dead_code)]
    pub shutdown: broadcast::Sender<()>,
}

impl TestApi {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Spawn the API with the given config and optional host.
pub async fn spawn_api(config: ApiConfig, host: Option<Arc<dyn GameHost>>) -> TestApi {
    let handle = HostHandle::default();
    if let Some(host) = host {
        handle.attach(host);
    }

    let state = AppState::new(Arc::new(config.clone()), handle);
    let router = build_router(&config, state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown, mut rx) = broadcast::channel(1);
    tokio::spawn(async move {
        let app = router.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.recv().await;
            })
            .await
            .unwrap();
    });

    TestApi { addr, shutdown }
}

/// Config pointed at loopback with test-friendly defaults.
pub fn test_config() -> ApiConfig {
    let mut config = ApiConfig::default();
    config.api.host = "127.0.0.1".into();
    config.api.port = 0;
    config.logging.log_requests = false;
    config
}

/// Fixture host with two connected players.
pub struct FixtureHost;

impl GameHost for FixtureHost {
    fn server(&self) -> ServerSnapshot {
        ServerSnapshot {
            name: "Fixture Server".into(),
            version: "0.31.1".into(),
            motd: "fixtures".into(),
            has_password: true,
            max_players: 10,
            current_players: 2,
            port: 14159,
            uptime_ms: 360_000,
            tps: 19.8,
        }
    }

    fn world(&self) -> WorldSnapshot {
        WorldSnapshot {
            name: "Testheim".into(),
            time_of_day: "Evening".into(),
            day: 42,
            seed: 987_654_321,
            biome_count: 5,
            width: 2048,
            height: 2048,
            spawn_x: 1024,
            spawn_y: 1000,
            weather: "Rain".into(),
            season: "Autumn".into(),
            pvp_enabled: true,
            difficulty: "Hard".into(),
            game_time_ticks: 777_000,
        }
    }

    fn players(&self) -> Vec<PlayerSnapshot> {
        vec![
            PlayerSnapshot {
                name: "astrid".into(),
                id: Uuid::new_v4(),
                latency_ms: 30,
                level_id: 1,
                x: 10.0,
                y: 20.0,
                biome: "forest".into(),
                health: 90,
                max_health: 100,
                mana: 25,
                max_mana: 40,
                online_time_ms: 120_000,
                is_admin: true,
                player_class: "ranger".into(),
                player_level: 11,
                experience: 4000,
            },
            PlayerSnapshot {
                name: "bjorn".into(),
                id: Uuid::new_v4(),
                latency_ms: 55,
                level_id: 2,
                x: -5.5,
                y: 3.25,
                biome: "desert".into(),
                health: 45,
                max_health: 120,
                mana: 5,
                max_mana: 30,
                online_time_ms: 45_000,
                is_admin: false,
                player_class: "warrior".into(),
                player_level: 8,
                experience: 1500,
            },
        ]
    }
}
