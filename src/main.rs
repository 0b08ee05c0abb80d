//! WebInfoAPI dev server.
//!
//! Runs the embedded API against a built-in demo host with fixture
//! players and world data, exercising the same lifecycle hooks a real
//! game server integration goes through:
//!
//! ```text
//!     load/create config → ApiService::new
//!         → notify_host_started(demo host)    (Ctrl-C)
//!         → notify_host_stopped
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use uuid::Uuid;

use webinfo_api::config::{ensure_config_file, load_config};
use webinfo_api::host::{GameHost, PlayerSnapshot, ServerSnapshot, WorldSnapshot};
use webinfo_api::lifecycle::ApiService;
use webinfo_api::observability::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "webinfo-api", about = "Game-server telemetry API (demo host)")]
struct Args {
    /// Path to the TOML configuration file; created with defaults if missing.
    #[arg(long, default_value = "webapi.toml")]
    config: PathBuf,

    /// Override the configured bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the configured bind port.
    #[arg(long)]
    port: Option<u16>,
}

fn main() {
    let args = Args::parse();

    let created = match ensure_config_file(&args.config) {
        Ok(created) => created,
        Err(error) => {
            eprintln!("could not create config file: {error}");
            std::process::exit(1);
        }
    };

    let mut config = match load_config(&args.config) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("could not load config: {error}");
            std::process::exit(1);
        }
    };
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    init_logging(&config.logging);
    if created {
        tracing::info!(path = %args.config.display(), "Wrote default configuration file");
    }
    tracing::info!(
        bind_address = %config.bind_address(),
        rate_limit = config.rate_limit.requests_per_minute,
        require_auth = config.security.require_auth,
        "Configuration loaded"
    );

    let service = ApiService::new(config);
    if let Err(error) = service.notify_host_started(Arc::new(DemoHost::new())) {
        tracing::error!(error = %error, "API failed to start");
        std::process::exit(1);
    }

    wait_for_ctrl_c();

    service.notify_host_stopped();
}

fn wait_for_ctrl_c() {
    // Small private runtime just for the signal; the API owns its own.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("signal runtime");
    if runtime.block_on(tokio::signal::ctrl_c()).is_err() {
        tracing::error!("could not listen for shutdown signal");
    }
}

/// Stand-in for a real game server: fixed world, two fixture players.
struct DemoHost {
    started: Instant,
    players: Vec<PlayerSnapshot>,
}

impl DemoHost {
    fn new() -> Self {
        let players = vec![
            PlayerSnapshot {
                name: "astrid".into(),
                id: Uuid::new_v4(),
                latency_ms: 34,
                level_id: 1,
                x: 220.0,
                y: -48.5,
                biome: "forest".into(),
                health: 95,
                max_health: 100,
                mana: 40,
                max_mana: 60,
                online_time_ms: 0,
                is_admin: true,
                player_class: "ranger".into(),
                player_level: 14,
                experience: 5200,
            },
            PlayerSnapshot {
                name: "bjorn".into(),
                id: Uuid::new_v4(),
                latency_ms: 71,
                level_id: 1,
                x: -15.25,
                y: 102.0,
                biome: "snow".into(),
                health: 60,
                max_health: 120,
                mana: 10,
                max_mana: 30,
                online_time_ms: 0,
                is_admin: false,
                player_class: "warrior".into(),
                player_level: 9,
                experience: 1800,
            },
        ];
        Self {
            started: Instant::now(),
            players,
        }
    }
}

impl GameHost for DemoHost {
    fn server(&self) -> ServerSnapshot {
        ServerSnapshot {
            name: "Demo Server".into(),
            version: "0.31.1".into(),
            motd: "welcome to the demo".into(),
            has_password: false,
            max_players: 16,
            current_players: self.players.len() as u32,
            port: 14159,
            uptime_ms: self.started.elapsed().as_millis() as u64,
            tps: 20.0,
        }
    }

    fn world(&self) -> WorldSnapshot {
        WorldSnapshot {
            name: "Midgard".into(),
            time_of_day: "Morning".into(),
            day: 12,
            seed: -4_203_771_851_290_113,
            biome_count: 6,
            width: 4096,
            height: 4096,
            spawn_x: 2048,
            spawn_y: 2048,
            weather: "Clear".into(),
            season: "Summer".into(),
            pvp_enabled: false,
            difficulty: "Normal".into(),
            game_time_ticks: 1_234_567,
        }
    }

    fn players(&self) -> Vec<PlayerSnapshot> {
        let uptime = self.started.elapsed().as_millis() as u64;
        self.players
            .iter()
            .cloned()
            .map(|mut player| {
                player.online_time_ms = uptime;
                player
            })
            .collect()
    }
}
