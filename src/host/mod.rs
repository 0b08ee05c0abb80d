//! Host-process integration.
//!
//! The game server embedding this API implements [`GameHost`], a
//! read-only snapshot surface. The API never mutates host state and never
//! assumes the host is present: between process start and the host's
//! "started" notification the handle is empty, and every handler must
//! branch on that instead of dereferencing.

use std::sync::{Arc, RwLock};

use uuid::Uuid;

/// Read accessors the host process exposes to the API.
///
/// Implementations are called from API worker threads and may block
/// briefly on internal locks, but must not perform unbounded I/O.
pub trait GameHost: Send + Sync {
    fn server(&self) -> ServerSnapshot;
    fn world(&self) -> WorldSnapshot;
    fn players(&self) -> Vec<PlayerSnapshot>;
}

/// Point-in-time view of the server process.
#[derive(Debug, Clone)]
pub struct ServerSnapshot {
    pub name: String,
    pub version: String,
    pub motd: String,
    pub has_password: bool,
    pub max_players: u32,
    pub current_players: u32,
    pub port: u16,
    pub uptime_ms: u64,
    pub tps: f64,
}

/// Point-in-time view of the loaded world.
#[derive(Debug, Clone)]
pub struct WorldSnapshot {
    pub name: String,
    pub time_of_day: String,
    pub day: u32,
    pub seed: i64,
    pub biome_count: u32,
    pub width: u32,
    pub height: u32,
    pub spawn_x: i32,
    pub spawn_y: i32,
    pub weather: String,
    pub season: String,
    pub pvp_enabled: bool,
    pub difficulty: String,
    pub game_time_ticks: u64,
}

/// Point-in-time view of one connected player.
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub name: String,
    pub id: Uuid,
    pub latency_ms: u32,
    pub level_id: i32,
    pub x: f32,
    pub y: f32,
    pub biome: String,
    pub health: i32,
    pub max_health: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub online_time_ms: u64,
    pub is_admin: bool,
    pub player_class: String,
    pub player_level: u32,
    pub experience: u64,
}

/// Shared, clearable reference to the running host.
///
/// Attached on the host's start notification and detached on stop; while
/// empty, host-backed endpoints answer 503.
#[derive(Clone, Default)]
pub struct HostHandle {
    inner: Arc<RwLock<Option<Arc<dyn GameHost>>>>,
}

impl HostHandle {
    pub fn attach(&self, host: Arc<dyn GameHost>) {
        *self.inner.write().expect("host handle lock poisoned") = Some(host);
    }

    pub fn detach(&self) {
        *self.inner.write().expect("host handle lock poisoned") = None;
    }

    /// The current host, or None if it has not started (or has stopped).
    pub fn get(&self) -> Option<Arc<dyn GameHost>> {
        self.inner.read().expect("host handle lock poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullHost;

    impl GameHost for NullHost {
        fn server(&self) -> ServerSnapshot {
            ServerSnapshot {
                name: "test".into(),
                version: "0.0".into(),
                motd: String::new(),
                has_password: false,
                max_players: 0,
                current_players: 0,
                port: 0,
                uptime_ms: 0,
                tps: 0.0,
            }
        }

        fn world(&self) -> WorldSnapshot {
            WorldSnapshot {
                name: "w".into(),
                time_of_day: "Day".into(),
                day: 0,
                seed: 0,
                biome_count: 0,
                width: 0,
                height: 0,
                spawn_x: 0,
                spawn_y: 0,
                weather: "Clear".into(),
                season: "Spring".into(),
                pvp_enabled: false,
                difficulty: "Normal".into(),
                game_time_ticks: 0,
            }
        }

        fn players(&self) -> Vec<PlayerSnapshot> {
            Vec::new()
        }
    }

    #[test]
    fn handle_starts_empty_and_tracks_attach_detach() {
        let handle = HostHandle::default();
        assert!(handle.get().is_none());

        handle.attach(Arc::new(NullHost));
        assert!(handle.get().is_some());

        handle.detach();
        assert!(handle.get().is_none());
    }
}
