//! Resource handlers for the six JSON endpoints.
//!
//! Handlers read host-state snapshots through the shared [`HostHandle`]
//! and hand plain `serde_json` payloads to axum. Every host-backed
//! handler branches on host absence and answers 503 instead of panicking;
//! `/system` reads no host state and degrades internally on probe
//! failure.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Map, Value};

use crate::config::schema::DataConfig;
use crate::host::{PlayerSnapshot, ServerSnapshot, WorldSnapshot};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::telemetry::now_ms;
use crate::API_VERSION;

/// `GET /health`: liveness probe; works even before the host starts.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": now_ms(),
        "api_version": API_VERSION,
    }))
}

/// `GET /server-info`: public summary, used by server browsers.
pub async fn server_info(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let host = state.host.get().ok_or(ApiError::HostUnavailable)?;
    Ok(Json(server_info_payload(&host.server(), &host.world())))
}

/// `GET /status`: authenticated status snapshot.
pub async fn status(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let host = state.host.get().ok_or(ApiError::HostUnavailable)?;
    Ok(Json(status_payload(&host.server(), &host.world())))
}

/// `GET /players`: connected players, with config-gated field groups.
pub async fn players(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let host = state.host.get().ok_or(ApiError::HostUnavailable)?;
    Ok(Json(players_payload(&host.players(), &state.config.data)))
}

/// `GET /world-info`: world metadata.
pub async fn world_info(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let host = state.host.get().ok_or(ApiError::HostUnavailable)?;
    Ok(Json(world_info_payload(&host.world())))
}

/// `GET /system`: OS/process telemetry. Never fails: probe errors
/// degrade to a reduced payload inside the probe.
pub async fn system(State(state): State<AppState>) -> Json<Value> {
    let mut report = state.probe.report();
    if let Some(map) = report.as_object_mut() {
        map.insert("timestamp".to_string(), json!(now_ms()));
    }
    Json(report)
}

fn server_info_payload(server: &ServerSnapshot, world: &WorldSnapshot) -> Value {
    json!({
        "server_name": server.name,
        "server_version": server.version,
        "max_players": server.max_players,
        "current_players": server.current_players,
        "world_name": world.name,
        "difficulty": world.difficulty,
        "pvp_enabled": world.pvp_enabled,
        "server_port": server.port,
        "uptime": server.uptime_ms,
        "tps": server.tps,
    })
}

fn status_payload(server: &ServerSnapshot, world: &WorldSnapshot) -> Value {
    json!({
        "online": true,
        "players": server.current_players,
        "max_players": server.max_players,
        "world_time": world.time_of_day,
        "uptime": server.uptime_ms,
        "server_version": server.version,
        "api_version": API_VERSION,
        "server_name": server.name,
        "motd": server.motd,
        "has_password": server.has_password,
        "pvp_enabled": world.pvp_enabled,
        "tps": server.tps,
    })
}

fn players_payload(players: &[PlayerSnapshot], data: &DataConfig) -> Value {
    let entries: Vec<Value> = players
        .iter()
        .map(|player| player_entry(player, data))
        .collect();
    json!({
        "players": entries,
        "total_players": players.len(),
    })
}

/// One player object. The coordinate group (`position`, `biome`) and the
/// stats group (`health`, `mana`, `player_level`, `experience`) are
/// omitted entirely, not nulled, when their toggle is off.
fn player_entry(player: &PlayerSnapshot, data: &DataConfig) -> Value {
    let mut entry = Map::new();
    entry.insert("name".into(), json!(player.name));
    entry.insert("id".into(), json!(player.id));
    entry.insert("latency".into(), json!(player.latency_ms));
    entry.insert("level_id".into(), json!(player.level_id));

    if data.include_coordinates {
        entry.insert(
            "position".into(),
            json!({ "x": player.x, "y": player.y }),
        );
        entry.insert("biome".into(), json!(player.biome));
    }
    if data.include_player_stats {
        entry.insert(
            "health".into(),
            json!({ "current": player.health, "max": player.max_health }),
        );
        entry.insert(
            "mana".into(),
            json!({ "current": player.mana, "max": player.max_mana }),
        );
    }

    entry.insert("online_time".into(), json!(player.online_time_ms));
    entry.insert("is_admin".into(), json!(player.is_admin));
    entry.insert("player_class".into(), json!(player.player_class));

    if data.include_player_stats {
        entry.insert("player_level".into(), json!(player.player_level));
        entry.insert("experience".into(), json!(player.experience));
    }

    Value::Object(entry)
}

fn world_info_payload(world: &WorldSnapshot) -> Value {
    json!({
        "world_name": world.name,
        "world_time": world.time_of_day,
        "world_day": world.day,
        "world_seed": world.seed,
        "biome_count": world.biome_count,
        "world_size": { "width": world.width, "height": world.height },
        "spawn_point": { "x": world.spawn_x, "y": world.spawn_y },
        "weather": world.weather,
        "season": world.season,
        "pvp_enabled": world.pvp_enabled,
        "difficulty": world.difficulty,
        "game_time": world.game_time_ticks,
        "api_version": API_VERSION,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample_player() -> PlayerSnapshot {
        PlayerSnapshot {
            name: "astrid".into(),
            id: Uuid::new_v4(),
            latency_ms: 42,
            level_id: 1,
            x: 128.5,
            y: -64.0,
            biome: "forest".into(),
            health: 80,
            max_health: 100,
            mana: 30,
            max_mana: 50,
            online_time_ms: 90_000,
            is_admin: false,
            player_class: "ranger".into(),
            player_level: 12,
            experience: 3400,
        }
    }

    #[test]
    fn full_player_entry_has_both_groups() {
        let data = DataConfig {
            include_coordinates: true,
            include_player_stats: true,
        };
        let entry = player_entry(&sample_player(), &data);
        assert_eq!(entry["position"]["x"], 128.5);
        assert_eq!(entry["biome"], "forest");
        assert_eq!(entry["health"]["current"], 80);
        assert_eq!(entry["mana"]["max"], 50);
        assert_eq!(entry["player_level"], 12);
        assert_eq!(entry["experience"], 3400);
    }

    #[test]
    fn gated_groups_are_omitted_not_nulled() {
        let data = DataConfig {
            include_coordinates: false,
            include_player_stats: false,
        };
        let entry = player_entry(&sample_player(), &data);
        let object = entry.as_object().unwrap();
        for key in [
            "position",
            "biome",
            "health",
            "mana",
            "player_level",
            "experience",
        ] {
            assert!(!object.contains_key(key), "{key} should be absent");
        }
        assert_eq!(entry["name"], "astrid");
        assert_eq!(entry["latency"], 42);
        assert_eq!(entry["is_admin"], false);
    }

    #[test]
    fn coordinates_and_stats_toggle_independently() {
        let coords_only = DataConfig {
            include_coordinates: true,
            include_player_stats: false,
        };
        let entry = player_entry(&sample_player(), &coords_only);
        assert!(entry.get("position").is_some());
        assert!(entry.get("health").is_none());
        assert!(entry.get("experience").is_none());

        let stats_only = DataConfig {
            include_coordinates: false,
            include_player_stats: true,
        };
        let entry = player_entry(&sample_player(), &stats_only);
        assert!(entry.get("position").is_none());
        assert!(entry.get("biome").is_none());
        assert_eq!(entry["health"]["max"], 100);
    }

    #[test]
    fn players_payload_counts_totals() {
        let data = DataConfig::default();
        let payload = players_payload(&[sample_player(), sample_player()], &data);
        assert_eq!(payload["total_players"], 2);
        assert_eq!(payload["players"].as_array().unwrap().len(), 2);
    }
}
