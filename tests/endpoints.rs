//! Integration tests for the JSON resources: payload shapes, endpoint
//! enablement, field gating, and host-absence handling.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;

mod common;
use common::{spawn_api, test_config, FixtureHost};

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

async fn get_json(url: String) -> (StatusCode, Value) {
    let res = client().get(url).send().await.unwrap();
    let status = res.status();
    let body = res.json().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn health_reports_liveness_without_a_host() {
    let api = spawn_api(test_config(), None).await;
    let (status, body) = get_json(api.url("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["api_version"], "2.0.0");
    assert!(body["timestamp"].is_u64());
}

#[tokio::test]
async fn server_info_shape() {
    let api = spawn_api(test_config(), Some(Arc::new(FixtureHost))).await;
    let (status, body) = get_json(api.url("/server-info")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["server_name"], "Fixture Server");
    assert_eq!(body["server_version"], "0.31.1");
    assert_eq!(body["max_players"], 10);
    assert_eq!(body["current_players"], 2);
    assert_eq!(body["world_name"], "Testheim");
    assert_eq!(body["difficulty"], "Hard");
    assert_eq!(body["pvp_enabled"], true);
    assert_eq!(body["server_port"], 14159);
    assert_eq!(body["uptime"], 360_000);
    assert!(body["tps"].is_f64());
}

#[tokio::test]
async fn status_shape() {
    let api = spawn_api(test_config(), Some(Arc::new(FixtureHost))).await;
    let (status, body) = get_json(api.url("/status")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["online"], true);
    assert_eq!(body["players"], 2);
    assert_eq!(body["max_players"], 10);
    assert_eq!(body["world_time"], "Evening");
    assert_eq!(body["api_version"], "2.0.0");
    assert_eq!(body["motd"], "fixtures");
    assert_eq!(body["has_password"], true);
    assert_eq!(body["pvp_enabled"], true);
    assert!(body["tps"].is_f64());
}

#[tokio::test]
async fn world_info_shape() {
    let api = spawn_api(test_config(), Some(Arc::new(FixtureHost))).await;
    let (status, body) = get_json(api.url("/world-info")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["world_name"], "Testheim");
    assert_eq!(body["world_day"], 42);
    assert_eq!(body["world_seed"], 987_654_321);
    assert_eq!(body["biome_count"], 5);
    assert_eq!(body["world_size"]["width"], 2048);
    assert_eq!(body["spawn_point"]["x"], 1024);
    assert_eq!(body["weather"], "Rain");
    assert_eq!(body["season"], "Autumn");
    assert_eq!(body["difficulty"], "Hard");
    assert_eq!(body["game_time"], 777_000);
    assert_eq!(body["api_version"], "2.0.0");
}

#[tokio::test]
async fn players_full_payload() {
    let api = spawn_api(test_config(), Some(Arc::new(FixtureHost))).await;
    let (status, body) = get_json(api.url("/players")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_players"], 2);
    let players = body["players"].as_array().unwrap();
    assert_eq!(players.len(), 2);

    let astrid = &players[0];
    assert_eq!(astrid["name"], "astrid");
    assert_eq!(astrid["latency"], 30);
    assert_eq!(astrid["position"]["x"], 10.0);
    assert_eq!(astrid["biome"], "forest");
    assert_eq!(astrid["health"]["current"], 90);
    assert_eq!(astrid["mana"]["max"], 40);
    assert_eq!(astrid["player_level"], 11);
    assert_eq!(astrid["experience"], 4000);
    assert_eq!(astrid["is_admin"], true);
}

#[tokio::test]
async fn players_payload_honours_data_toggles() {
    let mut config = test_config();
    config.data.include_coordinates = false;
    config.data.include_player_stats = false;
    let api = spawn_api(config, Some(Arc::new(FixtureHost))).await;
    let (status, body) = get_json(api.url("/players")).await;

    assert_eq!(status, StatusCode::OK);
    for player in body["players"].as_array().unwrap() {
        let object = player.as_object().unwrap();
        for key in [
            "position",
            "biome",
            "health",
            "mana",
            "player_level",
            "experience",
        ] {
            assert!(!object.contains_key(key), "{key} should be omitted");
        }
        assert!(object.contains_key("name"));
        assert!(object.contains_key("online_time"));
        assert!(object.contains_key("player_class"));
    }
}

#[tokio::test]
async fn system_reports_telemetry_without_a_host() {
    // /system reads no host state; it must work even before start.
    let api = spawn_api(test_config(), None).await;
    let (status, body) = get_json(api.url("/system")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["timestamp"].is_u64());
    let process = &body["process"];
    assert!(process["pid"].is_u64());
    assert!(process["uptime"].is_u64());
    assert_eq!(process["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(process["vendor"], "webinfo-api");
}

#[tokio::test]
async fn disabled_endpoint_is_unreachable() {
    let mut config = test_config();
    config.endpoints.status = false;
    let api = spawn_api(config, Some(Arc::new(FixtureHost))).await;
    let client = client();

    let res = client.get(api.url("/status")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Other endpoints are unaffected.
    let res = client.get(api.url("/players")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let res = client.get(api.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn host_backed_endpoints_answer_503_until_the_host_starts() {
    let api = spawn_api(test_config(), None).await;
    let client = client();

    for path in ["/status", "/players", "/world-info", "/server-info"] {
        let res = client.get(api.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE, "{path}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "Server not started", "{path}");
    }
}

#[tokio::test]
async fn responses_are_json_utf8() {
    let api = spawn_api(test_config(), Some(Arc::new(FixtureHost))).await;
    let res = client().get(api.url("/health")).send().await.unwrap();
    let content_type = res.headers()["content-type"].to_str().unwrap();
    assert_eq!(content_type, "application/json; charset=UTF-8");
}
