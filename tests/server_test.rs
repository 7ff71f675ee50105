use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use murderer_server::{
    app,
    models::{config::ServerConfig, player::Player, round::RoundStatus},
    utils::test_setup::setup_test_env,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn create_app() -> Router {
    setup_test_env();
    app::create_app(&ServerConfig::from_env())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn register(app: &Router, name: &str, is_murderer: bool) -> Player {
    let (status, body) = send(
        app,
        "POST",
        "/api/players",
        Some(json!({"name": name, "isMurderer": is_murderer})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&body).unwrap()
}

async fn roster(app: &Router) -> Vec<Player> {
    let (status, body) = send(app, "GET", "/api/players", None).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_three_player_round() {
    let app = create_app();
    let a = register(&app, "A", false).await;
    let b = register(&app, "B", false).await;
    let c = register(&app, "C", false).await;

    for (voter, target) in [(a.id, c.id), (b.id, c.id)] {
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/players/{}/vote", voter),
            Some(json!({"targetId": target})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let players = roster(&app).await;
    assert_eq!(players[2].votes_received, 2);
    assert!(players[0].has_voted && players[1].has_voted);
    assert!(players.iter().all(|p| p.is_alive));

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/players/{}/vote", c.id),
        Some(json!({"targetId": a.id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let outcome: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(outcome["tally"]["eliminated"], json!([c.id]));

    let players = roster(&app).await;
    assert!(!players[2].is_alive);
    assert!(players[0].is_alive && players[1].is_alive);
    assert!(players.iter().all(|p| !p.has_voted && p.votes_received == 0));

    let (_, body) = send(&app, "GET", "/api/players/round", None).await;
    let status: RoundStatus = serde_json::from_slice(&body).unwrap();
    assert_eq!(status.round, 1);
    assert_eq!(status.alive_players, 2);
    assert_eq!(status.last_tally.unwrap().eliminated, vec![c.id]);
}

#[tokio::test]
async fn test_dead_player_cannot_vote() {
    let app = create_app();
    let m = register(&app, "M", true).await;
    let t = register(&app, "T", false).await;
    let o = register(&app, "O", false).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/players/{}/kill", m.id),
        Some(json!({"targetId": t.id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let before = roster(&app).await;
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/players/{}/vote", t.id),
        Some(json!({"targetId": o.id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("dead"));
    assert_eq!(roster(&app).await, before);
}

#[tokio::test]
async fn test_kill_dead_target_is_rejected() {
    let app = create_app();
    let m = register(&app, "M", true).await;
    let t = register(&app, "T", false).await;

    let uri = format!("/api/players/{}/kill", m.id);
    let (status, _) = send(&app, "POST", &uri, Some(json!({"targetId": t.id}))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "POST", &uri, Some(json!({"targetId": t.id}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_vote_with_unknown_target_is_bad_request() {
    let app = create_app();
    let a = register(&app, "A", false).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/players/{}/vote", a.id),
        Some(json!({"targetId": 99})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_player() {
    let app = create_app();
    let a = register(&app, "A", false).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/players/{}", a.id),
        Some(json!({"name": "Ann", "avatar": "fox.png", "isMurderer": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Player = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated.name, "Ann");
    assert_eq!(updated.avatar.as_deref(), Some("fox.png"));
    assert!(updated.is_murderer);

    let (status, body) = send(&app, "DELETE", &format!("/api/players/{}", a.id), None).await;
    assert_eq!(status, StatusCode::OK);
    let removed: Player = serde_json::from_slice(&body).unwrap();
    assert_eq!(removed.id, a.id);

    let (status, _) = send(&app, "GET", "/api/players", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_apps_do_not_share_sessions() {
    let first = create_app();
    let second = create_app();
    register(&first, "A", false).await;

    let (status, _) = send(&second, "GET", "/api/players", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
