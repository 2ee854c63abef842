//! HTTP-level tests for the collection endpoints.
//!
//! The router is driven through `tower::ServiceExt::oneshot` against the in-memory store,
//! without binding a TCP listener.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use game_tracker_back::{
    config::AppConfig,
    dao::kv_store::{CollectionKey, KeyValueStore, MemoryStore},
    routes,
    state::AppState,
};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app_with(config: AppConfig) -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    let state = AppState::with_store(config, Arc::new(store.clone())).await;
    (routes::router(state), store)
}

async fn app() -> (Router, MemoryStore) {
    app_with(AppConfig::default()).await
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn empty_store_lists_empty_arrays() {
    let (router, _) = app().await;

    let (status, players) = send(&router, get("/api/players")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(players, json!([]));

    let (status, games) = send(&router, get("/api/game-data")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(games, json!([]));
}

#[tokio::test]
async fn post_player_returns_full_list() {
    let (router, store) = app().await;

    let (status, body) = send(
        &router,
        post_json("/api/players", json!({"id": "1", "name": "A"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": "1", "name": "A"}]));
    assert_eq!(
        store.get(CollectionKey::Players).await.unwrap(),
        Some(json!([{"id": "1", "name": "A"}]))
    );
}

#[tokio::test]
async fn posted_player_appears_last_in_listing() {
    let (router, _) = app().await;
    send(&router, post_json("/api/players", json!({"id": "1", "name": "A"}))).await;
    send(&router, post_json("/api/players", json!({"id": "2", "name": "B"}))).await;

    let (_, first) = send(&router, get("/api/players")).await;
    let (_, second) = send(&router, get("/api/players")).await;

    assert_eq!(first, second);
    assert_eq!(first[1], json!({"id": "2", "name": "B"}));
}

#[tokio::test]
async fn delete_player_filters_and_tolerates_unknown_ids() {
    let (router, _) = app().await;
    send(&router, post_json("/api/players", json!({"id": "1", "name": "A"}))).await;
    send(&router, post_json("/api/players", json!({"id": "2", "name": "B"}))).await;

    let (status, body) = send(&router, delete("/api/players/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": "1", "name": "A"}]));

    let (status, body) = send(&router, delete("/api/players/9")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": "1", "name": "A"}]));
}

#[tokio::test]
async fn delete_player_keeps_sessions_by_default() {
    let (router, store) = app().await;
    send(&router, post_json("/api/players", json!({"id": "2", "name": "B"}))).await;
    send(
        &router,
        post_json(
            "/api/game-data",
            json!({"id": "g1", "date": "2024-01-01", "participants": ["1", "2"], "amount": 100}),
        ),
    )
    .await;

    send(&router, delete("/api/players/2")).await;

    let stored = store.get(CollectionKey::GameData).await.unwrap().unwrap();
    assert_eq!(stored[0]["participants"], json!(["1", "2"]));
}

#[tokio::test]
async fn delete_player_cascades_when_enabled() {
    let (router, _) = app_with(AppConfig::default().with_cascade_player_removal(true)).await;
    send(
        &router,
        post_json(
            "/api/game-data",
            json!({"id": "g1", "date": "2024-01-01", "participants": ["2"], "amount": 100}),
        ),
    )
    .await;

    send(&router, delete("/api/players/2")).await;

    let (_, games) = send(&router, get("/api/game-data")).await;
    assert_eq!(games[0]["participants"], json!([]));
    assert_eq!(games[0]["amount"], json!(100.0));
}

#[tokio::test]
async fn sessions_append_in_call_order() {
    let (router, _) = app().await;

    let (_, after_first) = send(
        &router,
        post_json(
            "/api/game-data",
            json!({"id": "g1", "date": "2024-01-01", "participants": ["1"], "amount": 10}),
        ),
    )
    .await;
    let (status, after_second) = send(
        &router,
        post_json(
            "/api/game-data",
            json!({"id": "g2", "date": "2024-01-02", "participants": ["2"], "amount": "20"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(after_first.as_array().unwrap().len(), 1);
    assert_eq!(after_second.as_array().unwrap().len(), 2);
    assert_eq!(after_second[0]["id"], "g1");
    assert_eq!(after_second[1]["id"], "g2");
    assert_eq!(after_second[1]["amount"], json!(20.0));
}

#[tokio::test]
async fn totals_split_each_session_evenly() {
    let (router, _) = app().await;
    send(
        &router,
        post_json(
            "/api/game-data",
            json!({"id": "g1", "date": "2024-01-01", "participants": ["1", "2"], "amount": 100}),
        ),
    )
    .await;
    send(
        &router,
        post_json(
            "/api/game-data",
            json!({"id": "g2", "date": "2024-01-02", "participants": [], "amount": 70}),
        ),
    )
    .await;

    let (status, totals) = send(&router, get("/api/totals")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(totals, json!({"1": 50.0, "2": 50.0}));
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (router, _) = app().await;
    let response = router
        .clone()
        .oneshot(post_json("/api/players", json!({"id": 1})))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn non_finite_amount_is_refused_and_collection_stays_readable() {
    let (router, _) = app().await;
    send(
        &router,
        post_json(
            "/api/game-data",
            json!({"id": "g0", "date": "2024-01-01", "participants": ["1"], "amount": 10}),
        ),
    )
    .await;

    for amount in [json!("NaN"), json!("inf"), Value::Null] {
        let response = router
            .clone()
            .oneshot(post_json(
                "/api/game-data",
                json!({"id": "g1", "date": "2024-01-02", "participants": ["1"], "amount": amount.clone()}),
            ))
            .await
            .unwrap();
        assert!(response.status().is_client_error(), "{amount} accepted");
    }

    let (status, games) = send(&router, get("/api/game-data")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(games.as_array().unwrap().len(), 1);

    let (status, games) = send(
        &router,
        post_json(
            "/api/game-data",
            json!({"id": "g2", "date": "2024-01-03", "participants": ["1"], "amount": "5"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(games.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn stored_null_amount_does_not_break_reads() {
    let (router, store) = app().await;
    store
        .set(
            CollectionKey::GameData,
            json!([
                {"id": "old", "date": "2023-12-31", "participants": ["1"], "amount": null},
                {"id": "g1", "date": "2024-01-01", "participants": ["1", "2"], "amount": 100},
            ]),
        )
        .await
        .unwrap();

    let (status, games) = send(&router, get("/api/game-data")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(games[0]["amount"], Value::Null);
    assert_eq!(games[1]["amount"], json!(100.0));

    let (status, totals) = send(&router, get("/api/totals")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(totals["2"], json!(50.0));

    let response = router.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn degraded_state_answers_service_unavailable() {
    let router = routes::router(AppState::new(AppConfig::default()));

    let (status, body) = send(&router, get("/api/players")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["message"].as_str().unwrap().contains("degraded"));

    let (status, health) = send(&router, get("/healthcheck")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "degraded");
}

#[tokio::test]
async fn corrupted_collection_is_an_internal_error() {
    let (router, store) = app().await;
    store
        .set(CollectionKey::Players, json!("not a list"))
        .await
        .unwrap();

    let (status, _) = send(&router, get("/api/players")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn index_renders_tables() {
    let (router, _) = app().await;
    send(&router, post_json("/api/players", json!({"id": "1", "name": "Đôn Thắng"}))).await;

    let response = router.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(content_type.contains("text/html"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("<td>Đôn Thắng</td><td>0 ₫</td>"));
}

#[tokio::test]
async fn openapi_document_lists_collection_paths() {
    let (router, _) = app().await;

    let (status, doc) = send(&router, get("/api-doc/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/players"].is_object());
    assert!(doc["paths"]["/api/players/{id}"]["delete"].is_object());
    assert!(doc["paths"]["/api/game-data"]["post"].is_object());
}
