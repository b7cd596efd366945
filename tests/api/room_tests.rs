//! Room API Tests

use axum::http::{Method, StatusCode};
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{mint_token, TestApp};

#[tokio::test]
async fn test_rooms_require_bearer_token() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/api/v1/rooms", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 10003);

    let (status, _) = app.get_auth("/api/v1/rooms", "not-a-jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unverified_account_is_forbidden() {
    let app = TestApp::new();

    let (status, _) = app
        .post_json_auth("/api/v1/rooms", json!({ "name": "lobby" }), &mint_token(1, false))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.room_count().await, 0);
}

#[tokio::test]
async fn test_create_room_makes_creator_admin() {
    let app = TestApp::new();
    let token = mint_token(1, true);

    let (status, room) = app
        .post_json_auth(
            "/api/v1/rooms",
            json!({ "name": "lobby", "description": "say hi" }),
            &token,
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(room["name"], "lobby");
    assert_eq!(room["description"], "say hi");
    assert_eq!(room["creator_id"], "1");
    assert_eq!(room["created_at"], "2024-06-01T09:30:00+00:00");

    let room_id = room["id"].as_str().unwrap();
    let (status, detail) = app.get_auth(&format!("/api/v1/rooms/{room_id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["members"], json!([{ "user_id": "1", "role": "admin" }]));
}

#[tokio::test]
async fn test_create_room_validates_name() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json_auth("/api/v1/rooms", json!({ "name": "" }), &mint_token(1, true))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("name"));
}

#[tokio::test]
async fn test_list_rooms_only_returns_memberships() {
    let app = TestApp::new();
    let first = app.create_room(1, "first").await;
    app.create_room(2, "someone else's").await;
    let third = app.create_room(1, "third").await;

    let (status, rooms) = app.get_auth("/api/v1/rooms", &mint_token(1, true)).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = rooms
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![first.as_str(), third.as_str()]);
}

#[tokio::test]
async fn test_update_room_requires_admin() {
    let app = TestApp::new();
    let room_id = app.create_room(1, "lobby").await;
    let uri = format!("/api/v1/rooms/{room_id}");

    // Not a member at all
    let (status, _) = app
        .patch_json_auth(&uri, json!({ "name": "hijacked" }), &mint_token(2, true))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, room) = app
        .patch_json_auth(
            &uri,
            json!({ "name": "renamed", "description": "new topic" }),
            &mint_token(1, true),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(room["name"], "renamed");
    assert_eq!(room["description"], "new topic");
    assert_eq!(room["creator_id"], "1");
}

#[tokio::test]
async fn test_delete_missing_room_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app
        .delete_auth("/api/v1/rooms/424242", &mint_token(1, true))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Room not found");
}

#[tokio::test]
async fn test_invalid_room_id_is_bad_request() {
    let app = TestApp::new();

    let (status, _) = app
        .get_auth("/api/v1/rooms/not-a-number", &mint_token(1, true))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_room_cascades() {
    let app = TestApp::new();
    let owner = mint_token(1, true);
    let room_id = app.create_room(1, "doomed").await;
    app.post_json_auth(
        &format!("/api/v1/rooms/{room_id}/messages"),
        json!({ "body": "last words" }),
        &owner,
    )
    .await;

    let (status, _) = app.delete_auth(&format!("/api/v1/rooms/{room_id}"), &owner).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let id: i64 = room_id.parse().unwrap();
    assert_eq!(app.store.membership_count(id).await, 0);
    assert_eq!(app.store.message_count(id).await, 0);

    let (status, _) = app.get_auth(&format!("/api/v1/rooms/{room_id}"), &owner).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_room_flow_with_test_server() {
    let server = TestServer::new(TestApp::new().router).unwrap();
    let token = mint_token(5, true);

    let created = server
        .post("/api/v1/rooms")
        .authorization_bearer(&token)
        .json(&json!({ "name": "via test server" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let room_id = created.json::<Value>()["id"].as_str().unwrap().to_string();

    let listed = server
        .get("/api/v1/rooms")
        .authorization_bearer(&token)
        .await;
    listed.assert_status_ok();
    listed.assert_json(&json!([{ "id": room_id, "name": "via test server", "description": null }]));
}
