//! Room Membership API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{mint_token, TestApp};

fn user_ids(members: &Value) -> Vec<(String, String)> {
    members
        .as_array()
        .unwrap()
        .iter()
        .map(|m| {
            (
                m["user_id"].as_str().unwrap().to_string(),
                m["role"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_admin_adds_members() {
    let app = TestApp::new();
    let admin = mint_token(1, true);
    let room_id = app.create_room(1, "team").await;
    let uri = format!("/api/v1/rooms/{room_id}/members");

    let (status, _) = app.post_json_auth(&uri, json!({ "user_ids": [2, 3] }), &admin).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, members) = app.get_auth(&uri, &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        user_ids(&members),
        vec![
            ("1".into(), "admin".into()),
            ("2".into(), "member".into()),
            ("3".into(), "member".into()),
        ]
    );
}

#[tokio::test]
async fn test_add_members_is_all_or_nothing() {
    let app = TestApp::new();
    let admin = mint_token(1, true);
    let room_id = app.create_room(1, "team").await;
    let uri = format!("/api/v1/rooms/{room_id}/members");
    app.post_json_auth(&uri, json!({ "user_ids": [2] }), &admin).await;

    let (status, body) = app.post_json_auth(&uri, json!({ "user_ids": [2, 3] }), &admin).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 10005);

    let (_, members) = app.get_auth(&uri, &admin).await;
    assert_eq!(members.as_array().unwrap().len(), 2, "user 3 must not be added");
}

#[tokio::test]
async fn test_member_cannot_add_members() {
    let app = TestApp::new();
    let room_id = app.create_room(1, "team").await;
    let uri = format!("/api/v1/rooms/{room_id}/members");
    app.post_json_auth(&uri, json!({ "user_ids": [2] }), &mint_token(1, true))
        .await;

    let (status, _) = app
        .post_json_auth(&uri, json!({ "user_ids": [3] }), &mint_token(2, true))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_add_members_rejects_empty_list() {
    let app = TestApp::new();
    let room_id = app.create_room(1, "team").await;

    let (status, _) = app
        .post_json_auth(
            &format!("/api/v1/rooms/{room_id}/members"),
            json!({ "user_ids": [] }),
            &mint_token(1, true),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_members_to_missing_room() {
    let app = TestApp::new();

    let (status, _) = app
        .post_json_auth(
            "/api/v1/rooms/999/members",
            json!({ "user_ids": [2] }),
            &mint_token(1, true),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_members_is_all_or_nothing() {
    let app = TestApp::new();
    let admin = mint_token(1, true);
    let room_id = app.create_room(1, "team").await;
    let members_uri = format!("/api/v1/rooms/{room_id}/members");
    app.post_json_auth(&members_uri, json!({ "user_ids": [2] }), &admin).await;

    let (status, _) = app
        .post_json_auth(
            &format!("{members_uri}/remove"),
            json!({ "user_ids": [2, 3] }),
            &admin,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, members) = app.get_auth(&members_uri, &admin).await;
    assert_eq!(members.as_array().unwrap().len(), 2, "user 2 must stay");

    let (status, _) = app
        .post_json_auth(&format!("{members_uri}/remove"), json!({ "user_ids": [2] }), &admin)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, members) = app.get_auth(&members_uri, &admin).await;
    assert_eq!(user_ids(&members), vec![("1".into(), "admin".into())]);
}

#[tokio::test]
async fn test_leave_room() {
    let app = TestApp::new();
    let room_id = app.create_room(1, "team").await;
    let members_uri = format!("/api/v1/rooms/{room_id}/members");
    app.post_json_auth(&members_uri, json!({ "user_ids": [2] }), &mint_token(1, true))
        .await;

    let member = mint_token(2, true);
    let (status, _) = app.delete_auth(&format!("{members_uri}/@me"), &member).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Second leave: no longer a member
    let (status, _) = app.delete_auth(&format!("{members_uri}/@me"), &member).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
