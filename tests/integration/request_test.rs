//! Integration tests for request definition endpoints.

mod helpers;

use serde_json::json;

use helpers::{TestApp, child, names};

#[tokio::test]
async fn test_create_request_defaults_name() {
    let app = TestApp::new();
    let cid = app.create_collection(1, "c").await;

    let response = app
        .post(
            "/request/create",
            json!({ "collection_id": cid, "type": "HTTP", "method": "GET" }),
        )
        .await;
    response.assert_success();
    assert!(response.body["data"]["id"].as_i64().is_some());

    let trees = app.collection_trees(1).await;
    let node = child(&trees[0], "New Request");
    assert_eq!(node["kind"], "request");
    assert_eq!(node["type"], "HTTP");
    assert_eq!(node["request_id"], response.data_str("request_id").as_str());
    assert!(node["folder_id"].is_null());
}

#[tokio::test]
async fn test_protocol_and_method_are_checked() {
    let app = TestApp::new();
    let cid = app.create_collection(1, "c").await;

    let response = app
        .post(
            "/request/create",
            json!({ "collection_id": cid, "type": "FTP", "method": "GET" }),
        )
        .await;
    assert_eq!(response.code(), 400);

    let response = app
        .post(
            "/request/create",
            json!({ "collection_id": cid, "type": "gRPC", "method": "PATCH" }),
        )
        .await;
    assert_eq!(response.code(), 400);

    let response = app
        .post(
            "/request/create",
            json!({ "collection_id": cid, "type": "websocket", "method": "post" }),
        )
        .await;
    response.assert_success();
}

#[tokio::test]
async fn test_request_folder_must_match_collection() {
    let app = TestApp::new();
    let first = app.create_collection(1, "first").await;
    let second = app.create_collection(1, "second").await;
    let foreign = app.create_folder(&second, "F", None).await;

    let response = app
        .post(
            "/request/create",
            json!({
                "collection_id": first,
                "folder_id": foreign,
                "type": "HTTP",
                "method": "GET",
            }),
        )
        .await;
    assert_eq!(response.code(), 400);

    let response = app
        .post(
            "/request/create",
            json!({
                "collection_id": "6f1c4b7e-8a47-4d0b-9a0e-2b1f3c5d7e90",
                "type": "HTTP",
                "method": "GET",
            }),
        )
        .await;
    assert_eq!(response.code(), 404);
}

#[tokio::test]
async fn test_requests_follow_folders_in_tree() {
    let app = TestApp::new();
    let cid = app.create_collection(1, "c").await;
    let folder = app.create_folder(&cid, "Users", None).await;
    app.create_request(&cid, Some(&folder), "list users", "GET").await;
    app.create_folder(&cid, "Admin", Some(&folder)).await;
    app.create_request(&cid, Some(&folder), "create user", "POST").await;

    let trees = app.collection_trees(1).await;
    let users = child(&trees[0], "Users");
    assert_eq!(
        names(&users["children"]),
        vec!["Admin", "list users", "create user"]
    );
}
