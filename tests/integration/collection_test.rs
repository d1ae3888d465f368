//! Integration tests for collection endpoints and the tree listing.

mod helpers;

use serde_json::json;

use helpers::{TestApp, child, names};
use reqhub_core::config::EdgePolicy;
use reqhub_core::types::FolderId;

#[tokio::test]
async fn test_api_tests_scenario() {
    let app = TestApp::new();
    let cid = app.create_collection(1, "API Tests").await;
    let auth = app.create_folder(&cid, "Auth", None).await;
    let login = app.create_folder(&cid, "Login", Some(&auth)).await;
    app.create_request(&cid, Some(&login), "POST /login", "POST").await;

    let trees = app.collection_trees(1).await;
    assert_eq!(trees.len(), 1);

    let collection = &trees[0];
    assert_eq!(collection["kind"], "collection");
    assert_eq!(collection["name"], "API Tests");
    assert_eq!(collection["workspace_id"], 1);
    assert_eq!(collection["collection_id"], cid.as_str());
    assert_eq!(names(&collection["children"]), vec!["Auth"]);

    let auth_node = child(collection, "Auth");
    assert_eq!(auth_node["kind"], "folder");
    assert_eq!(names(&auth_node["children"]), vec!["Login"]);

    let login_node = child(auth_node, "Login");
    assert_eq!(names(&login_node["children"]), vec!["POST /login"]);

    let request = child(login_node, "POST /login");
    assert_eq!(request["kind"], "request");
    assert_eq!(request["method"], "POST");
    assert_eq!(request["collection_id"], cid.as_str());
}

#[tokio::test]
async fn test_all_ancestors_policy_repeats_descendants() {
    let app = TestApp::with_policy(EdgePolicy::AllAncestors);
    let cid = app.create_collection(1, "c").await;
    let a = app.create_folder(&cid, "A", None).await;
    let b = app.create_folder(&cid, "B", Some(&a)).await;
    app.create_folder(&cid, "C", Some(&b)).await;

    let trees = app.collection_trees(1).await;
    assert_eq!(names(&trees[0]["children"]), vec!["A"]);

    let a_node = child(&trees[0], "A");
    assert_eq!(names(&a_node["children"]), vec!["B", "C"]);
    assert_eq!(names(&child(a_node, "B")["children"]), vec!["C"]);
}

#[tokio::test]
async fn test_list_only_includes_workspace() {
    let app = TestApp::new();
    app.create_collection(1, "mine").await;
    app.create_collection(2, "theirs").await;
    app.create_collection(1, "also mine").await;

    let trees = app.collection_trees(1).await;
    let listed: Vec<&str> = trees.iter().filter_map(|c| c["name"].as_str()).collect();
    assert_eq!(listed, vec!["mine", "also mine"]);

    assert!(app.collection_trees(3).await.is_empty());
}

#[tokio::test]
async fn test_create_collection_validation() {
    let app = TestApp::new();

    let response = app
        .post("/collections/create", json!({ "workspace_id": 1, "name": "" }))
        .await;
    assert_eq!(response.code(), 400);

    let response = app
        .post("/collections/create", json!({ "workspace_id": 0, "name": "x" }))
        .await;
    assert_eq!(response.code(), 400);

    let response = app
        .post(
            "/collections/create",
            json!({ "workspace_id": 1, "name": "x", "protocol": "carrier-pigeon" }),
        )
        .await;
    response.assert_success();
    assert!(response.body["data"]["id"].as_i64().is_some());
}

#[tokio::test]
async fn test_list_requires_workspace() {
    let app = TestApp::new();
    let response = app.get("/collections/list").await;
    assert_eq!(response.code(), 400);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_unknown_route_uses_envelope() {
    let app = TestApp::new();
    let response = app.get("/workspace/list").await;
    assert_eq!(response.code(), 404);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.get("/health").await;
    response.assert_success();
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["store"], "memory");
}

#[tokio::test]
async fn test_edit_collection_renames() {
    let app = TestApp::new();
    let cid = app.create_collection(1, "before").await;
    let id = app.collection_db_id(1, &cid).await;

    let response = app
        .post("/collections/edit", json!({ "id": id, "name": "after" }))
        .await;
    response.assert_success();
    assert_eq!(response.body["data"]["id"], id);
    assert_eq!(response.body["data"]["name"], "after");
    assert_eq!(app.collection_trees(1).await[0]["name"], "after");

    let response = app
        .post("/collections/edit", json!({ "id": id, "name": "" }))
        .await;
    assert_eq!(response.code(), 400);

    let response = app
        .post("/collections/edit", json!({ "id": id + 100, "name": "x" }))
        .await;
    assert_eq!(response.code(), 404);
}

#[tokio::test]
async fn test_delete_collection_removes_folders_and_closures() {
    let app = TestApp::new();
    let gone = app.create_collection(1, "gone").await;
    let a = app.create_folder(&gone, "A", None).await;
    let b = app.create_folder(&gone, "B", Some(&a)).await;
    app.create_request(&gone, Some(&b), "r", "GET").await;
    let kept = app.create_collection(1, "kept").await;
    let k = app.create_folder(&kept, "K", None).await;

    let id = app.collection_db_id(1, &gone).await;
    let response = app.delete(&format!("/collections/delete?id={id}")).await;
    response.assert_success();

    let trees = app.collection_trees(1).await;
    assert_eq!(names(&json!(trees)), vec!["kept"]);
    assert_eq!(names(&trees[0]["children"]), vec!["K"]);

    for folder in [&a, &b] {
        let folder: FolderId = folder.parse().expect("folder id");
        let rows = app.store.closures.ancestors_of(folder).await.expect("rows");
        assert!(rows.is_empty(), "closure rows left for {folder}");
    }
    let k: FolderId = k.parse().expect("folder id");
    assert_eq!(app.store.closures.ancestors_of(k).await.expect("rows").len(), 1);

    let response = app.delete(&format!("/collections/delete?id={id}")).await;
    assert_eq!(response.code(), 404);
    let response = app.delete("/collections/delete?id=abc").await;
    assert_eq!(response.code(), 400);
}

#[tokio::test]
async fn test_collection_name_longer_than_column_is_invalid() {
    let app = TestApp::new();
    let response = app
        .post(
            "/collections/create",
            json!({ "workspace_id": 1, "name": "c".repeat(129) }),
        )
        .await;
    assert_eq!(response.code(), 400);
}

