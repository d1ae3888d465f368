//! Integration tests for folder endpoints.

mod helpers;

use serde_json::json;

use helpers::{TestApp, child, names};

#[tokio::test]
async fn test_create_and_list_folder() {
    let app = TestApp::new();
    let cid = app.create_collection(1, "API Tests").await;
    let folder_id = app.create_folder(&cid, "Auth", None).await;

    let response = app.get(&format!("/folder/list?collection_id={cid}")).await;
    response.assert_success();

    let list = response.body["data"]["list"].as_array().expect("list");
    assert_eq!(list.len(), 1);
    let folder = &list[0];
    assert_eq!(folder["folder_id"], folder_id.as_str());
    assert_eq!(folder["collection_id"], cid.as_str());
    assert_eq!(folder["name"], "Auth");
    assert!(folder["id"].as_i64().is_some());
    assert!(folder.get("created_at").is_some());
    assert!(folder.get("updated_at").is_some());
}

#[tokio::test]
async fn test_blank_name_defaults() {
    let app = TestApp::new();
    let cid = app.create_collection(1, "c").await;

    let response = app
        .post("/folder/create", json!({ "collection_id": cid }))
        .await;
    response.assert_success();

    let list = app.get(&format!("/folder/list?collection_id={cid}")).await;
    assert_eq!(list.body["data"]["list"][0]["name"], "New Folder");
}

#[tokio::test]
async fn test_unknown_collection_is_not_found() {
    let app = TestApp::new();
    let response = app
        .post(
            "/folder/create",
            json!({ "collection_id": "6f1c4b7e-8a47-4d0b-9a0e-2b1f3c5d7e90", "name": "x" }),
        )
        .await;
    assert_eq!(response.code(), 404);
    assert_eq!(response.body["msg"], "resource not found");
    assert!(response.body.get("data").is_none());
}

#[tokio::test]
async fn test_malformed_input_is_invalid_params() {
    let app = TestApp::new();

    let response = app
        .post("/folder/create", json!({ "collection_id": "not-a-uuid" }))
        .await;
    assert_eq!(response.code(), 400);

    let response = app.post("/folder/create", json!({ "name": "x" })).await;
    assert_eq!(response.code(), 400);

    let response = app.get("/folder/list").await;
    assert_eq!(response.code(), 400);
}

#[tokio::test]
async fn test_parent_from_other_collection_is_rejected() {
    let app = TestApp::new();
    let first = app.create_collection(1, "first").await;
    let second = app.create_collection(1, "second").await;
    let foreign = app.create_folder(&second, "foreign", None).await;

    let response = app
        .post(
            "/folder/create",
            json!({ "collection_id": first, "name": "x", "folder_id": foreign }),
        )
        .await;
    assert_eq!(response.code(), 400);
}

#[tokio::test]
async fn test_unlinked_parent_becomes_root() {
    let app = TestApp::new();
    let cid = app.create_collection(1, "c").await;
    app.create_folder(&cid, "Existing", None).await;
    app.create_folder(&cid, "Orphan", Some("0d6f3a52-3b8e-4f0c-8c55-6a4a1d9b2e11"))
        .await;

    let trees = app.collection_trees(1).await;
    assert_eq!(names(&trees[0]["children"]), vec!["Existing", "Orphan"]);
}

#[tokio::test]
async fn test_rename_folder() {
    let app = TestApp::new();
    let cid = app.create_collection(1, "c").await;
    let folder_id = app.create_folder(&cid, "Old", None).await;
    let id = app.folder_db_id(&cid, &folder_id).await;

    let response = app
        .post("/folder/rename", json!({ "id": id, "name": "New" }))
        .await;
    response.assert_success();
    assert_eq!(response.body["data"]["id"], id);
    assert_eq!(response.body["data"]["name"], "New");

    let response = app
        .post("/folder/rename", json!({ "id": id, "name": "   " }))
        .await;
    assert_eq!(response.code(), 400);

    let response = app
        .post("/folder/rename", json!({ "id": id, "name": "" }))
        .await;
    assert_eq!(response.code(), 400);

    let response = app
        .post("/folder/rename", json!({ "id": id + 1000, "name": "x" }))
        .await;
    assert_eq!(response.code(), 404);
}

#[tokio::test]
async fn test_delete_cascades_to_subtree() {
    let app = TestApp::new();
    let cid = app.create_collection(1, "c").await;
    let a = app.create_folder(&cid, "A", None).await;
    let b = app.create_folder(&cid, "B", Some(&a)).await;
    app.create_folder(&cid, "C", Some(&b)).await;
    app.create_folder(&cid, "Keep", None).await;
    app.create_request(&cid, Some(&b), "inside", "GET").await;
    app.create_request(&cid, None, "at root", "GET").await;

    let id = app.folder_db_id(&cid, &a).await;
    let response = app.post("/folder/delete", json!({ "id": id })).await;
    response.assert_success();
    assert_eq!(response.body["data"], json!({}));

    let trees = app.collection_trees(1).await;
    assert_eq!(names(&trees[0]["children"]), vec!["Keep", "at root"]);

    let list = app.get(&format!("/folder/list?collection_id={cid}")).await;
    assert_eq!(list.body["data"]["list"].as_array().map(Vec::len), Some(1));

    let response = app.post("/folder/delete", json!({ "id": id })).await;
    assert_eq!(response.code(), 404);
}

#[tokio::test]
async fn test_folder_tree_and_ancestors() {
    let app = TestApp::new();
    let cid = app.create_collection(1, "c").await;
    let a = app.create_folder(&cid, "A", None).await;
    let b = app.create_folder(&cid, "B", Some(&a)).await;
    let c = app.create_folder(&cid, "C", Some(&b)).await;
    app.create_request(&cid, Some(&c), "leaf", "DELETE").await;

    let response = app.get(&format!("/folder/tree?folder_id={b}")).await;
    response.assert_success();
    let tree = &response.body["data"];
    assert_eq!(tree["kind"], "folder");
    assert_eq!(tree["name"], "B");
    let c_node = child(tree, "C");
    let leaf = child(c_node, "leaf");
    assert_eq!(leaf["kind"], "request");
    assert_eq!(leaf["method"], "DELETE");
    assert_eq!(leaf["folder_id"], c.as_str());

    let response = app.get(&format!("/folder/ancestors?folder_id={c}")).await;
    response.assert_success();
    assert_eq!(names(&response.body["data"]["list"]), vec!["A", "B", "C"]);

    let response = app
        .get("/folder/tree?folder_id=0d6f3a52-3b8e-4f0c-8c55-6a4a1d9b2e11")
        .await;
    assert_eq!(response.code(), 404);
}

#[tokio::test]
async fn test_tree_root_carries_kind_tag() {
    let app = TestApp::new();
    let cid = app.create_collection(1, "c").await;
    let lone = app.create_folder(&cid, "Lone", None).await;

    let response = app.get(&format!("/folder/tree?folder_id={lone}")).await;
    response.assert_success();
    let tree = &response.body["data"];
    assert_eq!(tree["kind"], "folder");
    assert_eq!(tree["folder_id"], lone.as_str());
    assert_eq!(tree["children"], json!([]));
}

#[tokio::test]
async fn test_folder_name_longer_than_column_is_invalid() {
    let app = TestApp::new();
    let cid = app.create_collection(1, "c").await;

    let response = app
        .post(
            "/folder/create",
            json!({ "collection_id": cid, "name": "f".repeat(100) }),
        )
        .await;
    assert_eq!(response.code(), 400);

    let folder = app.create_folder(&cid, &"f".repeat(64), None).await;
    let id = app.folder_db_id(&cid, &folder).await;
    let response = app
        .post("/folder/rename", json!({ "id": id, "name": "g".repeat(65) }))
        .await;
    assert_eq!(response.code(), 400);
}

