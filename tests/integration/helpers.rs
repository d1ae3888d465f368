//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use reqhub_api::{AppState, build_app};
use reqhub_core::config::{AppConfig, EdgePolicy};
use reqhub_database::Store;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store behind the router, for direct inspection
    pub store: Store,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        Self::with_policy(EdgePolicy::Direct)
    }

    /// Create a test application with the given tree edge policy
    pub fn with_policy(edge_policy: EdgePolicy) -> Self {
        let mut config = AppConfig::default();
        config.tree.edge_policy = edge_policy;

        let store = Store::memory();
        let router = build_app(AppState::new(config, store.clone()));
        Self { router, store }
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// GET helper
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// POST helper
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// DELETE helper
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Create a collection and return its public id
    pub async fn create_collection(&self, workspace_id: i64, name: &str) -> String {
        let response = self
            .post(
                "/collections/create",
                json!({ "workspace_id": workspace_id, "name": name }),
            )
            .await;
        response.assert_success();
        response.data_str("collection_id")
    }

    /// Create a folder and return its public id
    pub async fn create_folder(&self, collection_id: &str, name: &str, parent: Option<&str>) -> String {
        let response = self
            .post(
                "/folder/create",
                json!({
                    "collection_id": collection_id,
                    "name": name,
                    "folder_id": parent.unwrap_or(""),
                }),
            )
            .await;
        response.assert_success();
        response.data_str("folder_id")
    }

    /// Create a request definition and return its public id
    pub async fn create_request(
        &self,
        collection_id: &str,
        folder_id: Option<&str>,
        name: &str,
        method: &str,
    ) -> String {
        let response = self
            .post(
                "/request/create",
                json!({
                    "collection_id": collection_id,
                    "folder_id": folder_id.unwrap_or(""),
                    "name": name,
                    "type": "HTTP",
                    "method": method,
                }),
            )
            .await;
        response.assert_success();
        response.data_str("request_id")
    }

    /// Database id of a folder, looked up through `/folder/list`
    pub async fn folder_db_id(&self, collection_id: &str, folder_id: &str) -> i64 {
        let response = self
            .get(&format!("/folder/list?collection_id={collection_id}"))
            .await;
        response.assert_success();
        response.body["data"]["list"]
            .as_array()
            .expect("list array")
            .iter()
            .find(|f| f["folder_id"] == folder_id)
            .and_then(|f| f["id"].as_i64())
            .expect("folder listed")
    }

    /// Database id of a collection, looked up through `/collections/list`
    pub async fn collection_db_id(&self, workspace_id: i64, collection_id: &str) -> i64 {
        self.collection_trees(workspace_id)
            .await
            .iter()
            .find(|c| c["collection_id"] == collection_id)
            .and_then(|c| c["id"].as_i64())
            .expect("collection listed")
    }

    /// The `children` of every collection of a workspace
    pub async fn collection_trees(&self, workspace_id: i64) -> Vec<Value> {
        let response = self
            .get(&format!("/collections/list?workspace_id={workspace_id}"))
            .await;
        response.assert_success();
        response.body["data"]["list"]
            .as_array()
            .expect("list array")
            .clone()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Business code of the envelope
    pub fn code(&self) -> i64 {
        assert_eq!(self.status, StatusCode::OK, "envelope must use HTTP 200");
        self.body["code"].as_i64().expect("code field")
    }

    /// Assert the envelope reports success
    pub fn assert_success(&self) {
        assert_eq!(self.code(), 200, "unexpected failure: {:?}", self.body);
    }

    /// String field of `data`
    pub fn data_str(&self, field: &str) -> String {
        self.body["data"][field]
            .as_str()
            .unwrap_or_else(|| panic!("data.{field} missing: {:?}", self.body))
            .to_string()
    }
}

/// Names of a node list, in order
pub fn names(nodes: &Value) -> Vec<String> {
    nodes
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|n| n["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Child node with the given name
pub fn child<'a>(node: &'a Value, name: &str) -> &'a Value {
    node["children"]
        .as_array()
        .and_then(|c| c.iter().find(|n| n["name"] == name))
        .unwrap_or_else(|| panic!("no child named {name} in {node}"))
}
