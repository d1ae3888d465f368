//! Store behaviour against a live PostgreSQL.
//!
//! Runs only when `REQHUB_TEST_DATABASE_URL` points at a database the
//! tests may migrate; otherwise every test returns early. Each test works
//! inside its own collection so they can share one database.

use std::time::Duration;

use sqlx::PgPool;

use reqhub_core::config::{DatabaseConfig, StoreProvider};
use reqhub_core::error::ErrorKind;
use reqhub_core::types::{CollectionId, FolderId, RequestId};
use reqhub_database::migration::run_migrations;
use reqhub_database::repositories::{ClosureRepository, CollectionRepository};
use reqhub_database::{CollectionRemoval, DatabasePool, Store, SubtreeRemoval};
use reqhub_entity::collection::{Collection, CreateCollection};
use reqhub_entity::folder::{Folder, FolderClosure, NewFolder};
use reqhub_entity::protocol::{Method, Protocol};
use reqhub_entity::request::CreateRequest;

const TEST_WORKSPACE: i64 = 990_001;

async fn postgres() -> Option<(Store, PgPool)> {
    let Ok(url) = std::env::var("REQHUB_TEST_DATABASE_URL") else {
        eprintln!("REQHUB_TEST_DATABASE_URL not set, skipping PostgreSQL test");
        return None;
    };

    let config = DatabaseConfig {
        provider: StoreProvider::Postgres,
        url,
        max_connections: 5,
        min_connections: 0,
        ..DatabaseConfig::default()
    };
    let pool = DatabasePool::connect(&config)
        .await
        .expect("Failed to connect to test database");
    run_migrations(pool.pool())
        .await
        .expect("Failed to run migrations");

    let raw = pool.pool().clone();
    Some((Store::postgres(pool), raw))
}

async fn collection(store: &Store) -> Collection {
    store
        .collections
        .create(&CreateCollection {
            collection_id: CollectionId::new(),
            workspace_id: TEST_WORKSPACE,
            name: "pg".to_string(),
            owner_id: None,
            protocol: Protocol::Http,
            description: String::new(),
        })
        .await
        .expect("create collection")
}

fn new_folder(collection_id: CollectionId, name: &str) -> NewFolder {
    NewFolder {
        folder_id: FolderId::new(),
        collection_id,
        name: name.to_string(),
    }
}

async fn folder(store: &Store, cid: CollectionId, name: &str, parent: Option<&Folder>) -> Folder {
    store
        .folders
        .create(&new_folder(cid, name), parent.map(|p| p.folder_id))
        .await
        .expect("create folder")
}

#[tokio::test]
async fn test_record_self_twice_conflicts() {
    let Some((store, raw)) = postgres().await else {
        return;
    };
    let id = FolderId::new();

    store.closures.record_self(id).await.expect("first insert");
    let err = store.closures.record_self(id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(
        store.closures.ancestors_of(id).await.expect("rows"),
        vec![FolderClosure::reflexive(id)]
    );

    sqlx::query("DELETE FROM folder_closures WHERE ancestor = $1")
        .bind(id)
        .execute(&raw)
        .await
        .expect("cleanup");
}

#[tokio::test]
async fn test_propagation_is_idempotent() {
    let Some((store, _)) = postgres().await else {
        return;
    };
    let c = collection(&store).await;
    let root = folder(&store, c.collection_id, "root", None).await;
    let mid = folder(&store, c.collection_id, "mid", Some(&root)).await;
    let leaf = folder(&store, c.collection_id, "leaf", Some(&mid)).await;

    let rows = store.closures.ancestors_of(leaf.folder_id).await.expect("rows");
    let chain: Vec<(FolderId, i32)> = rows.iter().map(|r| (r.ancestor, r.depth)).collect();
    assert_eq!(
        chain,
        vec![(root.folder_id, 2), (mid.folder_id, 1), (leaf.folder_id, 0)]
    );

    let inserted = store
        .closures
        .record_under_parent(mid.folder_id, leaf.folder_id)
        .await
        .expect("repeat");
    assert_eq!(inserted, 0);
    assert_eq!(
        store.closures.ancestors_of(leaf.folder_id).await.expect("rows").len(),
        3
    );
}

#[tokio::test]
async fn test_unindexed_parent_keeps_only_self_row() {
    let Some((store, _)) = postgres().await else {
        return;
    };
    let c = collection(&store).await;
    let orphan = store
        .folders
        .create(&new_folder(c.collection_id, "orphan"), Some(FolderId::new()))
        .await
        .expect("create");

    assert_eq!(
        store.closures.ancestors_of(orphan.folder_id).await.expect("rows"),
        vec![FolderClosure::reflexive(orphan.folder_id)]
    );
}

#[tokio::test]
async fn test_failed_create_rolls_back_folder_row() {
    let Some((store, _)) = postgres().await else {
        return;
    };
    let c = collection(&store).await;
    let data = new_folder(c.collection_id, "collides");
    store
        .closures
        .record_self(data.folder_id)
        .await
        .expect("stray row");

    let err = store.folders.create(&data, None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(
        store
            .folders
            .find_by_folder_id(data.folder_id)
            .await
            .expect("lookup")
            .is_none()
    );
    assert_eq!(
        store.closures.ancestors_of(data.folder_id).await.expect("rows").len(),
        1
    );
}

#[tokio::test]
async fn test_delete_subtree_cascades() {
    let Some((store, _)) = postgres().await else {
        return;
    };
    let c = collection(&store).await;
    let cid = c.collection_id;
    let a = folder(&store, cid, "a", None).await;
    let b = folder(&store, cid, "b", Some(&a)).await;
    let deep = folder(&store, cid, "c", Some(&b)).await;
    let sibling = folder(&store, cid, "s", Some(&a)).await;
    store
        .requests
        .create(&CreateRequest {
            request_id: RequestId::new(),
            collection_id: cid,
            folder_id: Some(deep.folder_id),
            name: "deep".to_string(),
            protocol: Protocol::Http,
            method: Method::Get,
            path: String::new(),
        })
        .await
        .expect("request");

    let removed = store.folders.delete_subtree(b.id).await.expect("delete");
    assert_eq!(
        removed,
        SubtreeRemoval {
            folders: 2,
            closures: 5,
            requests: 1,
        }
    );

    let left: Vec<FolderId> = store
        .folders
        .find_by_collection(cid)
        .await
        .expect("list")
        .iter()
        .map(|f| f.folder_id)
        .collect();
    assert_eq!(left, vec![a.folder_id, sibling.folder_id]);
    assert!(store.closures.ancestors_of(deep.folder_id).await.expect("rows").is_empty());

    let err = store.folders.delete_subtree(b.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_delete_collection_removes_closures() {
    let Some((store, _)) = postgres().await else {
        return;
    };
    let c = collection(&store).await;
    let a = folder(&store, c.collection_id, "a", None).await;
    let b = folder(&store, c.collection_id, "b", Some(&a)).await;
    let other = collection(&store).await;
    let kept = folder(&store, other.collection_id, "kept", None).await;

    let removed = store
        .collections
        .delete_with_contents(c.id)
        .await
        .expect("delete");
    assert_eq!(
        removed,
        CollectionRemoval {
            folders: 2,
            closures: 3,
            requests: 0,
        }
    );
    assert!(store.closures.ancestors_of(b.folder_id).await.expect("rows").is_empty());
    assert!(store.closures.descendants_of(a.folder_id).await.expect("rows").is_empty());
    assert_eq!(
        store.closures.ancestors_of(kept.folder_id).await.expect("rows").len(),
        1
    );
    assert!(store.collections.find_by_id(c.id).await.expect("lookup").is_none());
}

#[tokio::test]
async fn test_create_waits_for_running_delete() {
    let Some((store, raw)) = postgres().await else {
        return;
    };
    let c = collection(&store).await;
    let parent = folder(&store, c.collection_id, "parent", None).await;

    // Hold the lock a subtree delete takes, then remove the parent under it.
    let mut tx = raw.begin().await.expect("begin");
    CollectionRepository::lock_exclusive(&mut tx, c.collection_id)
        .await
        .expect("lock");

    let creating = {
        let store = store.clone();
        let data = new_folder(c.collection_id, "child");
        let parent_id = parent.folder_id;
        tokio::spawn(async move { store.folders.create(&data, Some(parent_id)).await })
    };
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!creating.is_finished(), "create must wait for the collection lock");

    sqlx::query("DELETE FROM folder_closures WHERE ancestor = $1 OR descendant = $1")
        .bind(parent.folder_id)
        .execute(&mut *tx)
        .await
        .expect("delete closures");
    sqlx::query("DELETE FROM folders WHERE id = $1")
        .bind(parent.id)
        .execute(&mut *tx)
        .await
        .expect("delete folder");
    tx.commit().await.expect("commit");

    let child = creating.await.expect("join").expect("create");
    assert_eq!(
        store.closures.ancestors_of(child.folder_id).await.expect("rows"),
        vec![FolderClosure::reflexive(child.folder_id)]
    );
}

#[tokio::test]
async fn test_delete_waits_for_running_create() {
    let Some((store, raw)) = postgres().await else {
        return;
    };
    let c = collection(&store).await;
    let parent = folder(&store, c.collection_id, "parent", None).await;

    // Hold the lock a folder create takes, and link a child under it.
    let mut tx = raw.begin().await.expect("begin");
    CollectionRepository::lock_shared(&mut tx, c.collection_id)
        .await
        .expect("lock");
    let child = new_folder(c.collection_id, "child");
    sqlx::query("INSERT INTO folders (folder_id, collection_id, name) VALUES ($1, $2, $3)")
        .bind(child.folder_id)
        .bind(child.collection_id)
        .bind(&child.name)
        .execute(&mut *tx)
        .await
        .expect("insert child");
    ClosureRepository::insert_reflexive(&mut tx, child.folder_id)
        .await
        .expect("self row");

    let deleting = {
        let store = store.clone();
        let id = parent.id;
        tokio::spawn(async move { store.folders.delete_subtree(id).await })
    };
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!deleting.is_finished(), "delete must wait for the collection lock");

    ClosureRepository::insert_under_parent(&mut tx, parent.folder_id, child.folder_id)
        .await
        .expect("link child");
    tx.commit().await.expect("commit");

    let removed = deleting.await.expect("join").expect("delete");
    assert_eq!(removed.folders, 2);
    assert!(store.closures.ancestors_of(child.folder_id).await.expect("rows").is_empty());
    assert!(
        store
            .folders
            .find_by_folder_id(child.folder_id)
            .await
            .expect("lookup")
            .is_none()
    );
}
