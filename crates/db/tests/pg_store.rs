//! Integration tests for the PostgreSQL store.
//!
//! These run against a real database (`DATABASE_URL`) and are ignored by
//! default. Run with `cargo test -p iconlib-db -- --ignored`.
//!
//! Exercises the JSONB updates to verify that:
//! - Mutations report 0 rows before the library row exists
//! - `put_category` / `mark_deleted` / `append_icons` / `remove_icon` edit a
//!   single category and leave the rest of the document untouched
//! - Libraries with different names are isolated from each other
//! - Credentials match on username and password exactly

use assert_matches::assert_matches;
use iconlib_core::types::Category;
use iconlib_db::{CredentialStore, IconStore, PgStore};
use sqlx::PgPool;

fn urls(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

async fn store_with_category(pool: PgPool, name: &str) -> PgStore {
    let store = PgStore::new(pool, "test");
    assert!(store.create_library().await.unwrap());
    assert_eq!(
        store.put_category(name, &Category::empty()).await.unwrap(),
        1
    );
    store
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn mutations_before_library_exists_modify_nothing(pool: PgPool) {
    let store = PgStore::new(pool, "test");

    assert_matches!(store.load().await, Ok(None));
    assert_eq!(
        store.put_category("food", &Category::empty()).await.unwrap(),
        0
    );
    assert_eq!(store.mark_deleted("food").await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn create_library_is_one_shot(pool: PgPool) {
    let store = PgStore::new(pool, "test");
    assert!(store.create_library().await.unwrap());
    assert!(!store.create_library().await.unwrap());

    let library = store.load().await.unwrap().expect("library exists");
    assert!(library.icons.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn append_and_remove_edit_one_category(pool: PgPool) {
    let store = store_with_category(pool, "food").await;
    store.put_category("travel", &Category::empty()).await.unwrap();

    assert_eq!(
        store
            .append_icons("food", &urls(&["a", "b", "a"]))
            .await
            .unwrap(),
        1
    );
    assert_eq!(store.remove_icon("food", "a").await.unwrap(), 1);
    assert_eq!(store.remove_icon("food", "missing").await.unwrap(), 0);

    let library = store.load().await.unwrap().unwrap();
    assert_eq!(library.icons["food"].data, urls(&["b", "a"]));
    assert!(library.icons["travel"].data.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn append_to_missing_category_modifies_nothing(pool: PgPool) {
    let store = store_with_category(pool, "food").await;
    assert_eq!(
        store.append_icons("ghost", &urls(&["a"])).await.unwrap(),
        0
    );
    assert!(store.load().await.unwrap().unwrap().category("ghost").is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn mark_deleted_keeps_icons(pool: PgPool) {
    let store = store_with_category(pool, "food").await;
    store.append_icons("food", &urls(&["a"])).await.unwrap();

    assert_eq!(store.mark_deleted("food").await.unwrap(), 1);

    let category = store.load().await.unwrap().unwrap().icons["food"].clone();
    assert!(category.deleted);
    assert_eq!(category.data, urls(&["a"]));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn libraries_are_isolated(pool: PgPool) {
    let first = store_with_category(pool.clone(), "food").await;
    let second = PgStore::new(pool, "other");
    second.create_library().await.unwrap();

    assert!(second.load().await.unwrap().unwrap().icons.is_empty());
    assert!(first.load().await.unwrap().unwrap().category("food").is_some());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn credentials_match_exactly(pool: PgPool) {
    let store = PgStore::new(pool, "test");
    store.upsert_credential("admin", "secret").await.unwrap();

    let found = store.find_credential("admin", "secret").await.unwrap();
    assert_matches!(found, Some(ref user) if user.username == "admin");
    assert!(store
        .find_credential("admin", "wrong")
        .await
        .unwrap()
        .is_none());
}
