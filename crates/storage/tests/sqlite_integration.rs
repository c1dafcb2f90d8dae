use flash_core::model::{Card, DeckKey, SHARED_DECK_KEY, Username};
use storage::repository::{KeyValueStore, Storage};
use storage::sqlite::SqliteStore;

fn build_card(q: &str, a: &str) -> Card {
    Card::new(q, a).unwrap()
}

#[tokio::test]
async fn sqlite_get_set_overwrites_value() {
    let store = SqliteStore::connect("sqlite:file:memdb_kv_overwrite?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    assert_eq!(store.get("missing").await.unwrap(), None);

    store.set("k", "[1]".to_owned()).await.unwrap();
    store.set("k", "[1,2]".to_owned()).await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("[1,2]"));
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let store = SqliteStore::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("first migrate");
    store.set("k", "v".to_owned()).await.unwrap();
    store.migrate().await.expect("second migrate");
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn sqlite_storage_round_trips_decks_and_users() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_decks?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");

    let shared = vec![build_card("2+2?", "4"), build_card("Capital of Spain?", "Madrid")];
    storage
        .decks
        .save_deck(&DeckKey::Shared, &shared)
        .await
        .unwrap();

    let carol = DeckKey::User(Username::parse("Carol").unwrap());
    storage
        .decks
        .save_deck(&carol, &[build_card("Q", "A")])
        .await
        .unwrap();
    storage
        .users
        .save_users(&["carol".to_owned()])
        .await
        .unwrap();

    assert_eq!(storage.decks.load_deck(&DeckKey::Shared).await.unwrap(), shared);
    assert_eq!(storage.decks.load_deck(&carol).await.unwrap().len(), 1);
    assert_eq!(storage.users.load_users().await.unwrap(), vec!["carol"]);

    let raw = storage.kv.get(SHARED_DECK_KEY).await.unwrap().unwrap();
    assert!(raw.starts_with(r#"[{"question":"2+2?","answer":"4"}"#));
}
