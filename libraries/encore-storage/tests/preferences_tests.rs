//! Tests for persisted favorites and playlists

use async_trait::async_trait;
use encore_core::{EncoreError, KeyValueStore, PlaylistId, ResourceLocator, Track};
use encore_storage::{MemoryStore, Preferences, PreferencesError, FAVORITES_KEY, PLAYLISTS_KEY};
use mockall::mock;
use mockall::predicate::eq;
use std::sync::Arc;

mock! {
    pub Store {}

    #[async_trait]
    impl KeyValueStore for Store {
        async fn get(&self, key: &str) -> encore_core::Result<Option<String>>;
        async fn set(&self, key: &str, value: &str) -> encore_core::Result<()>;
        async fn remove(&self, key: &str) -> encore_core::Result<()>;
    }
}

// ===== Helpers =====

fn memory_preferences() -> (Arc<MemoryStore>, Preferences) {
    let store = Arc::new(MemoryStore::new());
    let preferences = Preferences::new(store.clone());
    (store, preferences)
}

fn song(id: &str, title: &str) -> Track {
    Track::new(id, title, ResourceLocator::new(format!("music/{id}.mp3")))
}

fn write_failure() -> EncoreError {
    EncoreError::storage("disk full")
}

// ===== Favorites =====

#[tokio::test]
async fn test_favorites_start_empty() {
    let (_, preferences) = memory_preferences();
    assert!(preferences.favorites().await.unwrap().is_empty());
    assert!(!preferences.is_favorite("05 - LOLA").await.unwrap());
}

#[tokio::test]
async fn test_toggle_favorite_adds_then_removes() {
    let (store, preferences) = memory_preferences();

    assert!(preferences.toggle_favorite("05 - LOLA").await.unwrap());
    assert!(preferences.is_favorite("05 - LOLA").await.unwrap());
    assert_eq!(
        store.get(FAVORITES_KEY).await.unwrap().as_deref(),
        Some(r#"["05 - LOLA"]"#)
    );

    assert!(!preferences.toggle_favorite("05 - LOLA").await.unwrap());
    assert!(!preferences.is_favorite("05 - LOLA").await.unwrap());
    assert_eq!(store.get(FAVORITES_KEY).await.unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_favorites_keep_insertion_order() {
    let (_, preferences) = memory_preferences();
    for title in ["c", "a", "b"] {
        preferences.toggle_favorite(title).await.unwrap();
    }
    preferences.toggle_favorite("a").await.unwrap();
    preferences.toggle_favorite("a").await.unwrap();

    assert_eq!(preferences.favorites().await.unwrap(), vec!["c", "b", "a"]);
}

#[tokio::test]
async fn test_favorites_are_keyed_by_title() {
    // Two different tracks sharing a title share favorite status
    let (_, preferences) = memory_preferences();
    let first = song("01", "Intro");
    let second = song("99", "Intro");

    preferences.toggle_favorite(&first.title).await.unwrap();
    assert!(preferences.is_favorite(&second.title).await.unwrap());
}

#[tokio::test]
async fn test_corrupt_favorites_are_reported() {
    let (store, preferences) = memory_preferences();
    store.set(FAVORITES_KEY, "{not json").await.unwrap();

    let err = preferences.favorites().await.unwrap_err();
    assert!(matches!(err, PreferencesError::Corrupt { ref key, .. } if key == FAVORITES_KEY));

    // Toggling must not overwrite the corrupt document
    assert!(preferences.toggle_favorite("x").await.is_err());
    assert_eq!(
        store.get(FAVORITES_KEY).await.unwrap().as_deref(),
        Some("{not json")
    );
}

#[tokio::test]
async fn test_failed_favorite_write_is_surfaced() {
    let mut store = MockStore::new();
    store
        .expect_get()
        .with(eq(FAVORITES_KEY))
        .returning(|_| Ok(Some(r#"["a"]"#.to_string())));
    store
        .expect_set()
        .times(1)
        .returning(|_, _| Err(write_failure()));

    let preferences = Preferences::new(Arc::new(store));
    let err = preferences.toggle_favorite("b").await.unwrap_err();

    assert!(matches!(err, PreferencesError::Store(EncoreError::Storage(_))));
}

#[tokio::test]
async fn test_failed_read_is_surfaced() {
    let mut store = MockStore::new();
    store
        .expect_get()
        .returning(|_| Err(EncoreError::storage("locked")));
    store.expect_set().never();

    let preferences = Preferences::new(Arc::new(store));

    assert!(matches!(
        preferences.playlists().await,
        Err(PreferencesError::Store(_))
    ));
    assert!(preferences.create_playlist("Gym").await.is_err());
}

// ===== Playlists =====

#[tokio::test]
async fn test_create_playlist_trims_name() {
    let (_, preferences) = memory_preferences();

    let playlist = preferences.create_playlist("  Road trip ").await.unwrap();

    assert_eq!(playlist.name, "Road trip");
    assert!(playlist.tracks.is_empty());
    assert!(playlist.id.millis().is_some());
    assert_eq!(preferences.playlists().await.unwrap(), vec![playlist]);
}

#[tokio::test]
async fn test_create_playlist_rejects_blank_name() {
    let mut store = MockStore::new();
    store.expect_get().never();
    store.expect_set().never();
    let preferences = Preferences::new(Arc::new(store));

    assert!(matches!(
        preferences.create_playlist("   ").await,
        Err(PreferencesError::EmptyName)
    ));
}

#[tokio::test]
async fn test_playlist_ids_are_unique() {
    let (_, preferences) = memory_preferences();

    let mut ids = Vec::new();
    for i in 0..20 {
        ids.push(preferences.create_playlist(&format!("p{i}")).await.unwrap().id);
    }

    let mut unique = ids.clone();
    unique.sort_by_key(|id| id.millis());
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(unique, ids, "ids increase with creation order");
}

#[tokio::test]
async fn test_playlists_are_stored_in_documented_shape() {
    let (store, preferences) = memory_preferences();
    let playlist = preferences.create_playlist("Gym").await.unwrap();
    preferences
        .add_tracks(&playlist.id, [song("10", "10 - TORNADO")])
        .await
        .unwrap();

    let raw = store.get(PLAYLISTS_KEY).await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json[0]["id"], playlist.id.as_str());
    assert_eq!(json[0]["name"], "Gym");
    assert_eq!(json[0]["songs"][0]["title"], "10 - TORNADO");
    assert_eq!(json[0]["songs"][0]["file"], "music/10.mp3");
    assert!(json[0]["createdAt"].is_string());
}

#[tokio::test]
async fn test_rename_playlist() {
    let (_, preferences) = memory_preferences();
    let playlist = preferences.create_playlist("Old").await.unwrap();

    preferences
        .rename_playlist(&playlist.id, " New ")
        .await
        .unwrap();

    let renamed = preferences.playlist(&playlist.id).await.unwrap().unwrap();
    assert_eq!(renamed.name, "New");
    assert_eq!(renamed.created_at, playlist.created_at);

    assert!(matches!(
        preferences.rename_playlist(&playlist.id, "").await,
        Err(PreferencesError::EmptyName)
    ));
    assert!(matches!(
        preferences
            .rename_playlist(&PlaylistId::new("missing"), "x")
            .await,
        Err(PreferencesError::PlaylistNotFound(_))
    ));
}

#[tokio::test]
async fn test_add_and_remove_tracks() {
    let (_, preferences) = memory_preferences();
    let playlist = preferences.create_playlist("Mix").await.unwrap();

    let len = preferences
        .add_tracks(
            &playlist.id,
            [song("a", "A"), song("b", "B"), song("a", "A")],
        )
        .await
        .unwrap();
    assert_eq!(len, 3, "duplicates are allowed");

    let removed = preferences.remove_track(&playlist.id, 1).await.unwrap();
    assert_eq!(removed.title, "B");

    let stored = preferences.playlist(&playlist.id).await.unwrap().unwrap();
    let titles: Vec<_> = stored.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "A"]);
}

#[tokio::test]
async fn test_remove_track_out_of_bounds_leaves_playlist() {
    let (_, preferences) = memory_preferences();
    let playlist = preferences.create_playlist("Mix").await.unwrap();
    preferences
        .add_tracks(&playlist.id, [song("a", "A")])
        .await
        .unwrap();

    let err = preferences.remove_track(&playlist.id, 1).await.unwrap_err();

    assert!(matches!(
        err,
        PreferencesError::TrackIndexOutOfBounds { index: 1, len: 1 }
    ));
    let stored = preferences.playlist(&playlist.id).await.unwrap().unwrap();
    assert_eq!(stored.tracks.len(), 1);
}

#[tokio::test]
async fn test_delete_playlist() {
    let (_, preferences) = memory_preferences();
    let keep = preferences.create_playlist("Keep").await.unwrap();
    let gone = preferences.create_playlist("Drop").await.unwrap();

    let removed = preferences.delete_playlist(&gone.id).await.unwrap();
    assert_eq!(removed.name, "Drop");
    assert_eq!(preferences.playlists().await.unwrap(), vec![keep]);

    assert!(matches!(
        preferences.delete_playlist(&gone.id).await,
        Err(PreferencesError::PlaylistNotFound(id)) if id == gone.id
    ));
}

#[tokio::test]
async fn test_failed_playlist_write_keeps_stored_document() {
    let existing = r#"[{"id":"1","name":"Keep","songs":[],"createdAt":"2024-01-01T00:00:00Z"}]"#;
    let mut store = MockStore::new();
    store
        .expect_get()
        .with(eq(PLAYLISTS_KEY))
        .returning(move |_| Ok(Some(existing.to_string())));
    store
        .expect_set()
        .returning(|_, _| Err(write_failure()));

    let preferences = Preferences::new(Arc::new(store));

    assert!(preferences.create_playlist("New").await.is_err());
    assert!(preferences
        .delete_playlist(&PlaylistId::new("1"))
        .await
        .is_err());

    let playlists = preferences.playlists().await.unwrap();
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0].name, "Keep");
}

// ===== Reset =====

#[tokio::test]
async fn test_reset_clears_both_collections() {
    let (store, preferences) = memory_preferences();
    preferences.toggle_favorite("a").await.unwrap();
    preferences.create_playlist("p").await.unwrap();

    preferences.reset().await.unwrap();

    assert!(preferences.favorites().await.unwrap().is_empty());
    assert!(preferences.playlists().await.unwrap().is_empty());
    assert!(store.is_empty().await);
}
