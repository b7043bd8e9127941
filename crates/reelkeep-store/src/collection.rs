use anyhow::{anyhow, Result};
use reelkeep_models::{MovieRecord, SavedMovie};
use std::collections::BTreeMap;
use tracing::warn;

use crate::backend::KeyValue;

pub const WATCHLIST_KEY: &str = "watchlist";
pub const FAVORITES_KEY: &str = "favorites";
pub const RATINGS_KEY: &str = "ratings";

/// CRUD over the three personal-collection records: watchlist, favorites,
/// and user ratings. Each record is one JSON document under a fixed key.
///
/// Mutations are plain read-modify-write cycles over the whole document with
/// no locking: concurrent mutations against the same key race and the last
/// write wins. Callers that need stronger guarantees must serialize their
/// own mutations.
///
/// Reads fail soft (empty list, empty map, `false`, `None`) and never
/// propagate a storage error; write failures propagate except for
/// [`CollectionStore::clear_all`], which is best-effort.
pub struct CollectionStore<S: KeyValue> {
    backend: S,
}

impl<S: KeyValue> CollectionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub async fn watchlist(&self) -> Vec<SavedMovie> {
        self.load_list(WATCHLIST_KEY).await
    }

    pub async fn favorites(&self) -> Vec<SavedMovie> {
        self.load_list(FAVORITES_KEY).await
    }

    pub async fn add_to_watchlist(&self, movie: &dyn MovieRecord) -> Result<()> {
        self.add_to(WATCHLIST_KEY, movie, false).await
    }

    pub async fn add_to_favorites(&self, movie: &dyn MovieRecord) -> Result<()> {
        self.add_to(FAVORITES_KEY, movie, true).await
    }

    pub async fn remove_from_watchlist(&self, movie_id: u64) -> Result<()> {
        self.remove_from(WATCHLIST_KEY, movie_id).await
    }

    pub async fn remove_from_favorites(&self, movie_id: u64) -> Result<()> {
        self.remove_from(FAVORITES_KEY, movie_id).await
    }

    pub async fn in_watchlist(&self, movie_id: u64) -> bool {
        self.load_list(WATCHLIST_KEY)
            .await
            .iter()
            .any(|m| m.id == movie_id)
    }

    pub async fn in_favorites(&self, movie_id: u64) -> bool {
        self.load_list(FAVORITES_KEY)
            .await
            .iter()
            .any(|m| m.id == movie_id)
    }

    /// Store a rating for a movie, overwriting any previous value. The 1-10
    /// domain is the caller's responsibility; the store accepts any value.
    pub async fn set_rating(&self, movie_id: u64, rating: u8) -> Result<()> {
        let mut ratings = self.load_ratings().await;
        ratings.insert(movie_id, rating);
        self.save(RATINGS_KEY, &ratings).await
    }

    /// The stored rating for a movie. `None` means never rated; it is a
    /// distinct sentinel, not a default value.
    pub async fn rating(&self, movie_id: u64) -> Option<u8> {
        self.load_ratings().await.get(&movie_id).copied()
    }

    pub async fn ratings(&self) -> BTreeMap<u64, u8> {
        self.load_ratings().await
    }

    /// Remove all three records. Best-effort: failures are logged and
    /// swallowed so a partially failed clear still removes what it can.
    pub async fn clear_all(&self) {
        for key in [WATCHLIST_KEY, FAVORITES_KEY, RATINGS_KEY] {
            if let Err(e) = self.backend.remove(key).await {
                warn!("Failed to clear {}: {}", key, e);
            }
        }
    }

    async fn add_to(&self, key: &str, movie: &dyn MovieRecord, favorite: bool) -> Result<()> {
        let mut list = self.load_list(key).await;
        if list.iter().any(|m| m.id == movie.id()) {
            return Ok(());
        }
        list.push(SavedMovie::from_record(movie, favorite));
        self.save(key, &list).await
    }

    async fn remove_from(&self, key: &str, movie_id: u64) -> Result<()> {
        let mut list = self.load_list(key).await;
        list.retain(|m| m.id != movie_id);
        self.save(key, &list).await
    }

    async fn load_list(&self, key: &str) -> Vec<SavedMovie> {
        match self.backend.get(key).await {
            Ok(Some(content)) => match serde_json::from_str(&content) {
                Ok(list) => list,
                Err(e) => {
                    warn!("Corrupt {} record, treating as empty: {}", key, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read {} record, treating as empty: {}", key, e);
                Vec::new()
            }
        }
    }

    async fn load_ratings(&self) -> BTreeMap<u64, u8> {
        match self.backend.get(RATINGS_KEY).await {
            Ok(Some(content)) => match serde_json::from_str(&content) {
                Ok(map) => map,
                Err(e) => {
                    warn!("Corrupt ratings record, treating as empty: {}", e);
                    BTreeMap::new()
                }
            },
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read ratings record, treating as empty: {}", e);
                BTreeMap::new()
            }
        }
    }

    async fn save<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| anyhow!("Failed to serialize {} record: {}", key, e))?;
        self.backend
            .set(key, &json)
            .await
            .map_err(|e| anyhow!("Failed to write {} record: {}", key, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FileStore, MemoryStore};
    use reelkeep_models::Movie;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            poster_path: Some(format!("/poster-{}.jpg", id)),
            backdrop_path: None,
            overview: None,
            vote_average: 7.5,
            vote_count: 120,
            release_date: Some("2020-01-01".to_string()),
            genre_ids: vec![],
            popularity: 0.0,
        }
    }

    fn store() -> CollectionStore<MemoryStore> {
        CollectionStore::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn empty_store_yields_empty_results() {
        let store = store();
        assert!(store.watchlist().await.is_empty());
        assert!(store.favorites().await.is_empty());
        assert!(store.ratings().await.is_empty());
        assert!(!store.in_watchlist(1).await);
        assert_eq!(store.rating(1).await, None);
    }

    #[tokio::test]
    async fn add_then_contains() {
        let store = store();
        store.add_to_watchlist(&movie(42, "X")).await.unwrap();
        assert!(store.in_watchlist(42).await);
        assert!(!store.in_favorites(42).await);
    }

    #[tokio::test]
    async fn add_is_idempotent() {
        let store = store();
        store.add_to_watchlist(&movie(42, "X")).await.unwrap();
        store.add_to_watchlist(&movie(42, "X")).await.unwrap();
        assert_eq!(store.watchlist().await.len(), 1);
    }

    #[tokio::test]
    async fn remove_after_add_and_remove_absent() {
        let store = store();
        store.add_to_watchlist(&movie(42, "X")).await.unwrap();
        store.remove_from_watchlist(42).await.unwrap();
        assert!(!store.in_watchlist(42).await);

        // Removing an id that was never added succeeds.
        store.remove_from_watchlist(7).await.unwrap();
    }

    #[tokio::test]
    async fn collections_are_deduplicated_independently() {
        let store = store();
        store.add_to_watchlist(&movie(42, "X")).await.unwrap();
        store.add_to_favorites(&movie(42, "X")).await.unwrap();
        assert!(store.in_watchlist(42).await);
        assert!(store.in_favorites(42).await);

        store.remove_from_watchlist(42).await.unwrap();
        assert!(!store.in_watchlist(42).await);
        assert!(store.in_favorites(42).await);
    }

    #[tokio::test]
    async fn favorites_entries_carry_the_favorite_flag() {
        let store = store();
        store.add_to_favorites(&movie(42, "X")).await.unwrap();
        let favorites = store.favorites().await;
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].is_favorite, Some(true));

        store.add_to_watchlist(&movie(42, "X")).await.unwrap();
        assert_eq!(store.watchlist().await[0].is_favorite, None);
    }

    #[tokio::test]
    async fn insertion_order_is_preserved() {
        let store = store();
        for id in [3, 1, 2] {
            store.add_to_watchlist(&movie(id, "M")).await.unwrap();
        }
        let ids: Vec<u64> = store.watchlist().await.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn set_get_and_overwrite_rating() {
        let store = store();
        store.set_rating(42, 8).await.unwrap();
        assert_eq!(store.rating(42).await, Some(8));
        store.set_rating(42, 3).await.unwrap();
        assert_eq!(store.rating(42).await, Some(3));
        assert_eq!(store.ratings().await.len(), 1);
    }

    #[tokio::test]
    async fn ratings_for_distinct_movies_coexist() {
        let store = store();
        store.set_rating(1, 10).await.unwrap();
        store.set_rating(2, 1).await.unwrap();
        let all = store.ratings().await;
        assert_eq!(all.get(&1), Some(&10));
        assert_eq!(all.get(&2), Some(&1));
    }

    #[tokio::test]
    async fn clear_all_empties_every_record() {
        let store = store();
        store.add_to_watchlist(&movie(1, "A")).await.unwrap();
        store.add_to_favorites(&movie(2, "B")).await.unwrap();
        store.set_rating(1, 9).await.unwrap();

        store.clear_all().await;

        assert!(store.watchlist().await.is_empty());
        assert!(store.favorites().await.is_empty());
        assert!(store.ratings().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_record_reads_as_empty() {
        let backend = MemoryStore::new();
        backend.set(WATCHLIST_KEY, "not json").await.unwrap();
        backend.set(RATINGS_KEY, "{broken").await.unwrap();
        let store = CollectionStore::new(backend);

        assert!(store.watchlist().await.is_empty());
        assert!(store.ratings().await.is_empty());
        assert!(!store.in_watchlist(1).await);
        assert_eq!(store.rating(1).await, None);
    }

    #[tokio::test]
    async fn file_backed_collection_round_trips() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = CollectionStore::new(FileStore::new(dir.path()));
            store.add_to_watchlist(&movie(1, "First")).await.unwrap();
            store.add_to_watchlist(&movie(2, "Second")).await.unwrap();
            store.set_rating(1, 7).await.unwrap();
        }

        // Reopen against the same directory.
        let store = CollectionStore::new(FileStore::new(dir.path()));
        let ids: Vec<u64> = store.watchlist().await.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(store.rating(1).await, Some(7));
    }

    #[tokio::test]
    async fn ratings_serialize_as_string_keyed_object() {
        let backend = MemoryStore::new();
        let store = CollectionStore::new(backend);
        store.set_rating(42, 9).await.unwrap();

        let raw = store.backend.get(RATINGS_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["42"], serde_json::json!(9));
    }
}
