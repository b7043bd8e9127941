pub mod backend;
pub mod collection;

pub use backend::{FileStore, KeyValue, MemoryStore};
pub use collection::{CollectionStore, FAVORITES_KEY, RATINGS_KEY, WATCHLIST_KEY};
