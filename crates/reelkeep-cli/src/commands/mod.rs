pub mod catalog;
pub mod clear;
pub mod collections;
pub mod config;
pub mod ratings;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use reelkeep_catalog::TmdbClient;
use reelkeep_config::{Config, CredentialStore, PathManager};
use reelkeep_store::{CollectionStore, FileStore};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Watchlist,
    Favorites,
}

impl CollectionKind {
    pub fn noun(&self) -> &'static str {
        match self {
            CollectionKind::Watchlist => "watchlist",
            CollectionKind::Favorites => "favorites",
        }
    }
}

/// Shared command context: resolved paths, loaded config, and the
/// collection store. The catalog client is built separately because
/// local-only commands must work without a token.
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub store: CollectionStore<FileStore>,
}

impl AppContext {
    pub fn init() -> Result<Self> {
        let paths = PathManager::new().map_err(|e| eyre!("{}", e))?;
        paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to create application directories: {}", e))?;
        let config = Config::load_or_default(&paths.config_file())
            .map_err(|e| eyre!("Failed to load configuration: {}", e))?;
        let store = CollectionStore::new(FileStore::new(paths.data_dir()));
        debug!("Using data directory {:?}", paths.data_dir());
        Ok(Self {
            paths,
            config,
            store,
        })
    }

    pub fn catalog(&self) -> Result<TmdbClient> {
        let mut credentials = CredentialStore::new(self.paths.credentials_file());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
        let token = credentials.tmdb_token().ok_or_else(|| {
            eyre!("No TMDB API token configured. Run `reelkeep config set-token` or set TMDB_API_TOKEN.")
        })?;
        Ok(TmdbClient::with_base_url(
            token,
            self.config.tmdb.base_url.clone(),
        ))
    }
}
