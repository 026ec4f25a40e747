//! Storage layer
//!
//! Items live either in a relational database (PostgreSQL, or embedded SQLite
//! for `sqlite:` URLs) or, when no database is configured, in process memory.
//! The choice is made once at startup by [`select`].

pub mod db;
pub mod memory;

pub use db::{PgStore, SqliteStore};
pub use memory::MemoryStore;

use async_trait::async_trait;
use itemhub_types::{Item, ItemId, ItemPatch, NewItem};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Operations every item backend supports.
///
/// `update` and `delete` report a missing id as `Ok(None)` / `Ok(false)`;
/// errors are reserved for the backend itself failing.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Create the backing table if it does not exist yet
    async fn ensure_schema(&self) -> StoreResult<()> {
        Ok(())
    }

    /// All items, ascending by id
    async fn list(&self) -> StoreResult<Vec<Item>>;

    async fn create(&self, item: NewItem) -> StoreResult<Item>;

    async fn update(&self, id: ItemId, patch: ItemPatch) -> StoreResult<Option<Item>>;

    async fn delete(&self, id: ItemId) -> StoreResult<bool>;
}

/// Backing store picked at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Memory,
    Postgres,
    Sqlite,
}

impl StorageMode {
    pub fn is_persistent(&self) -> bool {
        !matches!(self, StorageMode::Memory)
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageMode::Memory => write!(f, "memory"),
            StorageMode::Postgres => write!(f, "postgres"),
            StorageMode::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// The selected store together with the mode that produced it
#[derive(Clone)]
pub struct Storage {
    pub mode: StorageMode,
    pub store: Arc<dyn ItemStore>,
}

impl Storage {
    pub fn memory() -> Self {
        Self {
            mode: StorageMode::Memory,
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Spawn schema creation in the background. No-op in memory mode.
    ///
    /// The server does not wait for this; a failure is logged and the
    /// process keeps running.
    pub fn spawn_schema_init(&self) -> Option<JoinHandle<()>> {
        if !self.mode.is_persistent() {
            return None;
        }

        let store = self.store.clone();
        Some(tokio::spawn(async move {
            match store.ensure_schema().await {
                Ok(()) => info!("Ensured items table exists"),
                Err(e) => error!("Error creating items table: {}", e),
            }
        }))
    }
}

/// Pick the backing store from the configured database URL.
///
/// A missing or blank URL selects the in-memory store. Otherwise a pool is
/// built without connecting, so an unreachable database only surfaces when
/// requests start using it.
pub fn select(database_url: Option<&str>) -> StoreResult<Storage> {
    let url = match database_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => url,
        None => {
            warn!("Database connection not configured, falling back to in-memory store");
            return Ok(Storage::memory());
        }
    };

    if url.starts_with("sqlite:") {
        info!("Using SQLite item store");
        Ok(Storage {
            mode: StorageMode::Sqlite,
            store: Arc::new(SqliteStore::connect_lazy(url)?),
        })
    } else {
        info!("Using PostgreSQL item store");
        Ok(Storage {
            mode: StorageMode::Postgres,
            store: Arc::new(PgStore::connect_lazy(url)?),
        })
    }
}
