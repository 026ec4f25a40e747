//! Itemhub server library: storage selection, handlers and routing.
//!
//! The binary in `main.rs` only loads settings and serves [`router::build_router`].

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod storage;

use std::sync::Arc;
use storage::{ItemStore, Storage, StorageMode};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
    pub mode: StorageMode,
}

impl From<Storage> for AppState {
    fn from(storage: Storage) -> Self {
        Self {
            store: storage.store,
            mode: storage.mode,
        }
    }
}
