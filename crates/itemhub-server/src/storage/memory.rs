//! In-memory item store, used when no database is configured

use super::{ItemStore, StoreResult};
use async_trait::async_trait;
use itemhub_types::{Item, ItemId, ItemPatch, NewItem};
use tokio::sync::RwLock;

/// Process-lifetime item list. Contents are lost on restart.
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

struct MemoryState {
    items: Vec<Item>,
    next_id: ItemId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                items: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Item>> {
        Ok(self.state.read().await.items.clone())
    }

    async fn create(&self, item: NewItem) -> StoreResult<Item> {
        let mut state = self.state.write().await;

        let id = state.next_id;
        state.next_id += 1;

        let item = Item {
            id,
            name: item.name,
            description: Some(item.description.unwrap_or_default()),
            created_at: None,
            updated_at: None,
        };
        state.items.push(item.clone());

        Ok(item)
    }

    async fn update(&self, id: ItemId, patch: ItemPatch) -> StoreResult<Option<Item>> {
        let mut state = self.state.write().await;

        let Some(item) = state.items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = Some(description);
        }

        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: ItemId) -> StoreResult<bool> {
        let mut state = self.state.write().await;

        match state.items.iter().position(|item| item.id == id) {
            Some(index) => {
                state.items.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_basic_operations() {
        let store = MemoryStore::new();

        // Create assigns ids from 1 and defaults the description
        let widget = store.create(NewItem::new("Widget")).await.unwrap();
        assert_eq!(widget.id, 1);
        assert_eq!(widget.description.as_deref(), Some(""));
        assert!(widget.created_at.is_none());

        let gadget = store
            .create(NewItem::new("Gadget").with_description("shiny"))
            .await
            .unwrap();
        assert_eq!(gadget.id, 2);

        // List keeps insertion order
        let items = store.list().await.unwrap();
        assert_eq!(items, vec![widget.clone(), gadget.clone()]);

        // Delete
        assert!(store.delete(widget.id).await.unwrap());
        assert!(!store.delete(widget.id).await.unwrap());
        assert_eq!(store.list().await.unwrap(), vec![gadget]);
    }

    #[tokio::test]
    async fn test_partial_update() {
        let store = MemoryStore::new();
        let item = store
            .create(NewItem::new("Widget").with_description("old"))
            .await
            .unwrap();

        let patch = ItemPatch {
            name: None,
            description: Some("new".to_string()),
        };
        let updated = store.update(item.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.description.as_deref(), Some("new"));

        // Empty names are accepted on update
        let patch = ItemPatch {
            name: Some(String::new()),
            description: None,
        };
        let updated = store.update(item.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.name, "");
        assert_eq!(updated.description.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_update_missing() {
        let store = MemoryStore::new();
        assert!(store.update(1, ItemPatch::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_not_reused() {
        let store = MemoryStore::new();
        let first = store.create(NewItem::new("a")).await.unwrap();
        store.delete(first.id).await.unwrap();

        let second = store.create(NewItem::new("b")).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_unique_ids() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create(NewItem::new(format!("item-{i}"))).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let ids: Vec<ItemId> = store.list().await.unwrap().iter().map(|i| i.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 50);
        assert_eq!(ids, sorted);
    }
}
