//! In-memory inventory store implementation.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use entities::{InventoryItem, ReminderId, UserProfile};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{InventoryStore, InventoryStoreError, InventoryStoreResult};

/// In-memory inventory store, used by tests and embedders without a database.
#[derive(Debug, Default)]
pub struct MemoryInventoryStore {
    items: Arc<RwLock<HashMap<Uuid, InventoryItem>>>,
    profile: Arc<RwLock<Option<UserProfile>>>,
}

impl MemoryInventoryStore {
    /// Creates a new in-memory inventory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    // =========================================================================
    // Item operations
    // =========================================================================

    async fn create_item(&self, item: InventoryItem) -> InventoryStoreResult<InventoryItem> {
        let mut items = self.items.write().await;
        if items.contains_key(&item.id) {
            return Err(InventoryStoreError::already_exists(
                "Item",
                item.id.to_string(),
            ));
        }
        items.insert(item.id, item.clone());
        tracing::debug!(item_id = %item.id, "Stored item");
        Ok(item)
    }

    async fn get_item(&self, id: Uuid) -> InventoryStoreResult<Option<InventoryItem>> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn list_items(&self) -> InventoryStoreResult<Vec<InventoryItem>> {
        let items = self.items.read().await;
        let mut result: Vec<InventoryItem> = items.values().cloned().collect();

        // Newest first, id breaks ties so the order is stable
        result.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(result)
    }

    async fn update_item(&self, item: InventoryItem) -> InventoryStoreResult<InventoryItem> {
        let mut items = self.items.write().await;
        if !items.contains_key(&item.id) {
            return Err(InventoryStoreError::not_found("Item", item.id.to_string()));
        }
        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_item_reminder(
        &self,
        id: Uuid,
        reminder_id: Option<ReminderId>,
    ) -> InventoryStoreResult<()> {
        let mut items = self.items.write().await;
        let item = items
            .get_mut(&id)
            .ok_or_else(|| InventoryStoreError::not_found("Item", id.to_string()))?;
        item.notification_id = reminder_id;
        Ok(())
    }

    async fn delete_item(&self, id: Uuid) -> InventoryStoreResult<()> {
        let mut items = self.items.write().await;
        if items.remove(&id).is_none() {
            return Err(InventoryStoreError::not_found("Item", id.to_string()));
        }
        Ok(())
    }

    // =========================================================================
    // Profile operations
    // =========================================================================

    async fn get_profile(&self) -> InventoryStoreResult<Option<UserProfile>> {
        let profile = self.profile.read().await;
        Ok(profile.clone())
    }

    async fn save_profile(&self, profile: UserProfile) -> InventoryStoreResult<UserProfile> {
        let mut current = self.profile.write().await;
        *current = Some(profile.clone());
        Ok(profile)
    }
}
