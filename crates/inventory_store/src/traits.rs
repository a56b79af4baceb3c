//! Inventory store trait definitions.

use async_trait::async_trait;
use entities::{InventoryItem, ReminderId, UserProfile};
use uuid::Uuid;

use crate::InventoryStoreResult;

/// Trait for inventory storage operations.
///
/// Stored items carry a `status` field, but it is a cache only: callers
/// derive the status again on read.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    // =========================================================================
    // Item operations
    // =========================================================================

    /// Creates a new item.
    async fn create_item(&self, item: InventoryItem) -> InventoryStoreResult<InventoryItem>;

    /// Gets an item by ID.
    async fn get_item(&self, id: Uuid) -> InventoryStoreResult<Option<InventoryItem>>;

    /// Lists all items, newest first.
    async fn list_items(&self) -> InventoryStoreResult<Vec<InventoryItem>>;

    /// Replaces an item.
    async fn update_item(&self, item: InventoryItem) -> InventoryStoreResult<InventoryItem>;

    /// Updates only the reminder handle of an item.
    async fn update_item_reminder(
        &self,
        id: Uuid,
        reminder_id: Option<ReminderId>,
    ) -> InventoryStoreResult<()>;

    /// Deletes an item.
    async fn delete_item(&self, id: Uuid) -> InventoryStoreResult<()>;

    // =========================================================================
    // Profile operations
    // =========================================================================

    /// Gets the user profile, if one has been created.
    async fn get_profile(&self) -> InventoryStoreResult<Option<UserProfile>>;

    /// Creates or replaces the user profile.
    async fn save_profile(&self, profile: UserProfile) -> InventoryStoreResult<UserProfile>;
}
