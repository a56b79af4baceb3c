//! Inventory service

use std::sync::Arc;

use entities::{Category, InventoryItem, ItemStatus, LeadTimeConfig, UserProfile};
use expiry_status::{Clock, StatusEngine};
use inventory_store::InventoryStore;
use reminders::{NotificationPlatform, ReminderConfig, ReminderPayload, ReminderScheduler};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{suggest_recipe, InventoryError, InventoryResult, Recipe, RecipeSuggestion};

/// Input for a new item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub expiration_date: String,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub image_uri: Option<String>,
}

impl NewItem {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        expiration_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            expiration_date: expiration_date.into(),
            barcode: None,
            image_uri: None,
        }
    }

    fn into_item(self) -> InventoryItem {
        let mut item = InventoryItem::new(self.name.trim(), self.category, self.expiration_date);
        item.barcode = self.barcode;
        item.image_uri = self.image_uri;
        item
    }
}

/// Partial changes to an item. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub category: Option<Category>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub image_uri: Option<String>,
}

impl ItemUpdate {
    fn apply(self, item: &mut InventoryItem) {
        if let Some(name) = self.name {
            item.name = name.trim().to_string();
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(expiration_date) = self.expiration_date {
            item.expiration_date = expiration_date;
        }
        if let Some(barcode) = self.barcode {
            item.barcode = Some(barcode);
        }
        if let Some(image_uri) = self.image_uri {
            item.image_uri = Some(image_uri);
        }
    }
}

/// An item with its status derived for today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetail {
    pub item: InventoryItem,
    pub status: ItemStatus,
    /// Whole days until expiration, or the invalid-date sentinel.
    pub days_until_expiration: i64,
}

/// Service for managing inventory items and their expiry reminders.
///
/// Store failures propagate. Reminder failures never do: an item whose
/// reminder could not be scheduled is stored without a handle.
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
    scheduler: Arc<ReminderScheduler>,
    status: StatusEngine,
    default_lead_times: LeadTimeConfig,
}

impl InventoryService {
    pub fn new(
        store: Arc<dyn InventoryStore>,
        scheduler: Arc<ReminderScheduler>,
        status: StatusEngine,
        default_lead_times: LeadTimeConfig,
    ) -> Self {
        Self {
            store,
            scheduler,
            status,
            default_lead_times,
        }
    }

    /// Wires a scheduler and status engine from `config`, sharing one clock.
    pub fn from_config(
        store: Arc<dyn InventoryStore>,
        platform: Arc<dyn NotificationPlatform>,
        clock: Arc<dyn Clock>,
        config: &ReminderConfig,
    ) -> Self {
        let scheduler = ReminderScheduler::from_config(platform, clock.clone(), config);
        Self::new(
            store,
            Arc::new(scheduler),
            StatusEngine::new(clock),
            config.default_lead_times,
        )
    }

    /// Prepares the notification channel. Failure is logged; scheduling
    /// retries the setup.
    pub async fn initialize(&self) {
        if let Err(e) = self.scheduler.initialize().await {
            warn!(error = %e, "Notification channel setup failed");
        }
    }

    /// The saved lead times, or the configured defaults before onboarding.
    pub async fn lead_times(&self) -> InventoryResult<LeadTimeConfig> {
        Ok(self
            .store
            .get_profile()
            .await?
            .map(|profile| profile.notification_settings)
            .unwrap_or(self.default_lead_times))
    }

    /// Adds an item and schedules its reminder.
    pub async fn add_item(&self, new_item: NewItem) -> InventoryResult<InventoryItem> {
        validate(&new_item.name, &new_item.expiration_date)?;

        let lead_times = self.lead_times().await?;
        let mut item = new_item.into_item();
        item.notification_id = self
            .scheduler
            .schedule_item_reminder(&item, &lead_times)
            .await;
        item.status = self.status_of(&item, &lead_times);

        match self.store.create_item(item.clone()).await {
            Ok(item) => {
                info!(item_id = %item.id, status = %item.status, "Added item");
                Ok(item)
            }
            Err(e) => {
                // Don't leave a reminder behind for an item that was never stored
                self.scheduler
                    .cancel_item_reminder(item.notification_id.as_ref())
                    .await;
                Err(e.into())
            }
        }
    }

    /// Applies `update` and replaces the item's reminder.
    pub async fn edit_item(&self, id: Uuid, update: ItemUpdate) -> InventoryResult<InventoryItem> {
        let mut item = self.find_item(id).await?;
        update.apply(&mut item);
        validate(&item.name, &item.expiration_date)?;

        let lead_times = self.lead_times().await?;
        item.notification_id = self
            .scheduler
            .schedule_item_reminder(&item, &lead_times)
            .await;
        item.status = self.status_of(&item, &lead_times);

        match self.store.update_item(item.clone()).await {
            Ok(item) => {
                info!(item_id = %item.id, status = %item.status, "Updated item");
                Ok(item)
            }
            Err(e) => {
                // The stored item still points at the old, already cancelled
                // handle, so nothing would ever retire the new reminder
                self.scheduler
                    .cancel_item_reminder(item.notification_id.as_ref())
                    .await;
                Err(e.into())
            }
        }
    }

    /// Cancels the item's reminder and deletes it.
    pub async fn delete_item(&self, id: Uuid) -> InventoryResult<()> {
        let item = self.find_item(id).await?;
        self.scheduler
            .cancel_item_reminder(item.notification_id.as_ref())
            .await;
        self.store.delete_item(id).await?;
        info!(item_id = %id, "Deleted item");
        Ok(())
    }

    /// Saves new lead times and reschedules every item against them.
    ///
    /// Returns all items with their new reminder handles and status. Every
    /// item is persisted even when some fail; an item whose handle could not
    /// be stored has its new reminder cancelled, and the first store error is
    /// returned.
    pub async fn update_lead_times(
        &self,
        lead_times: LeadTimeConfig,
    ) -> InventoryResult<Vec<InventoryItem>> {
        let profile = self
            .store
            .get_profile()
            .await?
            .unwrap_or_else(|| UserProfile::new(""))
            .with_lead_times(lead_times);
        self.store.save_profile(profile).await?;

        let items = self.store.list_items().await?;
        let mut items = self.scheduler.reschedule_all(items, &lead_times).await;

        let mut first_error = None;
        for item in &mut items {
            let stored = self
                .store
                .update_item_reminder(item.id, item.notification_id.clone())
                .await;
            if let Err(e) = stored {
                warn!(item_id = %item.id, error = %e, "Failed to store reminder handle");
                self.scheduler
                    .cancel_item_reminder(item.notification_id.as_ref())
                    .await;
                item.notification_id = None;
                first_error.get_or_insert(e);
            }
        }
        if let Some(e) = first_error {
            return Err(e.into());
        }

        info!(
            food = lead_times.food_lead_time,
            medicine = lead_times.medicine_lead_time,
            cosmetics = lead_times.cosmetics_lead_time,
            "Updated lead times"
        );
        Ok(items)
    }

    /// Lists every item, newest first, with status derived for today.
    pub async fn list_items(&self) -> InventoryResult<Vec<InventoryItem>> {
        let lead_times = self.lead_times().await?;
        let items = self.store.list_items().await?;
        Ok(self.status.compute_all_statuses(&items, Some(&lead_times)))
    }

    /// Returns an item with its derived status and days remaining.
    pub async fn item_detail(&self, id: Uuid) -> InventoryResult<ItemDetail> {
        let item = self.find_item(id).await?;
        let lead_times = self.lead_times().await?;
        Ok(self.detail(item, &lead_times))
    }

    /// Resolves the item a tapped reminder points at. Returns `None` when the
    /// item has since been deleted.
    pub async fn open_from_notification(
        &self,
        payload: &ReminderPayload,
    ) -> InventoryResult<Option<ItemDetail>> {
        let Some(item) = self.store.get_item(payload.item_id).await? else {
            debug!(item_id = %payload.item_id, "Reminder refers to a deleted item");
            return Ok(None);
        };
        let lead_times = self.lead_times().await?;
        Ok(Some(self.detail(item, &lead_times)))
    }

    /// Suggests a recipe for food that is expiring soon.
    pub async fn recipe_suggestion(
        &self,
        recipes: &[Recipe],
    ) -> InventoryResult<Option<RecipeSuggestion>> {
        let items = self.list_items().await?;
        Ok(suggest_recipe(&items, recipes))
    }

    async fn find_item(&self, id: Uuid) -> InventoryResult<InventoryItem> {
        self.store
            .get_item(id)
            .await?
            .ok_or(InventoryError::NotFound(id))
    }

    fn status_of(&self, item: &InventoryItem, lead_times: &LeadTimeConfig) -> ItemStatus {
        self.status
            .compute_status(&item.expiration_date, item.category, Some(lead_times))
    }

    fn detail(&self, item: InventoryItem, lead_times: &LeadTimeConfig) -> ItemDetail {
        let status = self.status_of(&item, lead_times);
        let days_until_expiration = self.status.days_until_expiration(&item.expiration_date);
        ItemDetail {
            item: InventoryItem { status, ..item },
            status,
            days_until_expiration,
        }
    }
}

fn validate(name: &str, expiration_date: &str) -> InventoryResult<()> {
    if name.trim().is_empty() {
        return Err(InventoryError::Validation("name is required".to_string()));
    }
    if expiration_date.trim().is_empty() {
        return Err(InventoryError::Validation(
            "expiration date is required".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use expiry_status::{format_expiration_date, FixedClock, INVALID_DATE_SENTINEL};
    use inventory_store::MemoryInventoryStore;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use entities::ReminderId;
    use inventory_store::{InventoryStoreError, InventoryStoreResult};
    use reminders::MemoryNotificationPlatform;

    use super::*;

    /// Memory store whose item writes can be made to fail.
    #[derive(Default)]
    struct FailingStore {
        inner: MemoryInventoryStore,
        fail_update: Mutex<bool>,
        fail_reminder_for: Mutex<Option<Uuid>>,
    }

    #[async_trait]
    impl InventoryStore for FailingStore {
        async fn create_item(&self, item: InventoryItem) -> InventoryStoreResult<InventoryItem> {
            self.inner.create_item(item).await
        }

        async fn get_item(&self, id: Uuid) -> InventoryStoreResult<Option<InventoryItem>> {
            self.inner.get_item(id).await
        }

        async fn list_items(&self) -> InventoryStoreResult<Vec<InventoryItem>> {
            self.inner.list_items().await
        }

        async fn update_item(&self, item: InventoryItem) -> InventoryStoreResult<InventoryItem> {
            if *self.fail_update.lock().unwrap() {
                return Err(InventoryStoreError::Other("disk full".to_string()));
            }
            self.inner.update_item(item).await
        }

        async fn update_item_reminder(
            &self,
            id: Uuid,
            reminder_id: Option<ReminderId>,
        ) -> InventoryStoreResult<()> {
            if *self.fail_reminder_for.lock().unwrap() == Some(id) {
                return Err(InventoryStoreError::Other("disk full".to_string()));
            }
            self.inner.update_item_reminder(id, reminder_id).await
        }

        async fn delete_item(&self, id: Uuid) -> InventoryStoreResult<()> {
            self.inner.delete_item(id).await
        }

        async fn get_profile(&self) -> InventoryStoreResult<Option<UserProfile>> {
            self.inner.get_profile().await
        }

        async fn save_profile(&self, profile: UserProfile) -> InventoryStoreResult<UserProfile> {
            self.inner.save_profile(profile).await
        }
    }

    fn failing_harness() -> (
        Arc<FailingStore>,
        Arc<MemoryNotificationPlatform>,
        InventoryService,
    ) {
        let store = Arc::new(FailingStore::default());
        let platform = Arc::new(MemoryNotificationPlatform::new());
        let clock = Arc::new(FixedClock::at(june_10(), 9, 30).unwrap());
        let service = InventoryService::from_config(
            store.clone(),
            platform.clone(),
            clock,
            &ReminderConfig::default(),
        );
        (store, platform, service)
    }

    fn june_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn in_days(days: i64) -> String {
        format_expiration_date(june_10() + Duration::days(days))
    }

    struct Harness {
        store: Arc<MemoryInventoryStore>,
        platform: Arc<MemoryNotificationPlatform>,
        clock: Arc<FixedClock>,
        service: InventoryService,
    }

    /// Service over memory backends with the clock at 2024-06-10 09:30.
    fn harness() -> Harness {
        let store = Arc::new(MemoryInventoryStore::new());
        let platform = Arc::new(MemoryNotificationPlatform::new());
        let clock = Arc::new(FixedClock::at(june_10(), 9, 30).unwrap());
        let service = InventoryService::from_config(
            store.clone(),
            platform.clone(),
            clock.clone(),
            &ReminderConfig::default(),
        );
        Harness {
            store,
            platform,
            clock,
            service,
        }
    }

    #[tokio::test]
    async fn test_add_item_schedules_reminder() {
        let h = harness();

        let item = h
            .service
            .add_item(NewItem::new("  Milk ", Category::Food, in_days(5)))
            .await
            .unwrap();

        assert_eq!(item.name, "Milk");
        assert_eq!(item.status, ItemStatus::Fresh);
        let reminder_id = item.notification_id.clone().unwrap();
        assert_eq!(h.platform.live_for_item(item.id), vec![reminder_id.clone()]);

        let stored = h.store.get_item(item.id).await.unwrap().unwrap();
        assert_eq!(stored.notification_id, Some(reminder_id));
    }

    #[tokio::test]
    async fn test_add_expired_item() {
        let h = harness();

        let item = h
            .service
            .add_item(NewItem::new("Yogurt", Category::Food, "2024-06-09"))
            .await
            .unwrap();

        assert_eq!(item.status, ItemStatus::Expired);
        assert!(item.notification_id.is_none());
        assert_eq!(h.platform.live_count(), 0);

        let detail = h.service.item_detail(item.id).await.unwrap();
        assert_eq!(detail.days_until_expiration, -1);
    }

    #[tokio::test]
    async fn test_add_item_validation() {
        let h = harness();

        let result = h
            .service
            .add_item(NewItem::new("   ", Category::Food, "2024-06-20"))
            .await;
        assert!(matches!(result, Err(InventoryError::Validation(_))));

        let result = h
            .service
            .add_item(NewItem::new("Milk", Category::Food, ""))
            .await;
        assert!(matches!(result, Err(InventoryError::Validation(_))));

        assert!(h.service.list_items().await.unwrap().is_empty());
        assert_eq!(h.platform.live_count(), 0);
    }

    #[tokio::test]
    async fn test_add_item_survives_platform_failure() {
        let h = harness();
        h.platform.set_fail_schedule(true);

        let item = h
            .service
            .add_item(NewItem::new("Milk", Category::Food, in_days(5)))
            .await
            .unwrap();

        assert!(item.notification_id.is_none());
        assert!(h.store.get_item(item.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_add_item_with_unparseable_date() {
        let h = harness();

        let item = h
            .service
            .add_item(NewItem::new("Mystery jar", Category::Food, "someday"))
            .await
            .unwrap();

        assert_eq!(item.status, ItemStatus::Fresh);
        assert!(item.notification_id.is_none());
        let detail = h.service.item_detail(item.id).await.unwrap();
        assert_eq!(detail.days_until_expiration, INVALID_DATE_SENTINEL);
    }

    #[tokio::test]
    async fn test_edit_item_replaces_reminder() {
        let h = harness();
        let item = h
            .service
            .add_item(NewItem::new("Milk", Category::Food, in_days(5)))
            .await
            .unwrap();
        let old_id = item.notification_id.clone().unwrap();

        let edited = h
            .service
            .edit_item(
                item.id,
                ItemUpdate {
                    name: Some("Oat milk".to_string()),
                    expiration_date: Some(in_days(12)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let new_id = edited.notification_id.clone().unwrap();
        assert_ne!(new_id, old_id);
        assert_eq!(h.platform.live_for_item(item.id), vec![new_id.clone()]);

        let request = h.platform.reminder(&new_id).unwrap();
        assert_eq!(request.content.payload.item_name, "Oat milk");

        let stored = h.store.get_item(item.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Oat milk");
        assert_eq!(stored.notification_id, Some(new_id));
    }

    #[tokio::test]
    async fn test_edit_into_expired_clears_reminder() {
        let h = harness();
        let item = h
            .service
            .add_item(NewItem::new("Milk", Category::Food, in_days(5)))
            .await
            .unwrap();

        let edited = h
            .service
            .edit_item(
                item.id,
                ItemUpdate {
                    expiration_date: Some(in_days(-2)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(edited.status, ItemStatus::Expired);
        assert!(edited.notification_id.is_none());
        assert_eq!(h.platform.live_count(), 0);
    }

    #[tokio::test]
    async fn test_edit_missing_item() {
        let h = harness();
        let id = Uuid::new_v4();

        let result = h.service.edit_item(id, ItemUpdate::default()).await;
        assert!(matches!(result, Err(InventoryError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_edit_rejects_blank_name() {
        let h = harness();
        let item = h
            .service
            .add_item(NewItem::new("Milk", Category::Food, in_days(5)))
            .await
            .unwrap();

        let result = h
            .service
            .edit_item(
                item.id,
                ItemUpdate {
                    name: Some(" ".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(InventoryError::Validation(_))));

        // Original reminder is untouched
        assert_eq!(
            h.platform.live_for_item(item.id),
            vec![item.notification_id.unwrap()]
        );
    }

    #[tokio::test]
    async fn test_delete_item_cancels_reminder() {
        let h = harness();
        let item = h
            .service
            .add_item(NewItem::new("Milk", Category::Food, in_days(5)))
            .await
            .unwrap();
        assert_eq!(h.platform.live_count(), 1);

        h.service.delete_item(item.id).await.unwrap();

        assert_eq!(h.platform.live_count(), 0);
        assert!(h.store.get_item(item.id).await.unwrap().is_none());
        assert!(matches!(
            h.service.delete_item(item.id).await,
            Err(InventoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_lead_times_fall_back_to_config() {
        let h = harness();
        assert_eq!(
            h.service.lead_times().await.unwrap(),
            LeadTimeConfig::new(3, 7, 7)
        );

        h.service
            .update_lead_times(LeadTimeConfig::new(5, 10, 14))
            .await
            .unwrap();
        assert_eq!(
            h.service.lead_times().await.unwrap(),
            LeadTimeConfig::new(5, 10, 14)
        );
    }

    #[tokio::test]
    async fn test_update_lead_times_keeps_profile() {
        let h = harness();
        h.store
            .save_profile(UserProfile::new("Linh"))
            .await
            .unwrap();

        h.service
            .update_lead_times(LeadTimeConfig::new(1, 2, 3))
            .await
            .unwrap();

        let profile = h.store.get_profile().await.unwrap().unwrap();
        assert_eq!(profile.user_name, "Linh");
        assert_eq!(profile.notification_settings, LeadTimeConfig::new(1, 2, 3));
    }

    #[tokio::test]
    async fn test_update_lead_times_reschedules_all() {
        let h = harness();
        let soon = h
            .service
            .add_item(NewItem::new("Milk", Category::Food, in_days(5)))
            .await
            .unwrap();
        let later = h
            .service
            .add_item(NewItem::new("Cheese", Category::Food, in_days(10)))
            .await
            .unwrap();
        assert_eq!(soon.status, ItemStatus::Fresh);
        let later_old_id = later.notification_id.clone().unwrap();

        let items = h
            .service
            .update_lead_times(LeadTimeConfig::new(7, 7, 7))
            .await
            .unwrap();
        assert_eq!(items.len(), 2);

        // The warning day for Milk is already behind us
        let stored_soon = h.store.get_item(soon.id).await.unwrap().unwrap();
        assert!(stored_soon.notification_id.is_none());
        assert!(h.platform.live_for_item(soon.id).is_empty());

        let stored_later = h.store.get_item(later.id).await.unwrap().unwrap();
        let later_new_id = stored_later.notification_id.unwrap();
        assert_ne!(later_new_id, later_old_id);
        assert_eq!(h.platform.live_for_item(later.id), vec![later_new_id]);

        let detail = h.service.item_detail(soon.id).await.unwrap();
        assert_eq!(detail.status, ItemStatus::ExpiringSoon);
        assert_eq!(detail.days_until_expiration, 5);
    }

    #[tokio::test]
    async fn test_list_items_derives_status_on_read() {
        let h = harness();
        let item = h
            .service
            .add_item(NewItem::new("Milk", Category::Food, in_days(5)))
            .await
            .unwrap();
        assert_eq!(item.status, ItemStatus::Fresh);

        h.clock.advance(Duration::days(3));
        let items = h.service.list_items().await.unwrap();
        assert_eq!(items[0].status, ItemStatus::ExpiringSoon);

        h.clock.advance(Duration::days(3));
        let items = h.service.list_items().await.unwrap();
        assert_eq!(items[0].status, ItemStatus::Expired);

        // The stored cache is not the source of truth
        let stored = h.store.get_item(item.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ItemStatus::Fresh);
    }

    #[tokio::test]
    async fn test_item_detail() {
        let h = harness();
        let item = h
            .service
            .add_item(NewItem::new("Milk", Category::Food, "2024-06-13"))
            .await
            .unwrap();

        let detail = h.service.item_detail(item.id).await.unwrap();
        assert_eq!(detail.status, ItemStatus::ExpiringSoon);
        assert_eq!(detail.item.status, ItemStatus::ExpiringSoon);
        assert_eq!(detail.days_until_expiration, 3);

        assert!(matches!(
            h.service.item_detail(Uuid::new_v4()).await,
            Err(InventoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_open_from_notification() {
        let h = harness();
        let item = h
            .service
            .add_item(NewItem::new("Aspirin", Category::Medicine, in_days(30)))
            .await
            .unwrap();
        let request = h
            .platform
            .reminder(item.notification_id.as_ref().unwrap())
            .unwrap();

        let detail = h
            .service
            .open_from_notification(&request.content.payload)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.item.id, item.id);
        assert_eq!(detail.days_until_expiration, 30);

        h.service.delete_item(item.id).await.unwrap();
        let detail = h
            .service
            .open_from_notification(&request.content.payload)
            .await
            .unwrap();
        assert!(detail.is_none());
    }

    #[tokio::test]
    async fn test_recipe_suggestion() {
        let h = harness();
        let recipes = Recipe::list_from_json(
            r#"[{"id": "r1", "name": "Banana Bread", "ingredients": ["banana"], "tag": "Baking"}]"#,
        )
        .unwrap();

        h.service
            .add_item(NewItem::new("Bananas", Category::Food, in_days(6)))
            .await
            .unwrap();
        assert!(h.service.recipe_suggestion(&recipes).await.unwrap().is_none());

        h.clock.advance(Duration::days(4));
        let suggestion = h.service.recipe_suggestion(&recipes).await.unwrap().unwrap();
        assert_eq!(suggestion.message, "Try making Banana Bread with your Bananas!");
    }

    #[tokio::test]
    async fn test_new_item_from_json() {
        let new_item: NewItem = serde_json::from_str(
            r#"{"name": "Sunscreen", "type": "Cosmetics", "expirationDate": "2025-01-01"}"#,
        )
        .unwrap();
        assert_eq!(new_item.category, Category::Cosmetics);
        assert!(new_item.barcode.is_none());
    }

    #[tokio::test]
    async fn test_failed_edit_leaves_no_orphan_reminder() {
        let (store, platform, service) = failing_harness();
        let item = service
            .add_item(NewItem::new("Milk", Category::Food, in_days(10)))
            .await
            .unwrap();

        *store.fail_update.lock().unwrap() = true;
        let result = service
            .edit_item(
                item.id,
                ItemUpdate {
                    expiration_date: Some(in_days(12)),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(InventoryError::Store(_))));
        assert!(platform.live_for_item(item.id).is_empty());

        *store.fail_update.lock().unwrap() = false;
        let edited = service
            .edit_item(
                item.id,
                ItemUpdate {
                    expiration_date: Some(in_days(14)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            platform.live_for_item(item.id),
            vec![edited.notification_id.unwrap()]
        );
    }

    #[tokio::test]
    async fn test_lead_time_update_persists_remaining_items_after_failure() {
        let (store, platform, service) = failing_harness();
        let milk = service
            .add_item(NewItem::new("Milk", Category::Food, in_days(10)))
            .await
            .unwrap();
        let flour = service
            .add_item(NewItem::new("Flour", Category::Food, in_days(20)))
            .await
            .unwrap();

        *store.fail_reminder_for.lock().unwrap() = Some(milk.id);
        let result = service
            .update_lead_times(LeadTimeConfig::new(5, 7, 7))
            .await;
        assert!(matches!(result, Err(InventoryError::Store(_))));

        // Milk's new reminder could not be recorded, so it was retired
        assert!(platform.live_for_item(milk.id).is_empty());

        // Flour was still persisted with its new handle
        let stored_flour = store.get_item(flour.id).await.unwrap().unwrap();
        let flour_id = stored_flour.notification_id.unwrap();
        assert_ne!(Some(flour_id.clone()), flour.notification_id);
        assert_eq!(platform.live_for_item(flour.id), vec![flour_id]);

        *store.fail_reminder_for.lock().unwrap() = None;
        let edited = service
            .edit_item(
                milk.id,
                ItemUpdate {
                    name: Some("Whole milk".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            platform.live_for_item(milk.id),
            vec![edited.notification_id.unwrap()]
        );
        assert_eq!(platform.live_count(), 2);
    }
}
