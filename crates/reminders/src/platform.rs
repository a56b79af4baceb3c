//! Notification platform boundary

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use entities::ReminderId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ReminderError, ReminderResult};

/// Data attached to a reminder so a tap can be routed to the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPayload {
    /// Item the reminder is about.
    pub item_id: Uuid,
    /// Item name at scheduling time.
    pub item_name: String,
}

/// Rendered notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    /// Headline shown in the notification.
    pub title: String,
    /// Message text below the title.
    pub body: String,
    /// Routing data returned when the notification is tapped.
    pub payload: ReminderPayload,
    /// Whether the notification plays a sound.
    pub sound: bool,
    /// Channel the notification is posted to.
    pub channel_id: String,
}

/// One-shot reminder request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    /// What the user sees when the reminder fires.
    pub content: NotificationContent,
    /// Delay before the reminder fires. Must be greater than zero.
    pub fire_after_secs: u64,
}

/// Interruption level of a notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Normal,
    #[default]
    High,
}

/// Platform notification channel settings.
///
/// Only some platforms have channels; the others treat setup as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(default = "default_channel_id")]
    pub id: String,
    #[serde(default = "default_channel_name")]
    pub name: String,
    #[serde(default)]
    pub importance: Importance,
    /// Alternating off/on durations in milliseconds.
    #[serde(default = "default_vibration_pattern")]
    pub vibration_pattern: Vec<u64>,
    #[serde(default = "default_light_color")]
    pub light_color: String,
}

fn default_channel_id() -> String {
    "expiry-alerts".to_string()
}

fn default_channel_name() -> String {
    "Expiry Alerts".to_string()
}

fn default_vibration_pattern() -> Vec<u64> {
    vec![0, 250, 250, 250]
}

fn default_light_color() -> String {
    "#6B9080".to_string()
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            id: default_channel_id(),
            name: default_channel_name(),
            importance: Importance::default(),
            vibration_pattern: default_vibration_pattern(),
            light_color: default_light_color(),
        }
    }
}

/// Local notification scheduler provided by the host platform.
///
/// `schedule` and `cancel` are independent calls with no atomicity between
/// them.
#[async_trait]
pub trait NotificationPlatform: Send + Sync {
    /// Creates or updates the notification channel. Must be idempotent.
    async fn ensure_channel(&self, channel: &ChannelConfig) -> ReminderResult<()>;

    /// Schedules a one-shot reminder and returns its handle.
    async fn schedule(&self, request: ReminderRequest) -> ReminderResult<ReminderId>;

    /// Cancels a scheduled reminder. Unknown handles are a no-op.
    async fn cancel(&self, id: &ReminderId) -> ReminderResult<()>;
}

#[derive(Debug, Default)]
struct MemoryPlatformState {
    reminders: HashMap<ReminderId, ReminderRequest>,
    channels: HashMap<String, ChannelConfig>,
    next_id: u64,
    channel_setup_calls: usize,
    cancel_calls: usize,
    fail_schedule: bool,
    fail_cancel: bool,
    fail_channel_setup: bool,
}

/// In-memory notification platform.
///
/// Reminders never fire; they are only recorded so callers can inspect what
/// is live. Failures can be injected for each operation.
#[derive(Debug, Default)]
pub struct MemoryNotificationPlatform {
    state: Mutex<MemoryPlatformState>,
}

impl MemoryNotificationPlatform {
    /// Creates an empty platform
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryPlatformState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes every following `schedule` call fail (or succeed again).
    pub fn set_fail_schedule(&self, fail: bool) {
        self.state().fail_schedule = fail;
    }

    /// Makes every following `cancel` call fail (or succeed again).
    pub fn set_fail_cancel(&self, fail: bool) {
        self.state().fail_cancel = fail;
    }

    /// Makes every following `ensure_channel` call fail (or succeed again).
    pub fn set_fail_channel_setup(&self, fail: bool) {
        self.state().fail_channel_setup = fail;
    }

    /// Number of reminders currently scheduled.
    pub fn live_count(&self) -> usize {
        self.state().reminders.len()
    }

    /// Returns a live reminder by handle.
    pub fn reminder(&self, id: &ReminderId) -> Option<ReminderRequest> {
        self.state().reminders.get(id).cloned()
    }

    /// Returns the handles of all live reminders for an item.
    pub fn live_for_item(&self, item_id: Uuid) -> Vec<ReminderId> {
        self.state()
            .reminders
            .iter()
            .filter(|(_, request)| request.content.payload.item_id == item_id)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Returns a configured channel by id.
    pub fn channel(&self, id: &str) -> Option<ChannelConfig> {
        self.state().channels.get(id).cloned()
    }

    /// Number of times channel setup was requested.
    pub fn channel_setup_calls(&self) -> usize {
        self.state().channel_setup_calls
    }

    /// Number of cancel calls received, including no-op ones.
    pub fn cancel_calls(&self) -> usize {
        self.state().cancel_calls
    }
}

#[async_trait]
impl NotificationPlatform for MemoryNotificationPlatform {
    async fn ensure_channel(&self, channel: &ChannelConfig) -> ReminderResult<()> {
        let mut state = self.state();
        state.channel_setup_calls += 1;
        if state.fail_channel_setup {
            return Err(ReminderError::ChannelSetup(format!(
                "channel {} unavailable",
                channel.id
            )));
        }
        state.channels.insert(channel.id.clone(), channel.clone());
        Ok(())
    }

    async fn schedule(&self, request: ReminderRequest) -> ReminderResult<ReminderId> {
        if request.fire_after_secs == 0 {
            return Err(ReminderError::InvalidDelay(0));
        }

        let mut state = self.state();
        if state.fail_schedule {
            return Err(ReminderError::Platform("scheduling rejected".to_string()));
        }

        state.next_id += 1;
        let id = ReminderId::new(format!("reminder-{}", state.next_id));
        state.reminders.insert(id.clone(), request);
        Ok(id)
    }

    async fn cancel(&self, id: &ReminderId) -> ReminderResult<()> {
        let mut state = self.state();
        state.cancel_calls += 1;
        if state.fail_cancel {
            return Err(ReminderError::Platform(format!("cannot cancel {id}")));
        }
        state.reminders.remove(id);
        Ok(())
    }
}
