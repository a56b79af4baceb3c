//! Reminder scheduling

use std::sync::Arc;

use chrono::{Days, NaiveDateTime, NaiveTime};
use entities::{Category, InventoryItem, LeadTimeConfig, ReminderId};
use expiry_status::{compute_status, parse_expiration_date, Clock};
use futures::{stream, StreamExt};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::{
    ChannelConfig, MessageCatalog, MessageFormatter, NotificationContent, NotificationPlatform,
    ReminderConfig, ReminderError, ReminderPayload, ReminderRequest, ReminderResult,
};

/// Default number of items rescheduled at once during a fan-out.
pub const DEFAULT_FAN_OUT_CONCURRENCY: usize = 4;

/// Why no reminder was scheduled for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The expiration date could not be parsed.
    InvalidDate,
    /// The expiration date is before today.
    AlreadyExpired,
    /// The warning point is now or in the past but the item has not expired.
    WarningPassed,
}

/// Outcome of planning a reminder for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderPlan {
    /// Fire a one-shot reminder after the given delay.
    FireAfter {
        fire_after_secs: u64,
        /// Local start of the day the reminder fires on.
        notify_at: NaiveDateTime,
    },
    /// Do not schedule anything.
    Skip(SkipReason),
}

/// Keeps at most one live reminder per item on a [`NotificationPlatform`].
///
/// Every (re)schedule cancels the item's previous reminder before creating a
/// new one, so an interruption between the two calls can lose a reminder but
/// never duplicate it. Platform failures are logged and never reach the
/// caller: a failed schedule yields no handle, and a failed cancel keeps the
/// existing one.
pub struct ReminderScheduler {
    platform: Arc<dyn NotificationPlatform>,
    messages: Arc<dyn MessageFormatter>,
    clock: Arc<dyn Clock>,
    channel: ChannelConfig,
    channel_ready: OnceCell<()>,
    fan_out_concurrency: usize,
}

impl ReminderScheduler {
    /// Creates a scheduler with the default channel and fan-out width.
    pub fn new(
        platform: Arc<dyn NotificationPlatform>,
        messages: Arc<dyn MessageFormatter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            platform,
            messages,
            clock,
            channel: ChannelConfig::default(),
            channel_ready: OnceCell::new(),
            fan_out_concurrency: DEFAULT_FAN_OUT_CONCURRENCY,
        }
    }

    /// Creates a scheduler using the locale, channel and fan-out width from
    /// `config`.
    pub fn from_config(
        platform: Arc<dyn NotificationPlatform>,
        clock: Arc<dyn Clock>,
        config: &ReminderConfig,
    ) -> Self {
        Self::new(platform, Arc::new(MessageCatalog::new(config.locale)), clock)
            .with_channel(config.channel.clone())
            .with_fan_out_concurrency(config.fan_out_concurrency)
    }

    /// Sets the notification channel.
    pub fn with_channel(mut self, channel: ChannelConfig) -> Self {
        self.channel = channel;
        self
    }

    /// Sets how many items a fan-out reschedules concurrently.
    pub fn with_fan_out_concurrency(mut self, concurrency: usize) -> Self {
        self.fan_out_concurrency = concurrency.max(1);
        self
    }

    /// Sets up the notification channel once. Later calls are no-ops; a failed
    /// setup is retried on the next call.
    pub async fn initialize(&self) -> ReminderResult<()> {
        self.channel_ready
            .get_or_try_init(|| async {
                self.platform.ensure_channel(&self.channel).await?;
                info!(channel_id = %self.channel.id, "Notification channel ready");
                Ok::<(), ReminderError>(())
            })
            .await
            .map(|_| ())
    }

    /// Returns the lead time in days configured for a category.
    pub fn get_lead_time(&self, category: Category, lead_times: &LeadTimeConfig) -> u32 {
        lead_times.for_category(category)
    }

    /// Decides whether and when a reminder should fire for `item`.
    ///
    /// The reminder fires at the local start of the day `lead_time` days
    /// before expiration. Unlike status derivation, the delay is measured
    /// from the exact current time.
    pub fn plan_reminder(&self, item: &InventoryItem, lead_times: &LeadTimeConfig) -> ReminderPlan {
        let Some(expiration) = parse_expiration_date(&item.expiration_date) else {
            return ReminderPlan::Skip(SkipReason::InvalidDate);
        };

        let now = self.clock.now();
        if expiration < now.date() {
            return ReminderPlan::Skip(SkipReason::AlreadyExpired);
        }

        let lead_time = self.get_lead_time(item.category, lead_times);
        let Some(notify_day) = expiration.checked_sub_days(Days::new(u64::from(lead_time))) else {
            return ReminderPlan::Skip(SkipReason::WarningPassed);
        };
        let notify_at = notify_day.and_time(NaiveTime::MIN);

        let seconds = (notify_at - now).num_seconds();
        if seconds <= 0 {
            return ReminderPlan::Skip(SkipReason::WarningPassed);
        }

        ReminderPlan::FireAfter {
            fire_after_secs: seconds.unsigned_abs(),
            notify_at,
        }
    }

    /// Replaces the item's reminder with one matching the current settings.
    ///
    /// Returns the handle for the caller to store on the item, or `None` when
    /// no reminder is warranted or scheduling failed. If the old reminder
    /// cannot be cancelled, nothing is scheduled and its handle is returned.
    pub async fn schedule_item_reminder(
        &self,
        item: &InventoryItem,
        lead_times: &LeadTimeConfig,
    ) -> Option<ReminderId> {
        if !self.cancel_item_reminder(item.notification_id.as_ref()).await {
            // The old reminder may still be live; keep it rather than add a second
            warn!(item_id = %item.id, "Keeping existing reminder, cancel failed");
            return item.notification_id.clone();
        }

        let fire_after_secs = match self.plan_reminder(item, lead_times) {
            ReminderPlan::FireAfter {
                fire_after_secs, ..
            } => fire_after_secs,
            ReminderPlan::Skip(reason) => {
                debug!(item_id = %item.id, ?reason, "Skipping reminder");
                return None;
            }
        };

        match self.request_reminder(item, lead_times, fire_after_secs).await {
            Ok(reminder_id) => {
                info!(
                    item_id = %item.id,
                    reminder_id = %reminder_id,
                    fire_after_secs,
                    "Scheduled expiry reminder"
                );
                Some(reminder_id)
            }
            Err(e) => {
                warn!(item_id = %item.id, error = %e, "Failed to schedule expiry reminder");
                None
            }
        }
    }

    async fn request_reminder(
        &self,
        item: &InventoryItem,
        lead_times: &LeadTimeConfig,
        fire_after_secs: u64,
    ) -> ReminderResult<ReminderId> {
        self.initialize().await?;

        let lead_days = self.get_lead_time(item.category, lead_times);
        let request = ReminderRequest {
            content: NotificationContent {
                title: self.messages.expiry_title(),
                body: self.messages.expiry_body(&item.name, lead_days),
                payload: ReminderPayload {
                    item_id: item.id,
                    item_name: item.name.clone(),
                },
                sound: true,
                channel_id: self.channel.id.clone(),
            },
            fire_after_secs,
        };

        self.platform.schedule(request).await
    }

    /// Cancels a reminder. A missing handle is a no-op and platform errors
    /// are logged.
    ///
    /// Returns `false` only when the platform failed to cancel, in which case
    /// the reminder may still fire.
    pub async fn cancel_item_reminder(&self, reminder_id: Option<&ReminderId>) -> bool {
        let Some(reminder_id) = reminder_id else {
            return true;
        };

        match self.platform.cancel(reminder_id).await {
            Ok(()) => {
                debug!(reminder_id = %reminder_id, "Cancelled reminder");
                true
            }
            Err(e) => {
                warn!(reminder_id = %reminder_id, error = %e, "Failed to cancel reminder");
                false
            }
        }
    }

    /// Reschedules every item against new lead times.
    ///
    /// Items are processed concurrently, each with its own cancel-then-schedule
    /// pair. Returns the items in input order with their new reminder handles
    /// and recomputed status.
    pub async fn reschedule_all(
        &self,
        items: Vec<InventoryItem>,
        lead_times: &LeadTimeConfig,
    ) -> Vec<InventoryItem> {
        let today = self.clock.today();
        let total = items.len();

        let rescheduled: Vec<InventoryItem> = stream::iter(items)
            .map(|item| async move {
                let notification_id = self.schedule_item_reminder(&item, lead_times).await;
                let status =
                    compute_status(&item.expiration_date, item.category, Some(lead_times), today);
                InventoryItem {
                    notification_id,
                    status,
                    ..item
                }
            })
            .buffered(self.fan_out_concurrency)
            .collect()
            .await;

        let scheduled = rescheduled
            .iter()
            .filter(|item| item.notification_id.is_some())
            .count();
        info!(total, scheduled, "Rescheduled expiry reminders");

        rescheduled
    }
}
