//! Local one-shot reminders on the tokio runtime

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use entities::ReminderId;
use tokio::{sync::Mutex, task::JoinHandle};
use uuid::Uuid;

use crate::{
    ChannelConfig, NotificationContent, NotificationPlatform, ReminderError, ReminderRequest,
    ReminderResult,
};

/// Destination for reminders once they fire.
#[async_trait]
pub trait NotificationSink: Send + Sync + 'static {
    /// Presents a notification to the user.
    async fn deliver(&self, content: NotificationContent);
}

/// Sink that writes fired reminders to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn deliver(&self, content: NotificationContent) {
        tracing::info!(
            item_id = %content.payload.item_id,
            channel_id = %content.channel_id,
            title = %content.title,
            body = %content.body,
            "Expiry reminder fired"
        );
    }
}

/// Notification platform that keeps each reminder as a sleeping tokio task.
///
/// Reminders live only as long as the process; nothing is persisted.
pub struct TimerNotificationPlatform<S: NotificationSink> {
    sink: Arc<S>,
    pending: Arc<Mutex<HashMap<ReminderId, JoinHandle<()>>>>,
    channel: Mutex<Option<ChannelConfig>>,
}

impl<S: NotificationSink> TimerNotificationPlatform<S> {
    /// Creates a platform delivering to `sink`. Must be used from within a
    /// tokio runtime.
    pub fn new(sink: S) -> Self {
        Self {
            sink: Arc::new(sink),
            pending: Arc::new(Mutex::new(HashMap::new())),
            channel: Mutex::new(None),
        }
    }

    /// Number of reminders that have not fired or been cancelled.
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// Channel configured through [`NotificationPlatform::ensure_channel`].
    pub async fn channel(&self) -> Option<ChannelConfig> {
        self.channel.lock().await.clone()
    }

    /// Cancels every pending reminder.
    pub async fn shutdown(&self) {
        let mut pending = self.pending.lock().await;
        for (_, handle) in pending.drain() {
            handle.abort();
        }
    }
}

#[async_trait]
impl<S: NotificationSink> NotificationPlatform for TimerNotificationPlatform<S> {
    async fn ensure_channel(&self, channel: &ChannelConfig) -> ReminderResult<()> {
        let mut current = self.channel.lock().await;
        if current.as_ref() != Some(channel) {
            tracing::debug!(channel_id = %channel.id, "Configured notification channel");
            *current = Some(channel.clone());
        }
        Ok(())
    }

    async fn schedule(&self, request: ReminderRequest) -> ReminderResult<ReminderId> {
        if request.fire_after_secs == 0 {
            return Err(ReminderError::InvalidDelay(0));
        }

        let id = ReminderId::new(Uuid::new_v4().to_string());

        // Held until the handle is stored so the task cannot remove its entry
        // before it exists.
        let mut pending = self.pending.lock().await;

        let sink = self.sink.clone();
        let registry = self.pending.clone();
        let task_id = id.clone();
        let delay = Duration::from_secs(request.fire_after_secs);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            registry.lock().await.remove(&task_id);
            sink.deliver(request.content).await;
        });

        pending.insert(id.clone(), handle);
        Ok(id)
    }

    async fn cancel(&self, id: &ReminderId) -> ReminderResult<()> {
        if let Some(handle) = self.pending.lock().await.remove(id) {
            handle.abort();
        }
        Ok(())
    }
}
