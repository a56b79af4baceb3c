//! User profile definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::LeadTimeConfig;

/// The local user's profile. Owns the reminder lead-time settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub user_name: String,
    /// Whether onboarding has been completed.
    pub is_onboarded: bool,
    /// Per-category reminder lead times.
    pub notification_settings: LeadTimeConfig,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates a new profile with default lead times.
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name: user_name.into(),
            is_onboarded: false,
            notification_settings: LeadTimeConfig::default(),
            created_at: Utc::now(),
        }
    }

    /// Sets the lead times.
    pub fn with_lead_times(mut self, lead_times: LeadTimeConfig) -> Self {
        self.notification_settings = lead_times;
        self
    }
}
