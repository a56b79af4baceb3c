//! InventoryItem entity definitions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Category;

/// Freshness of an item, derived from its expiration date and lead time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemStatus {
    /// Outside the warning window.
    #[default]
    Fresh,
    /// Within the lead time of its expiration date, or expiring today.
    #[serde(rename = "Expiring Soon")]
    ExpiringSoon,
    /// Expiration date is in the past.
    Expired,
}

impl ItemStatus {
    /// Returns the display name, which is also the storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fresh => "Fresh",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Expired => "Expired",
        }
    }

    /// Parses a status from its storage form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Fresh" => Some(Self::Fresh),
            "Expiring Soon" => Some(Self::ExpiringSoon),
            "Expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle issued by the notification platform for a scheduled reminder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderId(pub String);

impl ReminderId {
    /// Wraps a platform-issued identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A perishable household item being tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Category, which selects the reminder lead time.
    #[serde(rename = "type")]
    pub category: Category,
    /// Expiration date as an ISO 8601 calendar date (`YYYY-MM-DD`).
    pub expiration_date: String,
    /// Scanned barcode.
    pub barcode: Option<String>,
    /// Local image reference.
    pub image_uri: Option<String>,
    /// Denormalized cache of the derived status.
    ///
    /// Only meaningful right after a recompute; read paths must derive the
    /// status again from the expiration date and the current lead times.
    #[serde(default)]
    pub status: ItemStatus,
    /// Handle of the live reminder for this item, if one is scheduled.
    pub notification_id: Option<ReminderId>,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Creates a new item with no reminder scheduled.
    pub fn new(
        name: impl Into<String>,
        category: Category,
        expiration_date: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            expiration_date: expiration_date.into(),
            barcode: None,
            image_uri: None,
            status: ItemStatus::Fresh,
            notification_id: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the barcode.
    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Sets the image reference.
    pub fn with_image_uri(mut self, image_uri: impl Into<String>) -> Self {
        self.image_uri = Some(image_uri.into());
        self
    }

    /// Sets the reminder handle.
    pub fn with_notification_id(mut self, id: Option<ReminderId>) -> Self {
        self.notification_id = id;
        self
    }
}
