//! Notification text

use serde::{Deserialize, Serialize};

/// Produces the user-facing text of an expiry reminder.
pub trait MessageFormatter: Send + Sync {
    /// Notification title.
    fn expiry_title(&self) -> String;

    /// Notification body for an item that expires `lead_days` after the
    /// reminder fires.
    fn expiry_body(&self, item_name: &str, lead_days: u32) -> String;
}

/// Languages with a built-in message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "vi")]
    Vietnamese,
}

impl Locale {
    /// Returns the language code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Vietnamese => "vi",
        }
    }

    /// Parses a language code or a full tag such as `vi-VN`.
    pub fn parse(tag: &str) -> Option<Self> {
        let language = tag.split(['-', '_']).next().unwrap_or_default();
        match language.to_ascii_lowercase().as_str() {
            "en" => Some(Self::English),
            "vi" => Some(Self::Vietnamese),
            _ => None,
        }
    }
}

/// Built-in translations for expiry reminders.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCatalog {
    locale: Locale,
}

impl MessageCatalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl MessageFormatter for MessageCatalog {
    fn expiry_title(&self) -> String {
        match self.locale {
            Locale::English => "Expiring soon!".to_string(),
            Locale::Vietnamese => "Sắp hết hạn!".to_string(),
        }
    }

    fn expiry_body(&self, item_name: &str, lead_days: u32) -> String {
        match (self.locale, lead_days) {
            (Locale::English, 0) => format!("{item_name} expires today."),
            (Locale::English, 1) => format!("{item_name} expires tomorrow."),
            (Locale::English, days) => format!("{item_name} expires in {days} days."),
            (Locale::Vietnamese, 0) => format!("{item_name} hết hạn hôm nay."),
            (Locale::Vietnamese, days) => {
                format!("{item_name} sẽ hết hạn trong {days} ngày nữa.")
            }
        }
    }
}
