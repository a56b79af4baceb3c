//! Status derivation

use std::sync::Arc;

use chrono::NaiveDate;
use entities::{Category, InventoryItem, ItemStatus, LeadTimeConfig};

use crate::{parse_expiration_date, Clock, SystemClock};

/// Day count reported for expiration dates that cannot be parsed.
pub const INVALID_DATE_SENTINEL: i64 = 999;

/// Returns the lead time for a category, falling back to the category default
/// when no configuration is available.
pub fn lead_time_for(category: Category, lead_times: Option<&LeadTimeConfig>) -> u32 {
    match lead_times {
        Some(config) => config.for_category(category),
        None => category.default_lead_time(),
    }
}

/// Signed number of whole days from `today` until `expiration`.
pub fn days_between(expiration: NaiveDate, today: NaiveDate) -> i64 {
    (expiration - today).num_days()
}

/// Derives the status of an item expiring on `expiration_date`.
///
/// `days_until == lead_time` is already `ExpiringSoon`, and an item expiring
/// today is always `ExpiringSoon`. Unparseable dates are `Fresh`.
pub fn compute_status(
    expiration_date: &str,
    category: Category,
    lead_times: Option<&LeadTimeConfig>,
    today: NaiveDate,
) -> ItemStatus {
    let Some(expiration) = parse_expiration_date(expiration_date) else {
        tracing::trace!(expiration_date, "Unparseable expiration date, treating as fresh");
        return ItemStatus::Fresh;
    };

    let days_until = days_between(expiration, today);
    if days_until < 0 {
        return ItemStatus::Expired;
    }

    if days_until <= i64::from(lead_time_for(category, lead_times)) {
        ItemStatus::ExpiringSoon
    } else {
        ItemStatus::Fresh
    }
}

/// Days until `expiration_date`, negative once it has passed, or
/// [`INVALID_DATE_SENTINEL`] when the date cannot be parsed.
pub fn days_until_expiration(expiration_date: &str, today: NaiveDate) -> i64 {
    parse_expiration_date(expiration_date)
        .map(|expiration| days_between(expiration, today))
        .unwrap_or(INVALID_DATE_SENTINEL)
}

/// Returns copies of `items`, in the same order, with `status` recomputed.
pub fn compute_all_statuses(
    items: &[InventoryItem],
    lead_times: Option<&LeadTimeConfig>,
    today: NaiveDate,
) -> Vec<InventoryItem> {
    items
        .iter()
        .map(|item| InventoryItem {
            status: compute_status(&item.expiration_date, item.category, lead_times, today),
            ..item.clone()
        })
        .collect()
}

/// Whether an item is inside its warning window or already expired.
pub fn should_notify(
    item: &InventoryItem,
    lead_times: Option<&LeadTimeConfig>,
    today: NaiveDate,
) -> bool {
    matches!(
        compute_status(&item.expiration_date, item.category, lead_times, today),
        ItemStatus::ExpiringSoon | ItemStatus::Expired
    )
}

/// Status derivation bound to a [`Clock`].
#[derive(Clone)]
pub struct StatusEngine {
    clock: Arc<dyn Clock>,
}

impl Default for StatusEngine {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl StatusEngine {
    /// Creates an engine reading "today" from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Returns the clock this engine reads.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Current local calendar day.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// See [`compute_status`].
    pub fn compute_status(
        &self,
        expiration_date: &str,
        category: Category,
        lead_times: Option<&LeadTimeConfig>,
    ) -> ItemStatus {
        compute_status(expiration_date, category, lead_times, self.today())
    }

    /// See [`days_until_expiration`].
    pub fn days_until_expiration(&self, expiration_date: &str) -> i64 {
        days_until_expiration(expiration_date, self.today())
    }

    /// See [`compute_all_statuses`].
    pub fn compute_all_statuses(
        &self,
        items: &[InventoryItem],
        lead_times: Option<&LeadTimeConfig>,
    ) -> Vec<InventoryItem> {
        compute_all_statuses(items, lead_times, self.today())
    }

    /// See [`should_notify`].
    pub fn should_notify(&self, item: &InventoryItem, lead_times: Option<&LeadTimeConfig>) -> bool {
        should_notify(item, lead_times, self.today())
    }
}
