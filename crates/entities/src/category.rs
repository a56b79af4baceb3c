//! Item categories and per-category reminder lead times.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a tracked household item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    /// Groceries and other perishables.
    #[default]
    Food,
    /// Medication and supplements.
    Medicine,
    /// Cosmetics and toiletries.
    Cosmetics,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [Category::Food, Category::Medicine, Category::Cosmetics];

    /// Returns the display name, which is also the storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Medicine => "Medicine",
            Self::Cosmetics => "Cosmetics",
        }
    }

    /// Parses a category from its storage form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Food" => Some(Self::Food),
            "Medicine" => Some(Self::Medicine),
            "Cosmetics" => Some(Self::Cosmetics),
            _ => None,
        }
    }

    /// Lead time used when the user has not configured one yet.
    pub fn default_lead_time(&self) -> u32 {
        match self {
            Self::Food => 3,
            Self::Medicine => 7,
            Self::Cosmetics => 7,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Days before expiration at which an item starts warning, per category.
///
/// Always fully populated: there is one value for every [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadTimeConfig {
    /// Lead time for [`Category::Food`].
    pub food_lead_time: u32,
    /// Lead time for [`Category::Medicine`].
    pub medicine_lead_time: u32,
    /// Lead time for [`Category::Cosmetics`].
    pub cosmetics_lead_time: u32,
}

impl Default for LeadTimeConfig {
    fn default() -> Self {
        Self {
            food_lead_time: Category::Food.default_lead_time(),
            medicine_lead_time: Category::Medicine.default_lead_time(),
            cosmetics_lead_time: Category::Cosmetics.default_lead_time(),
        }
    }
}

impl LeadTimeConfig {
    /// Creates a config with explicit values for each category.
    pub fn new(food: u32, medicine: u32, cosmetics: u32) -> Self {
        Self {
            food_lead_time: food,
            medicine_lead_time: medicine,
            cosmetics_lead_time: cosmetics,
        }
    }

    /// Returns the lead time in days for a category.
    pub fn for_category(&self, category: Category) -> u32 {
        match category {
            Category::Food => self.food_lead_time,
            Category::Medicine => self.medicine_lead_time,
            Category::Cosmetics => self.cosmetics_lead_time,
        }
    }

    /// Returns a copy with the lead time for one category replaced.
    pub fn with_category(mut self, category: Category, days: u32) -> Self {
        match category {
            Category::Food => self.food_lead_time = days,
            Category::Medicine => self.medicine_lead_time = days,
            Category::Cosmetics => self.cosmetics_lead_time = days,
        }
        self
    }
}
