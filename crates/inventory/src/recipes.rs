//! Recipe suggestions for food that is about to expire.

use entities::{Category, InventoryItem, ItemStatus};
use serde::{Deserialize, Serialize};

/// Message used when food is expiring but no recipe matches it.
pub const FALLBACK_SUGGESTION: &str = "How about a quick healthy meal with your items?";

/// A recipe from the bundled recipe list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    /// Keywords matched against item names.
    pub ingredients: Vec<String>,
    pub tag: String,
}

impl Recipe {
    /// Parses a JSON array of recipes.
    pub fn list_from_json(json: &str) -> Result<Vec<Recipe>, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn uses(&self, item_name: &str) -> bool {
        let item_name = item_name.to_lowercase();
        self.ingredients
            .iter()
            .any(|ingredient| item_name.contains(&ingredient.to_lowercase()))
    }
}

/// A suggestion shown alongside expiring food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSuggestion {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
}

/// Suggests a recipe for the first expiring food item that some recipe uses.
///
/// `items` must carry a current `status`. Returns `None` when no food item is
/// expiring soon, and a generic suggestion without a recipe when nothing
/// matches.
pub fn suggest_recipe(items: &[InventoryItem], recipes: &[Recipe]) -> Option<RecipeSuggestion> {
    let mut expiring_food = items
        .iter()
        .filter(|item| item.category == Category::Food && item.status == ItemStatus::ExpiringSoon)
        .peekable();

    expiring_food.peek()?;

    let matched = expiring_food.find_map(|item| {
        recipes
            .iter()
            .find(|recipe| recipe.uses(&item.name))
            .map(|recipe| (item, recipe))
    });

    Some(match matched {
        Some((item, recipe)) => RecipeSuggestion {
            message: format!("Try making {} with your {}!", recipe.name, item.name),
            recipe: Some(recipe.clone()),
        },
        None => RecipeSuggestion {
            message: FALLBACK_SUGGESTION.to_string(),
            recipe: None,
        },
    })
}
