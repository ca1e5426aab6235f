//! Recipe models
//!
//! JSON field names are stable: `id`, `name`, `tags`, `ingredients`,
//! `instructions`, `publishedAt`. The singular `tag` spelling is not accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicase::UniCase;

use crate::{Error, Result};

/// A stored recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    pub published_at: DateTime<Utc>,
}

impl Recipe {
    /// Build a recipe from caller input plus store-owned fields
    pub fn from_input(id: String, input: RecipeInput, published_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            tags: input.tags,
            ingredients: input.ingredients,
            instructions: input.instructions,
            published_at,
        }
    }

    /// True if any tag equals `needle` under Unicode case folding
    pub(crate) fn has_folded_tag(&self, needle: &UniCase<&str>) -> bool {
        self.tags.iter().any(|t| UniCase::new(t.as_str()) == *needle)
    }

    /// Case-insensitive exact tag match
    pub fn has_tag(&self, tag: &str) -> bool {
        self.has_folded_tag(&UniCase::new(tag))
    }
}

/// Writable recipe fields accepted by create and update
///
/// `id` and `publishedAt` are owned by the store; if a client sends them they
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeInput {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl RecipeInput {
    /// Reject input that deserialized but cannot form a usable recipe
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Outcome of a tag search
///
/// An empty result is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSearch {
    Found(Vec<Recipe>),
    NoMatches,
}

impl TagSearch {
    /// Classify a completed scan
    pub fn from_matches(matches: Vec<Recipe>) -> Self {
        if matches.is_empty() {
            TagSearch::NoMatches
        } else {
            TagSearch::Found(matches)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TagSearch::Found(recipes) => recipes.len(),
            TagSearch::NoMatches => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TagSearch::NoMatches)
    }

    pub fn into_vec(self) -> Vec<Recipe> {
        match self {
            TagSearch::Found(recipes) => recipes,
            TagSearch::NoMatches => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(tags: &[&str]) -> Recipe {
        Recipe {
            id: "r1".to_string(),
            name: "Soup".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ingredients: vec!["water".to_string()],
            instructions: vec!["boil".to_string()],
            published_at: Utc::now(),
        }
    }

    #[test]
    fn test_recipe_json_field_names() {
        let recipe = sample(&["veg"]);
        let value = serde_json::to_value(&recipe).unwrap();

        assert_eq!(value["id"], "r1");
        assert_eq!(value["tags"], json!(["veg"]));
        assert!(value["publishedAt"].is_string());
        assert!(value.get("published_at").is_none());
        assert!(value.get("tag").is_none());
    }

    #[test]
    fn test_has_tag_is_case_insensitive_exact() {
        let recipe = sample(&["Vegetarian", "quick"]);

        assert!(recipe.has_tag("vegetarian"));
        assert!(recipe.has_tag("QUICK"));
        assert!(!recipe.has_tag("veg"));
        assert!(!recipe.has_tag("quick dinner"));
    }

    #[test]
    fn test_has_tag_folds_final_sigma() {
        let recipe = sample(&["οδοσ"]);

        assert!(recipe.has_tag("ΟΔΟΣ"));
        assert!(recipe.has_tag("οδος"));
        assert!(!recipe.has_tag("οδο"));
    }

    #[test]
    fn test_input_ignores_store_owned_fields() {
        let input: RecipeInput = serde_json::from_value(json!({
            "id": "client-id",
            "name": "Pancakes",
            "tags": ["breakfast"],
            "publishedAt": "2001-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(input.name, "Pancakes");
        assert_eq!(input.tags, vec!["breakfast".to_string()]);
        assert!(input.ingredients.is_empty());
    }

    #[test]
    fn test_input_requires_name() {
        let result: std::result::Result<RecipeInput, _> =
            serde_json::from_value(json!({ "tags": ["x"] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_input_rejects_wrong_types() {
        let result: std::result::Result<RecipeInput, _> =
            serde_json::from_value(json!({ "name": "x", "tags": "not-a-list" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_blank_name() {
        let input = RecipeInput {
            name: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(input.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_tag_search_classification() {
        assert_eq!(TagSearch::from_matches(Vec::new()), TagSearch::NoMatches);

        let found = TagSearch::from_matches(vec![sample(&["a"])]);
        assert_eq!(found.len(), 1);
        assert!(!found.is_empty());
        assert_eq!(found.into_vec().len(), 1);
    }
}
