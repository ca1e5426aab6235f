//! In-memory recipe store
//!
//! The store is the sole authority over the recipe collection for the life of
//! the process. Every mutation holds the write guard across both the in-memory
//! change and the file write, so mutations never interleave and readers never
//! observe a half-applied change.
//!
//! File writes run on the blocking pool so a slow disk does not stall a
//! runtime worker; the write guard stays held until the write finishes.
//!
//! A failed file write does not roll back the in-memory change; the caller
//! receives `Error::Persistence` and the next successful write brings the file
//! back in line.

use std::path::Path;

use tokio::sync::RwLock;
use unicase::UniCase;
use tracing::{debug, error, info};

use crate::ids;
use crate::models::{Recipe, RecipeInput, TagSearch};
use crate::persistence::JsonFile;
use crate::{Error, Result};

pub struct RecipeStore {
    recipes: RwLock<Vec<Recipe>>,
    file: JsonFile,
}

impl RecipeStore {
    /// Load the collection from `file` and take ownership of it
    pub fn open(file: JsonFile) -> Self {
        let recipes = file.load();
        info!(
            "Loaded {} recipes from {}",
            recipes.len(),
            file.path().display()
        );
        Self {
            recipes: RwLock::new(recipes),
            file,
        }
    }

    pub fn data_file(&self) -> &Path {
        self.file.path()
    }

    /// All recipes in insertion order
    pub async fn list(&self) -> Vec<Recipe> {
        self.recipes.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.recipes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.recipes.read().await.is_empty()
    }

    /// Append a new recipe with a fresh id and the current timestamp
    pub async fn create(&self, input: RecipeInput) -> Result<Recipe> {
        input.validate()?;

        let mut recipes = self.recipes.write().await;

        let mut id = ids::generate();
        while recipes.iter().any(|r| r.id == id) {
            id = ids::generate();
        }

        let recipe = Recipe::from_input(id, input, ids::now());
        recipes.push(recipe.clone());
        info!("Created recipe {} ('{}')", recipe.id, recipe.name);

        self.persist(&recipes).await?;
        Ok(recipe)
    }

    /// Replace every writable field of the recipe stored under `id`
    ///
    /// The stored id and `published_at` are kept; the record stays at its
    /// position in the collection.
    pub async fn update(&self, id: &str, input: RecipeInput) -> Result<Recipe> {
        input.validate()?;

        let mut recipes = self.recipes.write().await;

        let Some(slot) = recipes.iter_mut().find(|r| r.id == id) else {
            debug!("Update of unknown recipe {}", id);
            return Err(Error::NotFound(id.to_string()));
        };

        let published_at = slot.published_at;
        *slot = Recipe::from_input(id.to_string(), input, published_at);
        let updated = slot.clone();
        info!("Updated recipe {} ('{}')", updated.id, updated.name);

        self.persist(&recipes).await?;
        Ok(updated)
    }

    /// Remove the recipe stored under `id`, returning it
    pub async fn delete(&self, id: &str) -> Result<Recipe> {
        let mut recipes = self.recipes.write().await;

        let Some(index) = recipes.iter().position(|r| r.id == id) else {
            debug!("Delete of unknown recipe {}", id);
            return Err(Error::NotFound(id.to_string()));
        };

        let removed = recipes.remove(index);
        info!("Deleted recipe {} ('{}')", removed.id, removed.name);

        self.persist(&recipes).await?;
        Ok(removed)
    }

    /// Every recipe carrying a tag equal to `tag`, ignoring case
    ///
    /// Each recipe appears at most once, in collection order.
    pub async fn search_by_tag(&self, tag: &str) -> TagSearch {
        let needle = UniCase::new(tag);
        let recipes = self.recipes.read().await;

        let matches: Vec<Recipe> = recipes
            .iter()
            .filter(|r| r.has_folded_tag(&needle))
            .cloned()
            .collect();

        debug!("Tag search '{}' matched {} recipes", tag, matches.len());
        TagSearch::from_matches(matches)
    }

    /// Write a snapshot of `recipes` on the blocking pool
    ///
    /// Callers keep holding the write guard until this returns.
    async fn persist(&self, recipes: &[Recipe]) -> Result<()> {
        let file = self.file.clone();
        let snapshot = recipes.to_vec();

        let result = tokio::task::spawn_blocking(move || file.save(&snapshot))
            .await
            .unwrap_or_else(|e| Err(Error::Persistence(format!("write task failed: {}", e))));

        result.map_err(|e| {
            error!("Failed to persist recipes: {}", e);
            e
        })
    }
}
