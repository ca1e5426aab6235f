//! Whole-file JSON persistence for the recipe collection
//!
//! The file always holds the complete collection as an indented JSON array.
//! Loading is lenient: a missing or corrupt file yields an empty collection so
//! startup never aborts. Saving replaces the file via write-then-rename, so a
//! reader never sees a half-written file.

use std::collections::HashSet;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::models::Recipe;
use crate::{Error, Result};

/// JSON file backing a recipe collection
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full collection
    ///
    /// Never fails. Records with an empty or repeated `id` are dropped so the
    /// loaded collection keeps ids unique.
    pub fn load(&self) -> Vec<Recipe> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "Recipe file {} not found, starting with an empty collection",
                    self.path.display()
                );
                return Vec::new();
            }
            Err(e) => {
                warn!(
                    "Failed to read recipe file {}: {} (starting empty)",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Recipe>>(&contents) {
            Ok(recipes) => drop_invalid_ids(recipes),
            Err(e) => {
                warn!(
                    "Recipe file {} is not a valid recipe array: {} (starting empty)",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the file with the given collection
    pub fn save(&self, recipes: &[Recipe]) -> Result<()> {
        let mut bytes = serde_json::to_vec_pretty(recipes)?;
        bytes.push(b'\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| self.persistence_error("create directory", e))?;

        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| self.persistence_error("create temp file", e))?;
        tmp.write_all(&bytes)
            .map_err(|e| self.persistence_error("write", e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| self.persistence_error("sync", e))?;

        // NamedTempFile is created 0600; match a plainly created file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(|e| self.persistence_error("set permissions", e))?;
        }

        tmp.persist(&self.path)
            .map_err(|e| self.persistence_error("replace", e.error))?;

        debug!("Saved {} recipes to {}", recipes.len(), self.path.display());
        Ok(())
    }

    fn persistence_error(&self, action: &str, e: std::io::Error) -> Error {
        Error::Persistence(format!(
            "failed to {} for {}: {}",
            action,
            self.path.display(),
            e
        ))
    }
}

fn drop_invalid_ids(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen = HashSet::new();
    recipes
        .into_iter()
        .filter(|recipe| {
            if recipe.id.is_empty() {
                warn!("Dropping stored recipe '{}' with empty id", recipe.name);
                return false;
            }
            if !seen.insert(recipe.id.clone()) {
                warn!("Dropping stored recipe with duplicate id {}", recipe.id);
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn recipe(id: &str, name: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            tags: vec!["veg".to_string()],
            ingredients: vec!["salt".to_string()],
            instructions: vec!["stir".to_string()],
            published_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let file = JsonFile::new(dir.path().join("absent.json"));
        assert!(file.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipes.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(JsonFile::new(&path).load().is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipes.json");
        std::fs::write(&path, r#"{"id": "a"}"#).unwrap();

        assert!(JsonFile::new(&path).load().is_empty());
    }

    #[test]
    fn test_load_drops_duplicate_and_empty_ids() {
        let dir = TempDir::new().unwrap();
        let file = JsonFile::new(dir.path().join("recipes.json"));
        file.save(&[
            recipe("a", "first"),
            recipe("", "nameless"),
            recipe("a", "second"),
            recipe("b", "third"),
        ])
        .unwrap();

        let loaded = file.load();
        let names: Vec<&str> = loaded.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "third"]);
    }

    #[test]
    fn test_save_writes_indented_array() {
        let dir = TempDir::new().unwrap();
        let file = JsonFile::new(dir.path().join("recipes.json"));
        file.save(&[recipe("a", "Soup")]).unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        assert!(text.starts_with("[\n"));
        assert!(text.ends_with("]\n"));
        assert!(text.contains("\"publishedAt\": \"2024-03-01T12:30:00Z\""));
    }

    #[test]
    fn test_save_empty_collection() {
        let dir = TempDir::new().unwrap();
        let file = JsonFile::new(dir.path().join("recipes.json"));
        file.save(&[]).unwrap();

        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "[]\n");
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let file = JsonFile::new(dir.path().join("nested").join("recipes.json"));
        file.save(&[recipe("a", "Soup")]).unwrap();

        assert_eq!(file.load().len(), 1);
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let file = JsonFile::new(dir.path().join("recipes.json"));
        file.save(&[recipe("a", "Soup")]).unwrap();
        file.save(&[recipe("b", "Stew")]).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_save_into_file_path_parent_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "plain file").unwrap();

        let file = JsonFile::new(blocker.join("recipes.json"));
        let result = file.save(&[recipe("a", "Soup")]);
        assert!(matches!(result, Err(Error::Persistence(_))));
    }

    #[test]
    fn test_save_load_round_trip_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let file = JsonFile::new(dir.path().join("recipes.json"));
        let mut second = recipe("b", "Stew");
        second.published_at = Utc::now();
        file.save(&[recipe("a", "Soup"), second]).unwrap();
        let first_bytes = std::fs::read(file.path()).unwrap();

        file.save(&file.load()).unwrap();
        let second_bytes = std::fs::read(file.path()).unwrap();

        assert_eq!(first_bytes, second_bytes);
    }
}
