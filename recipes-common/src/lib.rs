//! # Recipes Common Library
//!
//! Shared code for the recipes service including:
//! - Recipe models and request input types
//! - The in-memory recipe store
//! - Whole-file JSON persistence
//! - Configuration loading
//! - Identifier and timestamp utilities

pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod persistence;
pub mod store;

pub use error::{Error, Result};
pub use models::{Recipe, RecipeInput, TagSearch};
pub use persistence::JsonFile;
pub use store::RecipeStore;
