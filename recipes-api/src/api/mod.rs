//! HTTP API handlers for recipes-api

pub mod error;
pub mod health;
pub mod recipes;

pub use error::ApiError;
pub use health::{get_build_info, health_check, health_routes};
pub use recipes::{create_recipe, delete_recipe, list_recipes, search_recipes, update_recipe};
