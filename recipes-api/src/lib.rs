//! recipes-api library - HTTP surface over the recipe store

use std::sync::Arc;

use axum::Router;
use recipes_common::RecipeStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The recipe store, constructed once at startup
    pub store: Arc<RecipeStore>,
}

impl AppState {
    pub fn new(store: RecipeStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, put};

    let recipes = Router::new()
        .route(
            "/recipes",
            get(api::list_recipes).post(api::create_recipe),
        )
        .route("/recipes/search", get(api::search_recipes))
        .route(
            "/recipes/:id",
            put(api::update_recipe).delete(api::delete_recipe),
        );

    Router::new()
        .merge(recipes)
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
