//! Recipe endpoints
//!
//! Handlers translate requests into store calls and store outcomes into
//! responses. All collection logic lives in `RecipeStore`.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use recipes_common::{Recipe, RecipeInput, TagSearch};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::AppState;

/// Query parameters for tag search
#[derive(Debug, Deserialize)]
pub struct TagQuery {
    #[serde(default)]
    pub tag: String,
}

/// Plain message body used for confirmations and empty search results
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /recipes
pub async fn list_recipes(State(state): State<AppState>) -> Json<Vec<Recipe>> {
    Json(state.store.list().await)
}

/// POST /recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let Json(input) = payload?;
    let recipe = state.store.create(input).await?;
    Ok(Json(recipe))
}

/// PUT /recipes/:id
///
/// The path id is authoritative; an `id` in the body is ignored.
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let Json(input) = payload?;
    let recipe = state.store.update(&id, input).await?;
    Ok(Json(recipe))
}

/// DELETE /recipes/:id
///
/// Any request body is ignored.
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Recipe deleted".to_string(),
    }))
}

/// GET /recipes/search?tag=TAG
///
/// Responds with the matching recipes, or a message when nothing matched.
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(query): Query<TagQuery>,
) -> Response {
    match state.store.search_by_tag(&query.tag).await {
        TagSearch::Found(recipes) => Json(recipes).into_response(),
        TagSearch::NoMatches => Json(MessageResponse {
            message: format!("No recipes found with tag {}", query.tag),
        })
        .into_response(),
    }
}
