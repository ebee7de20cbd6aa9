use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Recipe,
    routes::AppState,
};

/// Lists every recipe in dataset order
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Recipe>> {
    Json(state.store.all().to_vec())
}

/// Looks up a recipe by its exact name
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> AppResult<Json<Recipe>> {
    state
        .store
        .find_by_name(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Recipe '{}' does not exist", name)))
}
