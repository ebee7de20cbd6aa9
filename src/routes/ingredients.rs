use axum::Json;
use serde::Serialize;

use crate::services::{
    ingredient_catalog::{CatalogIngredient, CATALOG},
    matcher::PANTRY_STAPLES,
};

#[derive(Debug, Serialize)]
pub struct IngredientsResponse {
    pub ingredients: Vec<CatalogIngredient>,
    /// Always treated as available
    pub pantry_staples: Vec<&'static str>,
}

/// Handler for the ingredient catalog endpoint
pub async fn list() -> Json<IngredientsResponse> {
    Json(IngredientsResponse {
        ingredients: CATALOG.to_vec(),
        pantry_staples: PANTRY_STAPLES.to_vec(),
    })
}
