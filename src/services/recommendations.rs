use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    models::RecommendationResponse,
    services::{
        clustering::ClusterModel, matcher::RecipeMatcher, ranker, recipe_store::RecipeStore,
    },
};

/// Recommends recipes for the ingredients a user has on hand
///
/// Filters recipes missing more than `max_missing` ingredients (pantry staples
/// never count as missing), scores the rest, boosts them by cluster
/// popularity when a model is available and returns the best `top_n`.
pub fn get_recommendations(
    store: &RecipeStore,
    matcher: &RecipeMatcher,
    clusters: Option<&ClusterModel>,
    user_ingredients: &[String],
    max_missing: usize,
    top_n: usize,
) -> AppResult<RecommendationResponse> {
    let start = Instant::now();

    if user_ingredients.iter().all(|i| i.trim().is_empty()) {
        return Err(AppError::InvalidInput(
            "Please select at least one ingredient".to_string(),
        ));
    }

    let candidates = matcher.find_candidates(store, user_ingredients, max_missing);
    let feasible_count = candidates.len();
    let recommendations = ranker::rank(candidates, clusters, top_n);

    tracing::info!(
        feasible = feasible_count,
        returned = recommendations.len(),
        clustered = clusters.is_some(),
        processing_time_us = start.elapsed().as_micros() as u64,
        "Recommendations computed"
    );

    Ok(RecommendationResponse {
        feasible_count,
        recommendations,
    })
}
