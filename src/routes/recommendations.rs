use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{RecommendationRequest, RecommendationResponse},
    routes::AppState,
    services::recommendations,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let max_missing = request.max_missing.unwrap_or(state.default_max_missing);
    let top_n = request.top_n.unwrap_or(state.default_top_n);

    tracing::info!(
        request_id = %request_id,
        ingredients = request.ingredients.len(),
        max_missing,
        top_n,
        "Processing recommendation request"
    );

    let response = recommendations::get_recommendations(
        &state.store,
        &state.matcher,
        state.clusters.as_deref(),
        &request.ingredients,
        max_missing,
        top_n,
    )?;

    Ok(Json(response))
}
