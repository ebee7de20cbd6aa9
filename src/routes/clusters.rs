use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{ClusterRecipes, ClusterSummaryResponse},
    routes::AppState,
    services::ClusterModel,
};

fn cluster_model(state: &AppState) -> AppResult<&ClusterModel> {
    state
        .clusters
        .as_deref()
        .ok_or_else(|| AppError::NotFound("Clustering is disabled".to_string()))
}

/// Summary of every cluster
pub async fn summary(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ClusterSummaryResponse>> {
    let model = cluster_model(&state)?;

    Ok(Json(ClusterSummaryResponse {
        n_clusters: model.n_clusters(),
        vocabulary_size: model.vocabulary().len(),
        trained_at: model.trained_at(),
        clusters: model.summary().to_vec(),
    }))
}

/// Recipes assigned to one cluster
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(cluster_id): Path<usize>,
) -> AppResult<Json<ClusterRecipes>> {
    let model = cluster_model(&state)?;

    if cluster_id >= model.n_clusters() {
        return Err(AppError::NotFound(format!(
            "Cluster {} does not exist (0..{})",
            cluster_id,
            model.n_clusters()
        )));
    }

    let recipes = model
        .recipes_in_cluster(cluster_id)
        .into_iter()
        .filter_map(|index| state.store.get(index).cloned())
        .collect();

    Ok(Json(ClusterRecipes {
        cluster_id,
        popularity_score: model.popularity(cluster_id),
        recipes,
    }))
}
