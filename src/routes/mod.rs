use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    error::AppResult,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{ClusterModel, ClusteringParams, RecipeMatcher, RecipeStore},
};

pub mod clusters;
pub mod ingredients;
pub mod recipes;
pub mod recommendations;

/// Shared, read-only application state
pub struct AppState {
    pub store: Arc<RecipeStore>,
    pub matcher: RecipeMatcher,
    /// Absent when clustering is disabled
    pub clusters: Option<Arc<ClusterModel>>,
    pub default_max_missing: usize,
    pub default_top_n: usize,
}

impl AppState {
    /// Loads the dataset and trains the cluster model
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let store = RecipeStore::load(&config.recipes_csv_path)?;
        Self::with_store(store, config)
    }

    pub fn with_store(store: RecipeStore, config: &Config) -> AppResult<Self> {
        let clusters = if config.clustering_enabled {
            let params = ClusteringParams::from(config);
            Some(Arc::new(ClusterModel::train(&store, &params)?))
        } else {
            tracing::warn!("Clustering disabled, ranking on base score only");
            None
        };

        Ok(Self {
            store: Arc::new(store),
            matcher: RecipeMatcher::new(),
            clusters,
            default_max_missing: config.default_max_missing,
            default_top_n: config.default_top_n,
        })
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ingredients", get(ingredients::list))
        .route("/recipes", get(recipes::list))
        .route("/recipes/:name", get(recipes::get))
        .route("/recommendations", post(recommendations::recommend))
        .route("/clusters", get(clusters::summary))
        .route("/clusters/:id", get(clusters::get))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
