use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Recipe;

/// Overview of one cluster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterSummary {
    pub cluster_id: usize,
    pub num_recipes: usize,
    /// Mean rating of the cluster's recipes, absent for an empty cluster
    pub avg_rating: Option<f64>,
    /// Normalized popularity in [0, 1]
    pub popularity_score: f64,
    /// Up to three of the best-rated recipes
    pub example_recipes: Vec<String>,
}

/// Response for the cluster listing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ClusterSummaryResponse {
    pub n_clusters: usize,
    pub vocabulary_size: usize,
    pub trained_at: DateTime<Utc>,
    pub clusters: Vec<ClusterSummary>,
}

/// Response for a single cluster
#[derive(Debug, Serialize, Deserialize)]
pub struct ClusterRecipes {
    pub cluster_id: usize,
    pub popularity_score: f64,
    pub recipes: Vec<Recipe>,
}
