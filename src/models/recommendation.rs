use serde::{Deserialize, Serialize};

use super::Difficulty;

/// Request body for the recommendations endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    /// Ingredients the user has on hand
    pub ingredients: Vec<String>,
    /// Overrides the configured missing-ingredient limit
    #[serde(default)]
    pub max_missing: Option<usize>,
    /// Overrides the configured result count
    #[serde(default)]
    pub top_n: Option<usize>,
}

/// A ranked recipe returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeMatch {
    pub recipe_name: String,
    pub final_score: f64,
    pub base_score: f64,
    pub cluster_boost: f64,
    /// Absent when clustering is disabled
    pub cluster_id: Option<usize>,
    pub matching_ingredients: Vec<String>,
    pub missing_ingredients: Vec<String>,
    pub num_matching: usize,
    pub num_missing: usize,
    pub rating: f64,
    pub cooking_time: u32,
    pub difficulty: Difficulty,
    pub instructions: Vec<String>,
    pub all_ingredients: Vec<String>,
}

/// Response for the recommendations endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Recipes that passed the missing-ingredient filter, before truncation
    pub feasible_count: usize,
    /// Best recipes first
    pub recommendations: Vec<RecipeMatch>,
}
