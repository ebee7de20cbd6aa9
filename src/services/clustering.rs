use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::KMeans;
use ndarray::{Array1, Array2, Axis};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ingredient_key, ClusterSummary, Recipe},
    services::recipe_store::RecipeStore,
};

/// Popularity used for empty clusters and unknown cluster ids
pub const NEUTRAL_POPULARITY: f64 = 0.5;

const EXAMPLE_RECIPES_PER_CLUSTER: usize = 3;
const KMEANS_TOLERANCE: f64 = 1e-4;

/// K-Means settings
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringParams {
    pub n_clusters: usize,
    pub seed: u64,
    pub n_runs: usize,
    pub max_iterations: u64,
}

impl Default for ClusteringParams {
    fn default() -> Self {
        Self {
            n_clusters: 5,
            seed: 42,
            n_runs: 10,
            max_iterations: 300,
        }
    }
}

impl From<&Config> for ClusteringParams {
    fn from(config: &Config) -> Self {
        Self {
            n_clusters: config.n_clusters,
            seed: config.kmeans_seed,
            n_runs: config.kmeans_runs,
            max_iterations: config.kmeans_max_iterations,
        }
    }
}

/// Cluster assignment of every recipe plus per-cluster popularity
///
/// Built once from the full dataset; nothing is persisted, so retraining
/// produces a fresh model.
#[derive(Debug, Clone)]
pub struct ClusterModel {
    n_clusters: usize,
    vocabulary: Vec<String>,
    recipe_names: Vec<String>,
    /// Cluster id per recipe, indexed like the store
    assignments: Vec<usize>,
    popularity: Vec<f64>,
    summaries: Vec<ClusterSummary>,
    trained_at: DateTime<Utc>,
}

impl ClusterModel {
    /// Groups all recipes of the store into `params.n_clusters` clusters
    ///
    /// 1. One-hot encode ingredients over the sorted vocabulary
    /// 2. Standardize each column
    /// 3. Fit seeded K-Means and assign every recipe to its nearest centroid
    /// 4. Score clusters by min-max normalized mean rating
    pub fn train(store: &RecipeStore, params: &ClusteringParams) -> AppResult<Self> {
        let recipes = store.all();
        let k = params.n_clusters;

        if k == 0 {
            return Err(AppError::Clustering(
                "Number of clusters must be at least 1".to_string(),
            ));
        }
        if k > recipes.len() {
            return Err(AppError::Clustering(format!(
                "Cannot form {} clusters from {} recipes",
                k,
                recipes.len()
            )));
        }

        let vocabulary = build_vocabulary(recipes);
        let features = standardize(&one_hot_encode(recipes, &vocabulary));

        tracing::info!(
            recipes = recipes.len(),
            vocabulary = vocabulary.len(),
            n_clusters = k,
            "Training K-Means"
        );

        let dataset = DatasetBase::from(features.clone());
        let model = KMeans::params_with_rng(k, StdRng::seed_from_u64(params.seed))
            .n_runs(params.n_runs)
            .max_n_iterations(params.max_iterations)
            .tolerance(KMEANS_TOLERANCE)
            .fit(&dataset)
            .map_err(|e| AppError::Clustering(format!("K-Means fit failed: {}", e)))?;

        let labels: Array1<usize> = model.predict(&features);
        let assignments: Vec<usize> = labels.iter().copied().collect();

        if let Some(bad) = assignments.iter().find(|&&c| c >= k) {
            return Err(AppError::Clustering(format!(
                "K-Means produced cluster id {} outside 0..{}",
                bad, k
            )));
        }

        let mean_ratings = mean_rating_per_cluster(recipes, &assignments, k);
        let popularity = cluster_popularity(&mean_ratings);
        let summaries = summarize(recipes, &assignments, &mean_ratings, &popularity);

        for summary in &summaries {
            tracing::info!(
                cluster_id = summary.cluster_id,
                recipes = summary.num_recipes,
                popularity = summary.popularity_score,
                "Cluster trained"
            );
        }

        Ok(Self {
            n_clusters: k,
            vocabulary,
            recipe_names: recipes.iter().map(|r| r.name.clone()).collect(),
            assignments,
            popularity,
            summaries,
            trained_at: Utc::now(),
        })
    }

    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    /// Cluster id of the recipe at `index` in the store
    pub fn cluster_of_index(&self, index: usize) -> Option<usize> {
        self.assignments.get(index).copied()
    }

    /// Cluster id of the first recipe with this name
    pub fn cluster_of(&self, recipe_name: &str) -> Option<usize> {
        self.recipe_names
            .iter()
            .position(|name| name == recipe_name)
            .and_then(|index| self.cluster_of_index(index))
    }

    /// Normalized popularity, neutral for unknown ids
    pub fn popularity(&self, cluster_id: usize) -> f64 {
        self.popularity
            .get(cluster_id)
            .copied()
            .unwrap_or(NEUTRAL_POPULARITY)
    }

    /// Store indices of the recipes assigned to `cluster_id`
    pub fn recipes_in_cluster(&self, cluster_id: usize) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == cluster_id)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn summary(&self) -> &[ClusterSummary] {
        &self.summaries
    }
}

/// Sorted, de-duplicated ingredient keys across all recipes
pub fn build_vocabulary(recipes: &[Recipe]) -> Vec<String> {
    recipes
        .iter()
        .flat_map(|r| r.ingredients.iter().map(|i| ingredient_key(i)))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// One row per recipe, 1.0 where the recipe uses the vocabulary ingredient
pub fn one_hot_encode(recipes: &[Recipe], vocabulary: &[String]) -> Array2<f64> {
    let mut features = Array2::zeros((recipes.len(), vocabulary.len()));
    for (row, recipe) in recipes.iter().enumerate() {
        for key in recipe.ingredient_keys() {
            if let Ok(col) = vocabulary.binary_search(&key) {
                features[[row, col]] = 1.0;
            }
        }
    }
    features
}

/// Zero mean, unit population variance per column.
/// Constant columns are centred but not scaled.
pub fn standardize(features: &Array2<f64>) -> Array2<f64> {
    let Some(mean) = features.mean_axis(Axis(0)) else {
        return features.clone();
    };
    let std = features
        .std_axis(Axis(0), 0.0)
        .mapv(|s| if s > f64::EPSILON { s } else { 1.0 });

    (features - &mean) / &std
}

fn mean_rating_per_cluster(
    recipes: &[Recipe],
    assignments: &[usize],
    k: usize,
) -> Vec<Option<f64>> {
    let mut sums = vec![0.0; k];
    let mut counts = vec![0usize; k];

    for (recipe, &cluster) in recipes.iter().zip(assignments) {
        sums[cluster] += recipe.rating;
        counts[cluster] += 1;
    }

    sums.into_iter()
        .zip(counts)
        .map(|(sum, count)| (count > 0).then(|| sum / count as f64))
        .collect()
}

/// Min-max normalizes mean ratings to [0, 1].
///
/// Empty clusters are left out of the range and get the neutral value, as
/// does every cluster when all means are equal.
pub fn cluster_popularity(mean_ratings: &[Option<f64>]) -> Vec<f64> {
    let present = mean_ratings.iter().flatten().copied();
    let min = present.clone().fold(f64::INFINITY, f64::min);
    let max = present.fold(f64::NEG_INFINITY, f64::max);

    mean_ratings
        .iter()
        .map(|mean| match mean {
            Some(mean) if max > min => (mean - min) / (max - min),
            _ => NEUTRAL_POPULARITY,
        })
        .collect()
}

fn summarize(
    recipes: &[Recipe],
    assignments: &[usize],
    mean_ratings: &[Option<f64>],
    popularity: &[f64],
) -> Vec<ClusterSummary> {
    (0..mean_ratings.len())
        .map(|cluster_id| {
            let mut members: Vec<&Recipe> = recipes
                .iter()
                .zip(assignments)
                .filter(|(_, &c)| c == cluster_id)
                .map(|(recipe, _)| recipe)
                .collect();

            let num_recipes = members.len();
            members.sort_by(|a, b| b.rating.total_cmp(&a.rating));

            ClusterSummary {
                cluster_id,
                num_recipes,
                avg_rating: mean_ratings[cluster_id],
                popularity_score: popularity[cluster_id],
                example_recipes: members
                    .into_iter()
                    .take(EXAMPLE_RECIPES_PER_CLUSTER)
                    .map(|r| r.name.clone())
                    .collect(),
            }
        })
        .collect()
}
