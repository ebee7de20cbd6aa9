use crate::{
    models::RecipeMatch,
    services::{clustering::ClusterModel, matcher::MatchCandidate},
};

const WEIGHT_BASE: f64 = 0.6;
const WEIGHT_BOOST: f64 = 0.4;
const BOOST_RATING: f64 = 0.2;
const BOOST_POPULARITY: f64 = 0.2;

/// `0.2 * normalized_rating + 0.2 * cluster_popularity`
pub fn cluster_boost(normalized_rating: f64, cluster_popularity: f64) -> f64 {
    BOOST_RATING * normalized_rating + BOOST_POPULARITY * cluster_popularity
}

/// `0.6 * base_score + 0.4 * cluster_boost`
pub fn final_score(base_score: f64, cluster_boost: f64) -> f64 {
    WEIGHT_BASE * base_score + WEIGHT_BOOST * cluster_boost
}

/// Blends base scores with the cluster boost and keeps the best `top_n`
///
/// Without a cluster model the boost is zero and no cluster id is reported.
/// Equal scores keep dataset order.
pub fn rank(
    candidates: Vec<MatchCandidate<'_>>,
    clusters: Option<&ClusterModel>,
    top_n: usize,
) -> Vec<RecipeMatch> {
    let mut ranked: Vec<RecipeMatch> = candidates
        .into_iter()
        .map(|candidate| {
            let recipe = candidate.recipe;
            let cluster_id = clusters.and_then(|model| model.cluster_of_index(candidate.index));

            let boost = match (clusters, cluster_id) {
                (Some(model), Some(id)) => {
                    cluster_boost(recipe.normalized_rating(), model.popularity(id))
                }
                _ => 0.0,
            };

            RecipeMatch {
                recipe_name: recipe.name.clone(),
                final_score: final_score(candidate.base_score, boost),
                base_score: candidate.base_score,
                cluster_boost: boost,
                cluster_id,
                num_matching: candidate.matching.len(),
                num_missing: candidate.missing.len(),
                matching_ingredients: candidate.matching,
                missing_ingredients: candidate.missing,
                rating: recipe.rating,
                cooking_time: recipe.cooking_time,
                difficulty: recipe.difficulty,
                instructions: recipe.instructions.clone(),
                all_ingredients: recipe.ingredients.clone(),
            }
        })
        .collect();

    // Stable sort keeps dataset order among ties
    ranked.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    ranked.truncate(top_n);
    ranked
}
