use std::collections::HashSet;

use crate::{
    models::{ingredient_key, Recipe},
    services::recipe_store::RecipeStore,
};

/// Ingredients assumed to be in every kitchen
pub const PANTRY_STAPLES: [&str; 7] = [
    "Salt",
    "Pepper",
    "Oil",
    "Butter",
    "Olive oil",
    "Vegetable oil",
    "Black pepper",
];

/// Cooking time at or beyond which the time factor is zero
const MAX_COOKING_MINUTES: f64 = 60.0;

const WEIGHT_MATCH: f64 = 0.4;
const WEIGHT_MISSING: f64 = 0.3;
const WEIGHT_TIME: f64 = 0.1;
const WEIGHT_RATING: f64 = 0.2;

/// A recipe that passed the missing-ingredient filter
#[derive(Debug, Clone)]
pub struct MatchCandidate<'a> {
    /// Position of the recipe in the store
    pub index: usize,
    pub recipe: &'a Recipe,
    pub matching: Vec<String>,
    pub missing: Vec<String>,
    pub base_score: f64,
}

/// Filters recipes by ingredient coverage and computes their base score
#[derive(Debug, Clone)]
pub struct RecipeMatcher {
    pantry: HashSet<String>,
}

impl Default for RecipeMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeMatcher {
    /// Creates a matcher with the standard pantry staples
    pub fn new() -> Self {
        Self::with_pantry(PANTRY_STAPLES)
    }

    pub fn with_pantry<I, S>(staples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            pantry: staples
                .into_iter()
                .map(|s| ingredient_key(s.as_ref()))
                .collect(),
        }
    }

    /// Returns every recipe missing at most `max_missing` ingredients,
    /// in dataset order
    pub fn find_candidates<'a>(
        &self,
        store: &'a RecipeStore,
        user_ingredients: &[String],
        max_missing: usize,
    ) -> Vec<MatchCandidate<'a>> {
        let available: HashSet<String> = user_ingredients
            .iter()
            .map(|i| ingredient_key(i))
            .chain(self.pantry.iter().cloned())
            .collect();

        let candidates: Vec<MatchCandidate<'a>> = store
            .all()
            .iter()
            .enumerate()
            .filter_map(|(index, recipe)| {
                let (matching, missing): (Vec<String>, Vec<String>) = recipe
                    .ingredients
                    .iter()
                    .cloned()
                    .partition(|i| available.contains(&ingredient_key(i)));

                if missing.len() > max_missing {
                    return None;
                }

                let base_score = base_score(
                    matching.len(),
                    missing.len(),
                    recipe.ingredients.len(),
                    recipe.cooking_time,
                    recipe.rating,
                );

                Some(MatchCandidate {
                    index,
                    recipe,
                    matching,
                    missing,
                    base_score,
                })
            })
            .collect();

        tracing::debug!(
            user_ingredients = user_ingredients.len(),
            max_missing,
            feasible = candidates.len(),
            "Filtered recipes"
        );

        candidates
    }
}

/// Weighted match quality in [0, 1]
///
/// `0.4 * match_ratio + 0.3 * (1 - missing/total) + 0.1 * time_factor + 0.2 * rating_factor`
pub fn base_score(
    num_matching: usize,
    num_missing: usize,
    num_total: usize,
    cooking_time: u32,
    rating: f64,
) -> f64 {
    let (match_ratio, coverage) = if num_total > 0 {
        let total = num_total as f64;
        (
            num_matching as f64 / total,
            1.0 - num_missing as f64 / total,
        )
    } else {
        (0.0, 1.0)
    };

    let time_factor = (1.0 - cooking_time as f64 / MAX_COOKING_MINUTES).max(0.0);
    let rating_factor = ((rating - 1.0) / 4.0).clamp(0.0, 1.0);

    WEIGHT_MATCH * match_ratio
        + WEIGHT_MISSING * coverage
        + WEIGHT_TIME * time_factor
        + WEIGHT_RATING * rating_factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn recipe(name: &str, ingredients: &[&str], cooking_time: u32, rating: f64) -> Recipe {
        Recipe {
            name: name.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            cooking_time,
            rating,
            difficulty: Difficulty::Easy,
            instructions: vec![],
        }
    }

    fn store() -> RecipeStore {
        RecipeStore::from_recipes(vec![
            recipe(
                "Carbonara",
                &["Pasta", "Eggs", "Bacon", "Parmesan cheese", "Salt"],
                25,
                4.8,
            ),
            recipe("Pancakes", &["Flour", "Eggs", "Milk", "Butter"], 20, 4.5),
            recipe("Risotto", &["Rice", "Mushrooms", "Onion", "Parmesan cheese"], 45, 4.5),
        ])
        .unwrap()
    }

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_base_score_perfect_match() {
        // All present, instant, top rating
        let score = base_score(4, 0, 4, 0, 5.0);
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_base_score_long_recipe_has_no_time_credit() {
        let slow = base_score(4, 0, 4, 90, 5.0);
        let limit = base_score(4, 0, 4, 60, 5.0);
        assert!((slow - 0.9).abs() < 1e-12);
        assert_eq!(slow, limit);
    }

    #[test]
    fn test_base_score_with_missing() {
        // match 3/5, coverage 1 - 2/5, time 30/60, rating 3 -> 0.5
        let score = base_score(3, 2, 5, 30, 3.0);
        let expected = 0.4 * 0.6 + 0.3 * 0.6 + 0.1 * 0.5 + 0.2 * 0.5;
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_base_score_empty_recipe() {
        let score = base_score(0, 0, 0, 60, 1.0);
        assert!((score - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_base_score_increases_with_match_ratio() {
        let mut previous = f64::MIN;
        for matching in 0..=5 {
            let score = base_score(matching, 0, 5, 20, 4.0);
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_pantry_staples_never_count_as_missing() {
        let store = store();
        let matcher = RecipeMatcher::new();
        let candidates = matcher.find_candidates(&store, &owned(&["Flour", "Eggs", "Milk"]), 0);

        assert_eq!(candidates.len(), 1);
        let pancakes = &candidates[0];
        assert_eq!(pancakes.recipe.name, "Pancakes");
        assert!(pancakes.missing.is_empty());
        assert!(pancakes.matching.contains(&"Butter".to_string()));
    }

    #[test]
    fn test_missing_limit_is_respected() {
        let store = store();
        let matcher = RecipeMatcher::new();
        let user = owned(&["Eggs", "Parmesan cheese"]);

        for max_missing in 0..4 {
            for candidate in matcher.find_candidates(&store, &user, max_missing) {
                assert!(candidate.missing.len() <= max_missing);
            }
        }

        let two = matcher.find_candidates(&store, &user, 2);
        let names: Vec<&str> = two.iter().map(|c| c.recipe.name.as_str()).collect();
        assert_eq!(names, vec!["Carbonara", "Pancakes"]);
    }

    #[test]
    fn test_user_ingredients_match_case_insensitively() {
        let store = store();
        let matcher = RecipeMatcher::new();
        let user = owned(&[" rice", "MUSHROOMS", "onion", "parmesan cheese"]);
        let candidates = matcher.find_candidates(&store, &user, 0);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].index, 2);
        assert_eq!(
            candidates[0].matching,
            vec!["Rice", "Mushrooms", "Onion", "Parmesan cheese"]
        );
    }

    #[test]
    fn test_duplicate_ingredient_spellings_count_once() {
        let store = RecipeStore::from_recipes(vec![recipe(
            "Omelette",
            &["Eggs", "eggs", "Flour", "Milk"],
            60,
            1.0,
        )])
        .unwrap();
        let matcher = RecipeMatcher::new();
        let candidates = matcher.find_candidates(&store, &owned(&["Eggs"]), 2);

        assert_eq!(candidates.len(), 1);
        let omelette = &candidates[0];
        assert_eq!(omelette.matching, vec!["Eggs"]);
        assert_eq!(omelette.missing, vec!["Flour", "Milk"]);
        // 0.4 * 1/3 + 0.3 * (1 - 2/3)
        let expected = 0.4 / 3.0 + 0.3 / 3.0;
        assert!((omelette.base_score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_custom_pantry() {
        let store = store();
        let matcher = RecipeMatcher::with_pantry(Vec::<String>::new());
        let candidates = matcher.find_candidates(&store, &owned(&["Flour", "Eggs", "Milk"]), 0);
        assert!(candidates.is_empty());
    }
}
