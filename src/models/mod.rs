use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt::Display, str::FromStr};

pub mod cluster;
pub mod recommendation;

pub use cluster::{ClusterRecipes, ClusterSummary, ClusterSummaryResponse};
pub use recommendation::{RecipeMatch, RecommendationRequest, RecommendationResponse};

/// Normalizes an ingredient name for comparison ("  Olive Oil " -> "olive oil")
pub fn ingredient_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// How hard a recipe is to cook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// A recipe as held by the store. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub name: String,
    /// Ingredient display names in dataset order. Duplicate keys are removed
    /// by `TryFrom<CsvRecipe>` and by `RecipeStore::from_recipes`.
    pub ingredients: Vec<String>,
    /// Minutes
    pub cooking_time: u32,
    /// 1 to 5
    pub rating: f64,
    pub difficulty: Difficulty,
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Drops blank names and names whose key was already seen, keeping the first spelling
    pub fn dedupe_ingredients(&mut self) {
        let mut seen = BTreeSet::new();
        self.ingredients.retain(|i| {
            let key = ingredient_key(i);
            !key.is_empty() && seen.insert(key)
        });
    }

    /// Distinct normalized ingredient keys
    pub fn ingredient_keys(&self) -> BTreeSet<String> {
        self.ingredients.iter().map(|i| ingredient_key(i)).collect()
    }

    /// Rating min-max scaled from [1, 5] to [0, 1]
    pub fn normalized_rating(&self) -> f64 {
        ((self.rating - 1.0) / 4.0).clamp(0.0, 1.0)
    }
}

// ============================================================================
// CSV Types
// ============================================================================

/// Raw row of the recipes CSV
#[derive(Debug, Clone, Deserialize)]
pub struct CsvRecipe {
    pub recipe_name: String,
    /// Comma-separated ingredient names
    pub ingredients: String,
    pub cooking_time: u32,
    pub rating: f64,
    /// Steps separated by `|`
    pub instructions: String,
    pub difficulty: String,
}

impl TryFrom<CsvRecipe> for Recipe {
    type Error = String;

    fn try_from(row: CsvRecipe) -> Result<Self, Self::Error> {
        let name = row.recipe_name.trim().to_string();
        if name.is_empty() {
            return Err("recipe name is empty".to_string());
        }

        if !(1.0..=5.0).contains(&row.rating) {
            return Err(format!("rating {} is outside 1-5", row.rating));
        }

        let difficulty = row.difficulty.parse::<Difficulty>()?;

        let ingredients: Vec<String> = row
            .ingredients
            .split(',')
            .map(str::trim)
            .map(str::to_string)
            .collect();

        let instructions = row
            .instructions
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let mut recipe = Recipe {
            name,
            ingredients,
            cooking_time: row.cooking_time,
            rating: row.rating,
            difficulty,
            instructions,
        };
        recipe.dedupe_ingredients();

        if recipe.ingredients.is_empty() {
            return Err(format!("recipe '{}' has no ingredients", recipe.name));
        }

        Ok(recipe)
    }
}
