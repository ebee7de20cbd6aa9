use std::{fs::File, io::Read, path::Path};

use crate::{
    error::{AppError, AppResult},
    models::{CsvRecipe, Recipe},
};

/// In-memory, read-only recipe dataset
#[derive(Debug, Clone)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    /// Loads recipes from a CSV file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::DatasetNotFound(path.display().to_string()));
        }

        let file = File::open(path).map_err(|e| {
            AppError::Internal(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let store = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            recipes = store.len(),
            "Loaded recipe dataset"
        );

        Ok(store)
    }

    /// Parses recipes from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut recipes = Vec::new();

        for (index, row) in csv_reader.deserialize::<CsvRecipe>().enumerate() {
            // +2: one for the header, one for 1-based rows
            let row_number = index + 2;
            let recipe = Recipe::try_from(row?).map_err(|reason| AppError::InvalidRecipe {
                row: row_number,
                reason,
            })?;
            recipes.push(recipe);
        }

        Self::from_recipes(recipes)
    }

    /// Builds a store from already parsed recipes, dropping duplicate
    /// ingredient keys within each recipe
    pub fn from_recipes(mut recipes: Vec<Recipe>) -> AppResult<Self> {
        if recipes.is_empty() {
            return Err(AppError::EmptyDataset);
        }
        for recipe in &mut recipes {
            recipe.dedupe_ingredients();
        }
        Ok(Self { recipes })
    }

    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    /// First recipe whose name matches exactly
    pub fn find_by_name(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
