use serde::Serialize;

/// An ingredient a user can pick
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CatalogIngredient {
    pub name: &'static str,
    pub icon: &'static str,
}

const fn item(name: &'static str, icon: &'static str) -> CatalogIngredient {
    CatalogIngredient { name, icon }
}

/// Selectable ingredients in display order
pub const CATALOG: [CatalogIngredient; 25] = [
    item("Eggs", "🥚"),
    item("Flour", "🌾"),
    item("Garlic", "🧄"),
    item("Onion", "🧅"),
    item("Milk", "🥛"),
    item("Tomatoes", "🍅"),
    item("Parmesan cheese", "🧀"),
    item("Feta cheese", "🧀"),
    item("Mozzarella cheese", "🧀"),
    item("Chicken", "🍗"),
    item("Soy sauce", "🥫"),
    item("Lemon", "🍋"),
    item("Carrots", "🥕"),
    item("Potatoes", "🥔"),
    item("Bell peppers", "🫑"),
    item("Rice", "🍚"),
    item("Beef", "🥩"),
    item("Pasta", "🍝"),
    item("Heavy cream", "🥛"),
    item("Broccoli", "🥦"),
    item("Mushrooms", "🍄"),
    item("Apples", "🍎"),
    item("Spinach", "🥬"),
    item("Banana", "🍌"),
    item("Bacon", "🥓"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::ingredient_key,
        services::{clustering::build_vocabulary, recipe_store::RecipeStore},
    };
    use std::collections::HashSet;

    #[test]
    fn test_catalog_names_are_unique() {
        let names: HashSet<&str> = CATALOG.iter().map(|i| i.name).collect();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn test_every_catalog_ingredient_appears_in_dataset() {
        let store =
            RecipeStore::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample_recipes.csv"))
                .unwrap();
        let vocabulary = build_vocabulary(store.all());

        for ingredient in CATALOG {
            assert!(
                vocabulary.contains(&ingredient_key(ingredient.name)),
                "{} is not used by any recipe",
                ingredient.name
            );
        }
    }
}
