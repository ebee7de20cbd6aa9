pub mod clustering;
pub mod ingredient_catalog;
pub mod matcher;
pub mod ranker;
pub mod recipe_store;
pub mod recommendations;

pub use clustering::{ClusterModel, ClusteringParams};
pub use matcher::RecipeMatcher;
pub use recipe_store::RecipeStore;
