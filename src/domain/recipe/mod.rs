pub mod entity;
pub mod invariants;

pub use entity::{Ingredient, Recipe};
pub use invariants::validate_recipe;
