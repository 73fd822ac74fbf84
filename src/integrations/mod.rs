// src/integrations/mod.rs
//
// External integrations. Infrastructure only: clients return mapped data,
// services decide what to persist.

pub mod openfoodfacts;
pub mod recipegen;

pub use openfoodfacts::OpenFoodFactsClient;
pub use recipegen::RecipeGenClient;
