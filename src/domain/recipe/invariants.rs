use super::entity::Recipe;
use crate::domain::{DomainError, DomainResult};

/// Validates all Recipe invariants
pub fn validate_recipe(recipe: &Recipe) -> DomainResult<()> {
    if recipe.id.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Recipe id cannot be empty".to_string(),
        ));
    }

    if recipe.name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Recipe name cannot be empty".to_string(),
        ));
    }

    if recipe.servings == 0 {
        return Err(DomainError::InvariantViolation(
            "Recipe servings must be greater than zero".to_string(),
        ));
    }

    for ingredient in &recipe.ingredients {
        if ingredient.name.trim().is_empty() {
            return Err(DomainError::InvariantViolation(format!(
                "Recipe '{}' has an ingredient with an empty name",
                recipe.name
            )));
        }
    }

    Ok(())
}

/// Invariants that must hold for the Recipe domain:
///
/// 1. Identity is immutable and unique within the catalog
/// 2. A recipe may have zero ingredients (trivially makeable)
/// 3. Every ingredient carries a non-empty name
/// 4. Servings is a positive integer
/// 5. Lifecycle is append-only: no in-place update or delete
