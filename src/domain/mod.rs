// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod database;
pub mod food_type;
pub mod inventory;
pub mod recipe;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Recipe Domain
pub use recipe::{validate_recipe, Ingredient, Recipe};

// Inventory Domain
pub use inventory::{
    validate_inventory_item, InventoryItem, NutritionalFacts, NutritionalValue, QuantityValue,
};

// FoodType Reference Data
pub use food_type::{default_food_types, validate_food_type, FoodType};

// Aggregate Root
pub use database::{Database, STORAGE_KEY};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
