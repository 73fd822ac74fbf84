// src/lib.rs
// PantryHub - Local-first food bank inventory and recipe matcher
//
// Architecture:
// - Domain-centric: entities and invariants live in domain/
// - Layered: repositories persist, services orchestrate
// - Local-first: one JSON document in a local SQLite file
// - Explicit: no implicit behavior, no magic

pub mod db;
pub mod domain;
pub mod error;
pub mod integrations;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_food_type,
    validate_inventory_item,
    validate_recipe,
    Database,
    FoodType,
    Ingredient,
    InventoryItem,
    NutritionalFacts,
    NutritionalValue,
    QuantityValue,
    Recipe,
    STORAGE_KEY,
};

// ============================================================================
// PUBLIC API - Errors
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Persistence & Services
// ============================================================================

pub use repositories::{
    FileRecipeCatalog,
    FileSelectedMealSlot,
    InMemoryInventoryStore,
    InventoryStore,
    RecipeCatalog,
    SelectedMealSlot,
    SqliteInventoryStore,
};

pub use services::{InventoryService, MatchRules, RecipeService, TimeRules};
