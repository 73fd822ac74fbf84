// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod inventory_service;
pub mod matching;
pub mod recipe_filters;
pub mod recipe_service;


// Re-export all services and their types
pub use inventory_service::InventoryService;

pub use matching::MatchRules;

pub use recipe_filters::{
    filter_by_difficulty, filter_by_max_cook_time, filter_by_max_prep_time,
    filter_cook_time_longer_than, filter_prep_time_longer_than, TimeRules,
};

pub use recipe_service::RecipeService;
