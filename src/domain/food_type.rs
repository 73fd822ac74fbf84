// src/domain/food_type.rs
//
// FoodType reference data
//
// Static categories the inventory is partitioned into. Created at database
// initialization; rarely mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodType {
    /// Unique identifier
    pub food_type_id: i64,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FoodType {
    pub fn new(food_type_id: i64, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            food_type_id,
            name: name.into(),
            description: Some(description.into()),
        }
    }
}

pub fn validate_food_type(food_type: &FoodType) -> DomainResult<()> {
    if food_type.name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Food type name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// The six canonical categories installed on a fresh database.
pub fn default_food_types() -> Vec<FoodType> {
    vec![
        FoodType::new(1, "Grains", "Cereals, bread, rice, pasta, etc."),
        FoodType::new(2, "Proteins", "Meat, fish, eggs, legumes, etc."),
        FoodType::new(3, "Vegetables", "Fresh, frozen, or canned vegetables"),
        FoodType::new(4, "Fruits", "Fresh, frozen, or canned fruits"),
        FoodType::new(5, "Dairy", "Milk, cheese, yogurt, etc."),
        FoodType::new(6, "Condiments", "Sauces, spices, oils, etc."),
    ]
}
