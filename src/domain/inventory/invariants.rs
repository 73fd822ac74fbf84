use super::entity::{InventoryItem, NutritionalFacts};
use crate::domain::{DomainError, DomainResult};

/// Validates all InventoryItem invariants
pub fn validate_inventory_item(item: &InventoryItem) -> DomainResult<()> {
    if item.serial_number.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Inventory item serial number cannot be empty".to_string(),
        ));
    }

    if item.count == 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Inventory item {} must have a count of at least 1",
            item.serial_number
        )));
    }

    validate_nutritional_facts(&item.serial_number, &item.nutritional_facts)?;

    Ok(())
}

fn validate_nutritional_facts(serial: &str, facts: &NutritionalFacts) -> DomainResult<()> {
    let values = [
        ("calories", facts.calories.value),
        ("protein", facts.protein.value),
        ("fat", facts.fat.value),
        ("carbohydrates", facts.carbohydrates.value),
        ("sugar", facts.sugar.value),
        ("sodium", facts.sodium.value),
    ];

    for (field, value) in values {
        if value < 0.0 || !value.is_finite() {
            return Err(DomainError::InvariantViolation(format!(
                "Inventory item {} has an invalid {} value: {}",
                serial, field, value
            )));
        }
    }

    Ok(())
}

/// Invariants that must hold for the inventory domain:
///
/// 1. At most one record per serial number (enforced by the scan workflow)
/// 2. Count is always >= 1; a count of zero means the record is deleted
/// 3. Nutritional values are non-negative and finite
/// 4. Expiration date, when set, is an ISO YYYY-MM-DD string
