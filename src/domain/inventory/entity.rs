use serde::{Deserialize, Serialize};

/// A measured value with its unit, e.g. `{ value: 88, unit: "kcal" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionalValue {
    pub value: f64,
    pub unit: String,
}

impl NutritionalValue {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// Per-serving nutrition for a product, as reported by the product database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionalFacts {
    pub calories: NutritionalValue,
    pub protein: NutritionalValue,
    pub fat: NutritionalValue,
    pub carbohydrates: NutritionalValue,
    pub sugar: NutritionalValue,
    pub sodium: NutritionalValue,
}

impl Default for NutritionalFacts {
    fn default() -> Self {
        Self {
            calories: NutritionalValue::new(0.0, "kcal"),
            protein: NutritionalValue::new(0.0, "g"),
            fat: NutritionalValue::new(0.0, "g"),
            carbohydrates: NutritionalValue::new(0.0, "g"),
            sugar: NutritionalValue::new(0.0, "g"),
            sodium: NutritionalValue::new(0.0, "mg"),
        }
    }
}

/// Package or serving quantity, e.g. `{ value: 400, unit: "g" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityValue {
    pub value: f64,
    pub unit: String,
}

impl QuantityValue {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// A pantry product held in inventory.
///
/// `serial_number` is the UPC of the product and the unique key: duplicate
/// physical units of the same product increment `count` on the single record
/// instead of creating a second one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// UPC / barcode; unique within the inventory
    pub serial_number: String,

    /// Foreign key into the FoodType reference data
    pub food_type_id: i64,

    /// Display name, e.g. "Chopped Tomatoes"
    pub sub_category: String,

    pub nutritional_facts: NutritionalFacts,

    /// ISO date string, YYYY-MM-DD
    pub expiration_date: String,

    pub quantity: QuantityValue,

    pub serving_quantity: QuantityValue,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_image_url: Option<String>,

    /// Number of duplicate physical units of this product
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

impl InventoryItem {
    /// Create an item with sensible defaults for everything but identity.
    pub fn new(serial_number: impl Into<String>, food_type_id: i64, sub_category: impl Into<String>) -> Self {
        Self {
            serial_number: serial_number.into(),
            food_type_id,
            sub_category: sub_category.into(),
            nutritional_facts: NutritionalFacts::default(),
            expiration_date: String::new(),
            quantity: QuantityValue::new(1.0, "item"),
            serving_quantity: QuantityValue::new(100.0, "g"),
            image_url: None,
            nutrition_image_url: None,
            count: 1,
        }
    }
}
