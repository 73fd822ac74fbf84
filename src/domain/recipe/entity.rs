use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single required ingredient within a recipe.
///
/// Quantity is free text, not guaranteed numeric: recipe sources supply
/// ranges ("2-3") and qualitative amounts ("a pinch").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }
}

/// A recipe in the catalog.
///
/// Recipes are append-only: once stored they are never edited in place.
/// Created by manual entry or by the generative client; the catalog file
/// holds one JSON object per line. Only `id`, `name` and `ingredients` are
/// required on the wire, the remaining fields default when a source omits
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique catalog identifier
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub cuisine: String,

    /// Required ingredients, in presentation order
    pub ingredients: Vec<Ingredient>,

    /// Free-text duration, e.g. "10 minutes" or "1 hour 30 minutes"
    #[serde(default)]
    pub prep_time: String,

    #[serde(default)]
    pub cook_time: String,

    #[serde(default)]
    pub instructions: Vec<String>,

    #[serde(default = "default_servings")]
    pub servings: u32,

    #[serde(default)]
    pub equipment: Vec<String>,

    /// Free text, conventionally "Easy" | "Medium" | "Hard"
    #[serde(default)]
    pub difficulty: String,

    #[serde(default)]
    pub author: String,
}

fn default_servings() -> u32 {
    1
}

impl Recipe {
    /// Create a new manually-entered recipe with a fresh identity.
    pub fn new(name: impl Into<String>, ingredients: Vec<Ingredient>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            cuisine: String::new(),
            ingredients,
            prep_time: String::new(),
            cook_time: String::new(),
            instructions: Vec::new(),
            servings: 1,
            equipment: Vec::new(),
            difficulty: String::new(),
            author: String::new(),
        }
    }
}
