// src/integrations/openfoodfacts/client.rs
//
// Open Food Facts product lookup
//
// Fetches product data by UPC and maps it into an inventory item draft.
// This is infrastructure: it never touches the store, it only returns a
// mapped item the services layer can persist. Unknown UPCs are a normal
// outcome (Ok(None)), not an error.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::Local;

use crate::domain::{InventoryItem, NutritionalFacts, NutritionalValue, QuantityValue};
use crate::error::{AppError, AppResult};

/// Days until the assumed expiration of a scanned shelf-stable product.
/// Open Food Facts does not carry expiration dates, so scans get a
/// conservative one-year default the operator can correct.
const DEFAULT_SHELF_LIFE_DAYS: i64 = 365;

#[derive(Debug, Deserialize)]
struct ProductResponse {
    /// Number in API v2 responses, string in v3 ("success", ...).
    status: Value,
    product: Option<ProductData>,
}

#[derive(Debug, Deserialize)]
struct ProductData {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    categories_tags: Vec<String>,
    #[serde(default)]
    nutriments: Nutriments,
    #[serde(default)]
    serving_quantity: Option<Value>,
    #[serde(default)]
    serving_quantity_unit: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    image_nutrition_url: Option<String>,
}

/// Per-serving nutriments with per-100g fallbacks.
#[derive(Debug, Default, Deserialize)]
struct Nutriments {
    #[serde(rename = "energy-kcal_serving")]
    energy_kcal_serving: Option<f64>,
    #[serde(rename = "energy-kcal_100g")]
    energy_kcal_100g: Option<f64>,
    proteins_serving: Option<f64>,
    proteins_100g: Option<f64>,
    fat_serving: Option<f64>,
    fat_100g: Option<f64>,
    carbohydrates_serving: Option<f64>,
    carbohydrates_100g: Option<f64>,
    sugars_serving: Option<f64>,
    sugars_100g: Option<f64>,
    sodium_serving: Option<f64>,
    sodium_100g: Option<f64>,
}

/// Rate limiter state
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new() -> Self {
        Self {
            last_request: Instant::now() - Duration::from_secs(60),
            min_interval: Duration::from_millis(1000),
        }
    }

    fn wait_if_needed(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            std::thread::sleep(self.min_interval - elapsed);
        }
        self.last_request = Instant::now();
    }
}

pub struct OpenFoodFactsClient {
    base_url: String,
    http_client: Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl Default for OpenFoodFactsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenFoodFactsClient {
    pub fn new() -> Self {
        Self::with_base_url("https://world.openfoodfacts.org")
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("pantryhub/0.1 (inventory scanner)")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into(),
            http_client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new())),
        }
    }

    /// Look up a UPC. `Ok(None)` means the product is not in the database.
    pub async fn fetch_product(&self, upc: &str) -> AppResult<Option<InventoryItem>> {
        {
            let mut limiter = self.rate_limiter.lock().unwrap();
            limiter.wait_if_needed();
        }

        let url = format!("{}/api/v3/product/{}.json", self.base_url, upc);
        let response = self.http_client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AppError::Other(format!(
                "Open Food Facts returned {} for UPC {}",
                response.status(),
                upc
            )));
        }

        let body: ProductResponse = response.json().await?;

        if !is_valid_status(&body.status) {
            log::warn!("Product lookup for {} failed with status {}", upc, body.status);
            return Ok(None);
        }

        match body.product {
            Some(product) => Ok(Some(map_product(upc, product))),
            None => Ok(None),
        }
    }
}

/// Successful lookups report status 1 (v2) or a "success*" string (v3).
fn is_valid_status(status: &Value) -> bool {
    match status {
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => s == "success" || s == "success_with_warnings",
        _ => false,
    }
}

/// Map the first category tag to one of the fixed food type ids.
fn food_type_from_categories(categories_tags: &[String]) -> i64 {
    let first = match categories_tags.first() {
        Some(tag) => tag.to_lowercase(),
        None => return 6,
    };

    if first.contains("grain") || first.contains("cereal") {
        1
    } else if first.contains("meat") || first.contains("legume") {
        2
    } else if first.contains("vegetable") {
        3
    } else if first.contains("fruit") {
        4
    } else if first.contains("dairy") {
        5
    } else {
        6
    }
}

/// Pure mapping from a product payload to an inventory item draft.
fn map_product(upc: &str, product: ProductData) -> InventoryItem {
    let n = &product.nutriments;
    let nutritional_facts = NutritionalFacts {
        calories: NutritionalValue::new(
            n.energy_kcal_serving.or(n.energy_kcal_100g).unwrap_or(0.0),
            "kcal",
        ),
        protein: NutritionalValue::new(n.proteins_serving.or(n.proteins_100g).unwrap_or(0.0), "g"),
        fat: NutritionalValue::new(n.fat_serving.or(n.fat_100g).unwrap_or(0.0), "g"),
        carbohydrates: NutritionalValue::new(
            n.carbohydrates_serving
                .or(n.carbohydrates_100g)
                .unwrap_or(0.0),
            "g",
        ),
        sugar: NutritionalValue::new(n.sugars_serving.or(n.sugars_100g).unwrap_or(0.0), "g"),
        sodium: NutritionalValue::new(n.sodium_serving.or(n.sodium_100g).unwrap_or(0.0), "mg"),
    };

    // serving_quantity comes back as either a number or a numeric string.
    let serving_value = match &product.serving_quantity {
        Some(Value::Number(v)) => v.as_f64().unwrap_or(100.0),
        Some(Value::String(s)) => s.parse().unwrap_or(100.0),
        _ => 100.0,
    };
    let serving_unit = product.serving_quantity_unit.unwrap_or_else(|| "g".to_string());

    let expiration = (Local::now().date_naive()
        + chrono::Duration::days(DEFAULT_SHELF_LIFE_DAYS))
    .format("%Y-%m-%d")
    .to_string();

    let mut item = InventoryItem::new(
        upc,
        food_type_from_categories(&product.categories_tags),
        product.product_name.unwrap_or_else(|| "Unknown product".to_string()),
    );
    item.nutritional_facts = nutritional_facts;
    item.expiration_date = expiration;
    item.quantity = QuantityValue::new(1.0, "item");
    item.serving_quantity = QuantityValue::new(serving_value, serving_unit);
    item.image_url = product.image_url;
    item.nutrition_image_url = product.image_nutrition_url;
    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> ProductResponse {
        serde_json::from_value(json!({
            "status": "success",
            "product": {
                "product_name": "Baked Beans, Original",
                "categories_tags": ["en:legumes-and-their-products"],
                "nutriments": {
                    "energy-kcal_serving": 140.0,
                    "proteins_serving": 6.0,
                    "fat_serving": 0.5,
                    "carbohydrates_serving": 29.0,
                    "sugars_serving": 12.0,
                    "sodium_serving": 550.0
                },
                "serving_quantity": "130",
                "serving_quantity_unit": "g",
                "image_url": "https://example.org/front.jpg",
                "image_nutrition_url": "https://example.org/nutrition.jpg"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_statuses() {
        assert!(is_valid_status(&json!(1)));
        assert!(is_valid_status(&json!("success")));
        assert!(is_valid_status(&json!("success_with_warnings")));
        assert!(!is_valid_status(&json!(0)));
        assert!(!is_valid_status(&json!("failure")));
        assert!(!is_valid_status(&json!(null)));
    }

    #[test]
    fn test_category_mapping() {
        let tag = |t: &str| vec![t.to_string()];
        assert_eq!(food_type_from_categories(&tag("en:cereals-and-potatoes")), 1);
        assert_eq!(food_type_from_categories(&tag("en:meats")), 2);
        assert_eq!(food_type_from_categories(&tag("en:legumes-and-their-products")), 2);
        assert_eq!(food_type_from_categories(&tag("en:vegetables")), 3);
        assert_eq!(food_type_from_categories(&tag("en:fruits")), 4);
        assert_eq!(food_type_from_categories(&tag("en:dairy-products")), 5);
        assert_eq!(food_type_from_categories(&tag("en:snacks")), 6);
        assert_eq!(food_type_from_categories(&[]), 6);
    }

    #[test]
    fn test_map_product_fills_item() {
        let payload = sample_payload();
        let item = map_product("039400016144", payload.product.unwrap());

        assert_eq!(item.serial_number, "039400016144");
        assert_eq!(item.sub_category, "Baked Beans, Original");
        assert_eq!(item.food_type_id, 2);
        assert_eq!(item.count, 1);
        assert_eq!(item.nutritional_facts.calories.value, 140.0);
        assert_eq!(item.nutritional_facts.sodium.value, 550.0);
        assert_eq!(item.serving_quantity.value, 130.0);
        assert_eq!(item.serving_quantity.unit, "g");
        assert_eq!(item.image_url.as_deref(), Some("https://example.org/front.jpg"));
        // Expiration defaults one year out.
        let expected = (Local::now().date_naive() + chrono::Duration::days(365))
            .format("%Y-%m-%d")
            .to_string();
        assert_eq!(item.expiration_date, expected);
    }

    #[test]
    fn test_map_product_falls_back_to_per_100g() {
        let payload: ProductResponse = serde_json::from_value(json!({
            "status": 1,
            "product": {
                "product_name": "Plain Oats",
                "categories_tags": ["en:cereals-and-potatoes"],
                "nutriments": {
                    "energy-kcal_100g": 380.0,
                    "proteins_100g": 13.0
                }
            }
        }))
        .unwrap();

        let item = map_product("000000000001", payload.product.unwrap());

        assert_eq!(item.nutritional_facts.calories.value, 380.0);
        assert_eq!(item.nutritional_facts.protein.value, 13.0);
        assert_eq!(item.nutritional_facts.fat.value, 0.0);
        assert_eq!(item.serving_quantity.value, 100.0);
    }

    #[test]
    fn test_map_product_without_name_is_unknown() {
        let payload: ProductResponse = serde_json::from_value(json!({
            "status": 1,
            "product": {}
        }))
        .unwrap();

        let item = map_product("000000000002", payload.product.unwrap());

        assert_eq!(item.sub_category, "Unknown product");
        assert_eq!(item.food_type_id, 6);
    }
}
