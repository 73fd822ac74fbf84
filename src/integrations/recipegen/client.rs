// src/integrations/recipegen/client.rs
//
// Generative recipe client
//
// Talks to an OpenAI-compatible chat completions endpoint and asks for a
// recipe, as JSON, built from the ingredients currently in stock. The model
// output is untrusted: it is parsed, given a fresh id, and validated before
// anything downstream sees it.

use chrono::Utc;
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::domain::{validate_recipe, Recipe};
use crate::error::{AppError, AppResult};

const SYSTEM_PROMPT: &str = "You are a recipe generator for a food bank kitchen. \
Respond with a single JSON object with the fields: name, cuisine, ingredients \
(array of {name, quantity, unit}), prepTime, cookTime, instructions (array of \
strings), servings, equipment (array of strings), difficulty (Easy, Medium or \
Hard) and author. Use only the ingredients provided.";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

pub struct RecipeGenClient {
    base_url: String,
    api_key: String,
    model: String,
    http_client: Client,
}

impl RecipeGenClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url("https://api.openai.com/v1", api_key, "gpt-4o-mini")
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            http_client,
        }
    }

    /// Generate a recipe from a free-text request and the available
    /// ingredient names.
    pub async fn generate(&self, prompt: &str, available_ingredients: &[String]) -> AppResult<Recipe> {
        if available_ingredients.is_empty() {
            return Err(AppError::Other(
                "Cannot generate a recipe from an empty inventory".to_string(),
            ));
        }

        let user_prompt = format!(
            "{}\n\nAvailable ingredients: {}",
            prompt.trim(),
            available_ingredients.join(", ")
        );

        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": user_prompt}
            ],
            "response_format": {"type": "json_object"}
        });

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| AppError::Other("Model response had no choices".to_string()))?;

        parse_generated_recipe(content)
    }
}

/// Parse model output into a validated recipe with a fresh generated id.
fn parse_generated_recipe(content: &str) -> AppResult<Recipe> {
    let mut doc: Value = serde_json::from_str(content)
        .map_err(|e| AppError::Other(format!("Model did not return valid JSON: {}", e)))?;

    // Models invent ids or omit them; either way the catalog assigns one.
    if let Some(obj) = doc.as_object_mut() {
        obj.insert(
            "id".to_string(),
            json!(format!("ai-{}", Utc::now().timestamp_millis())),
        );
    }

    let recipe: Recipe = serde_json::from_value(doc)
        .map_err(|e| AppError::Other(format!("Generated recipe has the wrong shape: {}", e)))?;
    validate_recipe(&recipe)?;
    Ok(recipe)
}
