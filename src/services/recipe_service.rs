// src/services/recipe_service.rs
//
// Recipe orchestration
//
// Ties the recipe catalog, the inventory store, and the matching rules
// together: what can be cooked right now, adding recipes to the catalog,
// and the single selected-meal slot.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{validate_recipe, Recipe};
use crate::error::{AppError, AppResult};
use crate::repositories::{InventoryStore, RecipeCatalog, SelectedMealSlot};
use crate::services::matching::MatchRules;

pub struct RecipeService {
    catalog: Arc<dyn RecipeCatalog>,
    inventory: Arc<dyn InventoryStore>,
    selected_meal: Arc<dyn SelectedMealSlot>,
    rules: MatchRules,
}

impl RecipeService {
    pub fn new(
        catalog: Arc<dyn RecipeCatalog>,
        inventory: Arc<dyn InventoryStore>,
        selected_meal: Arc<dyn SelectedMealSlot>,
    ) -> Self {
        Self {
            catalog,
            inventory,
            selected_meal,
            rules: MatchRules::default(),
        }
    }

    /// Distinct ingredient names currently in stock, sorted. Item names are
    /// trimmed and deduplicated; blank names are dropped.
    pub fn available_ingredients(&self) -> AppResult<Vec<String>> {
        let items = self.inventory.all_items()?;
        let names: BTreeSet<String> = items
            .into_iter()
            .map(|item| item.sub_category.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        Ok(names.into_iter().collect())
    }

    /// Recipes whose every ingredient is matched by something in stock.
    /// Catalog order is preserved and nothing is deduplicated.
    pub fn available_recipes(&self) -> AppResult<Vec<Recipe>> {
        let available = self.available_ingredients()?;
        let recipes = self.catalog.all_recipes()?;

        Ok(recipes
            .into_iter()
            .filter(|recipe| {
                let names: Vec<String> =
                    recipe.ingredients.iter().map(|i| i.name.clone()).collect();
                self.rules.can_make(&names, &available)
            })
            .collect())
    }

    /// Validate and append a recipe to the catalog.
    pub fn add_recipe(&self, recipe: &Recipe) -> AppResult<()> {
        validate_recipe(recipe)?;
        self.catalog.append_recipe(recipe)
    }

    /// Select a catalog recipe by id as the current meal.
    pub fn select_meal(&self, recipe_id: &str) -> AppResult<Recipe> {
        let recipe = self
            .catalog
            .all_recipes()?
            .into_iter()
            .find(|r| r.id == recipe_id)
            .ok_or(AppError::NotFound)?;
        self.selected_meal.select(&recipe)?;
        Ok(recipe)
    }

    pub fn selected_meal(&self) -> AppResult<Option<Recipe>> {
        self.selected_meal.selected()
    }

    pub fn clear_selected_meal(&self) -> AppResult<()> {
        self.selected_meal.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Database, Ingredient, InventoryItem};
    use crate::repositories::{InMemoryInventoryStore, MockRecipeCatalog, MockSelectedMealSlot};

    fn recipe_with(name: &str, ingredient_names: &[&str]) -> Recipe {
        let ingredients = ingredient_names
            .iter()
            .map(|n| Ingredient::new(*n, "1", "unit"))
            .collect();
        Recipe::new(name, ingredients)
    }

    fn inventory_with(names: &[&str]) -> Arc<InMemoryInventoryStore> {
        let items = names
            .iter()
            .enumerate()
            .map(|(i, n)| InventoryItem::new(format!("sn-{}", i), 1, *n))
            .collect();
        Arc::new(InMemoryInventoryStore::with_database(Database {
            food_types: vec![],
            inventory_items: items,
        }))
    }

    fn service(
        catalog: MockRecipeCatalog,
        inventory: Arc<InMemoryInventoryStore>,
    ) -> RecipeService {
        RecipeService::new(Arc::new(catalog), inventory, Arc::new(MockSelectedMealSlot::new()))
    }

    #[test]
    fn test_available_ingredients_dedupes_and_trims() {
        let inventory = inventory_with(&["  Rice ", "Rice", "Beans", "  "]);
        let service = service(MockRecipeCatalog::new(), inventory);

        let names = service.available_ingredients().unwrap();

        assert_eq!(names, vec!["Beans", "Rice"]);
    }

    #[test]
    fn test_available_recipes_keeps_only_makeable() {
        let mut catalog = MockRecipeCatalog::new();
        catalog.expect_all_recipes().returning(|| {
            Ok(vec![
                recipe_with("Fried Rice", &["rice", "egg"]),
                recipe_with("Beef Stew", &["beef", "potato"]),
                recipe_with("Rice Bowl", &["organic brown rice"]),
            ])
        });
        let inventory = inventory_with(&["White Rice", "Eggs"]);
        let service = service(catalog, inventory);

        let names: Vec<String> = service
            .available_recipes()
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();

        assert_eq!(names, vec!["Fried Rice", "Rice Bowl"]);
    }

    #[test]
    fn test_recipe_with_no_ingredients_is_always_available() {
        let mut catalog = MockRecipeCatalog::new();
        catalog
            .expect_all_recipes()
            .returning(|| Ok(vec![recipe_with("Glass of Water", &[])]));
        let service = service(catalog, Arc::new(InMemoryInventoryStore::new()));

        assert_eq!(service.available_recipes().unwrap().len(), 1);
    }

    #[test]
    fn test_add_recipe_validates_before_appending() {
        let mut catalog = MockRecipeCatalog::new();
        catalog.expect_append_recipe().never();
        let service = service(catalog, Arc::new(InMemoryInventoryStore::new()));

        let mut bad = recipe_with("", &["rice"]);
        bad.name = String::new();

        assert!(service.add_recipe(&bad).is_err());
    }

    #[test]
    fn test_add_recipe_appends_valid_recipe() {
        let mut catalog = MockRecipeCatalog::new();
        catalog
            .expect_append_recipe()
            .times(1)
            .returning(|_| Ok(()));
        let service = service(catalog, Arc::new(InMemoryInventoryStore::new()));

        service
            .add_recipe(&recipe_with("Fried Rice", &["rice"]))
            .unwrap();
    }

    #[test]
    fn test_select_meal_unknown_id_is_not_found() {
        let mut catalog = MockRecipeCatalog::new();
        catalog.expect_all_recipes().returning(|| Ok(vec![]));
        let service = service(catalog, Arc::new(InMemoryInventoryStore::new()));

        assert!(matches!(
            service.select_meal("missing").unwrap_err(),
            AppError::NotFound
        ));
    }

    #[test]
    fn test_select_meal_writes_the_slot() {
        let target = recipe_with("Fried Rice", &["rice"]);
        let target_id = target.id.clone();

        let mut catalog = MockRecipeCatalog::new();
        let returned = target.clone();
        catalog
            .expect_all_recipes()
            .returning(move || Ok(vec![returned.clone()]));

        let mut slot = MockSelectedMealSlot::new();
        slot.expect_select().times(1).returning(|_| Ok(()));

        let service = RecipeService::new(
            Arc::new(catalog),
            Arc::new(InMemoryInventoryStore::new()),
            Arc::new(slot),
        );

        let selected = service.select_meal(&target_id).unwrap();
        assert_eq!(selected.name, "Fried Rice");
    }
}
