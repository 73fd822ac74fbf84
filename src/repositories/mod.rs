// src/repositories/mod.rs
//
// Persistence layer. Repositories are dumb data mappers: they load and
// store, and the services layer owns the behavior on top.

pub mod inventory_store;
pub mod recipe_catalog;
pub mod selected_meal;

pub use inventory_store::{InMemoryInventoryStore, InventoryStore, SqliteInventoryStore};
pub use recipe_catalog::{FileRecipeCatalog, RecipeCatalog};
pub use selected_meal::{FileSelectedMealSlot, SelectedMealSlot};

#[cfg(test)]
pub use recipe_catalog::MockRecipeCatalog;
#[cfg(test)]
pub use selected_meal::MockSelectedMealSlot;
