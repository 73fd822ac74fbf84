// src/repositories/selected_meal.rs
//
// Selected meal slot
//
// A single-value mailbox: at most one recipe is "selected" at a time, and
// selecting a new one overwrites the previous selection. Backed by one JSON
// file holding the selected recipe.

use std::fs;
use std::path::PathBuf;

use crate::domain::Recipe;
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait SelectedMealSlot: Send + Sync {
    /// The currently selected recipe, if any.
    fn selected(&self) -> AppResult<Option<Recipe>>;

    /// Overwrite the slot with a new selection.
    fn select(&self, recipe: &Recipe) -> AppResult<()>;

    /// Empty the slot.
    fn clear(&self) -> AppResult<()>;
}

pub struct FileSelectedMealSlot {
    path: PathBuf,
}

impl FileSelectedMealSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SelectedMealSlot for FileSelectedMealSlot {
    fn selected(&self) -> AppResult<Option<Recipe>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&raw) {
            Ok(recipe) => Ok(Some(recipe)),
            Err(e) => {
                // A corrupt slot reads as empty rather than erroring, so the
                // next selection can repair it.
                log::warn!(
                    "Selected meal at {} is unreadable, treating as empty: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    fn select(&self, recipe: &Recipe) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(recipe)?)?;
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
