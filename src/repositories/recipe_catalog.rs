// src/repositories/recipe_catalog.rs
//
// Recipe catalog persistence
//
// The catalog is an append-only event log: one JSON recipe per line
// (NDJSON). Adding a recipe appends a line; reading replays the log.
// Malformed lines are skipped with a warning instead of failing the whole
// read, so one bad write never takes the catalog down. `compact` rewrites
// the file from the replayed state, dropping the skipped lines.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::domain::Recipe;
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait RecipeCatalog: Send + Sync {
    /// Replay the log into the current list of recipes, in append order.
    fn all_recipes(&self) -> AppResult<Vec<Recipe>>;

    /// Append one recipe to the log.
    fn append_recipe(&self, recipe: &Recipe) -> AppResult<()>;
}

/// File-backed catalog, one JSON object per line.
pub struct FileRecipeCatalog {
    path: PathBuf,
}

impl FileRecipeCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Rewrite the log file from the currently readable recipes, discarding
    /// any lines that failed to parse.
    pub fn compact(&self) -> AppResult<()> {
        let recipes = self.all_recipes()?;
        let mut out = String::with_capacity(recipes.len() * 256);
        for recipe in &recipes {
            out.push_str(&serde_json::to_string(recipe)?);
            out.push('\n');
        }
        fs::write(&self.path, out)?;
        Ok(())
    }
}

impl RecipeCatalog for FileRecipeCatalog {
    fn all_recipes(&self) -> AppResult<Vec<Recipe>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let mut recipes = Vec::new();
        for (line_number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Recipe>(&line) {
                Ok(recipe) => recipes.push(recipe),
                Err(e) => {
                    log::warn!(
                        "Skipping malformed recipe at {}:{}: {}",
                        self.path.display(),
                        line_number + 1,
                        e
                    );
                }
            }
        }

        Ok(recipes)
    }

    fn append_recipe(&self, recipe: &Recipe) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut line = serde_json::to_string(recipe)?;
        line.push('\n');
        file.write_all(line.as_bytes())?;

        Ok(())
    }
}
