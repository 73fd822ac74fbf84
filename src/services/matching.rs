// src/services/matching.rs
//
// Ingredient matching
//
// Heuristic text matching between recipe ingredient names and inventory
// item names. Both sides are normalized first (lowercase, punctuation
// stripped, descriptor words removed), then compared by substring
// containment with a word-overlap fallback.
//
// Deliberately fuzzy: "organic brown rice" matches "rice", "canned diced
// tomatoes" matches "tomato sauce". Tight enough in practice that "chicken
// breast" does not match "beef broth".

use regex::Regex;

use crate::domain::Recipe;

/// Tunable parts of the matching heuristic.
pub struct MatchRules {
    /// Characters stripped during normalization (anything that is not a
    /// lowercase letter, digit, or space).
    strip_pattern: Regex,

    /// Descriptor words removed during normalization; they describe
    /// preparation or marketing, not the ingredient itself.
    stopword_pattern: Regex,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            strip_pattern: Regex::new(r"[^a-z0-9 ]").unwrap(),
            stopword_pattern: Regex::new(
                r"\b(original|organic|fresh|dried|chopped|sliced|canned|ground)\b",
            )
            .unwrap(),
        }
    }
}

impl MatchRules {
    /// Canonicalize an ingredient name for comparison.
    ///
    /// Lowercases, strips everything but letters, digits, and spaces,
    /// removes descriptor words, and collapses runs of whitespace. Pure and
    /// deterministic. A name made only of punctuation and descriptors
    /// normalizes to the empty string.
    pub fn normalize(&self, name: &str) -> String {
        let lowered = name.to_lowercase();
        let stripped = self.strip_pattern.replace_all(&lowered, "");
        let without_stopwords = self.stopword_pattern.replace_all(&stripped, "");
        without_stopwords
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether a recipe ingredient is satisfied by an available ingredient.
    /// Symmetric on the containment check, word-overlap otherwise.
    pub fn matches(&self, recipe_ingredient: &str, available_ingredient: &str) -> bool {
        let recipe = self.normalize(recipe_ingredient);
        let available = self.normalize(available_ingredient);
        self.matches_normalized(&recipe, &available)
    }

    /// Containment-then-overlap comparison on already-normalized names.
    ///
    /// Either side containing the other is a match. Failing that, at least
    /// half of the recipe's words (and at least one) must overlap a word of
    /// the available name, where two words overlap if one contains the
    /// other.
    fn matches_normalized(&self, recipe: &str, available: &str) -> bool {
        if available.contains(recipe) || recipe.contains(available) {
            return true;
        }

        let recipe_words: Vec<&str> = recipe.split(' ').collect();
        let available_words: Vec<&str> = available.split(' ').collect();

        let matching = recipe_words
            .iter()
            .filter(|rw| {
                available_words
                    .iter()
                    .any(|aw| aw.contains(**rw) || rw.contains(aw))
            })
            .count();

        matching as f64 >= (recipe_words.len() as f64 / 2.0).max(1.0)
    }

    /// Whether every ingredient of a recipe is matched by some available
    /// ingredient. A recipe with no ingredients can always be made.
    pub fn can_make(&self, recipe_ingredients: &[String], available: &[String]) -> bool {
        let available_normalized: Vec<String> =
            available.iter().map(|a| self.normalize(a)).collect();

        recipe_ingredients.iter().all(|ingredient| {
            let recipe = self.normalize(ingredient);
            available_normalized
                .iter()
                .any(|avail| self.matches_normalized(&recipe, avail))
        })
    }

    /// Names of the recipes makeable from the available ingredients, in
    /// input order, duplicates preserved.
    pub fn available_recipe_names(&self, recipes: &[Recipe], available: &[String]) -> Vec<String> {
        recipes
            .iter()
            .filter(|recipe| {
                let names: Vec<String> =
                    recipe.ingredients.iter().map(|i| i.name.clone()).collect();
                self.can_make(&names, available)
            })
            .map(|recipe| recipe.name.clone())
            .collect()
    }
}
