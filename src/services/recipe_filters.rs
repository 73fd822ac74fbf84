// src/services/recipe_filters.rs
//
// Recipe attribute filters
//
// Prep and cook times are free-form strings ("1 hour 30 minutes", "45
// minutes"). `parse_minutes` folds them down to a minute count so recipes
// can be filtered by duration; the filters themselves are thin wrappers
// over `retain`-style iteration that keep input order.

use std::collections::HashSet;

use regex::Regex;

use crate::domain::Recipe;

/// Patterns for pulling numbers out of free-form duration strings.
pub struct TimeRules {
    hours_pattern: Regex,
    minutes_pattern: Regex,
    integer_pattern: Regex,
}

impl Default for TimeRules {
    fn default() -> Self {
        Self {
            hours_pattern: Regex::new(r"(\d+)\s*(?:hour|hr)").unwrap(),
            minutes_pattern: Regex::new(r"(\d+)\s*(?:minute|min)").unwrap(),
            integer_pattern: Regex::new(r"^\d+$").unwrap(),
        }
    }
}

impl TimeRules {
    /// Parse a free-form duration string to total minutes.
    ///
    /// Unparsable input degrades to 0, which reads as "no time required".
    /// Any string whose trimmed form starts with '0' is taken as zero
    /// outright, so "0 to prep, 45 minutes to cook" is 0, not 45.
    pub fn parse_minutes(&self, time: &str) -> u32 {
        let trimmed = time.trim();
        if trimmed.is_empty() || trimmed.starts_with('0') {
            return 0;
        }

        let lowered = trimmed.to_lowercase();

        if lowered.contains("hour") || lowered.contains("hr") {
            let hours = self
                .hours_pattern
                .captures(&lowered)
                .and_then(|c| c[1].parse::<u32>().ok())
                .unwrap_or(0);
            let minutes = self
                .minutes_pattern
                .captures(&lowered)
                .and_then(|c| c[1].parse::<u32>().ok())
                .unwrap_or(0);
            // Saturate: an absurd hour count clamps instead of overflowing.
            return hours.saturating_mul(60).saturating_add(minutes);
        }

        if lowered.contains("minute") || lowered.contains("min") {
            return self
                .minutes_pattern
                .captures(&lowered)
                .and_then(|c| c[1].parse::<u32>().ok())
                .unwrap_or(0);
        }

        // A bare integer and nothing else ("25"); anything else is 0.
        self.integer_pattern
            .find(&lowered)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    }
}

/// Keep recipes whose difficulty is in the given set, by exact string
/// membership. An empty set keeps nothing.
pub fn filter_by_difficulty(recipes: Vec<Recipe>, difficulties: &[&str]) -> Vec<Recipe> {
    let wanted: HashSet<&str> = difficulties.iter().copied().collect();
    recipes
        .into_iter()
        .filter(|r| wanted.contains(r.difficulty.as_str()))
        .collect()
}

/// Keep recipes whose cook time is at most `max_minutes`.
pub fn filter_by_max_cook_time(rules: &TimeRules, recipes: Vec<Recipe>, max_minutes: u32) -> Vec<Recipe> {
    recipes
        .into_iter()
        .filter(|r| rules.parse_minutes(&r.cook_time) <= max_minutes)
        .collect()
}

/// Keep recipes whose prep time is at most `max_minutes`.
pub fn filter_by_max_prep_time(rules: &TimeRules, recipes: Vec<Recipe>, max_minutes: u32) -> Vec<Recipe> {
    recipes
        .into_iter()
        .filter(|r| rules.parse_minutes(&r.prep_time) <= max_minutes)
        .collect()
}

/// Keep recipes whose cook time is strictly longer than `minutes`.
pub fn filter_cook_time_longer_than(rules: &TimeRules, recipes: Vec<Recipe>, minutes: u32) -> Vec<Recipe> {
    recipes
        .into_iter()
        .filter(|r| rules.parse_minutes(&r.cook_time) > minutes)
        .collect()
}

/// Keep recipes whose prep time is strictly longer than `minutes`.
pub fn filter_prep_time_longer_than(rules: &TimeRules, recipes: Vec<Recipe>, minutes: u32) -> Vec<Recipe> {
    recipes
        .into_iter()
        .filter(|r| rules.parse_minutes(&r.prep_time) > minutes)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Ingredient;

    fn rules() -> TimeRules {
        TimeRules::default()
    }

    fn recipe(name: &str, prep: &str, cook: &str, difficulty: &str) -> Recipe {
        let mut r = Recipe::new(name, vec![Ingredient::new("rice", "1", "cup")]);
        r.prep_time = prep.to_string();
        r.cook_time = cook.to_string();
        r.difficulty = difficulty.to_string();
        r
    }

    #[test]
    fn test_parse_minutes_known_forms() {
        let r = rules();
        assert_eq!(r.parse_minutes("1 hour 30 minutes"), 90);
        assert_eq!(r.parse_minutes("45 minutes"), 45);
        assert_eq!(r.parse_minutes("2 hours"), 120);
        assert_eq!(r.parse_minutes("1 hr 15 min"), 75);
        assert_eq!(r.parse_minutes("25"), 25);
    }

    #[test]
    fn test_parse_minutes_zero_and_empty() {
        let r = rules();
        assert_eq!(r.parse_minutes("0 minutes"), 0);
        assert_eq!(r.parse_minutes(""), 0);
        assert_eq!(r.parse_minutes("   "), 0);
        assert_eq!(r.parse_minutes("a while"), 0);
    }

    #[test]
    fn test_parse_minutes_leading_zero_wins() {
        // The leading-zero rule applies before any unit parsing.
        assert_eq!(rules().parse_minutes("0 to prep, 45 minutes to cook"), 0);
    }

    #[test]
    fn test_parse_minutes_saturates_on_absurd_hours() {
        let r = rules();
        assert_eq!(r.parse_minutes("80000000 hours"), u32::MAX);
        assert_eq!(r.parse_minutes("4294967295 hours 59 minutes"), u32::MAX);
        // An hour count too large for the integer type degrades to 0 hours.
        assert_eq!(r.parse_minutes("99999999999 hours 30 minutes"), 30);
    }

    #[test]
    fn test_parse_minutes_bare_integer_must_be_the_whole_string() {
        let r = rules();
        assert_eq!(r.parse_minutes("25 apples"), 0);
        assert_eq!(r.parse_minutes("25-ish"), 0);
        assert_eq!(r.parse_minutes(" 25 "), 25);
    }

    #[test]
    fn test_parse_minutes_case_insensitive() {
        let r = rules();
        assert_eq!(r.parse_minutes("1 Hour 30 Minutes"), 90);
        assert_eq!(r.parse_minutes("45 MINUTES"), 45);
    }

    #[test]
    fn test_filter_by_difficulty_exact_membership() {
        let recipes = vec![
            recipe("a", "", "", "Easy"),
            recipe("b", "", "", "Medium"),
            recipe("c", "", "", "Hard"),
        ];

        let filtered = filter_by_difficulty(recipes.clone(), &["Easy", "Hard"]);
        let names: Vec<&str> = filtered.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);

        // Membership is exact: casing matters and the empty set keeps nothing.
        assert!(filter_by_difficulty(recipes.clone(), &["easy"]).is_empty());
        assert!(filter_by_difficulty(recipes, &[]).is_empty());
    }

    #[test]
    fn test_max_time_filters_are_inclusive() {
        let r = rules();
        let recipes = vec![
            recipe("quick", "10 minutes", "30 minutes", "Easy"),
            recipe("slow", "20 minutes", "2 hours", "Easy"),
        ];

        let by_cook = filter_by_max_cook_time(&r, recipes.clone(), 30);
        assert_eq!(by_cook.len(), 1);
        assert_eq!(by_cook[0].name, "quick");

        let by_prep = filter_by_max_prep_time(&r, recipes, 20);
        assert_eq!(by_prep.len(), 2);
    }

    #[test]
    fn test_longer_than_filters_are_strict() {
        let r = rules();
        let recipes = vec![
            recipe("quick", "10 minutes", "30 minutes", "Easy"),
            recipe("slow", "20 minutes", "2 hours", "Easy"),
        ];

        let by_cook = filter_cook_time_longer_than(&r, recipes.clone(), 30);
        assert_eq!(by_cook.len(), 1);
        assert_eq!(by_cook[0].name, "slow");

        let by_prep = filter_prep_time_longer_than(&r, recipes, 20);
        assert!(by_prep.is_empty());
    }

    #[test]
    fn test_filters_preserve_order() {
        let r = rules();
        let recipes = vec![
            recipe("c", "5 minutes", "5 minutes", "Easy"),
            recipe("a", "5 minutes", "5 minutes", "Easy"),
            recipe("b", "5 minutes", "5 minutes", "Easy"),
        ];

        let filtered = filter_by_max_cook_time(&r, recipes, 60);
        let names: Vec<&str> = filtered.iter().map(|x| x.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
