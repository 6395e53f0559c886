//! Derived views over a loaded collection.
//!
//! Everything here is a pure function of the ideas and the current filter, so
//! callers recompute on every render instead of keeping an index around.

use crate::model::{Category, Idea};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = crate::error::IdeaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        Category::from_str(s).map(CategoryFilter::Only)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaFilter {
    pub search: String,
    pub category: CategoryFilter,
    pub tags: Vec<String>,
}

impl IdeaFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Select the tag if it isn't selected yet, otherwise deselect it.
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.tags.iter().any(|t| t == tag) {
            self.tags.retain(|t| t != tag);
        } else {
            self.tags.push(tag.to_string());
        }
    }

    pub fn matches_search(&self, idea: &Idea) -> bool {
        let term = self.search.to_lowercase();
        idea.title.to_lowercase().contains(&term) || idea.description.to_lowercase().contains(&term)
    }

    pub fn matches_category(&self, idea: &Idea) -> bool {
        self.category.matches(idea.category)
    }

    /// Any shared tag is enough; no selected tags matches everything.
    pub fn matches_tags(&self, idea: &Idea) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|tag| idea.has_tag(tag))
    }

    pub fn matches(&self, idea: &Idea) -> bool {
        self.matches_search(idea) && self.matches_category(idea) && self.matches_tags(idea)
    }

    /// The matching ideas, in collection order.
    pub fn apply<'a>(&self, ideas: &'a [Idea]) -> Vec<&'a Idea> {
        ideas.iter().filter(|idea| self.matches(idea)).collect()
    }
}

/// Sorted, deduplicated union of every idea's tags.
pub fn available_tags(ideas: &[Idea]) -> Vec<String> {
    ideas
        .iter()
        .flat_map(|idea| idea.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Ideas per category over the full, unfiltered collection. Categories with
/// no ideas are absent.
pub fn category_counts(ideas: &[Idea]) -> BTreeMap<Category, usize> {
    let mut counts = BTreeMap::new();
    for idea in ideas {
        *counts.entry(idea.category).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::fixtures::{idea, sample_ideas};

    fn titles(ideas: &[&Idea]) -> Vec<String> {
        ideas.iter().map(|i| i.title.clone()).collect()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let ideas = sample_ideas();
        assert_eq!(IdeaFilter::new().apply(&ideas).len(), ideas.len());
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let ideas = sample_ideas();
        let by_title = IdeaFilter::new().with_search("rust cli");
        assert_eq!(titles(&by_title.apply(&ideas)), vec!["Rust CLI"]);

        // fixture descriptions are "About <title>"
        let by_description = IdeaFilter::new().with_search("ABOUT GARDEN");
        assert_eq!(titles(&by_description.apply(&ideas)), vec!["Garden plan"]);
    }

    #[test]
    fn category_filter_parses_all() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Work".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Work)
        );
        assert!("nope".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn tag_filter_matches_any_selected_tag() {
        let ideas = sample_ideas();
        let filter = IdeaFilter::new().with_tags(["planning", "rust"]);
        assert_eq!(
            titles(&filter.apply(&ideas)),
            vec!["Rust CLI", "Quarterly review", "Short story"]
        );
    }

    #[test]
    fn filters_commute() {
        let ideas = sample_ideas();
        let filter = IdeaFilter::new()
            .with_search("r")
            .with_category(CategoryFilter::Only(Category::Creative))
            .with_tags(["planning"]);

        let combined = filter.apply(&ideas);

        let orders: [[fn(&IdeaFilter, &Idea) -> bool; 3]; 3] = [
            [IdeaFilter::matches_search, IdeaFilter::matches_category, IdeaFilter::matches_tags],
            [IdeaFilter::matches_tags, IdeaFilter::matches_search, IdeaFilter::matches_category],
            [IdeaFilter::matches_category, IdeaFilter::matches_tags, IdeaFilter::matches_search],
        ];
        for order in orders {
            let mut remaining: Vec<&Idea> = ideas.iter().collect();
            for predicate in order {
                remaining.retain(|idea| predicate(&filter, idea));
            }
            assert_eq!(remaining, combined);
        }
        assert_eq!(titles(&combined), vec!["Short story"]);
    }

    #[test]
    fn toggle_tag_adds_then_removes() {
        let mut filter = IdeaFilter::new();
        filter.toggle_tag("rust");
        assert_eq!(filter.tags, vec!["rust"]);
        filter.toggle_tag("rust");
        assert!(filter.tags.is_empty());
    }

    #[test]
    fn available_tags_are_sorted_and_unique() {
        let ideas = sample_ideas();
        assert_eq!(
            available_tags(&ideas),
            vec!["cli", "outdoors", "planning", "rust", "writing"]
        );
    }

    #[test]
    fn category_counts_cover_the_full_list() {
        let mut ideas = sample_ideas();
        ideas.push(idea("Another tech idea", Category::Tech, &[]));
        let counts = category_counts(&ideas);
        assert_eq!(counts[&Category::Tech], 2);
        assert_eq!(counts[&Category::Business], 1);
        assert_eq!(counts.values().sum::<usize>(), ideas.len());
    }
}
