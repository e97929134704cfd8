//! Value types shared by the scorer, the pipeline and the I/O crates.

use serde::{Deserialize, Serialize};

/// A single search result as returned by a listing source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Stable identifier, unique per marketplace item.
    pub id: String,
    pub title: String,
    /// Price as displayed by the marketplace (e.g. `"£45.00"`).
    pub price: String,
    pub link: String,
}

/// A listing that cleared the alert threshold, with its quantity estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredListing {
    pub score: u32,
    pub listing: Listing,
    pub quantity: Option<u32>,
}

/// Marketplace category the search is restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

/// An ordered batch of search phrases rotated into use together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermGroup(pub Vec<String>);

impl TermGroup {
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One query to issue: a search term restricted to a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTarget {
    pub term: String,
    pub category: Category,
}

/// Builds the category-major cross product of `categories` × `group` terms.
#[must_use]
pub fn search_targets(categories: &[Category], group: &TermGroup) -> Vec<SearchTarget> {
    categories
        .iter()
        .flat_map(|category| {
            group.terms().iter().map(move |term| SearchTarget {
                term: term.clone(),
                category: category.clone(),
            })
        })
        .collect()
}

/// Display tier of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Huge,
    VeryGood,
    Lot,
}

impl Severity {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Severity::Huge => "🔴 HUGE LOT 🔴",
            Severity::VeryGood => "🟠 VERY GOOD LOT 🟠",
            Severity::Lot => "🟢 Lot",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Huge => write!(f, "huge"),
            Severity::VeryGood => write!(f, "very_good"),
            Severity::Lot => write!(f, "lot"),
        }
    }
}
