//! Item-count estimation from free-form listing titles.
//!
//! The extractor is an ordered table of [`QuantityRule`]s compiled from
//! [`ScoringRules`]. Rules run against a lowercased, whitespace-collapsed
//! title and the first rule that yields a positive count wins.

use regex::Regex;

use crate::rules::ScoringRules;
use crate::ConfigError;

/// Compound phrase tried after the word-number table.
const COMPOUND_HUNDRED: (&str, u32) = ("one hundred", 100);

/// Lowercases `title` and collapses every whitespace run to a single space.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Regex fragment matching `phrase` with any whitespace between its words.
pub(crate) fn phrase_pattern(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// Non-capturing alternation of `phrases`.
pub(crate) fn alternation(phrases: &[String]) -> String {
    let parts: Vec<String> = phrases
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| phrase_pattern(&p.to_lowercase()))
        .collect();
    format!("(?:{})", parts.join("|"))
}

/// One extraction rule. Each rule is independent and can be applied alone.
#[derive(Debug, Clone)]
pub enum QuantityRule {
    /// A 1–4 digit count before a camera noun: `"127 cameras"`, `"12 x camcorders"`.
    NounCount(Regex),
    /// A count introduced by a container word: `"job lot of 70"`, `"box of 40"`.
    ContainerOf(Regex),
    /// A spelled-out number before a camera noun: `"seventy cameras"`.
    WordNumber { pattern: Regex, value: u32 },
}

impl QuantityRule {
    /// Applies the rule to an already-normalized title.
    ///
    /// Returns the first positive count the rule finds. A literal `0` is not
    /// an estimate and is skipped.
    #[must_use]
    pub fn apply(&self, normalized: &str) -> Option<u32> {
        match self {
            QuantityRule::NounCount(re) | QuantityRule::ContainerOf(re) => re
                .captures_iter(normalized)
                .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
                .find(|n| *n > 0),
            QuantityRule::WordNumber { pattern, value } => {
                (*value > 0 && pattern.is_match(normalized)).then_some(*value)
            }
        }
    }
}

/// Estimates how many items a listing title offers.
#[derive(Debug, Clone)]
pub struct QuantityExtractor {
    rules: Vec<QuantityRule>,
}

impl QuantityExtractor {
    /// Compiles the rule table from `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] if a configured phrase produces an
    /// invalid pattern, or [`ConfigError::Validation`] when there are no
    /// camera nouns to anchor counts to.
    pub fn new(rules: &ScoringRules) -> Result<Self, ConfigError> {
        if rules.camera_nouns.iter().all(|n| n.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "camera_nouns must not be empty".to_string(),
            ));
        }
        let nouns = alternation(&rules.camera_nouns);

        let mut table = vec![QuantityRule::NounCount(Regex::new(&format!(
            r"\b(\d{{1,4}})\s*(?:x\s*)?{nouns}\b"
        ))?)];

        if rules.count_containers.iter().any(|c| !c.trim().is_empty()) {
            let containers = alternation(&rules.count_containers);
            table.push(QuantityRule::ContainerOf(Regex::new(&format!(
                r"\b{containers}\s+of\s+(\d{{1,4}})\b"
            ))?));
        }

        let words = rules
            .word_numbers
            .iter()
            .map(|wn| (wn.word.as_str(), wn.value))
            .chain(std::iter::once(COMPOUND_HUNDRED));
        for (word, value) in words {
            if word.trim().is_empty() {
                continue;
            }
            let pattern = Regex::new(&format!(
                r"\b{}\s+{nouns}\b",
                phrase_pattern(&word.to_lowercase())
            ))?;
            table.push(QuantityRule::WordNumber { pattern, value });
        }

        Ok(Self { rules: table })
    }

    /// The compiled rules in precedence order.
    #[must_use]
    pub fn rules(&self) -> &[QuantityRule] {
        &self.rules
    }

    /// Returns the estimated item count for `title`, or `None` when unknown.
    #[must_use]
    pub fn extract(&self, title: &str) -> Option<u32> {
        self.extract_normalized(&normalize_title(title))
    }

    pub(crate) fn extract_normalized(&self, normalized: &str) -> Option<u32> {
        self.rules.iter().find_map(|rule| rule.apply(normalized))
    }
}

#[cfg(test)]
#[path = "quantity_test.rs"]
mod tests;
