//! Heuristic relevance scoring for camera-lot titles.
//!
//! A title is either hard-rejected by the blocklist or scored as the sum of
//! independent signals. Each signal is a small pure function over the
//! normalized title so it can be tested on its own.

use regex::Regex;

use crate::quantity::{alternation, normalize_title, QuantityExtractor};
use crate::rules::{QuantityTier, ScoringRules, SeverityTiers, Weights};
use crate::types::Severity;
use crate::ConfigError;

/// Outcome of scoring one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The title contains a blocklisted phrase; no scoring was performed.
    Rejected { phrase: String },
    Scored { score: u32, quantity: Option<u32> },
}

impl Verdict {
    /// The score, or `None` for a hard reject.
    #[must_use]
    pub fn score(&self) -> Option<u32> {
        match self {
            Verdict::Rejected { .. } => None,
            Verdict::Scored { score, .. } => Some(*score),
        }
    }
}

/// First blocklisted phrase contained in `normalized`.
pub(crate) fn blocked_phrase<'a>(normalized: &str, blocklist: &'a [String]) -> Option<&'a str> {
    blocklist
        .iter()
        .find(|phrase| normalized.contains(phrase.as_str()))
        .map(String::as_str)
}

/// Whether `normalized` contains any of `phrases` as a substring.
pub(crate) fn contains_any(normalized: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|p| normalized.contains(p.as_str()))
}

/// Number of distinct `phrases` present in `normalized`; repeats count once.
pub(crate) fn distinct_hits(normalized: &str, phrases: &[String]) -> u32 {
    let hits = phrases
        .iter()
        .filter(|p| normalized.contains(p.as_str()))
        .count();
    u32::try_from(hits).unwrap_or(u32::MAX)
}

/// Whether the whole-word pattern matches. An absent pattern never matches.
pub(crate) fn matches_word(pattern: Option<&Regex>, normalized: &str) -> bool {
    pattern.is_some_and(|re| re.is_match(normalized))
}

/// Points for a known quantity: the base award plus every tier reached.
pub(crate) fn quantity_points(quantity: Option<u32>, base: u32, tiers: &[QuantityTier]) -> u32 {
    let Some(qty) = quantity else {
        return 0;
    };
    tiers
        .iter()
        .filter(|tier| qty >= tier.min_quantity)
        .fold(base, |acc, tier| acc.saturating_add(tier.points))
}

/// Lowercased, trimmed, deduplicated phrase list (first occurrence kept).
fn phrase_list(phrases: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(phrases.len());
    for phrase in phrases {
        let phrase = normalize_title(phrase);
        if !phrase.is_empty() && !out.contains(&phrase) {
            out.push(phrase);
        }
    }
    out
}

fn word_pattern(words: &[String]) -> Result<Option<Regex>, regex::Error> {
    if words.iter().all(|w| w.trim().is_empty()) {
        return Ok(None);
    }
    Regex::new(&format!(r"\b{}\b", alternation(words))).map(Some)
}

/// Scores listing titles against a fixed [`ScoringRules`] set.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    blocklist: Vec<String>,
    brands: Vec<String>,
    clearance_hints: Vec<String>,
    big_lot_hints: Vec<String>,
    camera_keywords: Option<Regex>,
    working_phrases: Option<Regex>,
    quantity: QuantityExtractor,
    weights: Weights,
    quantity_tiers: Vec<QuantityTier>,
    alert_threshold: u32,
    severity: SeverityTiers,
}

impl RelevanceScorer {
    /// Builds a scorer, compiling the keyword and quantity patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any configured phrase yields an invalid pattern.
    pub fn new(rules: &ScoringRules) -> Result<Self, ConfigError> {
        Ok(Self {
            blocklist: phrase_list(&rules.blocklist),
            brands: phrase_list(&rules.brands),
            clearance_hints: phrase_list(&rules.clearance_hints),
            big_lot_hints: phrase_list(&rules.big_lot_hints),
            camera_keywords: word_pattern(&rules.camera_keywords)?,
            working_phrases: word_pattern(&rules.working_phrases)?,
            quantity: QuantityExtractor::new(rules)?,
            weights: rules.weights,
            quantity_tiers: rules.quantity_tiers.clone(),
            alert_threshold: rules.alert_threshold,
            severity: rules.severity,
        })
    }

    /// Scores a title.
    #[must_use]
    pub fn score(&self, title: &str) -> Verdict {
        let normalized = normalize_title(title);

        if let Some(phrase) = blocked_phrase(&normalized, &self.blocklist) {
            return Verdict::Rejected {
                phrase: phrase.to_string(),
            };
        }

        let w = &self.weights;
        let quantity = self.quantity.extract_normalized(&normalized);

        let clearance =
            distinct_hits(&normalized, &self.clearance_hints).saturating_mul(w.clearance_hint);
        let big_lot =
            distinct_hits(&normalized, &self.big_lot_hints).saturating_mul(w.big_lot_hint);

        let mut score = clearance
            .saturating_add(big_lot)
            .saturating_add(quantity_points(
                quantity,
                w.quantity_known,
                &self.quantity_tiers,
            ));
        if matches_word(self.camera_keywords.as_ref(), &normalized) {
            score = score.saturating_add(w.camera_keyword);
        }
        if contains_any(&normalized, &self.brands) {
            score = score.saturating_add(w.brand);
        }
        if matches_word(self.working_phrases.as_ref(), &normalized) {
            score = score.saturating_add(w.verified_working);
        }

        Verdict::Scored { score, quantity }
    }

    /// Whether a score is high enough to alert on.
    #[must_use]
    pub fn is_actionable(&self, score: u32) -> bool {
        score >= self.alert_threshold
    }

    #[must_use]
    pub fn severity(&self, score: u32) -> Severity {
        self.severity.classify(score)
    }

    #[must_use]
    pub fn quantity_extractor(&self) -> &QuantityExtractor {
        &self.quantity
    }
}

#[cfg(test)]
#[path = "scoring_test.rs"]
mod tests;
