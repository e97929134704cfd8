//! Tunable scoring and search rules.
//!
//! [`Rules::default`] carries the built-in policy. An optional YAML file can
//! override any section; sections left out of the file keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{Category, Severity, TermGroup};
use crate::ConfigError;

const BLOCKLIST: &[&str] = &[
    "junk",
    "spares",
    "broken",
    "repair",
    "parts only",
    "accessories only",
    "camera case lot",
    "camera cases lot",
    "camera bag lot",
    "camera bags lot",
];

const BRANDS: &[&str] = &[
    "nikon",
    "canon",
    "olympus",
    "pentax",
    "konica",
    "minolta",
    "sony",
    "panasonic",
    "fujifilm",
    "ricoh",
    "casio",
    "kodak",
    "polaroid",
    "leica",
    "hasselblad",
    "mamiya",
    "contax",
    "yashica",
    "zenit",
    "praktica",
    "chinon",
    "rollei",
    "agfa",
];

const CAMERA_KEYWORDS: &[&str] = &[
    "camera",
    "cameras",
    "compact",
    "digicam",
    "dslr",
    "slr",
    "tlr",
    "rangefinder",
    "film",
    "35mm",
    "instant",
    "camcorder",
];

const CAMERA_NOUNS: &[&str] = &["camera", "cameras", "camcorder", "camcorders"];

const COUNT_CONTAINERS: &[&str] = &["lot", "job lot", "joblot", "bundle", "box", "crate", "bag"];

const CLEARANCE_HINTS: &[&str] = &[
    "job lot",
    "joblot",
    "bundle",
    "collection",
    "mixed lot",
    "mixed",
    "house clearance",
    "loft find",
    "garage find",
    "estate",
    "charity",
    "vintage",
    "old",
    "retro",
];

const BIG_LOT_HINTS: &[&str] = &[
    "huge lot",
    "massive lot",
    "large lot",
    "big lot",
    "bulk",
    "box of",
    "crate of",
    "bag of",
    "bundle of",
];

const WORKING_PHRASES: &[&str] = &[
    "shutter working",
    "shutters working",
    "tested working",
    "fully working",
];

const WORD_NUMBERS: &[(&str, u32)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
    ("hundred", 100),
    ("hundreds", 100),
];

const TERM_GROUPS: &[&[&str]] = &[
    // Generic lots, UK wording
    &[
        "camera job lot",
        "cameras job lot",
        "joblot cameras",
        "job lot cameras",
        "camera lot",
        "cameras lot",
        "camera bundle",
        "camera bundles",
        "camera collection",
        "camera collections",
        "mixed camera lot",
        "mixed cameras",
        "house clearance cameras",
        "loft find cameras",
        "garage find cameras",
        "vintage camera lot",
        "old camera lot",
        "retro camera lot",
    ],
    // Digital / compact / digicam
    &[
        "digital camera lot",
        "digital cameras lot",
        "compact camera lot",
        "compact cameras lot",
        "digicam lot",
        "digicams lot",
        "point and shoot lot",
        "point and shoot camera lot",
        "pocket camera lot",
        "small camera lot",
        "bridge camera lot",
        "zoom camera lot",
        "early digital camera lot",
        "2000s digital camera lot",
        "vintage digital camera lot",
    ],
    // Film, 35mm and odd formats
    &[
        "film camera lot",
        "film cameras lot",
        "35mm camera lot",
        "35mm cameras lot",
        "slr film camera lot",
        "rangefinder camera lot",
        "tlr camera lot",
        "medium format camera lot",
        "6x6 camera lot",
        "instant camera lot",
        "polaroid camera lot",
        "vintage film camera lot",
        "old film cameras lot",
    ],
    // DSLR / SLR bodies
    &[
        "dslr camera lot",
        "dslr cameras lot",
        "slr camera lot",
        "slr cameras lot",
        "digital slr lot",
        "camera bodies lot",
        "camera body lot",
        "nikon dslr lot",
        "canon dslr lot",
        "pentax dslr lot",
    ],
    // Brand-led
    &[
        "nikon camera lot",
        "canon camera lot",
        "olympus camera lot",
        "pentax camera lot",
        "konica camera lot",
        "minolta camera lot",
        "fujifilm camera lot",
        "sony camera lot",
        "panasonic camera lot",
        "ricoh camera lot",
        "kodak camera lot",
        "casio camera lot",
        "polaroid lot cameras",
        "leica camera lot",
    ],
    // Digicam families
    &[
        "canon powershot lot",
        "nikon coolpix lot",
        "sony cybershot lot",
        "fujifilm finepix lot",
        "panasonic lumix lot",
        "olympus stylus lot",
        "olympus mju lot",
        "ricoh caplio lot",
        "kodak easyshare lot",
        "casio exilim lot",
    ],
    // Explicitly big lots
    &[
        "huge camera lot",
        "massive camera lot",
        "large camera lot",
        "big camera lot",
        "bulk cameras lot",
        "box of cameras",
        "crate of cameras",
        "bag of cameras",
        "bundle of cameras",
        "job lot of cameras",
    ],
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// A spelled-out number recognised before a camera noun.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordNumber {
    pub word: String,
    pub value: u32,
}

/// Extra points awarded once the estimated quantity reaches `min_quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityTier {
    pub min_quantity: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub camera_keyword: u32,
    pub brand: u32,
    pub clearance_hint: u32,
    pub big_lot_hint: u32,
    pub quantity_known: u32,
    pub verified_working: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            camera_keyword: 2,
            brand: 2,
            clearance_hint: 1,
            big_lot_hint: 2,
            quantity_known: 2,
            verified_working: 2,
        }
    }
}

/// Score thresholds for the alert display tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityTiers {
    pub very_good: u32,
    pub huge: u32,
}

impl Default for SeverityTiers {
    fn default() -> Self {
        Self {
            very_good: 8,
            huge: 12,
        }
    }
}

impl SeverityTiers {
    #[must_use]
    pub fn classify(&self, score: u32) -> Severity {
        if score >= self.huge {
            Severity::Huge
        } else if score >= self.very_good {
            Severity::VeryGood
        } else {
            Severity::Lot
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub blocklist: Vec<String>,
    pub brands: Vec<String>,
    pub camera_keywords: Vec<String>,
    /// Nouns a count must precede to be read as a quantity.
    pub camera_nouns: Vec<String>,
    /// Words that introduce a count, as in "box of 40".
    pub count_containers: Vec<String>,
    pub clearance_hints: Vec<String>,
    pub big_lot_hints: Vec<String>,
    pub working_phrases: Vec<String>,
    pub word_numbers: Vec<WordNumber>,
    pub weights: Weights,
    pub quantity_tiers: Vec<QuantityTier>,
    pub alert_threshold: u32,
    pub severity: SeverityTiers,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            blocklist: strings(BLOCKLIST),
            brands: strings(BRANDS),
            camera_keywords: strings(CAMERA_KEYWORDS),
            camera_nouns: strings(CAMERA_NOUNS),
            count_containers: strings(COUNT_CONTAINERS),
            clearance_hints: strings(CLEARANCE_HINTS),
            big_lot_hints: strings(BIG_LOT_HINTS),
            working_phrases: strings(WORKING_PHRASES),
            word_numbers: WORD_NUMBERS
                .iter()
                .map(|(word, value)| WordNumber {
                    word: (*word).to_string(),
                    value: *value,
                })
                .collect(),
            weights: Weights::default(),
            quantity_tiers: vec![
                QuantityTier {
                    min_quantity: 20,
                    points: 3,
                },
                QuantityTier {
                    min_quantity: 50,
                    points: 4,
                },
                QuantityTier {
                    min_quantity: 100,
                    points: 5,
                },
            ],
            alert_threshold: 3,
            severity: SeverityTiers::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRules {
    pub categories: Vec<Category>,
    pub term_groups: Vec<TermGroup>,
}

impl Default for SearchRules {
    fn default() -> Self {
        Self {
            categories: vec![
                Category {
                    id: 625,
                    name: "Cameras & Photography".to_string(),
                },
                Category {
                    id: 45089,
                    name: "Camera Mixed Lots".to_string(),
                },
            ],
            term_groups: TERM_GROUPS
                .iter()
                .map(|group| TermGroup(strings(group)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub scoring: ScoringRules,
    pub search: SearchRules,
}

impl Rules {
    /// Check the invariants the pipeline relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.categories.is_empty() {
            return Err(ConfigError::Validation(
                "at least one search category is required".to_string(),
            ));
        }
        if self.search.term_groups.is_empty() {
            return Err(ConfigError::Validation(
                "at least one term group is required".to_string(),
            ));
        }
        if let Some(idx) = self.search.term_groups.iter().position(TermGroup::is_empty) {
            return Err(ConfigError::Validation(format!(
                "term group {idx} has no search terms"
            )));
        }
        if self.scoring.camera_nouns.is_empty() {
            return Err(ConfigError::Validation(
                "camera_nouns must not be empty".to_string(),
            ));
        }
        let tiers = self.scoring.severity;
        if tiers.huge < tiers.very_good {
            return Err(ConfigError::Validation(format!(
                "severity tier huge ({}) must not be below very_good ({})",
                tiers.huge, tiers.very_good
            )));
        }
        Ok(())
    }
}

/// Load rules from a YAML file, falling back to defaults for omitted sections.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_rules(path: &Path) -> Result<Rules, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_rules(&content)
}

/// Parse rules from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text is not valid YAML or fails validation.
pub fn parse_rules(content: &str) -> Result<Rules, ConfigError> {
    let rules: Rules = serde_yaml::from_str(content).map_err(ConfigError::RulesFileParse)?;
    rules.validate()?;
    Ok(rules)
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
