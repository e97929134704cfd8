//! Listing evaluation core for the camera-lot monitor.
//!
//! Scores marketplace titles, estimates lot sizes, rotates search terms over
//! time and remembers which listings have already been alerted on. Fetching
//! and notification are supplied by callers through [`ListingSource`] and
//! [`Notifier`].

pub mod app_config;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod quantity;
pub mod rotation;
pub mod rules;
pub mod scoring;
pub mod seen;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, SeenStoreError};
pub use pipeline::{
    format_alert, rank_alerts, ListingSource, Notifier, RunOrchestrator, RunReport, RunSettings,
};
pub use quantity::{normalize_title, QuantityExtractor, QuantityRule};
pub use rotation::{select_group, TermRotation};
pub use rules::{load_rules, parse_rules, Rules, ScoringRules, SearchRules, SeverityTiers};
pub use scoring::{RelevanceScorer, Verdict};
pub use seen::{JsonSeenFile, SeenPersistence, SeenStore};
pub use types::{
    search_targets, Category, Listing, ScoredListing, SearchTarget, Severity, TermGroup,
};
