//! One monitoring run: rotate, fetch, dedup, score, rank, notify, persist.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::rules::Rules;
use crate::rotation::TermRotation;
use crate::scoring::{RelevanceScorer, Verdict};
use crate::seen::{SeenPersistence, SeenStore};
use crate::types::{search_targets, Category, Listing, ScoredListing, SearchTarget, Severity};
use crate::ConfigError;

/// Produces candidate listings for a search target.
pub trait ListingSource {
    type Error: Display;

    fn fetch_listings(
        &self,
        target: &SearchTarget,
    ) -> impl Future<Output = Result<Vec<Listing>, Self::Error>> + Send;
}

/// Delivers a formatted alert message.
pub trait Notifier {
    type Error: Display;

    fn send(&self, message: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub max_alerts: usize,
    /// Pause between successive search targets.
    pub throttle: Duration,
    pub rotation_window_secs: u64,
    pub seen_capacity: usize,
    /// Log alerts instead of sending them and leave the seen-state untouched.
    pub dry_run: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            max_alerts: 7,
            throttle: Duration::from_millis(1200),
            rotation_window_secs: 300,
            seen_capacity: 3000,
            dry_run: false,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub group_index: Option<usize>,
    pub targets: usize,
    pub failed_targets: usize,
    pub listings_fetched: usize,
    pub new_listings: usize,
    pub rejected: usize,
    pub alerts_sent: usize,
    pub notify_failures: usize,
    pub seen_count: usize,
    pub persisted: bool,
}

/// Renders the alert text for one ranked listing.
#[must_use]
pub fn format_alert(group_index: usize, severity: Severity, scored: &ScoredListing) -> String {
    let qty = scored
        .quantity
        .map_or_else(|| "unknown".to_string(), |q| q.to_string());
    format!(
        "{label}\nGroup: {group_index}\nScore: {score}\nQty: {qty}\n{title}\n{price}\n{link}",
        label = severity.label(),
        score = scored.score,
        title = scored.listing.title,
        price = scored.listing.price,
        link = scored.listing.link,
    )
}

/// Sorts by score, highest first, keeping encounter order for ties, and
/// keeps at most `max_alerts`.
pub fn rank_alerts(alerts: &mut Vec<ScoredListing>, max_alerts: usize) {
    alerts.sort_by(|a, b| b.score.cmp(&a.score));
    alerts.truncate(max_alerts);
}

/// Composes scoring, rotation and the seen-set around the I/O collaborators.
#[derive(Debug, Clone)]
pub struct RunOrchestrator {
    scorer: RelevanceScorer,
    rotation: TermRotation,
    categories: Vec<Category>,
    settings: RunSettings,
}

impl RunOrchestrator {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the rules are invalid or their patterns
    /// fail to compile.
    pub fn new(rules: &Rules, settings: RunSettings) -> Result<Self, ConfigError> {
        rules.validate()?;
        Ok(Self {
            scorer: RelevanceScorer::new(&rules.scoring)?,
            rotation: TermRotation::new(
                settings.rotation_window_secs,
                rules.search.term_groups.clone(),
            ),
            categories: rules.search.categories.clone(),
            settings,
        })
    }

    #[must_use]
    pub fn scorer(&self) -> &RelevanceScorer {
        &self.scorer
    }

    #[must_use]
    pub fn rotation(&self) -> &TermRotation {
        &self.rotation
    }

    #[must_use]
    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Search targets for the group active at `now_secs`.
    #[must_use]
    pub fn targets_at(&self, now_secs: i64) -> Option<(usize, Vec<SearchTarget>)> {
        self.rotation
            .active(now_secs)
            .map(|(idx, group)| (idx, search_targets(&self.categories, group)))
    }

    /// Executes one run.
    ///
    /// Per-target fetch failures and notification failures are logged and
    /// counted but never abort the run. The seen-state is loaded once at the
    /// start and saved once at the end, even when targets failed; a failed
    /// save is reported through [`RunReport::persisted`].
    pub async fn run_once<S, N, P>(
        &self,
        source: &S,
        notifier: &N,
        persistence: &P,
        now_secs: i64,
    ) -> RunReport
    where
        S: ListingSource,
        N: Notifier,
        P: SeenPersistence + ?Sized,
    {
        let mut seen = SeenStore::load_from(persistence, self.settings.seen_capacity);
        let mut report = RunReport::default();

        let (group_index, targets) = self.targets_at(now_secs).unwrap_or_else(|| {
            tracing::error!("no term group could be selected; nothing to search");
            (0, Vec::new())
        });
        if !targets.is_empty() {
            report.group_index = Some(group_index);
        }
        report.targets = targets.len();
        tracing::info!(
            group = group_index,
            targets = targets.len(),
            dry_run = self.settings.dry_run,
            "starting run"
        );

        let mut alerts = Vec::new();
        for (i, target) in targets.iter().enumerate() {
            if i > 0 && !self.settings.throttle.is_zero() {
                tokio::time::sleep(self.settings.throttle).await;
            }

            let listings = match source.fetch_listings(target).await {
                Ok(listings) => listings,
                Err(e) => {
                    tracing::warn!(
                        term = %target.term,
                        category = target.category.id,
                        error = %e,
                        "fetch failed; skipping target"
                    );
                    report.failed_targets += 1;
                    continue;
                }
            };
            report.listings_fetched += listings.len();
            self.evaluate(listings, &mut seen, &mut alerts, &mut report);
        }

        rank_alerts(&mut alerts, self.settings.max_alerts);

        for scored in &alerts {
            let severity = self.scorer.severity(scored.score);
            let message = format_alert(group_index, severity, scored);
            if self.settings.dry_run {
                tracing::info!(score = scored.score, %severity, "dry-run alert:\n{message}");
                report.alerts_sent += 1;
                continue;
            }
            match notifier.send(&message).await {
                Ok(()) => report.alerts_sent += 1,
                Err(e) => {
                    tracing::warn!(
                        id = %scored.listing.id,
                        error = %e,
                        "notification failed"
                    );
                    report.notify_failures += 1;
                }
            }
        }

        seen.trim();
        report.seen_count = seen.len();
        if self.settings.dry_run {
            tracing::info!("dry-run: seen-state not saved");
        } else {
            match seen.save_to(persistence) {
                Ok(()) => report.persisted = true,
                Err(e) => tracing::error!(error = %e, "failed to save seen-state"),
            }
        }

        tracing::info!(
            group = group_index,
            targets = report.targets,
            failed_targets = report.failed_targets,
            new_listings = report.new_listings,
            alerts = report.alerts_sent,
            seen = report.seen_count,
            "run complete"
        );
        report
    }

    /// Marks unseen listings as seen and queues those that clear the threshold.
    fn evaluate(
        &self,
        listings: Vec<Listing>,
        seen: &mut SeenStore,
        alerts: &mut Vec<ScoredListing>,
        report: &mut RunReport,
    ) {
        for listing in listings {
            if !seen.add(listing.id.as_str()) {
                continue;
            }
            report.new_listings += 1;

            match self.scorer.score(&listing.title) {
                Verdict::Rejected { phrase } => {
                    tracing::debug!(title = %listing.title, %phrase, "hard reject");
                    report.rejected += 1;
                }
                Verdict::Scored { score, quantity } if self.scorer.is_actionable(score) => {
                    tracing::debug!(title = %listing.title, score, "queued");
                    alerts.push(ScoredListing {
                        score,
                        listing,
                        quantity,
                    });
                }
                Verdict::Scored { score, .. } => {
                    tracing::debug!(title = %listing.title, score, "below threshold");
                }
            }
        }
    }
}
