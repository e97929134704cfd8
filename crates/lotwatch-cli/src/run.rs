//! Command handlers for the CLI.
//!
//! Only configuration problems are returned as errors. Once a run starts,
//! fetch and delivery failures are logged by the orchestrator and the run
//! still completes.

use std::fmt::Write as _;

use lotwatch_core::{
    load_rules, AppConfig, JsonSeenFile, RelevanceScorer, Rules, RunOrchestrator, RunReport,
    TermRotation, Verdict,
};
use lotwatch_notify::AlertChannel;
use lotwatch_scraper::EbayClient;

/// The rules file named in the config, or the built-in rules.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub(crate) fn load_rules_for(config: &AppConfig) -> anyhow::Result<Rules> {
    match &config.rules_path {
        Some(path) => {
            let rules = load_rules(path)?;
            tracing::debug!(path = %path.display(), "loaded rules file");
            Ok(rules)
        }
        None => Ok(Rules::default()),
    }
}

/// Wires the eBay client, alert channel and seen file together and runs one
/// monitoring pass at `now_secs`.
///
/// # Errors
///
/// Returns an error if the rules are invalid or a client cannot be built.
pub(crate) async fn run_monitor(
    config: &AppConfig,
    rules: &Rules,
    dry_run: bool,
    now_secs: i64,
) -> anyhow::Result<RunReport> {
    let orchestrator = RunOrchestrator::new(rules, config.run_settings(dry_run))?;

    let client = EbayClient::new(
        &config.ebay_base_url,
        config.request_timeout_secs,
        &config.user_agent,
        config.buy_it_now_only,
    )
    .map_err(|e| anyhow::anyhow!("failed to build eBay client: {e}"))?;

    let channel = AlertChannel::from_credentials(
        config.telegram_bot_token.as_deref(),
        config.telegram_chat_id.as_deref(),
    )
    .map_err(|e| anyhow::anyhow!("failed to build alert channel: {e}"))?;

    let seen_file = JsonSeenFile::new(&config.seen_path);

    Ok(orchestrator
        .run_once(&client, &channel, &seen_file, now_secs)
        .await)
}

pub(crate) fn describe_verdict(scorer: &RelevanceScorer, title: &str) -> String {
    match scorer.score(title) {
        Verdict::Rejected { phrase } => format!("rejected: blocklisted phrase \"{phrase}\""),
        Verdict::Scored { score, quantity } => {
            let qty = quantity.map_or_else(|| "unknown".to_string(), |q| q.to_string());
            let alert = if scorer.is_actionable(score) {
                scorer.severity(score).to_string()
            } else {
                "below threshold".to_string()
            };
            format!("score: {score}\nquantity: {qty}\nalert: {alert}")
        }
    }
}

pub(crate) fn describe_groups(rotation: &TermRotation, now_secs: i64) -> String {
    let active = rotation.active(now_secs).map(|(idx, _)| idx);
    let mut out = String::new();
    for (idx, group) in rotation.groups().iter().enumerate() {
        let marker = if active == Some(idx) { '*' } else { ' ' };
        let _ = writeln!(out, "{marker} G{idx}: {}", group.terms().join(", "));
    }
    let _ = writeln!(
        out,
        "window: {}s, active: {}",
        rotation.window_secs(),
        active.map_or_else(|| "none".to_string(), |idx| format!("G{idx}"))
    );
    out
}
