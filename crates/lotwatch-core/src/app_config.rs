use std::path::PathBuf;
use std::time::Duration;

use crate::pipeline::RunSettings;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub seen_path: PathBuf,
    pub seen_capacity: usize,
    pub rules_path: Option<PathBuf>,
    pub ebay_base_url: String,
    pub buy_it_now_only: bool,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub inter_request_delay_ms: u64,
    pub rotation_window_secs: u64,
    pub max_alerts: usize,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl AppConfig {
    /// Pipeline settings derived from this configuration.
    #[must_use]
    pub fn run_settings(&self, dry_run: bool) -> RunSettings {
        RunSettings {
            max_alerts: self.max_alerts,
            throttle: Duration::from_millis(self.inter_request_delay_ms),
            rotation_window_secs: self.rotation_window_secs,
            seen_capacity: self.seen_capacity,
            dry_run,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("seen_path", &self.seen_path)
            .field("seen_capacity", &self.seen_capacity)
            .field("rules_path", &self.rules_path)
            .field("ebay_base_url", &self.ebay_base_url)
            .field("buy_it_now_only", &self.buy_it_now_only)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("rotation_window_secs", &self.rotation_window_secs)
            .field("max_alerts", &self.max_alerts)
            .field(
                "telegram_bot_token",
                &self.telegram_bot_token.as_ref().map(|_| "[redacted]"),
            )
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}
