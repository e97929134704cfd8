//! Environment-driven loading of [`AppConfig`].

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_EBAY_BASE_URL: &str = "https://www.ebay.co.uk/sch/i.html";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; CameraLotUltra/UK/1.1)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default; only malformed values fail. Telegram
/// credentials are optional and blank values count as absent.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        match raw.parse::<usize>() {
            Ok(0) => Err(invalid(var, "must be greater than zero".to_string())),
            Ok(v) => Ok(v),
            Err(e) => Err(invalid(var, e.to_string())),
        }
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_flag(&raw).ok_or_else(|| invalid(var, format!("expected a boolean, got '{raw}'")))
    };

    let log_level = or_default("LOTWATCH_LOG_LEVEL", "info");
    let seen_path = PathBuf::from(or_default("LOTWATCH_SEEN_PATH", "seen.json"));
    let seen_capacity = parse_positive_usize("LOTWATCH_SEEN_CAP", "3000")?;
    let rules_path = optional("LOTWATCH_RULES_PATH").map(PathBuf::from);
    let ebay_base_url = or_default("LOTWATCH_EBAY_BASE_URL", DEFAULT_EBAY_BASE_URL);
    let buy_it_now_only = parse_bool("LOTWATCH_BUY_IT_NOW_ONLY", "true")?;
    let request_timeout_secs = parse_u64("LOTWATCH_REQUEST_TIMEOUT_SECS", "35")?;
    let user_agent = or_default("LOTWATCH_USER_AGENT", DEFAULT_USER_AGENT);
    let inter_request_delay_ms = parse_u64("LOTWATCH_INTER_REQUEST_DELAY_MS", "1200")?;
    let rotation_window_secs = parse_u64("LOTWATCH_ROTATION_WINDOW_SECS", "300")?;
    if rotation_window_secs == 0 {
        return Err(invalid(
            "LOTWATCH_ROTATION_WINDOW_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let max_alerts = parse_positive_usize("LOTWATCH_MAX_ALERTS", "7")?;
    let telegram_bot_token = optional("TELEGRAM_BOT_TOKEN");
    let telegram_chat_id = optional("TELEGRAM_CHAT_ID");

    Ok(AppConfig {
        log_level,
        seen_path,
        seen_capacity,
        rules_path,
        ebay_base_url,
        buy_it_now_only,
        request_timeout_secs,
        user_agent,
        inter_request_delay_ms,
        rotation_window_secs,
        max_alerts,
        telegram_bot_token,
        telegram_chat_id,
    })
}

/// Parse a boolean flag. Accepts `true/false`, `1/0`, `yes/no` (any case).
fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
