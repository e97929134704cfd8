use std::collections::HashMap;
use std::env::VarError;
use std::time::Duration;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn assert_invalid(map: &HashMap<&str, &str>, expected_var: &str) {
    let result = build_app_config(lookup_from_map(map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == expected_var),
        "expected InvalidEnvVar({expected_var}), got: {result:?}"
    );
}

#[test]
fn parse_flag_accepts_common_spellings() {
    assert_eq!(parse_flag("true"), Some(true));
    assert_eq!(parse_flag("YES"), Some(true));
    assert_eq!(parse_flag("1"), Some(true));
    assert_eq!(parse_flag("False"), Some(false));
    assert_eq!(parse_flag("no"), Some(false));
    assert_eq!(parse_flag("0"), Some(false));
    assert_eq!(parse_flag("maybe"), None);
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.seen_path.to_str(), Some("seen.json"));
    assert_eq!(cfg.seen_capacity, 3000);
    assert!(cfg.rules_path.is_none());
    assert_eq!(cfg.ebay_base_url, DEFAULT_EBAY_BASE_URL);
    assert!(cfg.buy_it_now_only);
    assert_eq!(cfg.request_timeout_secs, 35);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.inter_request_delay_ms, 1200);
    assert_eq!(cfg.rotation_window_secs, 300);
    assert_eq!(cfg.max_alerts, 7);
    assert!(cfg.telegram_bot_token.is_none());
    assert!(cfg.telegram_chat_id.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("LOTWATCH_SEEN_PATH", "/var/lib/lotwatch/seen.json");
    map.insert("LOTWATCH_SEEN_CAP", "50");
    map.insert("LOTWATCH_RULES_PATH", "./config/rules.yaml");
    map.insert("LOTWATCH_BUY_IT_NOW_ONLY", "no");
    map.insert("LOTWATCH_INTER_REQUEST_DELAY_MS", "0");
    map.insert("LOTWATCH_MAX_ALERTS", "3");
    map.insert("TELEGRAM_BOT_TOKEN", "123:abc");
    map.insert("TELEGRAM_CHAT_ID", "42");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.seen_path.to_str(), Some("/var/lib/lotwatch/seen.json"));
    assert_eq!(cfg.seen_capacity, 50);
    assert_eq!(
        cfg.rules_path.as_deref().and_then(|p| p.to_str()),
        Some("./config/rules.yaml")
    );
    assert!(!cfg.buy_it_now_only);
    assert_eq!(cfg.inter_request_delay_ms, 0);
    assert_eq!(cfg.max_alerts, 3);
    assert_eq!(cfg.telegram_bot_token.as_deref(), Some("123:abc"));
    assert_eq!(cfg.telegram_chat_id.as_deref(), Some("42"));
}

#[test]
fn build_app_config_treats_blank_credentials_as_absent() {
    let mut map = HashMap::new();
    map.insert("TELEGRAM_BOT_TOKEN", "   ");
    map.insert("TELEGRAM_CHAT_ID", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.telegram_bot_token.is_none());
    assert!(cfg.telegram_chat_id.is_none());
}

#[test]
fn build_app_config_rejects_invalid_seen_cap() {
    let mut map = HashMap::new();
    map.insert("LOTWATCH_SEEN_CAP", "lots");
    assert_invalid(&map, "LOTWATCH_SEEN_CAP");
}

#[test]
fn build_app_config_rejects_zero_seen_cap() {
    let mut map = HashMap::new();
    map.insert("LOTWATCH_SEEN_CAP", "0");
    assert_invalid(&map, "LOTWATCH_SEEN_CAP");
}

#[test]
fn build_app_config_rejects_invalid_buy_it_now_flag() {
    let mut map = HashMap::new();
    map.insert("LOTWATCH_BUY_IT_NOW_ONLY", "sometimes");
    assert_invalid(&map, "LOTWATCH_BUY_IT_NOW_ONLY");
}

#[test]
fn build_app_config_rejects_zero_rotation_window() {
    let mut map = HashMap::new();
    map.insert("LOTWATCH_ROTATION_WINDOW_SECS", "0");
    assert_invalid(&map, "LOTWATCH_ROTATION_WINDOW_SECS");
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("LOTWATCH_REQUEST_TIMEOUT_SECS", "not-a-number");
    assert_invalid(&map, "LOTWATCH_REQUEST_TIMEOUT_SECS");
}

#[test]
fn build_app_config_rejects_zero_max_alerts() {
    let mut map = HashMap::new();
    map.insert("LOTWATCH_MAX_ALERTS", "0");
    assert_invalid(&map, "LOTWATCH_MAX_ALERTS");
}

#[test]
fn run_settings_mirror_config() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let settings = cfg.run_settings(true);
    assert_eq!(settings.max_alerts, 7);
    assert_eq!(settings.throttle, Duration::from_millis(1200));
    assert_eq!(settings.rotation_window_secs, 300);
    assert_eq!(settings.seen_capacity, 3000);
    assert!(settings.dry_run);
}

#[test]
fn debug_output_redacts_bot_token() {
    let mut map = HashMap::new();
    map.insert("TELEGRAM_BOT_TOKEN", "123:secret-token");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("secret-token"), "token leaked: {rendered}");
    assert!(rendered.contains("[redacted]"));
}
