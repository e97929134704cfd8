//! Telegram Bot API `sendMessage` client.

use std::time::Duration;

use lotwatch_core::Notifier;
use reqwest::{Client, Url};
use serde::Serialize;

use crate::error::NotifyError;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Timeout for a single `sendMessage` call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Response bodies longer than this are cut in error messages.
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Sends plain-text messages to one chat through a bot.
///
/// Use [`TelegramNotifier::new`] for production or
/// [`TelegramNotifier::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    token: String,
    chat_id: String,
    api_base: String,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("token", &"[redacted]")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl TelegramNotifier {
    /// Creates a notifier for the public Telegram API.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, chat_id: &str, timeout_secs: u64) -> Result<Self, NotifyError> {
        Self::with_base_url(token, chat_id, timeout_secs, DEFAULT_API_BASE)
    }

    /// Creates a notifier with a custom API base (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::InvalidBaseUrl`] if `api_base` is not a valid
    /// URL, or [`NotifyError::Http`] if the client cannot be constructed.
    pub fn with_base_url(
        token: &str,
        chat_id: &str,
        timeout_secs: u64,
        api_base: &str,
    ) -> Result<Self, NotifyError> {
        Url::parse(api_base).map_err(|e| NotifyError::InvalidBaseUrl {
            url: api_base.to_owned(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(NotifyError::Http)?;

        Ok(Self {
            client,
            token: token.to_owned(),
            chat_id: chat_id.to_owned(),
            api_base: api_base.trim_end_matches('/').to_owned(),
        })
    }

    #[must_use]
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }

    /// Posts `text` to the configured chat.
    ///
    /// # Errors
    ///
    /// - [`NotifyError::UnexpectedStatus`] for any non-2xx status, with the
    ///   (truncated) response body.
    /// - [`NotifyError::Http`] on network or timeout failure. The request
    ///   URL is removed from the error so the token is never logged.
    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
        };
        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::UnexpectedStatus {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }
        Ok(())
    }
}

impl Notifier for TelegramNotifier {
    type Error = NotifyError;

    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        self.send_message(message).await
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_token() {
        let notifier = TelegramNotifier::new("123:SECRET", "42", 5).unwrap();
        let rendered = format!("{notifier:?}");
        assert!(!rendered.contains("SECRET"), "token leaked: {rendered}");
        assert!(rendered.contains("[redacted]"));
        assert!(rendered.contains("42"));
    }

    #[test]
    fn endpoint_embeds_token_once() {
        let notifier =
            TelegramNotifier::with_base_url("123:abc", "42", 5, "http://localhost:1234/").unwrap();
        assert_eq!(
            notifier.endpoint(),
            "http://localhost:1234/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = TelegramNotifier::with_base_url("t", "c", 5, "not a url").unwrap_err();
        assert!(matches!(err, NotifyError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }
}
