use thiserror::Error;

/// Errors returned while delivering an alert.
///
/// HTTP errors are stripped of their request URL before being wrapped, since
/// the Telegram endpoint embeds the bot token in its path.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Telegram answered with a non-2xx status.
    #[error("Telegram returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("invalid Telegram API base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
