use lotwatch_core::Notifier;

use crate::error::NotifyError;
use crate::telegram::{TelegramNotifier, DEFAULT_TIMEOUT_SECS};

/// Where alerts go for this run.
#[derive(Debug, Clone)]
pub enum AlertChannel {
    Telegram(TelegramNotifier),
    /// No credentials: alerts are written to the log and count as delivered.
    LogOnly,
}

impl AlertChannel {
    /// Telegram when both token and chat id are present and non-blank,
    /// otherwise [`AlertChannel::LogOnly`].
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the HTTP client cannot be constructed.
    pub fn from_credentials(
        token: Option<&str>,
        chat_id: Option<&str>,
    ) -> Result<Self, NotifyError> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }
        match (present(token), present(chat_id)) {
            (Some(token), Some(chat_id)) => Ok(Self::Telegram(TelegramNotifier::new(
                token,
                chat_id,
                DEFAULT_TIMEOUT_SECS,
            )?)),
            _ => {
                tracing::warn!("Telegram credentials missing; alerts will only be logged");
                Ok(Self::LogOnly)
            }
        }
    }

    #[must_use]
    pub fn is_log_only(&self) -> bool {
        matches!(self, Self::LogOnly)
    }
}

impl Notifier for AlertChannel {
    type Error = NotifyError;

    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        match self {
            Self::Telegram(telegram) => telegram.send_message(message).await,
            Self::LogOnly => {
                tracing::info!("Telegram credentials missing; alert:\n{message}");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_credentials_select_telegram() {
        let channel = AlertChannel::from_credentials(Some("123:abc"), Some("42")).unwrap();
        match channel {
            AlertChannel::Telegram(t) => assert_eq!(t.chat_id(), "42"),
            AlertChannel::LogOnly => panic!("expected Telegram channel"),
        }
    }

    #[test]
    fn missing_or_blank_credentials_fall_back_to_log_only() {
        for (token, chat) in [
            (None, Some("42")),
            (Some("123:abc"), None),
            (None, None),
            (Some("  "), Some("42")),
            (Some("123:abc"), Some("")),
        ] {
            let channel = AlertChannel::from_credentials(token, chat).unwrap();
            assert!(channel.is_log_only(), "token={token:?} chat={chat:?}");
        }
    }

    #[tokio::test]
    async fn log_only_send_succeeds() {
        let channel = AlertChannel::LogOnly;
        assert!(channel.send("🟢 Lot\nGroup: 0").await.is_ok());
    }
}
