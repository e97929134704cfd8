//! Alert delivery: the Telegram Bot API, or a log-only fallback when no
//! credentials are configured.

pub mod channel;
pub mod error;
pub mod telegram;

pub use channel::AlertChannel;
pub use error::NotifyError;
pub use telegram::TelegramNotifier;
