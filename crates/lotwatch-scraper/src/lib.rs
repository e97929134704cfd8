//! eBay search-results client: builds search URLs for a [`SearchTarget`],
//! fetches the result page and parses it into [`Listing`]s.
//!
//! [`SearchTarget`]: lotwatch_core::SearchTarget
//! [`Listing`]: lotwatch_core::Listing

pub mod client;
pub mod error;
pub mod parse;
pub mod query;

pub use client::EbayClient;
pub use error::ScraperError;
pub use parse::parse_search_results;
pub use query::{parse_base_url, search_url};
