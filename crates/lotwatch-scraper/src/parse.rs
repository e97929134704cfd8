//! Search-results page parsing.

use std::sync::LazyLock;

use lotwatch_core::Listing;
use scraper::{ElementRef, Html, Selector};

static ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.s-item").expect("valid item selector"));
static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.s-item__link").expect("valid link selector"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".s-item__title").expect("valid title selector"));
static PRICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".s-item__price").expect("valid price selector"));

/// Titles shorter than this are layout fragments, not listings.
const MIN_TITLE_CHARS: usize = 6;

/// Placeholder cards eBay injects into result lists.
const PLACEHOLDER_TITLES: &[&str] = &["shop on ebay", "sponsored"];

/// Extracts listings from a search-results page, in page order.
///
/// Items missing a link, title or price are skipped, as are placeholder
/// cards. The item link with its query string removed serves as both the
/// identifier and the link.
#[must_use]
pub fn parse_search_results(html: &str) -> Vec<Listing> {
    let document = Html::parse_document(html);
    document.select(&ITEM).filter_map(parse_item).collect()
}

fn parse_item(item: ElementRef<'_>) -> Option<Listing> {
    let anchor = item.select(&LINK).next()?;
    let title = joined_text(item.select(&TITLE).next()?);
    let price = joined_text(item.select(&PRICE).next()?);

    if is_placeholder(&title) {
        return None;
    }

    let link = strip_query(anchor.value().attr("href").unwrap_or_default());
    if link.is_empty() {
        return None;
    }

    Some(Listing {
        id: link.to_owned(),
        title,
        price,
        link: link.to_owned(),
    })
}

/// Text nodes trimmed, empties dropped, joined by single spaces.
pub(crate) fn joined_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn is_placeholder(title: &str) -> bool {
    if title.chars().count() < MIN_TITLE_CHARS {
        return true;
    }
    let lower = title.to_lowercase();
    PLACEHOLDER_TITLES.contains(&lower.as_str())
}

/// Everything before the first `?`.
pub(crate) fn strip_query(href: &str) -> &str {
    href.split_once('?').map_or(href, |(path, _)| path)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
