//! Search URL construction.

use lotwatch_core::SearchTarget;
use reqwest::Url;

use crate::error::ScraperError;

/// Filters applied to every search: listed as lots, worldwide location,
/// available to the UK.
const BASE_PARAMS: &[(&str, &str)] = &[
    ("LH_Lots", "1"),
    ("LH_PrefLoc", "2"),
    ("LH_AvailTo", "3"),
];

/// Parses and checks the configured search endpoint.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` is not an absolute
/// `http` or `https` URL.
pub fn parse_base_url(base_url: &str) -> Result<Url, ScraperError> {
    let url = Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ScraperError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: format!("unsupported scheme \"{}\"", url.scheme()),
        });
    }
    Ok(url)
}

/// Builds the search-results URL for one term in one category.
///
/// Parameters are appended after any query already present on `base`.
#[must_use]
pub fn search_url(base: &Url, target: &SearchTarget, buy_it_now_only: bool) -> Url {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.extend_pairs(BASE_PARAMS);
        pairs
            .append_pair("_nkw", &target.term)
            .append_pair("_sacat", &target.category.id.to_string());
        if buy_it_now_only {
            pairs.append_pair("LH_BIN", "1");
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use lotwatch_core::Category;

    use super::*;

    fn target(term: &str, category: u32) -> SearchTarget {
        SearchTarget {
            term: term.to_string(),
            category: Category {
                id: category,
                name: "Cameras & Photography".to_string(),
            },
        }
    }

    fn base() -> Url {
        parse_base_url("https://www.ebay.co.uk/sch/i.html").unwrap()
    }

    #[test]
    fn builds_buy_it_now_query() {
        let url = search_url(&base(), &target("camera job lot", 625), true);
        assert_eq!(
            url.as_str(),
            "https://www.ebay.co.uk/sch/i.html?LH_Lots=1&LH_PrefLoc=2&LH_AvailTo=3&_nkw=camera+job+lot&_sacat=625&LH_BIN=1"
        );
    }

    #[test]
    fn omits_bin_filter_when_auctions_allowed() {
        let url = search_url(&base(), &target("digicam lot", 45089), false);
        assert_eq!(
            url.query(),
            Some("LH_Lots=1&LH_PrefLoc=2&LH_AvailTo=3&_nkw=digicam+lot&_sacat=45089")
        );
    }

    #[test]
    fn encodes_reserved_characters_in_term() {
        let url = search_url(&base(), &target("6x6 & 35mm", 625), false);
        let nkw = url
            .query_pairs()
            .find(|(k, _)| k == "_nkw")
            .map(|(_, v)| v.into_owned());
        assert_eq!(nkw.as_deref(), Some("6x6 & 35mm"));
        assert!(url.as_str().contains("_nkw=6x6+%26+35mm"));
    }

    #[test]
    fn keeps_existing_base_query() {
        let base = parse_base_url("http://localhost:8080/sch/i.html?_ipg=240").unwrap();
        let url = search_url(&base, &target("camera lot", 625), false);
        assert!(url
            .as_str()
            .starts_with("http://localhost:8080/sch/i.html?_ipg=240&LH_Lots=1"));
    }

    #[test]
    fn rejects_relative_base_url() {
        let err = parse_base_url("/sch/i.html").unwrap_err();
        assert!(matches!(err, ScraperError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = parse_base_url("ftp://www.ebay.co.uk/sch/i.html").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"), "got: {err}");
    }
}
