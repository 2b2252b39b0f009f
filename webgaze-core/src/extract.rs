//! Search query extraction
//!
//! Derives a human-meaningful query string from a page's URL and title.
//! Search engines and many in-site search boxes carry the query in a `q`
//! parameter; everything else falls back to the page title.

use url::Url;

/// Derive the search query for a page view.
///
/// Returns the value of the first `q` query parameter when the URL parses
/// and the parameter is non-empty; otherwise returns `title` unchanged.
/// Malformed URLs never surface an error.
pub fn search_query(url: &str, title: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return title.to_string();
    };

    let q = parsed
        .query_pairs()
        .find_map(|(name, value)| (name == "q").then(|| value.into_owned()));

    match q {
        Some(value) if !value.is_empty() => value,
        _ => title.to_string(),
    }
}
