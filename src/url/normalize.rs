use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a URL into the canonical form used as an identity key
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or not HTTP(S)
/// 2. Remove the fragment (everything after `#`)
/// 3. Remove the query string when `ignore_query` is true
/// 4. Default an empty path to `/`
///
/// Scheme and host casing are left to the parser (the `url` crate lowercases
/// the host on parse), so normalization is idempotent: normalizing an
/// already-normalized URL yields the same value.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
/// * `ignore_query` - Whether to strip the query string
///
/// # Examples
///
/// ```
/// use harvestman::url::normalize_url;
///
/// let url = normalize_url("https://example.com/reports?page=2#latest", true).unwrap();
/// assert_eq!(url, "https://example.com/reports");
/// ```
pub fn normalize_url(url_str: &str, ignore_query: bool) -> UrlResult<String> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    if ignore_query {
        url.set_query(None);
    } else if url.query() == Some("") {
        // A bare trailing "?" carries no parameters
        url.set_query(None);
    }

    // The url crate never yields an empty path for http(s) URLs, but the
    // canonical form requires "/" so guard against it anyway.
    if url.path().is_empty() {
        url.set_path("/");
    }

    Ok(url.into())
}
