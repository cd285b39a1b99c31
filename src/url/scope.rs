use url::Url;

/// Tests whether a URL falls inside the configured domain boundary
///
/// The host must match `allowed_domain` exactly, or — when
/// `follow_subdomains` is enabled — end with it as a suffix. No wildcard or
/// punycode handling is performed.
///
/// # Examples
///
/// ```
/// use harvestman::url::in_domain;
///
/// assert!(in_domain("https://example.com/page", "example.com", false));
/// assert!(!in_domain("https://docs.example.com/page", "example.com", false));
/// assert!(in_domain("https://docs.example.com/page", "example.com", true));
/// ```
pub fn in_domain(url_str: &str, allowed_domain: &str, follow_subdomains: bool) -> bool {
    let host = match Url::parse(url_str) {
        Ok(url) => match url.host_str() {
            Some(h) => h.to_string(),
            None => return false,
        },
        Err(_) => return false,
    };

    if follow_subdomains {
        host.ends_with(allowed_domain)
    } else {
        host == allowed_domain
    }
}
