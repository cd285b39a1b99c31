//! Robots.txt handling
//!
//! A policy is fetched once per discovery run from the start URL's origin.
//! Any failure to fetch or read it means "no policy available" and the crawl
//! proceeds without robots restrictions (fail-open). Only allow/disallow
//! matching is honored.

use reqwest::Client;
use robotstxt::DefaultMatcher;
use url::Url;

/// Allow/disallow policy parsed from a robots.txt body
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    content: String,
}

impl RobotsPolicy {
    /// Creates a policy from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Checks whether a URL may be fetched by the given user agent
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.content.is_empty() {
            return true;
        }
        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }
}

/// Fetches the robots policy for the origin of `start_url`
///
/// Returns `None` when the policy cannot be obtained for any reason: a
/// malformed start URL, a transport failure, a non-success status, or an
/// unreadable body.
pub async fn fetch_robots(client: &Client, start_url: &str) -> Option<RobotsPolicy> {
    let robots_url = Url::parse(start_url).ok()?.join("/robots.txt").ok()?;

    match client.get(robots_url.clone()).send().await {
        Ok(resp) if resp.status().is_success() => match resp.text().await {
            Ok(content) => {
                tracing::debug!("Loaded robots.txt from {}", robots_url);
                Some(RobotsPolicy::from_content(&content))
            }
            Err(e) => {
                tracing::info!("Could not read robots.txt body: {}", e);
                None
            }
        },
        Ok(resp) => {
            tracing::info!("No robots.txt available (HTTP {})", resp.status());
            None
        }
        Err(e) => {
            tracing::info!("Could not fetch robots.txt: {}", e);
            None
        }
    }
}
