use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page_with_retries};
use crate::crawler::parser::extract_links;
use crate::robots::{fetch_robots, RobotsPolicy};
use crate::state::CrawlState;
use crate::url::{extension_of, in_domain, matches_extension, normalize_url};
use crate::Result;
use chrono::Utc;
use reqwest::Client;
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

/// Outcome of a discovery run, for reporting only
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    /// Pages successfully fetched this run; failed fetch attempts enter the
    /// visited set but are not counted here
    pub pages_visited: usize,

    /// Discovered file-link occurrences keyed by lowercase extension
    pub discovered: BTreeMap<String, usize>,
}

/// Runs the discovery phase against the configured site
///
/// Loads persisted state, crawls breadth-first from the start URL until the
/// frontier is exhausted or the page cap is reached, and saves state back
/// exactly once at the end. Re-invocation merges into the existing manifest.
pub async fn discover(config: &Config) -> Result<DiscoveryReport> {
    let mut state = CrawlState::load(&config.state_dir)?;
    let client = build_http_client(&config.user_agent, config.timeout_sec)?;

    let robots = if config.respect_robots_txt {
        fetch_robots(&client, &config.start_url).await
    } else {
        None
    };

    let mut engine = CrawlEngine::new(config, client, robots);
    let report = engine.run(&mut state).await;
    state.save()?;

    tracing::info!(
        "Discovery finished: {} pages visited, {} file links in manifest",
        report.pages_visited,
        state.manifest.len()
    );

    Ok(report)
}

/// Breadth-first traversal over in-scope pages
struct CrawlEngine<'a> {
    config: &'a Config,
    client: Client,
    robots: Option<RobotsPolicy>,
    frontier: VecDeque<(String, u32)>,
    pages_visited: usize,
    discovered: BTreeMap<String, usize>,
}

impl<'a> CrawlEngine<'a> {
    fn new(config: &'a Config, client: Client, robots: Option<RobotsPolicy>) -> Self {
        let mut frontier = VecDeque::new();
        frontier.push_back((config.start_url.clone(), 0));
        Self {
            config,
            client,
            robots,
            frontier,
            pages_visited: 0,
            discovered: BTreeMap::new(),
        }
    }

    /// Drains the frontier until it empties or the page cap is reached
    ///
    /// Per popped URL: normalize, then discard if already visited, too deep,
    /// out of scope, or disallowed by robots (robots discards are logged and
    /// never marked visited). Otherwise fetch with retries; a fetch that
    /// fails after retries marks the URL visited so it cannot be requeued
    /// this run. The visited set is the only cycle protection needed, since
    /// it prevents re-enqueueing.
    async fn run(&mut self, state: &mut CrawlState) -> DiscoveryReport {
        loop {
            if self.pages_visited >= self.config.max_pages {
                tracing::info!("Page cap of {} reached", self.config.max_pages);
                break;
            }
            let Some((raw_url, depth)) = self.frontier.pop_front() else {
                break;
            };

            let norm = match normalize_url(&raw_url, self.config.ignore_query_params) {
                Ok(n) => n,
                Err(e) => {
                    tracing::debug!("Skipping unnormalizable URL {}: {}", raw_url, e);
                    continue;
                }
            };

            if state.is_visited(&norm) || depth > self.config.max_depth {
                continue;
            }
            if !in_domain(&norm, &self.config.allowed_domain, self.config.follow_subdomains) {
                continue;
            }
            if let Some(robots) = &self.robots {
                if !robots.is_allowed(&norm, &self.config.user_agent) {
                    tracing::info!("Blocked by robots: {}", norm);
                    continue;
                }
            }

            match fetch_page_with_retries(&self.client, &norm, self.config.retries).await {
                Ok(page) => {
                    state.mark_visited(&norm);
                    self.pages_visited += 1;
                    tracing::debug!("Visited {} (HTTP {})", norm, page.status);

                    if page.content_type.contains("text/html") {
                        self.process_links(state, &norm, &page.body, depth);
                    }
                }
                Err(err) => {
                    // Visited-but-failed: prevents retry loops for the rest
                    // of this run.
                    tracing::warn!("Failed to fetch {}: {}", norm, err);
                    state.mark_visited(&norm);
                }
            }

            self.rate_limit().await;
        }

        DiscoveryReport {
            pages_visited: self.pages_visited,
            discovered: std::mem::take(&mut self.discovered),
        }
    }

    /// Classifies the outbound links of a fetched page
    ///
    /// File links are upserted into the manifest (merge semantics: prior
    /// download metadata survives re-discovery); everything else not yet
    /// visited joins the frontier one level deeper.
    fn process_links(&mut self, state: &mut CrawlState, page_url: &str, body: &str, depth: u32) {
        let base = match Url::parse(page_url) {
            Ok(url) => url,
            Err(_) => return,
        };
        let discovered_at = Utc::now().to_rfc3339();

        for link in extract_links(body, &base) {
            let link_norm = match normalize_url(&link, self.config.ignore_query_params) {
                Ok(n) => n,
                Err(_) => continue,
            };

            if matches_extension(&link_norm, &self.config.allowed_extensions) {
                if let Some(ext) = extension_of(&link_norm) {
                    *self.discovered.entry(ext).or_insert(0) += 1;
                }
                state.record_discovery(&link_norm, page_url, &discovered_at);
                tracing::debug!("Discovered file link {}", link_norm);
            } else if !state.is_visited(&link_norm) {
                self.frontier.push_back((link_norm, depth + 1));
            }
        }
    }

    /// Fixed sleep separating successive page fetches
    ///
    /// Applies after every popped URL that caused a network call, including
    /// fetch failures and non-HTML responses.
    async fn rate_limit(&self) {
        if self.config.rate_limit_sec > 0.0 {
            sleep(Duration::from_secs_f64(self.config.rate_limit_sec)).await;
        }
    }
}
