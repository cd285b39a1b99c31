use serde::Deserialize;
use std::path::PathBuf;

/// Crawler configuration, immutable for the duration of a run
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// URL the breadth-first traversal starts from
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Hostname defining the crawl boundary
    #[serde(rename = "allowed-domain")]
    pub allowed_domain: String,

    /// Root directory downloaded files are written under
    #[serde(rename = "output-dir", default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory holding the visited-URL file and the manifest
    #[serde(rename = "state-dir", default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// Page-visit cap for a single discovery run
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Maximum traversal depth from the start URL
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Whether to fetch robots.txt and honor its allow/disallow rules
    #[serde(rename = "respect-robots-txt", default = "default_true")]
    pub respect_robots_txt: bool,

    /// File extensions (with leading dot) that mark a link as a harvest target
    #[serde(rename = "allowed-extensions", default = "default_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Whether hosts under the allowed domain are in scope
    #[serde(rename = "follow-subdomains", default)]
    pub follow_subdomains: bool,

    /// Seconds to sleep between successive page fetches
    #[serde(rename = "rate-limit-sec", default = "default_rate_limit")]
    pub rate_limit_sec: f64,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-sec", default = "default_timeout")]
    pub timeout_sec: u64,

    /// User agent sent with every request and matched against robots.txt
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Additional attempts after a transient transport failure
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Whether query strings are stripped during URL normalization
    #[serde(rename = "ignore-query-params", default = "default_true")]
    pub ignore_query_params: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./out")
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("./state")
}

fn default_max_pages() -> usize {
    10_000
}

fn default_max_depth() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    [".pdf", ".doc", ".docx", ".xls", ".xlsx", ".csv", ".zip"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_rate_limit() -> f64 {
    0.5
}

fn default_timeout() -> u64 {
    20
}

fn default_user_agent() -> String {
    format!("harvestman/{} (+https://github.com/harvestman)", env!("CARGO_PKG_VERSION"))
}

fn default_retries() -> u32 {
    2
}
