use serde::{Deserialize, Serialize};

/// Download status of a manifest entry
///
/// Within a single download attempt the status only moves forward from
/// `Discovered` to one of the terminal states; a later run may revise it
/// again, since remote content can change between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Link was seen during a crawl but content has not been fetched
    Discovered,

    /// Content was fetched and written to disk
    Downloaded,

    /// Conditional check matched stored ETag/Last-Modified; content not fetched
    SkippedUnchanged,

    /// The last download attempt for this entry failed
    Failed,
}

impl Default for FileStatus {
    fn default() -> Self {
        FileStatus::Discovered
    }
}

/// A single harvested-file record, keyed by its normalized URL
///
/// One entry is serialized per line of the manifest file. Every field except
/// `file_url` is revised by later phases; absent fields serialize as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Normalized file URL, the immutable identity key
    pub file_url: String,

    /// Page that linked this file (last discovery wins)
    pub source_page: Option<String>,

    /// ISO-8601 timestamp of the most recent discovery
    pub discovered_at: Option<String>,

    /// Local destination path, set on successful download
    #[serde(default)]
    pub file_path: Option<String>,

    #[serde(default)]
    pub status: FileStatus,

    #[serde(default)]
    pub http_status: Option<u16>,

    #[serde(default)]
    pub etag: Option<String>,

    #[serde(default)]
    pub last_modified: Option<String>,

    /// Lowercase hex SHA-256 of the downloaded content
    #[serde(default)]
    pub sha256: Option<String>,

    #[serde(default)]
    pub size_bytes: Option<u64>,
}

impl ManifestEntry {
    /// Creates a freshly discovered entry with no download metadata
    pub fn discovered(file_url: &str, source_page: &str, discovered_at: &str) -> Self {
        Self {
            file_url: file_url.to_string(),
            source_page: Some(source_page.to_string()),
            discovered_at: Some(discovered_at.to_string()),
            file_path: None,
            status: FileStatus::Discovered,
            http_status: None,
            etag: None,
            last_modified: None,
            sha256: None,
            size_bytes: None,
        }
    }
}
