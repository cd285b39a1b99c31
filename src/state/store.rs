use crate::state::ManifestEntry;
use crate::{HarvestError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const VISITED_FILE: &str = "visited_urls.txt";
const MANIFEST_FILE: &str = "manifest.jsonl";

/// The unit of durable truth for a crawl target
///
/// Holds the two persisted collections: the set of normalized page URLs
/// already fetched (or attempted and failed), and the manifest of discovered
/// file URLs keyed by their normalized form. Both collections live in memory
/// for the duration of a phase and are written back once by [`CrawlState::save`].
#[derive(Debug)]
pub struct CrawlState {
    state_dir: PathBuf,

    /// Normalized page URLs; a URL enters this set once per run-lifetime and
    /// never leaves it
    pub visited: BTreeSet<String>,

    /// Normalized file URL -> manifest record
    pub manifest: BTreeMap<String, ManifestEntry>,
}

impl CrawlState {
    /// Loads persisted state from `state_dir`
    ///
    /// Missing files yield empty collections — a first run starts from
    /// nothing. Unreadable files or malformed manifest records are fatal.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let mut state = Self {
            state_dir: state_dir.to_path_buf(),
            visited: BTreeSet::new(),
            manifest: BTreeMap::new(),
        };

        let visited_file = state_dir.join(VISITED_FILE);
        if visited_file.exists() {
            let content = fs::read_to_string(&visited_file)?;
            state.visited = content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
        }

        let manifest_file = state_dir.join(MANIFEST_FILE);
        if manifest_file.exists() {
            let content = fs::read_to_string(&manifest_file)?;
            for (lineno, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let entry: ManifestEntry =
                    serde_json::from_str(line).map_err(|e| HarvestError::State {
                        path: manifest_file.display().to_string(),
                        message: format!("line {}: {}", lineno + 1, e),
                    })?;
                state.manifest.insert(entry.file_url.clone(), entry);
            }
        }

        Ok(state)
    }

    /// Writes both collections back to the state directory
    ///
    /// The visited file holds one URL per line, sorted and deduplicated; the
    /// manifest holds one JSON record per line in map iteration order. Each
    /// file is written to a temp sibling and renamed into place so a crash
    /// mid-write cannot corrupt the previous state.
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.state_dir)?;

        let mut visited_out = String::new();
        for url in &self.visited {
            visited_out.push_str(url);
            visited_out.push('\n');
        }
        write_atomically(&self.state_dir.join(VISITED_FILE), visited_out.as_bytes())?;

        let mut manifest_out = Vec::new();
        for entry in self.manifest.values() {
            serde_json::to_writer(&mut manifest_out, entry)?;
            manifest_out.push(b'\n');
        }
        write_atomically(&self.state_dir.join(MANIFEST_FILE), &manifest_out)?;

        Ok(())
    }

    /// Upserts a manifest entry for a discovered file link
    ///
    /// Re-discovery updates `source_page` and `discovered_at` only; download
    /// metadata already recorded for the URL (file_path, etag, last_modified,
    /// sha256, size_bytes, http_status) and a non-`discovered` status survive
    /// the merge. Only a brand-new entry starts at [`FileStatus::Discovered`].
    pub fn record_discovery(&mut self, file_url: &str, source_page: &str, discovered_at: &str) {
        match self.manifest.get_mut(file_url) {
            Some(entry) => {
                entry.source_page = Some(source_page.to_string());
                entry.discovered_at = Some(discovered_at.to_string());
            }
            None => {
                self.manifest.insert(
                    file_url.to_string(),
                    ManifestEntry::discovered(file_url, source_page, discovered_at),
                );
            }
        }
    }

    /// Marks a page URL as visited, returning whether it was newly inserted
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Tests whether a page URL has already been visited this run-lifetime
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }
}

/// Writes `contents` to `path` via a temp sibling and atomic rename
fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(contents)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
