use crate::config::Config;
use crate::crawler::{build_http_client, request_with_retries};
use crate::download::dest::destination_for;
use crate::state::{CrawlState, FileStatus, ManifestEntry};
use crate::{HarvestError, Result};
use reqwest::header;
use reqwest::{Client, Method, Response};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;

/// Aggregate counts for a download run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// What happened to a single entry that did not fail
enum EntryOutcome {
    Downloaded,
    Skipped,
}

/// Runs the download phase over every manifest entry
///
/// Entries are processed in manifest order, one at a time. Any error raised
/// while processing an entry is caught at the entry boundary: the entry is
/// marked `failed` and the pipeline moves on. State is saved exactly once
/// after the final entry.
pub async fn download(config: &Config) -> Result<DownloadReport> {
    let mut state = CrawlState::load(&config.state_dir)?;
    let client = build_http_client(&config.user_agent, config.timeout_sec)?;
    fs::create_dir_all(&config.output_dir)?;

    let mut report = DownloadReport::default();
    let urls: Vec<String> = state.manifest.keys().cloned().collect();
    let total = urls.len();

    for (index, url) in urls.iter().enumerate() {
        tracing::info!("Fetching {} ({}/{})", url, index + 1, total);
        let Some(entry) = state.manifest.get_mut(url) else {
            continue;
        };

        match process_entry(&client, config, entry).await {
            Ok(EntryOutcome::Downloaded) => report.downloaded += 1,
            Ok(EntryOutcome::Skipped) => {
                tracing::debug!("Unchanged, skipping {}", url);
                report.skipped += 1;
            }
            Err(err) => {
                tracing::warn!("Failed to download {}: {}", url, err);
                entry.status = FileStatus::Failed;
                report.failed += 1;
            }
        }
    }

    state.save()?;

    tracing::info!(
        "Download finished: {} downloaded, {} skipped, {} failed",
        report.downloaded,
        report.skipped,
        report.failed
    );

    Ok(report)
}

/// Processes one manifest entry: conditional check, then fetch if changed
///
/// A metadata-only HEAD request supplies the server's current ETag and
/// Last-Modified. If either matches the stored value the entry is unchanged
/// and no content request is issued. Otherwise the body is streamed to its
/// destination while the digest and byte count accumulate over exactly the
/// bytes written.
async fn process_entry(
    client: &Client,
    config: &Config,
    entry: &mut ManifestEntry,
) -> Result<EntryOutcome> {
    let head = request_with_retries(client, Method::HEAD, &entry.file_url, config.retries)
        .await
        .map_err(|source| HarvestError::Http {
            url: entry.file_url.clone(),
            source,
        })?;

    let etag = header_value(&head, header::ETAG);
    let last_modified = header_value(&head, header::LAST_MODIFIED);

    // Either-or match: one agreeing validator is enough to skip.
    let unchanged = (etag.is_some() && etag == entry.etag)
        || (last_modified.is_some() && last_modified == entry.last_modified);

    if unchanged {
        entry.status = FileStatus::SkippedUnchanged;
        entry.http_status = Some(head.status().as_u16());
        entry.etag = etag;
        entry.last_modified = last_modified;
        return Ok(EntryOutcome::Skipped);
    }

    let mut resp = request_with_retries(client, Method::GET, &entry.file_url, config.retries)
        .await
        .map_err(|source| HarvestError::Http {
            url: entry.file_url.clone(),
            source,
        })?;

    if !resp.status().is_success() {
        return Err(HarvestError::Download {
            url: entry.file_url.clone(),
            message: format!("HTTP {}", resp.status()),
        });
    }
    let http_status = resp.status().as_u16();

    let dest = destination_for(&config.output_dir, &entry.file_url)?;
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(&dest)?;
    let mut hasher = Sha256::new();
    let mut size_bytes: u64 = 0;
    while let Some(chunk) = resp.chunk().await.map_err(|source| HarvestError::Http {
        url: entry.file_url.clone(),
        source,
    })? {
        file.write_all(&chunk)?;
        hasher.update(&chunk);
        size_bytes += chunk.len() as u64;
    }
    file.flush()?;

    entry.file_path = Some(dest.display().to_string());
    entry.status = FileStatus::Downloaded;
    entry.http_status = Some(http_status);
    entry.etag = etag;
    entry.last_modified = last_modified;
    entry.sha256 = Some(hex::encode(hasher.finalize()));
    entry.size_bytes = Some(size_bytes);

    Ok(EntryOutcome::Downloaded)
}

fn header_value(resp: &Response, name: header::HeaderName) -> Option<String> {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
