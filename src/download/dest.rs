use crate::{HarvestError, Result};
use std::path::{Path, PathBuf};
use url::Url;

/// Derives the local destination for a file URL under the download root
///
/// The URL's path component, with its leading slash stripped, becomes the
/// relative path under `output_dir`. Empty and `.` segments are dropped; a
/// `..` segment or an empty path is rejected, since the destination must stay
/// inside the download root.
pub fn destination_for(output_dir: &Path, file_url: &str) -> Result<PathBuf> {
    let url = Url::parse(file_url).map_err(|e| HarvestError::Download {
        url: file_url.to_string(),
        message: format!("unparseable URL: {}", e),
    })?;

    let mut dest = output_dir.to_path_buf();
    for segment in url.path().split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." {
            return Err(HarvestError::Download {
                url: file_url.to_string(),
                message: "URL path contains a traversal segment".to_string(),
            });
        }
        dest.push(segment);
    }

    if dest == output_dir {
        return Err(HarvestError::Download {
            url: file_url.to_string(),
            message: "URL has no path to derive a destination from".to_string(),
        });
    }

    Ok(dest)
}
