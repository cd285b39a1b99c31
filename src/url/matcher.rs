use std::path::Path;
use url::Url;

/// Checks whether a normalized URL ends with one of the target file
/// extensions, case-insensitively.
///
/// The comparison runs over the full normalized URL string; with queries
/// stripped during normalization the suffix is the path suffix.
pub fn matches_extension(url: &str, extensions: &[String]) -> bool {
    let lower = url.to_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(&ext.to_lowercase()))
}

/// Returns the lowercase extension (with leading dot) of the URL's path
/// component, used to key per-extension discovery counts.
pub fn extension_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    Path::new(parsed.path())
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}
