//! Download phase: conditional fetch of manifest entries
//!
//! Iterates the persisted manifest, skips entries whose stored ETag or
//! Last-Modified still matches the server's, streams changed content to disk
//! with an incremental SHA-256, and isolates every failure at the entry
//! boundary so one bad file never aborts the run.

mod dest;
mod pipeline;

pub use dest::destination_for;
pub use pipeline::{download, DownloadReport};
