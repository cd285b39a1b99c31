//! Discovery phase: breadth-first crawl and file-link classification
//!
//! The engine walks pages inside the domain boundary, records links matching
//! the target extensions in the manifest, and enqueues everything else for
//! traversal. One network call is in flight at a time; a fixed rate-limit
//! sleep separates successive page fetches.

mod engine;
mod fetcher;
mod parser;

pub use engine::{discover, DiscoveryReport};
pub use fetcher::{
    build_http_client, fetch_page_with_retries, request_with_retries, PageResponse,
};
pub use parser::extract_links;
