//! URL handling module
//!
//! This module provides the pure functions the crawler and download pipeline
//! build on: canonicalizing URLs so they can serve as identity keys, testing
//! domain membership, and matching file links against target extensions.

mod matcher;
mod normalize;
mod scope;

pub use matcher::{extension_of, matches_extension};
pub use normalize::normalize_url;
pub use scope::in_domain;
