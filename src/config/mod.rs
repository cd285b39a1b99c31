//! Configuration loading and validation
//!
//! Configuration is supplied once per run from a YAML file and is immutable
//! thereafter. Every field except the start URL and allowed domain carries a
//! default, so a minimal config is two lines.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::Config;
pub use validation::validate;
