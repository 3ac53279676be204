//! Configuration types
//!
//! Board-agnostic configuration structures, loaded from `watch.toml`.

pub mod parse;
pub mod types;

pub use parse::{load_config, parse_config, ParseError};
pub use types::*;
