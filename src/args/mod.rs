//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::ClientArgs;
pub use parsers::{parse_coordinate, parse_duration_arg, parse_zoom};
