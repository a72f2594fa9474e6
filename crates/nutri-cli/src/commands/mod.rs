//! CLI subcommand implementations.

pub mod log;
pub mod parse;
