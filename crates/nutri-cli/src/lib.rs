//! Nutrition logger CLI library.
//!
//! This crate provides the command-line surface over the meal parser and the
//! Google collaborators.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
