//! Tooling Layer
//!
//! Command-line surface: argument parsing and the context that runs a
//! scan-and-pack session from parsed arguments.

pub mod cli;

pub use cli::{Cli, CliContext};
