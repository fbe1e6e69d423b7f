//! Command-line interface
//!
//! - serve: open the store and run the HTTP API
//! - seed: reset the store to the configured seed users

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init_logging, run, run_command, seed, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
