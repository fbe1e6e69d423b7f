//! CLI argument definitions using clap
//!
//! Commands:
//! - microblog serve --config <path> [--port <port>] [--seed]
//! - microblog seed --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// microblog - tweets, likes, follows and media over HTTP
#[derive(Parser, Debug)]
#[command(name = "microblog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./microblog.json")]
        config: PathBuf,

        /// Port to listen on, overriding the config file
        #[arg(long)]
        port: Option<u16>,

        /// Drop all data and insert the configured seed users before serving
        #[arg(long)]
        seed: bool,
    },

    /// Drop all data and insert the configured seed users
    Seed {
        /// Path to configuration file
        #[arg(long, default_value = "./microblog.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
