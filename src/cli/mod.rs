//! CLI module for the usage throttle service

pub mod serve;

use clap::{Parser, Subcommand};

/// Usage Throttle - bandwidth tier resolution backed by per-account usage counters
#[derive(Parser)]
#[command(name = "usage-throttle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
}
