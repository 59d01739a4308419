//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{ResolveCommand, VerifyCommand};

/// Release gating for mobile app pipelines
#[derive(Debug, Parser, Clone)]
#[command(name = "shipgate")]
#[command(author = "Shipgate Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Resolve and verify mobile release versions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Resolve target versions and save the snapshot document
    Resolve(ResolveCommand),

    /// Verify the snapshot against the distribution service
    Verify(VerifyCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

use std::ffi::OsString;
