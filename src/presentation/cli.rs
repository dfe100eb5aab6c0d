//! CLI Argument Parsing
//!
//! Global flags (`--json`, `--verbose`) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::STACK_FILE_NAME;
use crate::domain::value_objects::AssetType;

/// terrastack - declare Terraform stacks and package their assets
#[derive(Parser, Debug)]
#[command(name = "terrastack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Hash and stage a single asset
    Package {
        /// File or directory to package
        path: PathBuf,

        /// Asset type
        #[arg(short = 't', long = "type", default_value = "archive")]
        asset_type: AssetType,

        /// Staging directory (default: <outdir>/assets)
        #[arg(long)]
        staging: Option<PathBuf>,

        /// Only compute the content hash, do not stage anything
        #[arg(long)]
        hash_only: bool,
    },

    /// Build the stack declared in a stack file and write its plan
    Synth {
        /// Stack file
        #[arg(short, long, default_value = STACK_FILE_NAME)]
        file: PathBuf,

        /// Output directory (overrides config and TERRASTACK_OUTDIR)
        #[arg(short, long)]
        outdir: Option<PathBuf>,
    },
}

impl Cli {
    /// Default `tracing` filter for the `-v` count
    pub fn log_level(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }
}
