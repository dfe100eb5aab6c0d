//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Output formatting (text/NDJSON)
//!
//! ## Structure
//!
//! - `cli` - Argument definitions shared by the binary and its tests
//! - `output` - NDJSON event writer used by `--json`

pub mod cli;
pub mod output;

pub use cli::{Cli, Commands};
