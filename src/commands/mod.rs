//! Subcommand implementations for the `terrastack` binary

pub mod package;
pub mod synth;
