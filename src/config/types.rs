//! Configuration type definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::application::DEFAULT_OUTDIR;

/// Default `tracing` filter when nothing else is configured
pub const DEFAULT_LOG: &str = "warn";

/// `[app]` table as it appears in a config or stack file.
///
/// Every field is optional so layers can be merged: a value set in a higher
/// layer replaces the one below it, unset values fall through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    /// Output directory for synthesized plans and staged assets
    pub outdir: Option<PathBuf>,
    /// `tracing` filter directive (`info`, `terrastack=debug`, ...)
    pub log: Option<String>,
}

/// User-level config file (`~/.config/terrastack/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub app: AppSection,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub outdir: PathBuf,
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            outdir: PathBuf::from(DEFAULT_OUTDIR),
            log: DEFAULT_LOG.to_string(),
        }
    }
}

impl Config {
    /// Overlay the values set in `layer`.
    pub fn apply(&mut self, layer: &AppSection) {
        if let Some(outdir) = &layer.outdir {
            self.outdir = outdir.clone();
        }
        if let Some(log) = &layer.log {
            self.log = log.clone();
        }
    }
}
