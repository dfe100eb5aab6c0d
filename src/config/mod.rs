//! Configuration module for terrastack
//!
//! Configuration hierarchy, highest priority first:
//! 1. CLI flags (`--outdir`)
//! 2. Environment variables (`TERRASTACK_OUTDIR`, `TERRASTACK_LOG`)
//! 3. Project stack file (`terrastack.toml`, `[app]` table)
//! 4. User config (`~/.config/terrastack/config.toml`, `[app]` table)
//! 5. Built-in defaults

mod loader;
mod types;

pub use loader::{
    load, load_with_warnings, project_section, unknown_key_warnings, with_env_overrides,
    ConfigWarning, ENV_LOG, ENV_OUTDIR,
};
pub use types::{AppSection, Config, ConfigFile, DEFAULT_LOG};
