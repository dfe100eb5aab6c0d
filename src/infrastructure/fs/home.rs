//! User configuration directory resolution with test isolation support.
//!
//! `dirs::config_dir()` reads platform APIs on Windows and macOS, so setting
//! `HOME` in tests does not redirect it. `user_config_dir()` checks
//! `TERRASTACK_CONFIG_DIR` first and falls back to
//! `dirs::config_dir()/terrastack`.

use std::path::PathBuf;

/// Environment variable overriding the user configuration directory.
pub const CONFIG_DIR_VAR: &str = "TERRASTACK_CONFIG_DIR";

/// Directory holding the user-level `config.toml`.
///
/// Returns `None` when neither the override is set nor a platform config
/// directory can be resolved.
pub fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|d| d.join("terrastack")))
}
