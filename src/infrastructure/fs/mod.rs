//! File System Helpers
//!
//! Atomic writes and copies used when staging assets and writing plans.

mod home;
mod local;

pub use home::{user_config_dir, CONFIG_DIR_VAR};
pub use local::{atomic_write, copy_file_atomic};
