//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Atomic writes and the user config directory
//! - `packager/` - Local asset packager (hashing, archives, staging)

pub mod fs;
pub mod packager;

pub use packager::LocalPackager;
