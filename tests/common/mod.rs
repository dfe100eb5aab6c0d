//! Common test utilities for terrastack integration tests.
//!
//! - `TestEnv`: isolated project and config directories plus CLI helpers
//! - Fixtures: reusable project content

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
