//! Domain Layer
//!
//! The construct model without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Assets and declared constructs
//! - `value_objects/` - Immutable value types (ConstructId, ContentHash, Expression)
//! - `resources/` - Typed resource shapes and their required attributes
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod ports;
pub mod resources;
pub mod value_objects;
