//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod asset_type;
mod construct_id;
mod expression;
mod hash;
mod ignore_patterns;

pub use asset_type::AssetType;
pub use construct_id::ConstructId;
pub use expression::{Expression, Reference};
pub use hash::ContentHash;
pub use ignore_patterns::{IgnoreError, IgnorePatterns, IGNORE_FILE_NAME};
