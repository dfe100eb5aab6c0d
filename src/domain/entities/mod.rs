//! Domain Entities
//!
//! - `Asset` - a packaged local path with a content-derived identity
//! - `Resource`, `Provider`, `Output`, `ModuleCall` - declared constructs

mod asset;
mod resource;

pub use asset::{derive_file_name, Asset, PackagedArtifact};
pub use resource::{Attributes, ModuleCall, ModuleRef, Output, Provider, Resource, ResourceRef};
