//! terrastack - Terraform stacks declared in Rust
//!
//! An [`App`] owns an output directory and a set of [`Stack`]s. A stack
//! collects providers, resources, outputs, module calls and [`Asset`]s.
//! Assets are local files or directories packaged at construction time into
//! content-addressed artifacts, so their generated file name and staged path
//! can be referenced from resource attributes. [`App::synth`] writes one
//! Terraform JSON plan per stack plus a manifest.
//!
//! ```no_run
//! use terrastack::{App, AssetType, AwsProvider, S3Bucket, S3BucketObject, Stack};
//!
//! # fn main() -> terrastack::StackResult<()> {
//! let mut app = App::new("cdktf.out");
//! let mut stack = Stack::new(&app, "demo")?;
//! stack.add_provider(AwsProvider::new("eu-central-1").into_provider()?)?;
//!
//! let asset = stack.add_asset("lambda-asset", "lambda", AssetType::Archive)?;
//! let bucket = stack.add("bucket", S3Bucket::new("demo"))?;
//! stack.add(
//!     "lambda-archive",
//!     S3BucketObject::new(bucket.get("bucket"), asset.file_name(), asset.path()),
//! )?;
//!
//! app.add_stack(stack)?;
//! app.synth()?;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{App, Stack, StackFile, SynthReport, ASSETS_DIR, DEFAULT_OUTDIR};
pub use domain::entities::{Asset, ModuleCall, Output, Provider, Resource, ResourceRef};
pub use domain::ports::Packager;
pub use domain::resources::{AwsProvider, S3Bucket, S3BucketObject, TypedResource};
pub use domain::value_objects::{AssetType, ConstructId, ContentHash, Expression, Reference};
pub use error::{StackError, StackResult};
pub use infrastructure::LocalPackager;
