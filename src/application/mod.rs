//! Application Layer
//!
//! Construct tree and synthesis use cases.
//!
//! - `App` - root of the construct tree, owns the output directory
//! - `Stack` - named group of providers, resources, assets and outputs
//! - `StackFile` - declarative `terrastack.toml` front-end
//! - `synth` - Terraform JSON and manifest writers

mod app;
mod stack;
pub mod stack_file;
pub mod synth;

pub use app::{App, DEFAULT_OUTDIR, STACKS_DIR};
pub use stack::{Stack, ASSETS_DIR};
pub use stack_file::{StackFile, STACK_FILE_NAME};
pub use synth::{Manifest, Plan, SynthReport, SynthesizedStack};
