//! App - the root of the construct tree
//!
//! Owns the output directory and the registered stacks, and drives synthesis.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::synth::{self, SynthReport};
use crate::application::Stack;
use crate::domain::ports::Packager;
use crate::domain::value_objects::ConstructId;
use crate::error::{StackError, StackResult};
use crate::infrastructure::LocalPackager;

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTDIR: &str = "cdktf.out";

/// Directory (relative to the output directory) holding one folder per stack
pub const STACKS_DIR: &str = "stacks";

pub struct App {
    outdir: PathBuf,
    packager: Arc<dyn Packager>,
    stacks: Vec<Stack>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("outdir", &self.outdir)
            .field("stacks", &self.stacks)
            .finish()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_OUTDIR)
    }
}

impl App {
    /// Create an app packaging assets with [`LocalPackager`].
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self::with_packager(outdir, Arc::new(LocalPackager::new()))
    }

    pub fn with_packager(outdir: impl Into<PathBuf>, packager: Arc<dyn Packager>) -> Self {
        Self {
            outdir: outdir.into(),
            packager,
            stacks: Vec::new(),
        }
    }

    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    pub fn stack(&self, name: &str) -> Option<&Stack> {
        self.stacks.iter().find(|s| s.name().as_str() == name)
    }

    pub(crate) fn packager(&self) -> Arc<dyn Packager> {
        Arc::clone(&self.packager)
    }

    pub(crate) fn stack_dir(&self, name: &ConstructId) -> PathBuf {
        self.outdir.join(STACKS_DIR).join(name.as_str())
    }

    /// Register a stack created with [`Stack::new`].
    pub fn add_stack(&mut self, stack: Stack) -> StackResult<()> {
        if self.stack(stack.name().as_str()).is_some() {
            return Err(StackError::DuplicateId {
                kind: "stack".to_string(),
                id: stack.name().to_string(),
            });
        }
        if stack.dir() != self.stack_dir(stack.name()) {
            return Err(StackError::InvalidField {
                resource: format!("stack.{}", stack.name()),
                field: "scope".to_string(),
                message: "stack was created for a different app".to_string(),
            });
        }
        self.stacks.push(stack);
        Ok(())
    }

    /// Serialize every stack and the manifest into the output directory.
    pub fn synth(&self) -> StackResult<SynthReport> {
        synth::synthesize(self)
    }
}
