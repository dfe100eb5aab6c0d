//! Synthesis
//!
//! Writes one Terraform JSON plan per stack plus a manifest:
//!
//! ```text
//! <outdir>/
//!   manifest.json
//!   stacks/<name>/cdk.tf.json
//!   stacks/<name>/assets/<id>/<short-hash>/<file-name>   (staged at construction)
//! ```
//!
//! Every file is written atomically and rendering is deterministic, so
//! synthesizing an unchanged app rewrites byte-identical files.

mod manifest;
mod plan;

pub use manifest::{AssetManifest, Manifest, StackManifest, MANIFEST_FILE};
pub use plan::{render_stack, Plan, PLAN_FILE};

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::application::STACKS_DIR;
use crate::application::App;
use crate::error::StackResult;
use crate::infrastructure::fs::atomic_write;

/// Summary of one synthesized stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedStack {
    pub name: String,
    pub plan_path: PathBuf,
    pub resources: usize,
    pub assets: usize,
    pub outputs: usize,
}

/// Result of `App::synth`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthReport {
    pub outdir: PathBuf,
    pub manifest_path: PathBuf,
    pub stacks: Vec<SynthesizedStack>,
}

impl SynthReport {
    pub fn stack(&self, name: &str) -> Option<&SynthesizedStack> {
        self.stacks.iter().find(|s| s.name == name)
    }

    /// Load the written plan of one stack
    pub fn plan(&self, name: &str) -> StackResult<Option<Plan>> {
        match self.stack(name) {
            Some(stack) => Plan::load(&stack.plan_path).map(Some),
            None => Ok(None),
        }
    }
}

fn to_json_bytes<T: Serialize>(value: &T) -> StackResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    Ok(bytes)
}

fn relative(stack_name: &str, file: Option<&str>) -> String {
    match file {
        Some(file) => format!("{}/{}/{}", STACKS_DIR, stack_name, file),
        None => format!("{}/{}", STACKS_DIR, stack_name),
    }
}

pub(crate) fn synthesize(app: &App) -> StackResult<SynthReport> {
    let outdir: &Path = app.outdir();
    let mut manifest = Manifest::new();
    let mut stacks = Vec::with_capacity(app.stacks().len());

    for stack in app.stacks() {
        let name = stack.name().as_str();
        let plan_path = stack.dir().join(PLAN_FILE);
        atomic_write(&plan_path, &to_json_bytes(&render_stack(stack))?)?;

        tracing::info!(
            stack = name,
            resources = stack.resources().len(),
            assets = stack.assets().len(),
            plan = %plan_path.display(),
            "synthesized stack"
        );

        manifest.stacks.insert(
            name.to_string(),
            StackManifest {
                name: name.to_string(),
                synthesized_stack_path: relative(name, Some(PLAN_FILE)),
                working_directory: relative(name, None),
                assets: stack.assets().iter().map(AssetManifest::from).collect(),
            },
        );

        stacks.push(SynthesizedStack {
            name: name.to_string(),
            plan_path,
            resources: stack.resources().len(),
            assets: stack.assets().len(),
            outputs: stack.outputs().len(),
        });
    }

    let manifest_path = outdir.join(MANIFEST_FILE);
    atomic_write(&manifest_path, &to_json_bytes(&manifest)?)?;
    tracing::debug!(manifest = %manifest_path.display(), "wrote manifest");

    Ok(SynthReport {
        outdir: outdir.to_path_buf(),
        manifest_path,
        stacks,
    })
}
