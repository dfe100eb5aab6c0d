//! Synthesis manifest (`<outdir>/manifest.json`)

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::entities::Asset;
use crate::domain::value_objects::{AssetType, ContentHash};
use crate::error::StackResult;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Top-level manifest listing every synthesized stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub stacks: BTreeMap<String, StackManifest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackManifest {
    pub name: String,
    /// Plan path relative to the output directory
    pub synthesized_stack_path: String,
    /// Stack directory relative to the output directory
    pub working_directory: String,
    #[serde(default)]
    pub assets: Vec<AssetManifest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetManifest {
    pub id: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub hash: ContentHash,
    pub file_name: String,
    /// Relative to the stack's working directory
    pub path: String,
}

impl From<&Asset> for AssetManifest {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id().to_string(),
            asset_type: asset.asset_type(),
            hash: asset.hash().clone(),
            file_name: asset.file_name().to_string(),
            path: asset.path().to_string(),
        }
    }
}

impl Manifest {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            stacks: BTreeMap::new(),
        }
    }

    pub fn load(outdir: &Path) -> StackResult<Self> {
        let content = std::fs::read_to_string(outdir.join(MANIFEST_FILE))?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}
