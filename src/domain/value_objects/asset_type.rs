//! Asset packaging mode

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a local path is packaged for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// A single file, staged as-is
    File,
    /// A directory, staged as a copied tree
    Directory,
    /// A directory, bundled into one `.tar.gz` archive
    #[default]
    Archive,
}

impl AssetType {
    pub const ALL: [AssetType; 3] = [AssetType::File, AssetType::Directory, AssetType::Archive];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::File => "file",
            AssetType::Directory => "directory",
            AssetType::Archive => "archive",
        }
    }

    /// Whether the source must be a directory
    pub fn expects_directory(&self) -> bool {
        !matches!(self, AssetType::File)
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(AssetType::File),
            "directory" | "dir" => Ok(AssetType::Directory),
            "archive" | "zip" | "tar" => Ok(AssetType::Archive),
            other => Err(format!(
                "unknown asset type '{}' (expected file, directory or archive)",
                other
            )),
        }
    }
}
