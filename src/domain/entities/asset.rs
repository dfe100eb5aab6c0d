//! Asset entity - a local path packaged for upload
//!
//! An asset is created once during stack construction, after its source has
//! been packaged, and is immutable from then on. Its identity (hash and
//! generated file name) is derived purely from content.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::value_objects::{AssetType, ConstructId, ContentHash};

/// Result of packaging one source path into a staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedArtifact {
    /// Content hash of the packaged entries
    pub hash: ContentHash,
    /// Generated, content-addressed file name
    pub file_name: String,
    /// Absolute location of the staged artifact
    pub staged_path: PathBuf,
}

/// Derive the content-addressed file name for an artifact.
///
/// - archive: `<short>.tar.gz`
/// - file: `<short>.<ext>` (or `<short>` without an extension); a
///   `.tar.<ext>` suffix is kept whole
/// - directory: `<short>`
pub fn derive_file_name(hash: &ContentHash, asset_type: AssetType, source: &Path) -> String {
    let short = hash.short();
    match asset_type {
        AssetType::Archive => format!("{}.tar.gz", short),
        AssetType::Directory => short.to_string(),
        AssetType::File => match file_suffix(source) {
            Some(suffix) => format!("{}.{}", short, suffix),
            None => short.to_string(),
        },
    }
}

fn file_suffix(source: &Path) -> Option<String> {
    let ext = source.extension()?.to_str().filter(|e| !e.is_empty())?;
    let inner = source
        .file_stem()
        .map(Path::new)
        .and_then(Path::extension)
        .and_then(|e| e.to_str());
    match inner {
        Some("tar") => Some(format!("tar.{}", ext)),
        _ => Some(ext.to_string()),
    }
}

/// A packaged asset registered in a stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    id: ConstructId,
    #[serde(rename = "type")]
    asset_type: AssetType,
    /// Source path as given at construction time
    #[serde(skip)]
    source: PathBuf,
    hash: ContentHash,
    file_name: String,
    /// Artifact path relative to the stack directory (always `/`-separated)
    path: String,
    #[serde(skip)]
    staged_path: PathBuf,
}

impl Asset {
    /// Build an asset from a packaged artifact.
    ///
    /// `relative_path` is the artifact location relative to the stack
    /// directory; it is what resources reference as `source`.
    pub fn new(
        id: ConstructId,
        asset_type: AssetType,
        source: impl Into<PathBuf>,
        artifact: PackagedArtifact,
        relative_path: &Path,
    ) -> Self {
        Self {
            id,
            asset_type,
            source: source.into(),
            hash: artifact.hash,
            file_name: artifact.file_name,
            path: to_slash(relative_path),
            staged_path: artifact.staged_path,
        }
    }

    pub fn id(&self) -> &ConstructId {
        &self.id
    }

    pub fn asset_type(&self) -> AssetType {
        self.asset_type
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    /// Content-addressed name, suitable as an object storage key
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Artifact path relative to the stack directory
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Absolute location of the staged artifact on disk
    pub fn staged_path(&self) -> &Path {
        &self.staged_path
    }

    /// Look up a derived attribute by name (`file_name`, `path`, `hash`).
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "file_name" | "fileName" => Some(self.file_name()),
            "path" => Some(self.path()),
            "hash" | "asset_hash" | "assetHash" => Some(self.hash.as_str()),
            _ => None,
        }
    }
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> PackagedArtifact {
        let hash = ContentHash::from_bytes(b"handler");
        PackagedArtifact {
            file_name: derive_file_name(&hash, AssetType::Archive, Path::new("lambda")),
            hash,
            staged_path: PathBuf::from("/out/stacks/demo/assets/lambda-asset/x/y.tar.gz"),
        }
    }

    #[test]
    fn archive_file_name_uses_short_hash() {
        let hash = ContentHash::new("0123456789abcdef0123");
        assert_eq!(
            derive_file_name(&hash, AssetType::Archive, Path::new("lambda")),
            "0123456789abcdef.tar.gz"
        );
    }

    #[test]
    fn file_name_keeps_extension() {
        let hash = ContentHash::new("0123456789abcdef0123");
        assert_eq!(
            derive_file_name(&hash, AssetType::File, Path::new("src/index.py")),
            "0123456789abcdef.py"
        );
        assert_eq!(
            derive_file_name(&hash, AssetType::File, Path::new("Makefile")),
            "0123456789abcdef"
        );
    }

    #[test]
    fn file_name_keeps_compound_tar_suffix() {
        let hash = ContentHash::new("0123456789abcdef0123");
        assert_eq!(
            derive_file_name(&hash, AssetType::File, Path::new("dist/bundle.tar.gz")),
            "0123456789abcdef.tar.gz"
        );
        assert_eq!(
            derive_file_name(&hash, AssetType::File, Path::new("layer.tar.zst")),
            "0123456789abcdef.tar.zst"
        );
        assert_eq!(
            derive_file_name(&hash, AssetType::File, Path::new("app.min.js")),
            "0123456789abcdef.js"
        );
    }

    #[test]
    fn directory_file_name_is_short_hash() {
        let hash = ContentHash::new("0123456789abcdef0123");
        assert_eq!(
            derive_file_name(&hash, AssetType::Directory, Path::new("lambda")),
            "0123456789abcdef"
        );
    }

    #[test]
    fn path_is_slash_separated() {
        let rel = Path::new("assets").join("lambda-asset").join("abc").join("abc.tar.gz");
        let asset = Asset::new(
            ConstructId::new("lambda-asset").unwrap(),
            AssetType::Archive,
            "lambda",
            artifact(),
            &rel,
        );
        assert_eq!(asset.path(), "assets/lambda-asset/abc/abc.tar.gz");
    }

    #[test]
    fn attribute_lookup() {
        let asset = Asset::new(
            ConstructId::new("lambda-asset").unwrap(),
            AssetType::Archive,
            "lambda",
            artifact(),
            Path::new("assets/a.tar.gz"),
        );
        assert_eq!(asset.attribute("file_name"), Some(asset.file_name()));
        assert_eq!(asset.attribute("path"), Some("assets/a.tar.gz"));
        assert!(asset.attribute("hash").unwrap().starts_with("sha256:"));
        assert_eq!(asset.attribute("size"), None);
    }
}
