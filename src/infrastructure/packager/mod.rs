//! Local asset packager
//!
//! Implements the `Packager` port on the local filesystem:
//!
//! 1. check the source exists and has the right shape for the mode
//! 2. compute the content hash (and with it the generated file name)
//! 3. stage the artifact under `<staging>/<short-hash>/<file-name>`
//!
//! Staging is skipped when the target already exists, since the path itself
//! encodes the content. `prune` drops the versions a later build replaced.

mod archive;
mod walk;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempDir};

use crate::domain::entities::{derive_file_name, PackagedArtifact};
use crate::domain::ports::Packager;
use crate::domain::value_objects::{AssetType, ContentHash};
use crate::error::{StackError, StackResult};
use crate::infrastructure::fs::copy_file_atomic;

pub use walk::{collect_entries, digest_entries, digest_file, Entry, EntryKind};

/// Packager writing to the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPackager;

impl LocalPackager {
    pub fn new() -> Self {
        Self
    }

    /// Compute the content hash of `source` without staging anything.
    pub fn hash(&self, source: &Path, asset_type: AssetType) -> StackResult<ContentHash> {
        check_source(source, asset_type)?;
        match asset_type {
            AssetType::File => digest_file(source),
            AssetType::Archive | AssetType::Directory => {
                digest_entries(&collect_entries(source)?)
            }
        }
    }
}

fn check_source(source: &Path, asset_type: AssetType) -> StackResult<()> {
    let metadata = match fs::metadata(source) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StackError::PathNotFound {
                path: source.to_path_buf(),
            })
        }
        Err(e) => return Err(StackError::packaging(source, e)),
    };

    match (asset_type.expects_directory(), metadata.is_dir()) {
        (true, false) => Err(StackError::packaging(
            source,
            format!("{} assets must point at a directory", asset_type),
        )),
        (false, true) => Err(StackError::packaging(
            source,
            "file assets must point at a regular file",
        )),
        _ => Ok(()),
    }
}

impl Packager for LocalPackager {
    fn package(
        &self,
        source: &Path,
        asset_type: AssetType,
        staging: &Path,
    ) -> StackResult<PackagedArtifact> {
        check_source(source, asset_type)?;

        let entries = match asset_type {
            AssetType::File => Vec::new(),
            AssetType::Archive | AssetType::Directory => collect_entries(source)?,
        };
        let hash = match asset_type {
            AssetType::File => digest_file(source)?,
            AssetType::Archive | AssetType::Directory => digest_entries(&entries)?,
        };
        let file_name = derive_file_name(&hash, asset_type, source);
        let version_dir = staging.join(hash.short());
        let staged_path = version_dir.join(&file_name);

        if staged_path.exists() {
            tracing::debug!(
                source = %source.display(),
                staged = %staged_path.display(),
                "asset already staged"
            );
        } else {
            fs::create_dir_all(&version_dir).map_err(|e| StackError::packaging(source, e))?;
            let staged = stage(source, asset_type, &entries, &staged_path);
            if let Err(err) = staged {
                // Only removes the directory when nothing else landed in it.
                let _ = fs::remove_dir(&version_dir);
                return Err(err);
            }
            tracing::info!(
                source = %source.display(),
                asset_type = %asset_type,
                hash = %hash,
                staged = %staged_path.display(),
                "packaged asset"
            );
        }

        Ok(PackagedArtifact {
            hash,
            file_name,
            staged_path,
        })
    }

    fn prune(&self, staging: &Path, keep: &str) -> StackResult<usize> {
        let listing = match fs::read_dir(staging) {
            Ok(listing) => listing,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(StackError::packaging(staging, e)),
        };

        let mut removed = 0;
        for entry in listing {
            let entry = entry.map_err(|e| StackError::packaging(staging, e))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name == keep || !is_version_dir_name(name) || !entry.path().is_dir() {
                continue;
            }
            fs::remove_dir_all(entry.path()).map_err(|e| StackError::packaging(staging, e))?;
            tracing::debug!(staging = %staging.display(), version = name, "pruned stale asset version");
            removed += 1;
        }
        Ok(removed)
    }
}

/// Version directories are named by the short content hash.
fn is_version_dir_name(name: &str) -> bool {
    name.len() == ContentHash::SHORT_LEN
        && name.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn stage(
    source: &Path,
    asset_type: AssetType,
    entries: &[Entry],
    dest: &Path,
) -> StackResult<()> {
    let parent = dest.parent().unwrap_or(Path::new("."));
    match asset_type {
        AssetType::File => {
            copy_file_atomic(source, dest).map_err(|e| StackError::packaging(source, e))
        }
        AssetType::Archive => {
            let mut tmp =
                NamedTempFile::new_in(parent).map_err(|e| StackError::packaging(source, e))?;
            archive::write_archive(entries, tmp.as_file_mut())
                .map_err(|e| StackError::packaging(source, e))?;
            tmp.persist(dest)
                .map_err(|e| StackError::packaging(source, e.error))?;
            Ok(())
        }
        AssetType::Directory => {
            let tmp = TempDir::new_in(parent).map_err(|e| StackError::packaging(source, e))?;
            copy_entries(entries, tmp.path()).map_err(|e| StackError::packaging(source, e))?;
            fs::rename(tmp.path(), dest).map_err(|e| StackError::packaging(source, e))?;
            Ok(())
        }
    }
}

fn copy_entries(entries: &[Entry], dest_root: &Path) -> std::io::Result<()> {
    for entry in entries {
        let target: PathBuf = entry
            .rel
            .split('/')
            .fold(dest_root.to_path_buf(), |p, seg| p.join(seg));
        match entry.kind {
            EntryKind::Directory => fs::create_dir_all(&target)?,
            EntryKind::File { .. } => copy_file_atomic(&entry.abs, &target)?,
        }
    }
    Ok(())
}
