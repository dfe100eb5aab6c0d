//! Directory walking and content digests
//!
//! Entries are collected once, sorted by their `/`-separated relative path,
//! and shared by the digest, the archive writer and the tree copy, so all
//! three see exactly the same content in the same order.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::domain::value_objects::{ContentHash, IgnorePatterns};
use crate::error::{StackError, StackResult};

/// Kind of a packaged entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File { executable: bool, len: u64 },
}

impl EntryKind {
    fn tag(&self) -> u8 {
        match self {
            EntryKind::Directory => b'd',
            EntryKind::File { executable: false, .. } => b'f',
            EntryKind::File { executable: true, .. } => b'x',
        }
    }
}

/// One entry below a packaged directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Path relative to the packaged root, `/`-separated
    pub rel: String,
    pub abs: PathBuf,
    pub kind: EntryKind,
}

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata) -> bool {
    false
}

fn rel_slash(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Collect the entries of `root`, honoring `.assetignore`.
///
/// Symbolic links are followed; the root itself is not an entry.
pub fn collect_entries(root: &Path) -> StackResult<Vec<Entry>> {
    let ignore = IgnorePatterns::load(root)?;
    if !ignore.is_empty() {
        tracing::debug!(
            root = %root.display(),
            patterns = ignore.pattern_count(),
            "loaded .assetignore"
        );
    }

    let walker = WalkDir::new(root)
        .follow_links(true)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| match e.path().strip_prefix(root) {
            Ok(rel) => !ignore.is_ignored(rel, e.file_type().is_dir()),
            Err(_) => false,
        });

    let mut entries = Vec::new();
    for item in walker {
        let item = item.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
            StackError::packaging(path, e)
        })?;
        let rel = item
            .path()
            .strip_prefix(root)
            .map_err(|e| StackError::packaging(item.path(), e))?;
        let metadata = item
            .metadata()
            .map_err(|e| StackError::packaging(item.path(), e))?;

        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else if metadata.is_file() {
            EntryKind::File {
                executable: is_executable(&metadata),
                len: metadata.len(),
            }
        } else {
            tracing::warn!(path = %item.path().display(), "skipping special file");
            continue;
        };

        entries.push(Entry {
            rel: rel_slash(rel),
            abs: item.path().to_path_buf(),
            kind,
        });
    }

    entries.sort_by(|a, b| a.rel.cmp(&b.rel));
    Ok(entries)
}

fn write_len_prefixed(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// Hash a directory listing.
///
/// Each entry contributes its kind tag, its length-prefixed relative path and,
/// for files, the length-prefixed content. Timestamps and ownership never
/// enter the digest.
pub fn digest_entries(entries: &[Entry]) -> StackResult<ContentHash> {
    let mut hasher = Sha256::new();
    for entry in entries {
        hasher.update([entry.kind.tag()]);
        write_len_prefixed(&mut hasher, entry.rel.as_bytes());
        if let EntryKind::File { len, .. } = entry.kind {
            hasher.update(len.to_le_bytes());
            let copied = hash_reader(&mut hasher, &entry.abs)?;
            if copied != len {
                return Err(StackError::packaging(
                    &entry.abs,
                    "file changed while it was being hashed",
                ));
            }
        }
    }
    Ok(ContentHash::from_digest(hasher))
}

/// Hash a single file's bytes.
pub fn digest_file(path: &Path) -> StackResult<ContentHash> {
    let mut hasher = Sha256::new();
    hash_reader(&mut hasher, path)?;
    Ok(ContentHash::from_digest(hasher))
}

fn hash_reader(hasher: &mut Sha256, path: &Path) -> StackResult<u64> {
    let mut file = File::open(path).map_err(|e| StackError::packaging(path, e))?;
    let copied = io::copy(&mut file, hasher).map_err(|e| StackError::packaging(path, e))?;
    hasher.flush().map_err(|e| StackError::packaging(path, e))?;
    Ok(copied)
}
