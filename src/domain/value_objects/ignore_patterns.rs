//! Asset ignore patterns
//!
//! Loads `.assetignore` from the root of a packaged directory and matches
//! relative paths with gitignore semantics. Ignored entries contribute to
//! neither the content hash nor the staged artifact.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the ignore file looked up at the root of a packaged directory
pub const IGNORE_FILE_NAME: &str = ".assetignore";

/// Maximum file size for `.assetignore` (64KB)
const MAX_FILE_SIZE: u64 = 65536;

/// Maximum number of patterns allowed
const MAX_PATTERNS: usize = 1000;

/// Patterns loaded from an `.assetignore` file.
#[derive(Debug)]
pub struct IgnorePatterns {
    matcher: Option<Gitignore>,
    pattern_count: usize,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnorePatterns {
    /// Pattern set that matches nothing.
    pub fn empty() -> Self {
        Self {
            matcher: None,
            pattern_count: 0,
        }
    }

    /// Load patterns from `<root>/.assetignore`.
    ///
    /// A missing file yields an empty set.
    pub fn load(root: &Path) -> Result<Self, IgnoreError> {
        let ignore_path = root.join(IGNORE_FILE_NAME);

        if !ignore_path.is_file() {
            return Ok(Self::empty());
        }

        let metadata = fs::metadata(&ignore_path)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(IgnoreError::FileTooLarge {
                path: ignore_path,
                size: metadata.len(),
                limit: MAX_FILE_SIZE,
            });
        }

        let content = fs::read_to_string(&ignore_path)?;
        Self::from_content(&ignore_path, &content)
    }

    /// Parse patterns from string content.
    ///
    /// The matcher has an empty root: callers pass paths that are already
    /// relative to the packaged directory, and nothing is stripped from them.
    pub fn from_content(source_path: &Path, content: &str) -> Result<Self, IgnoreError> {
        let mut builder = GitignoreBuilder::new("");
        let mut pattern_count = 0;

        for (line_num, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            pattern_count += 1;
            if pattern_count > MAX_PATTERNS {
                return Err(IgnoreError::TooManyPatterns {
                    path: source_path.to_path_buf(),
                    limit: MAX_PATTERNS,
                });
            }

            builder
                .add_line(Some(source_path.to_path_buf()), line)
                .map_err(|e| IgnoreError::InvalidPattern {
                    path: source_path.to_path_buf(),
                    line: line_num + 1,
                    pattern: line.to_string(),
                    message: e.to_string(),
                })?;
        }

        if pattern_count == 0 {
            return Ok(Self::empty());
        }

        let matcher = builder
            .build()
            .map_err(|e| IgnoreError::BuildFailed(e.to_string()))?;

        Ok(Self {
            matcher: Some(matcher),
            pattern_count,
        })
    }

    /// Check whether a path relative to the packaged root is ignored.
    ///
    /// The ignore file itself is always ignored.
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        if rel_path == Path::new(IGNORE_FILE_NAME) {
            return true;
        }
        match &self.matcher {
            Some(matcher) => matcher
                .matched_path_or_any_parents(rel_path, is_dir)
                .is_ignore(),
            None => false,
        }
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}

/// Errors raised while loading `.assetignore`.
#[derive(Debug, Error)]
pub enum IgnoreError {
    #[error(".assetignore exceeds {}KB limit ({size} bytes): {}", .limit / 1024, .path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error(".assetignore has more than {limit} patterns: {}", .path.display())]
    TooManyPatterns { path: PathBuf, limit: usize },

    #[error("invalid pattern at {}:{line}: '{pattern}' - {message}", .path.display())]
    InvalidPattern {
        path: PathBuf,
        line: usize,
        pattern: String,
        message: String,
    },

    #[error("failed to build ignore matcher: {0}")]
    BuildFailed(String),

    #[error("IO error reading .assetignore: {0}")]
    Io(#[from] std::io::Error),
}
