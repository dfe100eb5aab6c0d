//! Packager port - turns a local path into a staged, content-addressed artifact
//!
//! The domain never touches the filesystem itself; stacks hand packaging
//! requests to an implementation of this trait.

use std::path::Path;

use crate::domain::entities::PackagedArtifact;
use crate::domain::value_objects::AssetType;
use crate::error::StackResult;

/// Asset packaging interface
///
/// Implementations:
/// - `LocalPackager` - hashes and stages on the local filesystem
pub trait Packager {
    /// Package `source` into `<staging>/<short-hash>/<file-name>`.
    ///
    /// Must fail with `PathNotFound` when `source` does not exist and must not
    /// leave a partial artifact behind on failure.
    fn package(
        &self,
        source: &Path,
        asset_type: AssetType,
        staging: &Path,
    ) -> StackResult<PackagedArtifact>;

    /// Remove staged versions under `staging` other than `keep`.
    ///
    /// `staging` must be exclusive to one asset. Returns how many versions
    /// were removed. The default keeps everything.
    fn prune(&self, staging: &Path, keep: &str) -> StackResult<usize> {
        let _ = (staging, keep);
        Ok(0)
    }
}
