//! Local file system operations
//!
//! Every write goes through a temp file in the destination directory that is
//! renamed into place, so readers never observe a partially written file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

fn parent_dir(path: &Path) -> io::Result<&Path> {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => Ok(p),
        Some(_) => Ok(Path::new(".")),
        None => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no parent directory", path.display()),
        )),
    }
}

/// Write `content` to `path` atomically, creating parent directories.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = parent_dir(path)?;
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Copy `src` to `dest` atomically, creating parent directories.
///
/// Permission bits are carried over from the source.
pub fn copy_file_atomic(src: &Path, dest: &Path) -> io::Result<()> {
    let parent = parent_dir(dest)?;
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    let mut reader = fs::File::open(src)?;
    io::copy(&mut reader, tmp.as_file_mut())?;
    tmp.as_file()
        .set_permissions(fs::metadata(src)?.permissions())?;
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}
