//! Deterministic `.tar.gz` writer
//!
//! Headers carry no timestamps, owners or host-specific modes, and the gzip
//! header has mtime 0, so identical entry lists produce identical bytes.

use std::fs::File;
use std::io::{self, BufReader, Write};

use flate2::{write::GzEncoder, Compression};
use tar::{Builder, EntryType, Header};

use super::walk::{Entry, EntryKind};

const DIR_MODE: u32 = 0o755;
const FILE_MODE: u32 = 0o644;
const EXEC_MODE: u32 = 0o755;

fn base_header(entry_type: EntryType, mode: u32, size: u64) -> Header {
    let mut header = Header::new_gnu();
    header.set_entry_type(entry_type);
    header.set_mode(mode);
    header.set_size(size);
    header.set_mtime(0);
    header.set_uid(0);
    header.set_gid(0);
    header
}

/// Write `entries` as a gzip-compressed tar stream into `out`.
pub fn write_archive<W: Write>(entries: &[Entry], out: W) -> io::Result<W> {
    let encoder = GzEncoder::new(out, Compression::default());
    let mut builder = Builder::new(encoder);

    for entry in entries {
        match entry.kind {
            EntryKind::Directory => {
                let mut header = base_header(EntryType::Directory, DIR_MODE, 0);
                builder.append_data(&mut header, format!("{}/", entry.rel), io::empty())?;
            }
            EntryKind::File { executable, len } => {
                let mode = if executable { EXEC_MODE } else { FILE_MODE };
                let mut header = base_header(EntryType::Regular, mode, len);
                let reader = BufReader::new(File::open(&entry.abs)?);
                builder.append_data(&mut header, &entry.rel, reader)?;
            }
        }
    }

    builder.into_inner()?.finish()
}
