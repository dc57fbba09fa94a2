//! No-clobber streaming copy.
//!
//! The destination is opened with `create_new(true)`, so an existing file fails
//! with `AlreadyExists` and is never truncated.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

const BUF_SIZE: usize = 1024 * 1024; // 1 MiB buffers

/// Copy `src` -> `dst`, refusing to overwrite. Returns the number of bytes written.
pub(super) fn copy_no_clobber(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;

    // Carry over permissions (readonly bit on Windows, mode on Unix).
    let perms = reader.get_ref().metadata()?.permissions();
    writer.get_ref().set_permissions(perms)?;

    Ok(bytes)
}
