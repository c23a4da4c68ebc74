//! Path-scoped file operations. Every helper opens its own handle and drops it
//! before returning, so no descriptor outlives a single operation.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use crate::errors::{SweepError, SweepResult};

fn file_err(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> SweepError {
    let path = path.to_path_buf();
    move |source| SweepError::File { action, path, source }
}

/// Open a file for reading.
///
/// # Errors
/// Returns [`SweepError::File`] if the file cannot be opened.
pub fn open_read(path: &Path) -> SweepResult<File> {
    File::open(path).map_err(file_err("open", path))
}

/// Read a whole file as raw bytes. No encoding is assumed.
///
/// # Errors
/// Returns [`SweepError::File`] if the file cannot be opened for reading and writing.
pub fn read_bytes(path: &Path) -> SweepResult<Vec<u8>> {
    let mut f = OpenOptions::new().read(true).write(true).open(path).map_err(file_err("open", path))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf).map_err(file_err("read", path))?;
    Ok(buf)
}

/// Replace the contents of an existing file, truncating it to exactly `contents`.
///
/// The file is not created when missing.
///
/// # Errors
/// Returns [`SweepError::File`] if the file cannot be opened or written.
pub fn overwrite(path: &Path, contents: &[u8]) -> SweepResult<()> {
    let mut f = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(file_err("open", path))?;
    f.write_all(contents).map_err(file_err("write", path))?;
    f.flush().map_err(file_err("write", path))?;
    Ok(())
}

/// Append `line` followed by a single `\n`, creating the file if missing.
///
/// # Errors
/// Returns [`SweepError::File`] if the file cannot be opened or written.
pub fn append_line(path: &Path, line: &[u8]) -> SweepResult<()> {
    let mut f = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(file_err("open", path))?;
    let mut buf = Vec::with_capacity(line.len() + 1);
    buf.extend_from_slice(line);
    buf.push(b'\n');
    f.write_all(&buf).map_err(file_err("append to", path))?;
    Ok(())
}
