//! File I/O utilities with atomic writes
//!
//! Provides file operations that never leave a half-written output file
//! behind: readers see either the previous contents or the complete new ones.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Create a directory and all missing parents
///
/// Succeeds without doing anything if the directory already exists.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// Overwrites an existing file at `path`. The parent directory must exist.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> io::Result<()> {
    let path = path.as_ref();

    // Temp file lives in the same directory so the rename stays atomic
    let temp_path = temp_path_for(path);

    let result = write_and_sync(&temp_path, contents).and_then(|()| fs::rename(&temp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_and_sync(path: &Path, contents: &[u8]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents)?;
    writer.flush()?;

    // Sync to disk before rename
    writer.get_ref().sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("export"));
    name.push(".tmp");
    path.with_file_name(name)
}
