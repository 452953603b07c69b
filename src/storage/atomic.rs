//! Atomic file replacement
//!
//! New content is written in full to a sibling temp file, synced, and then
//! renamed over the target. A reader sees either the old file or the new
//! one, never a prefix of the new one.
//!
//! The two phases are split so a crash between them can be reproduced:
//! a [`StagedWrite`] that is dropped without [`commit`](StagedWrite::commit)
//! deletes its temp file and leaves the target untouched.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A fully written temp file waiting to replace its target
#[derive(Debug)]
pub struct StagedWrite {
    target: PathBuf,
    tmp: PathBuf,
    committed: bool,
}

impl StagedWrite {
    /// Write `bytes` (plus a trailing newline) to `<target>.tmp` and sync it
    pub fn stage(target: &Path, bytes: &[u8]) -> io::Result<Self> {
        let staged = Self {
            target: target.to_path_buf(),
            tmp: tmp_path(target)?,
            committed: false,
        };

        // On error `staged` is dropped here, which removes the partial temp file
        let mut file = File::create(&staged.tmp)?;
        file.write_all(bytes)?;
        file.write_all(b"\n")?;
        file.sync_all()?;

        Ok(staged)
    }

    /// Path of the temp file holding the new content
    pub fn tmp_path(&self) -> &Path {
        &self.tmp
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move the temp file over the target in one rename. The target is never
    /// removed first; `rename` replaces it on every supported platform.
    pub fn commit(mut self) -> io::Result<()> {
        fs::rename(&self.tmp, &self.target)?;
        self.committed = true;
        sync_parent(&self.target);
        Ok(())
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

/// Stage and commit in one step
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    StagedWrite::stage(path, bytes)?.commit()
}

/// `<dir>/<file name>.tmp`
fn tmp_path(target: &Path) -> io::Result<PathBuf> {
    let file_name = target
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    Ok(target.with_file_name(format!("{}.tmp", file_name.to_string_lossy())))
}

/// Persist the rename itself. Best effort; not every platform allows
/// opening a directory.
fn sync_parent(target: &Path) {
    #[cfg(unix)]
    {
        if let Some(dir) = target.parent().filter(|d| !d.as_os_str().is_empty()) {
            if let Ok(handle) = File::open(dir) {
                let _ = handle.sync_all();
            }
        }
    }
    #[cfg(not(unix))]
    let _ = target;
}
