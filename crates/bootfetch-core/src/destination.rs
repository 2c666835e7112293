//! Destination file lifecycle.
//!
//! The file is created (or truncated) up front and written sequentially. If it
//! is dropped without [`DestinationFile::commit`], it is truncated to zero
//! length so a failed transfer never leaves a partial body that looks complete.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Exclusively owned output file for one transfer.
#[derive(Debug)]
pub struct DestinationFile {
    file: Option<File>,
    path: PathBuf,
    bytes_written: u64,
}

impl DestinationFile {
    /// Create `path`, truncating any existing content.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(Self {
            file: Some(file),
            path: path.to_path_buf(),
            bytes_written: 0,
        })
    }

    /// Append `data` after the bytes already written.
    pub fn append(&mut self, data: &[u8]) -> io::Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "destination already closed"))?;
        file.write_all(data)?;
        self.bytes_written += data.len() as u64;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and sync to disk, then close. Returns the total bytes written.
    ///
    /// If flushing or syncing fails the handle stays owned, so `Drop`
    /// truncates the file.
    pub fn commit(self) -> io::Result<u64> {
        self.commit_with(File::sync_all)
    }

    fn commit_with(mut self, sync: impl FnOnce(&File) -> io::Result<()>) -> io::Result<u64> {
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
            sync(file)?;
        }
        self.file.take();
        Ok(self.bytes_written)
    }
}

impl Drop for DestinationFile {
    fn drop(&mut self) {
        let Some(file) = self.file.take() else {
            return;
        };
        match file.set_len(0) {
            Ok(()) => tracing::debug!(
                path = %self.path.display(),
                discarded = self.bytes_written,
                "transfer incomplete; destination truncated"
            ),
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                "failed to truncate incomplete destination: {}",
                e
            ),
        }
    }
}
