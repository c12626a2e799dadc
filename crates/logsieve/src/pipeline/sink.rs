//! Rotating file sink.
//!
//! The sink is the durable end of the pipeline: an append-only, line-oriented
//! file that rolls over when a write would push it past a configured size,
//! keeping a bounded number of rotated generations (`app.log`, `app.log.1`,
//! ..., `app.log.N`). All append-and-rotate work happens under one mutex so
//! concurrent writers never interleave within a record or race the rotation
//! bookkeeping.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Error, Result};

/// A size- and count-bounded rotating file sink.
///
/// I/O failures are returned to the logging caller rather than swallowed;
/// silent log loss is worse than a visible failure.
#[derive(Debug)]
pub struct RotatingFileSink {
    path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    state: Mutex<SinkState>,
}

#[derive(Debug)]
struct SinkState {
    file: File,
    size: u64,
}

impl RotatingFileSink {
    /// Open (or create) the sink file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// file cannot be opened for appending.
    pub fn new(path: impl Into<PathBuf>, max_bytes: u64, backup_count: usize) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::sink_open(&path, e))?;
        let size = file
            .metadata()
            .map_err(|e| Error::sink_open(&path, e))?
            .len();

        Ok(Self {
            path,
            max_bytes,
            backup_count,
            state: Mutex::new(SinkState { file, size }),
        })
    }

    /// Path of the live sink file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record line, rotating first if the write would exceed the
    /// size bound.
    ///
    /// # Errors
    ///
    /// Returns an error if rotation or the write itself fails; the error is
    /// surfaced to the logging caller.
    pub fn write_line(&self, line: &str) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let incoming = line.len() as u64 + 1;
        if state.size > 0 && state.size + incoming > self.max_bytes {
            self.rotate(&mut state)?;
        }

        state
            .file
            .write_all(line.as_bytes())
            .and_then(|()| state.file.write_all(b"\n"))
            .and_then(|()| state.file.flush())
            .map_err(|e| Error::sink_write(&self.path, e))?;
        state.size += incoming;
        Ok(())
    }

    /// Shift backup generations up by one, move the live file to `.1`, and
    /// start a fresh live file. With a backup count of zero the live file is
    /// truncated in place.
    fn rotate(&self, state: &mut SinkState) -> Result<()> {
        if self.backup_count == 0 {
            let file =
                File::create(&self.path).map_err(|e| Error::sink_rotate(&self.path, e))?;
            state.file = file;
            state.size = 0;
            return Ok(());
        }

        let oldest = self.backup_path(self.backup_count);
        if oldest.exists() {
            fs::remove_file(&oldest).map_err(|e| Error::sink_rotate(&self.path, e))?;
        }
        for index in (1..self.backup_count).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))
                    .map_err(|e| Error::sink_rotate(&self.path, e))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
            .map_err(|e| Error::sink_rotate(&self.path, e))?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::sink_rotate(&self.path, e))?;
        state.file = file;
        state.size = 0;
        Ok(())
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }
}
