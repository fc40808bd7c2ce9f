//! Log sinks
//!
//! A sink is the destination serialized records are written to: stdout, an
//! arbitrary writer, or an append-mode file. Exactly one writer is active at
//! a time; `swap` replaces it in place so a shared journal can be re-pointed
//! without tearing down the context.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Destination for serialized log records.
///
/// The writer sits behind a mutex, so concurrent emitters and sink swaps
/// serialize against each other and lines never interleave.
pub struct Sink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Sink {
    /// Sink writing to standard output
    pub fn stdout() -> Self {
        Self::writer(Box::new(io::stdout()))
    }

    /// Sink writing to an arbitrary writer
    pub fn writer(w: Box<dyn Write + Send>) -> Self {
        Self { writer: Mutex::new(w) }
    }

    /// Sink appending to a file, created if missing
    pub fn file(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::writer(Box::new(append_file(path.as_ref())?)))
    }

    /// Replace the active writer. Previously written records stay where they
    /// are; subsequent writes go to `w`.
    pub fn swap(&self, w: Box<dyn Write + Send>) {
        *self.lock() = w;
    }

    /// Write one serialized record followed by a newline, flushing so tail
    /// readers see complete lines.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        // Recover the writer even if a previous holder panicked mid-line.
        self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Open a file for appending, creating it if it does not exist.
pub(crate) fn append_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
