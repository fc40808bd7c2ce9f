//! Error types for sink and log-file configuration

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by configuration operations.
///
/// Emit operations never return these; write failures there degrade to
/// [`Outcome::Dropped`](crate::Outcome).
#[derive(Debug, Error)]
pub enum Error {
    /// Both the primary and the fallback log file path were empty.
    #[error("no log file path: both primary and fallback are empty")]
    InvalidConfiguration,

    /// The log file could not be created.
    #[error("unable to create log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
