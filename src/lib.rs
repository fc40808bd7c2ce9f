//! Structured JSON logging with channel-tagged records
//!
//! Provides a [`Journal`] context that formats ordered, timestamped JSON
//! records and writes them, one object per line, to a configurable sink:
//! - Stdout (default)
//! - Any `Write + Send` writer
//! - File (append mode, created if missing)
//!
//! Every record carries the journal's `service` label and a capture-time
//! `ts`. Emit operations never fail the caller; delivery is reported as an
//! [`Outcome`] the caller may inspect or ignore.

mod error;
mod journal;
mod record;
mod sink;

pub use error::Error;
pub use journal::{Journal, Outcome};
pub use record::Value;
pub use sink::Sink;
