//! The journal context and its emit operations
//!
//! A [`Journal`] couples the service label with the active sink and exposes
//! channel-tagged emit operations. Emitting is fire-and-forget: a failed
//! serialization or write is reported as [`Outcome::Dropped`] (plus a
//! `log::warn!` diagnostic) and never panics or errors out of the caller.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use http::{HeaderMap, Request};
use serde_json::json;

use crate::error::Error;
use crate::record::{Record, Value};
use crate::sink::{self, Sink};

/// Whether an emitted record reached the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The record was written to the sink
    Delivered,
    /// The record was discarded (write failure, or a disabled debug gate)
    Dropped,
}

impl Outcome {
    /// True when the record was written to the sink
    pub fn is_delivered(self) -> bool {
        matches!(self, Outcome::Delivered)
    }
}

/// Logger context: the service label plus the sink records are written to.
///
/// Construct one at startup and share it (typically via `Arc`) with every
/// component that logs. All methods take `&self`; the sink serializes
/// concurrent emitters internally.
pub struct Journal {
    service: String,
    sink: Sink,
}

impl Journal {
    /// Create a journal writing to standard output
    pub fn new(service: impl Into<String>) -> Self {
        Self::with_sink(service, Sink::stdout())
    }

    /// Create a journal writing to the given sink
    pub fn with_sink(service: impl Into<String>, sink: Sink) -> Self {
        Self { service: service.into(), sink }
    }

    /// The service label stamped into every record
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Redirect log output to an arbitrary writer.
    pub fn set_writer(&self, w: Box<dyn Write + Send>) {
        self.sink.swap(w);
        log::debug!("journal sink replaced by writer");
    }

    /// Redirect log output to a file, created if missing and opened for
    /// append. On failure the error is reported through the current sink and
    /// the current sink stays active.
    pub fn set_log_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match sink::append_file(path) {
            Ok(file) => {
                self.sink.swap(Box::new(file));
                log::debug!("journal sink replaced by file: {}", path.display());
            }
            Err(e) => {
                self.log_error(&format!("error opening log file {}: {}", path.display(), e));
            }
        }
    }

    /// Pick the log file path: `primary` if non-empty, else `fallback`.
    ///
    /// The primary path usually comes from an environment variable, so a
    /// fallback is required in case it is unset. If the resolved path does
    /// not exist yet, a warning record is emitted and an empty file is
    /// created there, making a later [`set_log_file`](Self::set_log_file)
    /// deterministic.
    pub fn resolve_log_file(&self, primary: &str, fallback: &str) -> Result<PathBuf, Error> {
        if primary.is_empty() && fallback.is_empty() {
            return Err(Error::InvalidConfiguration);
        }

        let path = PathBuf::from(if primary.is_empty() { fallback } else { primary });
        if !path.exists() {
            self.log_channel(
                "warning",
                [Value::from(format!("log file {} does not exist", path.display()))],
            );
            File::create(&path).map_err(|source| Error::Io { path: path.clone(), source })?;
        }
        Ok(path)
    }

    /// Log method, URL, and headers of an inbound HTTP request.
    pub fn log_request<B>(&self, req: &Request<B>) -> Outcome {
        self.emit(self.request_record(req))
    }

    /// Log an inbound HTTP request together with its correlation UUID.
    pub fn log_request_uuid<B>(&self, req: &Request<B>, uuid: &str) -> Outcome {
        let mut record = self.request_record(req);
        record.field("UUID", json!(uuid));
        self.emit(record)
    }

    fn request_record<B>(&self, req: &Request<B>) -> Record {
        let mut record = Record::new();
        record
            .field("channel", json!("request"))
            .field("service", json!(self.service))
            .field("method", json!(req.method().as_str()))
            .field("url", json!(req.uri().to_string()))
            .field("headers", header_fields(req.headers()))
            .stamp();
        record
    }

    /// Log a list of values to an arbitrary channel.
    pub fn log_channel<I>(&self, channel: &str, values: I) -> Outcome
    where
        I: IntoIterator<Item = Value>,
    {
        let message: Vec<serde_json::Value> = values.into_iter().map(Into::into).collect();
        let mut record = Record::new();
        record
            .field("channel", json!(channel))
            .field("service", json!(self.service))
            .field("message", serde_json::Value::Array(message))
            .stamp();
        self.emit(record)
    }

    /// Log an error message to the error channel.
    pub fn log_error(&self, message: &str) -> Outcome {
        self.log_error_with_info(message, std::iter::empty())
    }

    /// Log an error message with extra pairs appended after the standard
    /// fields, in caller order.
    pub fn log_error_with_info<'a, I>(&self, message: &str, info: I) -> Outcome
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let mut record = Record::new();
        record
            .field("channel", json!("error"))
            .field("service", json!(self.service))
            .stamp()
            .field("message", json!(message));
        for (key, value) in info {
            record.extra(key, value);
        }
        self.emit(record)
    }

    /// Log an informational message.
    pub fn log_info(&self, message: &str) -> Outcome {
        let mut record = Record::new();
        record
            .field("channel", json!("information"))
            .field("service", json!(self.service))
            .field("message", json!(message))
            .stamp();
        self.emit(record)
    }

    /// Log a list of values at debug level. Emits only while the `DEBUG`
    /// environment variable is set to a non-empty value, checked per call.
    pub fn log_debug<I>(&self, values: I) -> Outcome
    where
        I: IntoIterator<Item = Value>,
    {
        if !debug_enabled() {
            return Outcome::Dropped;
        }
        let message: Vec<serde_json::Value> = values.into_iter().map(Into::into).collect();
        let mut record = Record::new();
        record
            .field("level", json!("DEBUG"))
            .field("service", json!(self.service))
            .field("message", serde_json::Value::Array(message))
            .stamp();
        self.emit(record)
    }

    /// Log background-worker diagnostics to the worker channel.
    pub fn log_worker<I>(&self, values: I) -> Outcome
    where
        I: IntoIterator<Item = Value>,
    {
        self.log_channel("worker", values)
    }

    /// Log a named event to the event channel.
    pub fn log_event(&self, event_name: &str) -> Outcome {
        let mut record = Record::new();
        record
            .field("channel", json!("event"))
            .field("service", json!(self.service))
            .field("event", json!(event_name))
            .stamp();
        self.emit(record)
    }

    /// Log a named event with extra pairs appended after the standard
    /// fields, in caller order.
    pub fn log_event_with_info<'a, I>(&self, event_name: &str, info: I) -> Outcome
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let mut record = Record::new();
        record
            .field("channel", json!("event"))
            .field("service", json!(self.service))
            .stamp()
            .field("event", json!(event_name));
        for (key, value) in info {
            record.extra(key, value);
        }
        self.emit(record)
    }

    fn emit(&self, record: Record) -> Outcome {
        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                log::warn!("dropping log record: serialization failed: {}", e);
                return Outcome::Dropped;
            }
        };
        match self.sink.write_line(&line) {
            Ok(()) => Outcome::Delivered,
            Err(e) => {
                log::warn!("dropping log record: sink write failed: {}", e);
                Outcome::Dropped
            }
        }
    }
}

/// Header map as a JSON object of header-name → list of values.
fn header_fields(headers: &HeaderMap) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for key in headers.keys() {
        let values: Vec<serde_json::Value> = headers
            .get_all(key)
            .iter()
            .map(|value| json!(String::from_utf8_lossy(value.as_bytes())))
            .collect();
        map.insert(key.as_str().to_string(), serde_json::Value::Array(values));
    }
    serde_json::Value::Object(map)
}

fn debug_enabled() -> bool {
    std::env::var_os("DEBUG").is_some_and(|v| !v.is_empty())
}
