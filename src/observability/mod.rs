//! Tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Spans land in `~/.local/share/zellij/cinesearch/cinesearch-otlp.json`, one
//! OTLP JSON document per line. The file rotates at 10MB and keeps three
//! backups.
//!
//! The filter comes from the `trace_level` plugin option (an `EnvFilter`
//! directive such as `debug` or `cinesearch::api=trace`), defaulting to
//! `info`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON span serialization
//! - [`file_writer`]: Size-rotated file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, DEFAULT_TRACE_LEVEL, SERVICE_NAME};
