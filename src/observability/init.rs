//! Subscriber setup.
//!
//! Wires the `tracing` macros used throughout the crate to the OpenTelemetry
//! SDK, filtered by the `trace_level` plugin option, with spans ending up in
//! the rotating trace file.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name attached to every span.
pub const SERVICE_NAME: &str = "Cinesearch";

/// Filter used when `trace_level` is unset or invalid.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber exporting spans to the trace file.
///
/// The pipeline:
/// 1. Filters spans with the `trace_level` directive
/// 2. Hands them to the OpenTelemetry layer
/// 3. Serializes each ended span to OTLP JSON
/// 4. Appends it to the rotating trace file
///
/// # Parameters
///
/// * `config` - Plugin configuration; only `trace_level` is read
///
/// # Trace Level Resolution
///
/// 1. `config.trace_level` if set and it parses as an `EnvFilter` directive
/// 2. Otherwise [`DEFAULT_TRACE_LEVEL`]
///
/// # File Location
///
/// Traces go to `/data/cinesearch-otlp.json` inside the Zellij sandbox,
/// which maps to `~/.local/share/zellij/cinesearch/cinesearch-otlp.json` on
/// the host.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Installs nothing if the directory cannot be created
/// - Only the first call installs a subscriber; later calls are no-ops
///
/// # Example
///
/// ```rust,no_run
/// use cinesearch::observability::init_tracing;
/// use cinesearch::Config;
///
/// let config = Config {
///     trace_level: Some("cinesearch::api=debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("visible in the trace file");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(crate::infrastructure::trace_file(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter(config.trace_level.as_deref()))
        .with(otel_layer);

    if subscriber.try_init().is_ok() {
        tracing::info!(
            trace_level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL),
            "tracing initialized"
        );
    }
}

/// Builds the filter for `level`, falling back to [`DEFAULT_TRACE_LEVEL`] when
/// the directive does not parse.
fn env_filter(level: Option<&str>) -> EnvFilter {
    level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_TRACE_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_directives() {
        assert_eq!(env_filter(Some("debug")).to_string(), "debug");
        assert_eq!(env_filter(Some("cinesearch::api=trace")).to_string(), "cinesearch::api=trace");
    }

    #[test]
    fn filter_falls_back_to_info() {
        assert_eq!(env_filter(None).to_string(), "info");
        assert_eq!(env_filter(Some("cinesearch=loud")).to_string(), "info");
    }
}
