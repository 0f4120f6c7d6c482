//! Tracing setup for the API server.
//!
//! Logs go to stdout through `tracing-subscriber` (JSON unless
//! `LOG_FORMAT=pretty`). When `OTEL_EXPORTER_OTLP_ENDPOINT` is set, spans are
//! also exported over OTLP/gRPC; the returned provider must be shut down on
//! exit to flush them.

use std::ffi::OsString;

use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::ExporterBuildError;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LogFormat;

/// Installs the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_tracing(format: LogFormat, service_name: &str) -> Option<SdkTracerProvider> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().pretty().boxed(),
    };

    let (provider, exporter_error) =
        match otlp_tracer_provider(std::env::var_os("OTEL_EXPORTER_OTLP_ENDPOINT"), service_name) {
            Some(Ok(provider)) => (Some(provider), None),
            Some(Err(err)) => (None, Some(err)),
            None => (None, None),
        };
    let otel_layer = provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(service_name.to_owned()))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();

    if let Some(err) = exporter_error {
        warn!(error = %err, "failed to build OTLP span exporter; spans will not be exported");
    }

    provider
}

/// Builds the OTLP tracer provider when an endpoint is configured.
fn otlp_tracer_provider(
    endpoint: Option<OsString>,
    service_name: &str,
) -> Option<Result<SdkTracerProvider, ExporterBuildError>> {
    endpoint.map(|_| build_tracer_provider(service_name))
}

fn build_tracer_provider(service_name: &str) -> Result<SdkTracerProvider, ExporterBuildError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;
    let resource = Resource::builder_empty()
        .with_attributes(vec![KeyValue::new("service.name", service_name.to_owned())])
        .build();
    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build())
}
