//! Invocation tracing
//!
//! A [`Tracer`] decides which span an invocation runs inside and how a failed
//! invocation is recorded. `<dyn Tracer>::wrap` drives a call inside
//! that span and hands back exactly what the call produced, so tracing can
//! never change the result of an invocation.

use std::error::Error as StdError;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{Instrument, Span, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppConfig;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,visit_counter=debug";

/// Observability hooks around a handler invocation
pub trait Tracer: Send + Sync {
    /// Open the span the invocation runs inside
    fn span(&self, operation: &'static str) -> Span;

    /// Record a failed invocation. Called inside the invocation span.
    fn on_error(&self, _error: &(dyn StdError + 'static)) {}
}

impl dyn Tracer {
    /// Run `call` inside this tracer's span and return its outcome untouched
    pub async fn wrap<F, T, E>(&self, operation: &'static str, call: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: StdError + 'static,
    {
        let span = self.span(operation);
        let outcome = call.instrument(span.clone()).await;

        if let Err(err) = &outcome {
            span.in_scope(|| self.on_error(err));
        }

        outcome
    }
}

/// Emits one `invocation` span per call, tagged with the service name
#[derive(Debug)]
pub struct SpanTracer {
    service_name: String,
    cold_start: AtomicBool,
}

impl SpanTracer {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            cold_start: AtomicBool::new(true),
        }
    }

    /// True for the first invocation served by this execution environment
    fn take_cold_start(&self) -> bool {
        self.cold_start.swap(false, Ordering::Relaxed)
    }
}

impl Tracer for SpanTracer {
    fn span(&self, operation: &'static str) -> Span {
        tracing::info_span!(
            "invocation",
            service = %self.service_name,
            operation,
            cold_start = self.take_cold_start(),
        )
    }

    fn on_error(&self, error: &(dyn StdError + 'static)) {
        tracing::error!(error = %error, "Invocation failed");
    }
}

/// Tracer that records nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn span(&self, _operation: &'static str) -> Span {
        Span::none()
    }
}

/// Pick the tracer the configuration asks for
pub fn from_config(config: &AppConfig) -> Box<dyn Tracer> {
    if config.tracing_enabled {
        Box::new(SpanTracer::new(config.service_name.clone()))
    } else {
        Box::new(NoopTracer)
    }
}

/// Log subscriber writing plain text without timestamps to `writer`
///
/// The Lambda log sink adds its own timestamps.
pub fn subscriber<W>(writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .without_time()
                .with_target(false)
                .with_writer(writer),
        )
}

/// Install [`subscriber`] as the process-wide default
pub fn init_subscriber<W>(writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    subscriber(writer).init();
}
