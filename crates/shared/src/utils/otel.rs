use crate::utils::metrics::{Method, Metrics, Status};
use anyhow::{Context as _, Result};
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use opentelemetry_otlp::{LogExporter, MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    Resource, logs::SdkLoggerProvider, metrics::SdkMeterProvider, trace::SdkTracerProvider,
};
use tokio::time::Instant;
use tracing::{error, info};

pub struct Telemetry {
    tracer_provider: SdkTracerProvider,
    meter_provider: SdkMeterProvider,
    logger_provider: SdkLoggerProvider,
}

impl Telemetry {
    /// Wires OTLP exporters for spans, metrics and logs against `otel_endpoint`
    /// and installs the span and meter providers globally.
    pub fn init(service_name: impl Into<String>, otel_endpoint: &str) -> Result<Self> {
        let resource = Resource::builder()
            .with_service_name(service_name.into())
            .build();

        let span_exporter = SpanExporter::builder()
            .with_tonic()
            .with_endpoint(otel_endpoint)
            .build()
            .context("Failed to create span exporter")?;

        let tracer_provider = SdkTracerProvider::builder()
            .with_resource(resource.clone())
            .with_batch_exporter(span_exporter)
            .build();

        global::set_tracer_provider(tracer_provider.clone());

        let metric_exporter = MetricExporter::builder()
            .with_tonic()
            .with_endpoint(otel_endpoint)
            .build()
            .context("Failed to create metric exporter")?;

        let meter_provider = SdkMeterProvider::builder()
            .with_resource(resource.clone())
            .with_periodic_exporter(metric_exporter)
            .build();

        global::set_meter_provider(meter_provider.clone());

        let log_exporter = LogExporter::builder()
            .with_tonic()
            .with_endpoint(otel_endpoint)
            .build()
            .context("Failed to create log exporter")?;

        let logger_provider = SdkLoggerProvider::builder()
            .with_resource(resource)
            .with_batch_exporter(log_exporter)
            .build();

        Ok(Self {
            tracer_provider,
            meter_provider,
            logger_provider,
        })
    }

    pub fn logger_provider(&self) -> &SdkLoggerProvider {
        &self.logger_provider
    }

    pub fn shutdown(self) -> Result<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.tracer_provider.shutdown() {
            errors.push(format!("tracer provider: {e}"));
        }
        if let Err(e) = self.meter_provider.shutdown() {
            errors.push(format!("meter provider: {e}"));
        }
        if let Err(e) = self.logger_provider.shutdown() {
            errors.push(format!("logger provider: {e}"));
        }

        if !errors.is_empty() {
            anyhow::bail!("Failed to shutdown providers:\n{}", errors.join("\n"));
        }

        Ok(())
    }
}

pub struct TracingContext {
    pub cx: Context,
    pub start_time: Instant,
}

/// Span-plus-metrics bookkeeping shared by the service layer. Spans go to the
/// global tracer, which is a no-op when no exporter was configured.
#[derive(Clone)]
pub struct OperationTracer {
    name: &'static str,
    metrics: Metrics,
}

impl OperationTracer {
    pub fn new(name: &'static str, metrics: Metrics) -> Self {
        Self { name, metrics }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer(self.name)
    }

    pub fn start(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    pub fn success(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, Outcome::Success, message);
    }

    pub fn failure(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, Outcome::Failure, message);
    }

    /// Ends an operation whose target record did not exist. Counted as an
    /// error but logged at info level.
    pub fn miss(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, Outcome::Miss, message);
    }

    fn complete(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        outcome: Outcome,
        message: &str,
    ) {
        let (status_str, status) = match outcome {
            Outcome::Success => ("SUCCESS", Status::Success),
            Outcome::Miss => ("NOT_FOUND", Status::Error),
            Outcome::Failure => ("ERROR", Status::Error),
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        match outcome {
            Outcome::Success => info!("✅ Operation completed successfully: {message}"),
            Outcome::Miss => info!("Operation found nothing: {message}"),
            Outcome::Failure => error!("❌ Operation failed: {message}"),
        }

        self.metrics.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}

#[derive(Clone, Copy)]
enum Outcome {
    Success,
    Miss,
    Failure,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus_client::{encoding::text::encode, registry::Registry};

    #[tokio::test]
    async fn completed_operations_are_counted() {
        let mut registry = Registry::default();
        let metrics = Metrics::new();
        metrics.register(&mut registry, "product_query_service");

        let tracer = OperationTracer::new("product-query-service", metrics);
        let ctx = tracer.start("product_find_all", vec![KeyValue::new("component", "product")]);
        tracer.success(&ctx, Method::Get, "Products retrieved");

        let ctx = tracer.start("product_find_by_id", vec![]);
        tracer.miss(&ctx, Method::Get, "Product not found");

        let ctx = tracer.start("product_delete", vec![]);
        tracer.failure(&ctx, Method::Delete, "Database error");

        let mut buffer = String::new();
        encode(&mut buffer, &registry).expect("encode registry");

        assert!(buffer.contains(
            r#"product_query_service_requests_total{method="Get",status="Success"} 1"#
        ));
        assert!(buffer.contains(
            r#"product_query_service_requests_total{method="Get",status="Error"} 1"#
        ));
        assert!(buffer.contains(
            r#"product_query_service_requests_total{method="Delete",status="Error"} 1"#
        ));
    }
}
