use crate::utils::{Method, Metrics, Status};
use opentelemetry::{
    Context, KeyValue, global,
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};

pub struct TracingContext {
    pub cx: Context,
    pub start_time: Instant,
}

/// Opens a span per service operation and records its outcome in the
/// service's request metrics.
#[derive(Clone)]
pub struct OperationTracer {
    tracer_name: &'static str,
    metrics: Arc<Mutex<Metrics>>,
}

impl OperationTracer {
    pub fn new(tracer_name: &'static str, metrics: Arc<Mutex<Metrics>>) -> Self {
        Self {
            tracer_name,
            metrics,
        }
    }

    pub fn start(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = global::tracer(self.tracer_name);
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

    pub async fn complete_success(&self, ctx: &TracingContext, method: Method, message: &str) {
        self.complete(ctx, method, true, message).await;
    }

    pub async fn complete_error(&self, ctx: &TracingContext, method: Method, message: &str) {
        self.complete(ctx, method, false, message).await;
    }

    /// Completes the span according to the outcome of the operation.
    pub async fn finish<T, E: std::fmt::Display>(
        &self,
        ctx: &TracingContext,
        method: Method,
        result: &Result<T, E>,
        success_message: &str,
    ) {
        match result {
            Ok(_) => self.complete_success(ctx, method, success_message).await,
            Err(err) => self.complete_error(ctx, method, &err.to_string()).await,
        }
    }

    async fn complete(&self, ctx: &TracingContext, method: Method, is_success: bool, message: &str) {
        let (status_str, status) = if is_success {
            ("SUCCESS", Status::Success)
        } else {
            ("ERROR", Status::Error)
        };
        let elapsed = ctx.start_time.elapsed().as_secs_f64();

        ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.metrics.lock().await.record(method, status, elapsed);

        ctx.cx.span().end();
    }
}
