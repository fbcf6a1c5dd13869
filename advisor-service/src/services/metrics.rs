//! Prometheus metrics for the advisor service.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

// HTTP metrics
pub static HTTP_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static HTTP_REQUEST_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

// Completion metrics
pub static COMPLETION_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static COMPLETION_TOKENS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static PROVIDER_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Must be called once at startup; later calls
/// leave the first registry in place.
pub fn init_metrics() {
    let registry = Registry::new();

    let http_requests = IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests"),
        &["method", "path", "status"],
    )
    .expect("Failed to create http_requests_total metric");

    let http_duration = HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["method", "path", "status"],
    )
    .expect("Failed to create http_request_duration_seconds metric");

    let completion_requests = IntCounterVec::new(
        Opts::new("completion_requests_total", "Total completion requests"),
        &["model", "outcome"],
    )
    .expect("Failed to create completion_requests_total metric");

    let completion_tokens = IntCounterVec::new(
        Opts::new("completion_tokens_total", "Total tokens processed"),
        &["model", "type"], // type: input, output
    )
    .expect("Failed to create completion_tokens_total metric");

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "provider_latency_seconds",
            "Completion provider latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 15.0, 30.0]),
        &["provider", "model"],
    )
    .expect("Failed to create provider_latency_seconds metric");

    let provider_errors = IntCounterVec::new(
        Opts::new("provider_errors_total", "Total completion provider errors"),
        &["provider", "error_type"],
    )
    .expect("Failed to create provider_errors_total metric");

    registry
        .register(Box::new(http_requests.clone()))
        .expect("Failed to register http_requests_total");
    registry
        .register(Box::new(http_duration.clone()))
        .expect("Failed to register http_request_duration_seconds");
    registry
        .register(Box::new(completion_requests.clone()))
        .expect("Failed to register completion_requests_total");
    registry
        .register(Box::new(completion_tokens.clone()))
        .expect("Failed to register completion_tokens_total");
    registry
        .register(Box::new(provider_latency.clone()))
        .expect("Failed to register provider_latency_seconds");
    registry
        .register(Box::new(provider_errors.clone()))
        .expect("Failed to register provider_errors_total");

    // Initialize globals
    let _ = REGISTRY.set(registry);
    let _ = HTTP_REQUESTS_TOTAL.set(http_requests);
    let _ = HTTP_REQUEST_DURATION_SECONDS.set(http_duration);
    let _ = COMPLETION_REQUESTS_TOTAL.set(completion_requests);
    let _ = COMPLETION_TOKENS_TOTAL.set(completion_tokens);
    let _ = PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = PROVIDER_ERRORS_TOTAL.set(provider_errors);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

// Helper functions for recording metrics

/// Record a completed HTTP request.
pub fn record_http_request(method: &str, path: &str, status: &str, duration_secs: f64) {
    if let Some(counter) = HTTP_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[method, path, status]).inc();
    }
    if let Some(histogram) = HTTP_REQUEST_DURATION_SECONDS.get() {
        histogram
            .with_label_values(&[method, path, status])
            .observe(duration_secs);
    }
}

/// Record a completion request by outcome.
pub fn record_completion(model: &str, outcome: &str) {
    if let Some(counter) = COMPLETION_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[model, outcome]).inc();
    }
}

/// Record token usage reported by the provider.
pub fn record_tokens(model: &str, input_tokens: u32, output_tokens: u32) {
    if let Some(counter) = COMPLETION_TOKENS_TOTAL.get() {
        counter
            .with_label_values(&[model, "input"])
            .inc_by(input_tokens as u64);
        counter
            .with_label_values(&[model, "output"])
            .inc_by(output_tokens as u64);
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(histogram) = PROVIDER_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, error_type: &str) {
    if let Some(counter) = PROVIDER_ERRORS_TOTAL.get() {
        counter.with_label_values(&[provider, error_type]).inc();
    }
}
