use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder, HistogramVec,
    IntCounter, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static REMOTE_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "cliente_gateway_remote_requests_total",
        "Total requests sent to the clientes resource",
        &["operation"]
    )
    .expect("register remote_requests_total")
});

pub static REMOTE_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "cliente_gateway_remote_failures_total",
        "Remote calls that ended in an error, by status (0 for transport errors)",
        &["operation", "status"]
    )
    .expect("register remote_failures_total")
});

pub static LOCAL_SHORT_CIRCUITS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "cliente_gateway_local_short_circuits_total",
        "Calls answered locally without contacting the remote"
    )
    .expect("register local_short_circuits_total")
});

pub static REMOTE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "cliente_gateway_remote_duration_seconds",
        "Remote call duration in seconds",
        &["operation"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("register remote_duration")
});

pub(crate) fn record_failure(operation: &str, status: Option<u16>) {
    let status = status.unwrap_or(0).to_string();
    REMOTE_FAILURES_TOTAL.with_label_values(&[operation, status.as_str()]).inc();
}

/// Render the default registry in the Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return format!("# metrics encode error: {e}\n");
    }
    String::from_utf8(buffer).unwrap_or_default()
}
