//! Prometheus metrics for the device API (default registry).

use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter_vec, register_int_gauge, Encoder, IntCounterVec, IntGauge, TextEncoder,
};

pub static DEVICE_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "device_api_operations_total",
        "Device operations handled, by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register device_api_operations_total")
});

pub static DEVICES_STORED: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("device_api_devices_stored", "Devices currently held in the store")
        .expect("register device_api_devices_stored")
});

pub fn record(operation: &str, outcome: &str) {
    DEVICE_OPERATIONS_TOTAL.with_label_values(&[operation, outcome]).inc();
}

pub fn set_stored(count: usize) {
    DEVICES_STORED.set(i64::try_from(count).unwrap_or(i64::MAX));
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    text_response(buffer)
}

fn text_response(buffer: Vec<u8>) -> (StatusCode, String) {
    match String::from_utf8(buffer) {
        Ok(text) => (StatusCode::OK, text),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_operations_show_up_in_output() {
        record("get", "not_found");
        set_stored(3);
        let (status, body) = encode_metrics();
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("device_api_operations_total"));
        assert!(body.contains("device_api_devices_stored"));
    }

    #[test]
    fn non_utf8_output_is_a_server_error() {
        let (status, body) = text_response(vec![0xff, 0xfe]);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("metrics encode error"));

        let (status, body) = text_response(b"device_api_devices_stored 1\n".to_vec());
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "device_api_devices_stored 1\n");
    }
}
