use patrimony_telemetry::{
    MetricsSnapshot, metrics, record_auth_expiration, record_request_latency_ms,
    record_request_sent, record_skipped_record, record_stale_response,
};

#[test]
fn counters_only_increase() {
    let before = metrics().snapshot();
    record_request_sent();
    record_request_sent();
    record_auth_expiration();
    record_stale_response();
    record_skipped_record();
    record_request_latency_ms(40);
    let after = metrics().snapshot();

    assert!(after.requests_sent >= before.requests_sent + 2);
    assert!(after.auth_expirations > before.auth_expirations);
    assert!(after.stale_responses_discarded > before.stale_responses_discarded);
    assert!(after.records_skipped > before.records_skipped);
    assert!(after.request_latency_ms_count > before.request_latency_ms_count);
}

#[test]
fn average_latency_handles_empty() {
    assert_eq!(MetricsSnapshot::default().average_latency_ms(), 0);
    let snapshot = MetricsSnapshot {
        request_latency_ms_total: 90,
        request_latency_ms_count: 3,
        ..MetricsSnapshot::default()
    };
    assert_eq!(snapshot.average_latency_ms(), 30);
}
