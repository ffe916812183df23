use api_contract::{ErrorBody, WireStats, WireTransfer, decode_error_message};

#[test]
fn error_message_prefers_error_field() {
    let body = r#"{"message": "secondary", "error": "Plate already exists"}"#;
    assert_eq!(decode_error_message(400, "Bad Request", body), "Plate already exists");
}

#[test]
fn error_message_falls_back_through_fields() {
    assert_eq!(
        decode_error_message(500, "Internal Server Error", r#"{"details": "db down"}"#),
        "db down"
    );
    assert_eq!(
        decode_error_message(500, "Internal Server Error", r#""Error fetching transfers""#),
        "Error fetching transfers"
    );
    assert_eq!(
        decode_error_message(502, "Bad Gateway", "upstream failed"),
        "upstream failed"
    );
    assert_eq!(decode_error_message(503, "Service Unavailable", "  "), "HTTP 503 Service Unavailable");
}

#[test]
fn object_without_message_uses_raw_body() {
    let body = r#"{"code": 17}"#;
    assert_eq!(decode_error_message(400, "Bad Request", body), body);
}

#[test]
fn error_body_skips_absent_fields() {
    let value = serde_json::to_value(ErrorBody::error("boom")).expect("serialize");
    assert_eq!(value, serde_json::json!({"error": "boom"}));
}

#[test]
fn stats_accept_strings_and_missing_numbers() {
    let body = r#"{
        "total": "3",
        "active": 2,
        "total_value": "1500.5",
        "by_department": [
            {"department": "health", "count": "2", "total_value": 1000},
            {"department": "finance", "count": null}
        ]
    }"#;
    let stats: WireStats = serde_json::from_str(body).expect("parse");
    let snapshot = stats.into_snapshot();
    assert_eq!(snapshot.total, 3);
    assert_eq!(snapshot.active, 2);
    assert_eq!(snapshot.inactive, 0);
    assert_eq!(snapshot.written_off, 0);
    assert_eq!(snapshot.total_value, 1500.5);
    assert_eq!(snapshot.by_department.len(), 2);
    assert_eq!(snapshot.by_department[1].count, 0);
    assert!(snapshot.by_department[1].total_value.is_none());
}

#[test]
fn stats_without_breakdown_is_empty() {
    let stats: WireStats = serde_json::from_str("{}").expect("parse");
    let snapshot = stats.into_snapshot();
    assert_eq!(snapshot.total, 0);
    assert!(snapshot.by_department.is_empty());
}

#[test]
fn transfer_history_decodes() {
    let body = r#"[{
        "id": "t-1",
        "patrimony_id": "a-1",
        "patrimony_name": "Desk",
        "from_department": "administration",
        "to_department": "health",
        "reason": "moved",
        "transferred_by_name": null,
        "transferred_at": "2024-05-02T12:30:00Z"
    }]"#;
    let records = WireTransfer::decode_list(body).expect("decode");
    assert_eq!(records[0].asset_id, "a-1");
    assert_eq!(records[0].asset_name.as_deref(), Some("Desk"));
    assert!(records[0].transferred_by.is_none());
    assert!(records[0].transferred_at.is_some());
}
