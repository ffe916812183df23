mod support;

use std::sync::Arc;

use domain::{AssetFilter, Department};
use patrimony_client::{InMemoryBackend, PatrimonyClient};
use patrimony_telemetry::metrics;
use patrimony_view::{AssetListScreen, LoadOutcome, RefreshCounter};
use support::{GatedTransport, fields, logged_in_with};

#[tokio::test]
async fn older_response_does_not_overwrite_newer_state() {
    let backend = Arc::new(InMemoryBackend::with_default_admin());
    let (gated, open) = GatedTransport::new(backend.clone());
    let gated = Arc::new(gated);
    let harness = logged_in_with(gated.clone(), backend.clone()).await;
    let client = PatrimonyClient::new(harness.executor.clone());

    // 闸门只拦第一个请求，先用它发起旧的全量列表。
    let list = Arc::new(AssetListScreen::new(client.clone(), RefreshCounter::new()));
    let slow = tokio::spawn({
        let list = list.clone();
        async move { list.refresh().await }
    });
    gated.entered.notified().await;

    client.create(&fields("A", "health")).await.expect("create");
    client.create(&fields("B", "culture")).await.expect("create");
    let outcome = list
        .set_filter(AssetFilter::new(Some(Department::Health), None))
        .await;
    assert_eq!(outcome, LoadOutcome::Loaded);

    let _ = open.send(());
    assert_eq!(slow.await.expect("join"), LoadOutcome::Discarded);

    let state = list.state();
    let records = state.data.expect("records");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].plate, "A");
    assert!(metrics().snapshot().stale_responses_discarded >= 1);
}
