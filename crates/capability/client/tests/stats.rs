mod support;

use domain::Department;
use patrimony_client::{PatrimonyClient, StatsAggregator};
use support::{desk, logged_in};

#[tokio::test]
async fn department_counts_sum_to_total() {
    let harness = logged_in().await;
    let client = PatrimonyClient::new(harness.executor.clone());
    let stats = StatsAggregator::new(harness.executor.clone());

    let plates = [
        ("PAT-001", "administration", "active", "150.00"),
        ("PAT-002", "health", "maintenance", "1000"),
        ("PAT-003", "health", "written_off", "50,5"),
    ];
    for (plate, department, status, value) in plates {
        let mut fields = desk();
        fields.plate = plate.to_string();
        fields.department = department.to_string();
        fields.status = status.to_string();
        fields.value = value.to_string();
        client.create(&fields).await.expect("create");
    }

    let snapshot = stats.fetch(None).await.expect("stats");
    assert_eq!(snapshot.total, 3);
    assert_eq!(snapshot.active, 1);
    assert_eq!(snapshot.maintenance, 1);
    assert_eq!(snapshot.written_off, 1);
    assert_eq!(snapshot.department_count_sum(), snapshot.total);
    assert!((snapshot.total_value - 1200.5).abs() < 1e-9);

    let health = stats.fetch(Some(Department::Health)).await.expect("stats");
    assert_eq!(health.total, 2);
    assert_eq!(health.by_department.len(), 1);
    assert_eq!(health.by_department[0].department_kind(), Some(Department::Health));
}

#[tokio::test]
async fn empty_registry_has_zero_stats() {
    let harness = logged_in().await;
    let stats = StatsAggregator::new(harness.executor.clone());
    let snapshot = stats.fetch(None).await.expect("stats");
    assert_eq!(snapshot.total, 0);
    assert!(snapshot.by_department.is_empty());
    assert_eq!(snapshot.share_percent(0), 0.0);
}
