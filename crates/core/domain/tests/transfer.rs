use domain::{AssetRecord, AssetStatus, Department, DocumentRef, TransferRequest};

fn record(department: Department) -> AssetRecord {
    AssetRecord {
        id: "asset-1".to_string(),
        plate: "ADM001".to_string(),
        name: "Computador".to_string(),
        description: None,
        acquisition_date: None,
        value: 2500.0,
        department,
        status: AssetStatus::Active,
        image_url: None,
        invoice: DocumentRef::default(),
        commitment: DocumentRef::default(),
        denf_se: DocumentRef::default(),
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn transfer_to_same_department_rejected() {
    let err = TransferRequest::new(&record(Department::Administration), "administration", "move")
        .expect_err("same department");
    assert_eq!(err.field, "to_department");
}

#[test]
fn transfer_requires_reason() {
    let err = TransferRequest::new(&record(Department::Administration), "health", "   ")
        .expect_err("reason");
    assert_eq!(err.field, "reason");
}

#[test]
fn transfer_requires_destination() {
    let err = TransferRequest::new(&record(Department::Health), "", "reorganização")
        .expect_err("destination");
    assert_eq!(err.field, "to_department");
}

#[test]
fn transfer_rejects_unknown_destination() {
    assert!(TransferRequest::new(&record(Department::Health), "space", "x").is_err());
}

#[test]
fn transfer_builds_from_record() {
    let request = TransferRequest::new(&record(Department::Administration), " health ", " needed ")
        .expect("request");
    assert_eq!(request.asset_id, "asset-1");
    assert_eq!(request.from_department, Department::Administration);
    assert_eq!(request.to_department, Department::Health);
    assert_eq!(request.reason, "needed");
}
