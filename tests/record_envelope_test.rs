use std::sync::Arc;

use agrirecords::app_context::{AppContext, RecordPayload};
use agrirecords::auth::RequestSession;
use agrirecords::config::AppConfig;
use agrirecords::database::entities::{activity_logs, company_profiles, farmer_profiles};
use agrirecords::database::test_utils::setup_test_db;
use agrirecords::errors::CoreErrorKind;
use agrirecords::services::{ActivityLogFilter, ListQuery};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};

async fn setup_app() -> AppContext {
    let db = setup_test_db().await;
    AppContext::new(db, Arc::new(AppConfig::default()))
}

fn payload(value: Value) -> RecordPayload {
    match value {
        Value::Object(map) => RecordPayload::Plain(map),
        other => panic!("payload must be an object, got {}", other),
    }
}

fn farmer(reg_no: &str, name: &str) -> RecordPayload {
    payload(json!({
        "rocbnRegNo": reg_no,
        "farmerName": name,
        "district": "Tutong",
        "farmArea": 2.5,
    }))
}

#[tokio::test]
async fn create_stamps_envelope() {
    let app = setup_app().await;
    let session = RequestSession::Anonymous;

    let created = app
        .create_record::<farmer_profiles::Entity>(&session, farmer("RB-001", "Awang Ahmad"))
        .await
        .expect("create farmer");

    assert!(uuid::Uuid::parse_str(&created.uuid).is_ok());
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.deleted_at, "");
    assert!(created.deleted_by.is_none());
    assert_eq!(created.created_by["username"], "system");
    assert_eq!(created.farm_area, 2.5);
    assert_eq!(created.ic_no, "");

    let second = app
        .create_record::<farmer_profiles::Entity>(&session, farmer("RB-002", "Dayang Siti"))
        .await
        .expect("create second farmer");
    assert_ne!(created.uuid, second.uuid);
}

#[tokio::test]
async fn update_bumps_updated_at_only() {
    let app = setup_app().await;
    let session = RequestSession::Anonymous;

    let created = app
        .create_record::<farmer_profiles::Entity>(&session, farmer("RB-010", "Awang Ahmad"))
        .await
        .expect("create farmer");

    let updated = app
        .update_record::<farmer_profiles::Entity>(
            &session,
            Some(&created.uuid),
            payload(json!({
                "rocbnRegNo": "RB-010",
                "farmerName": "Awang Ahmad bin Ali",
            })),
        )
        .await
        .expect("update farmer");

    assert_eq!(updated.uuid, created.uuid);
    assert_eq!(updated.farmer_name, "Awang Ahmad bin Ali");
    assert_eq!(updated.district, "Tutong");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_requires_required_fields() {
    let app = setup_app().await;
    let session = RequestSession::Anonymous;

    let created = app
        .create_record::<farmer_profiles::Entity>(&session, farmer("RB-011", "Awang Ahmad"))
        .await
        .expect("create farmer");

    let err = app
        .update_record::<farmer_profiles::Entity>(
            &session,
            Some(&created.uuid),
            payload(json!({ "district": "Belait" })),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Validation);
    assert!(err.message().starts_with("Please fill the"));
}

#[tokio::test]
async fn delete_is_soft() {
    let app = setup_app().await;
    let session = RequestSession::Anonymous;

    let kept = app
        .create_record::<farmer_profiles::Entity>(&session, farmer("RB-020", "Awang Ahmad"))
        .await
        .expect("create farmer");
    let removed = app
        .create_record::<farmer_profiles::Entity>(&session, farmer("RB-021", "Dayang Siti"))
        .await
        .expect("create farmer");

    let deleted = app
        .delete_record::<farmer_profiles::Entity>(&session, &removed.uuid)
        .await
        .expect("delete farmer");
    assert!(!deleted.deleted_at.is_empty());
    assert!(deleted.deleted_by.is_some());

    let listed = app
        .list_records::<farmer_profiles::Entity>(&session, &ListQuery::default())
        .await
        .expect("list farmers");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].uuid, kept.uuid);

    let count = app
        .count_records::<farmer_profiles::Entity>(&session, None)
        .await
        .expect("count farmers");
    assert_eq!(count, 1);

    let fetched = app
        .get_record::<farmer_profiles::Entity>(&session, &removed.uuid)
        .await
        .expect("get farmer")
        .expect("soft-deleted record still fetchable");
    assert_eq!(fetched.deleted_at, deleted.deleted_at);

    let err = app
        .delete_record::<farmer_profiles::Entity>(&session, &removed.uuid)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::NotFound);
}

#[tokio::test]
async fn duplicate_reg_no_is_rejected_without_write() {
    let app = setup_app().await;
    let session = RequestSession::Anonymous;

    app.create_record::<farmer_profiles::Entity>(&session, farmer("RB-030", "Awang Ahmad"))
        .await
        .expect("create farmer");

    let err = app
        .create_record::<farmer_profiles::Entity>(&session, farmer("RB-030", "Someone Else"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Conflict);
    assert_eq!(err.message(), "Duplicate ROCBN Reg. No");

    let rows = farmer_profiles::Entity::find()
        .count(app.db())
        .await
        .expect("count rows");
    assert_eq!(rows, 1);

    let logs = activity_logs::Entity::find()
        .count(app.db())
        .await
        .expect("count logs");
    assert_eq!(logs, 1);
}

#[tokio::test]
async fn reg_no_of_deleted_record_can_be_reused() {
    let app = setup_app().await;
    let session = RequestSession::Anonymous;

    let first = app
        .create_record::<farmer_profiles::Entity>(&session, farmer("RB-040", "Awang Ahmad"))
        .await
        .expect("create farmer");
    app.delete_record::<farmer_profiles::Entity>(&session, &first.uuid)
        .await
        .expect("delete farmer");

    let again = app
        .create_record::<farmer_profiles::Entity>(&session, farmer("RB-040", "Awang Ahmad"))
        .await
        .expect("reuse registration number");
    assert_ne!(again.uuid, first.uuid);
}

#[tokio::test]
async fn missing_company_reference_is_rejected() {
    let app = setup_app().await;
    let session = RequestSession::Anonymous;

    let err = app
        .create_record::<farmer_profiles::Entity>(
            &session,
            payload(json!({
                "rocbnRegNo": "RB-050",
                "farmerName": "Awang Ahmad",
                "companyUUID": uuid::Uuid::new_v4().to_string(),
            })),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::NotFound);

    let company = app
        .create_record::<company_profiles::Entity>(
            &session,
            payload(json!({ "companyName": "Syarikat Tani Maju" })),
        )
        .await
        .expect("create company");

    let linked = app
        .create_record::<farmer_profiles::Entity>(
            &session,
            payload(json!({
                "rocbnRegNo": "RB-050",
                "farmerName": "Awang Ahmad",
                "companyUUID": company.uuid,
            })),
        )
        .await
        .expect("create farmer with company");
    assert_eq!(linked.company_uuid, company.uuid);
}

#[tokio::test]
async fn every_mutation_is_audited() {
    let app = setup_app().await;
    let session = RequestSession::Anonymous;

    let created = app
        .create_record::<farmer_profiles::Entity>(&session, farmer("RB-060", "Awang Ahmad"))
        .await
        .expect("create farmer");
    app.update_record::<farmer_profiles::Entity>(
        &session,
        Some(&created.uuid),
        farmer("RB-060", "Awang Ahmad bin Ali"),
    )
    .await
    .expect("update farmer");
    app.delete_record::<farmer_profiles::Entity>(&session, &created.uuid)
        .await
        .expect("delete farmer");

    let filter = ActivityLogFilter {
        record_uuid: Some(created.uuid.clone()),
        ..ActivityLogFilter::default()
    };
    let logs = app
        .list_activity_logs(&session, &filter, &ListQuery::default())
        .await
        .expect("list activity");

    let mut actions: Vec<_> = logs.iter().map(|log| log.action.as_str()).collect();
    actions.sort_unstable();
    assert_eq!(actions, vec!["CREATE", "DELETE", "UPDATE"]);
    assert!(logs.iter().all(|log| log.table_name == "farmer_profiles"));

    let update = logs
        .iter()
        .find(|log| log.action == "UPDATE")
        .expect("update entry");
    assert_eq!(update.data_snapshot["farmerName"], "Awang Ahmad bin Ali");

    let count = app
        .count_activity_logs(&session, &filter)
        .await
        .expect("count activity");
    assert_eq!(count, 3);
}

#[tokio::test]
async fn search_and_paging() {
    let app = setup_app().await;
    let session = RequestSession::Anonymous;

    for (reg_no, name) in [
        ("RB-101", "Awang Ahmad"),
        ("RB-102", "Dayang Siti"),
        ("RB-103", "Awang Hamid"),
    ] {
        app.create_record::<farmer_profiles::Entity>(&session, farmer(reg_no, name))
            .await
            .expect("create farmer");
    }

    let awang = ListQuery::new(None, None, Some("awang".to_string()));
    let found = app
        .list_records::<farmer_profiles::Entity>(&session, &awang)
        .await
        .expect("search farmers");
    assert_eq!(found.len(), 2);
    assert_eq!(
        app.count_records::<farmer_profiles::Entity>(&session, Some("awang"))
            .await
            .expect("count search"),
        2
    );

    let page = app
        .list_records::<farmer_profiles::Entity>(&session, &ListQuery::new(Some(1), Some(1), None))
        .await
        .expect("page farmers");
    assert_eq!(page.len(), 1);
}
