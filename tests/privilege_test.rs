use std::io::Cursor;
use std::sync::Arc;

use agrirecords::app_context::{AppContext, RecordPayload};
use agrirecords::auth::RequestSession;
use agrirecords::config::{AppConfig, Environment};
use agrirecords::database::entities::{company_profiles, farmer_profiles, user_roles};
use agrirecords::database::test_utils::setup_test_db;
use agrirecords::errors::CoreErrorKind;
use agrirecords::services::{ListQuery, RegisterUser};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use calamine::{open_workbook_from_rs, Reader, Xlsx};
use serde_json::{json, Value};

fn payload(value: Value) -> RecordPayload {
    match value {
        Value::Object(map) => RecordPayload::Plain(map),
        other => panic!("payload must be an object, got {}", other),
    }
}

async fn seed_role(app: &AppContext, name: &str, privileges: &[&str]) -> user_roles::Model {
    app.create_user_role(
        &RequestSession::Anonymous,
        payload(json!({ "name": name, "privileges": privileges })),
    )
    .await
    .expect("Failed to create role")
}

async fn login_as(app: &AppContext, username: &str, role: &user_roles::Model) -> RequestSession {
    app.register_user(
        &RequestSession::Anonymous,
        RegisterUser {
            username: username.to_string(),
            email: format!("{}@agriculture.gov.bn", username),
            password: "s3cret-pass".to_string(),
            role_uuid: Some(role.uuid.clone()),
        },
    )
    .await
    .expect("Failed to register user");

    let login = app
        .log_in(username, "s3cret-pass")
        .await
        .expect("Failed to log in");
    let header = format!("Bearer {}", login.token);
    RequestSession::from_authorization(Some(&header), app.auth_service().signer())
}

async fn seed_farmer(app: &AppContext) -> farmer_profiles::Model {
    app.create_record::<farmer_profiles::Entity>(
        &RequestSession::Anonymous,
        payload(json!({ "rocbnRegNo": "RB-900", "farmerName": "Awang Ahmad" })),
    )
    .await
    .expect("Failed to create farmer")
}

#[tokio::test]
async fn reads_without_privilege_are_silently_empty() {
    let app = AppContext::new(setup_test_db().await, Arc::new(AppConfig::default()));
    let role = seed_role(&app, "Company clerk", &["CompanyProfile:Read"]).await;
    let session = login_as(&app, "clerk", &role).await;
    assert!(matches!(session, RequestSession::Authenticated(_)));

    let farmer = seed_farmer(&app).await;

    let listed = app
        .list_records::<farmer_profiles::Entity>(&session, &ListQuery::default())
        .await
        .expect("list should not fail");
    assert!(listed.is_empty());

    let count = app
        .count_records::<farmer_profiles::Entity>(&session, None)
        .await
        .expect("count should not fail");
    assert_eq!(count, 0);

    let fetched = app
        .get_record::<farmer_profiles::Entity>(&session, &farmer.uuid)
        .await
        .expect("get should not fail");
    assert!(fetched.is_none());

    let token = app
        .tokenized_list_records::<farmer_profiles::Entity>(&session, &ListQuery::default())
        .await
        .expect("tokenized list should not fail");
    let claims = app.tokenizer().decode(&token).expect("verify list token");
    assert_eq!(claims.get("rows"), Some(&json!([])));

    let encoded = app
        .export_records::<farmer_profiles::Entity>(&session)
        .await
        .expect("export should not fail");
    let bytes = STANDARD.decode(encoded).expect("base64 export");
    let mut xlsx: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).expect("open export");
    let range = xlsx
        .worksheet_range("farmer_profiles")
        .expect("read sheet");
    assert_eq!(range.height(), 1);

    // The granted resource stays readable.
    app.create_record::<company_profiles::Entity>(
        &session,
        payload(json!({ "companyName": "Syarikat Tani Maju" })),
    )
    .await
    .expect("logged-in user can write");
    let companies = app
        .list_records::<company_profiles::Entity>(&session, &ListQuery::default())
        .await
        .expect("list companies");
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].created_by["username"], "clerk");
}

#[tokio::test]
async fn role_mutations_need_user_role_write() {
    let app = AppContext::new(setup_test_db().await, Arc::new(AppConfig::default()));
    let role = seed_role(&app, "Reader", &["UserRole:Read"]).await;
    let session = login_as(&app, "reader", &role).await;

    let err = app
        .create_user_role(&session, payload(json!({ "name": "Escalated" })))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Forbidden);

    let err = app
        .update_user_role(
            &session,
            &role.uuid,
            payload(json!({ "name": "Reader", "privileges": ["UserRole:Write"] })),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Forbidden);

    let roles = app
        .list_user_roles(&session, &ListQuery::default())
        .await
        .expect("list roles");
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].privilege_list(), vec!["UserRole:Read".to_string()]);
}

#[tokio::test]
async fn duplicate_role_name_conflicts() {
    let app = AppContext::new(setup_test_db().await, Arc::new(AppConfig::default()));
    seed_role(&app, "Officer", &[]).await;

    let err = app
        .create_user_role(
            &RequestSession::Anonymous,
            payload(json!({ "name": "Officer" })),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Conflict);
}

#[tokio::test]
async fn production_rejects_anonymous_requests() {
    let config = AppConfig {
        environment: Environment::Production,
        tokenize_secret: "prod-tokenize".to_string(),
        app_secret: "prod-app".to_string(),
        ..AppConfig::default()
    };
    let app = AppContext::new(setup_test_db().await, Arc::new(config));

    let err = app
        .create_record::<farmer_profiles::Entity>(
            &RequestSession::Anonymous,
            payload(json!({ "rocbnRegNo": "RB-901", "farmerName": "Awang Ahmad" })),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Unauthorized);
    assert_eq!(err.message(), "Invalid Session");

    let err = app
        .list_records::<farmer_profiles::Entity>(&RequestSession::Anonymous, &ListQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Invalid Session");
}

#[tokio::test]
async fn closed_session_cannot_write() {
    let app = AppContext::new(setup_test_db().await, Arc::new(AppConfig::default()));
    let role = seed_role(&app, "Officer", &["FarmerProfile:Read"]).await;
    let session = login_as(&app, "officer", &role).await;

    app.log_out(&session).await.expect("log out");

    let err = app
        .create_record::<farmer_profiles::Entity>(
            &session,
            payload(json!({ "rocbnRegNo": "RB-902", "farmerName": "Awang Ahmad" })),
        )
        .await
        .unwrap_err();
    assert_eq!(err.message(), "User already logged out");

    let count = app
        .count_records::<farmer_profiles::Entity>(&RequestSession::Anonymous, None)
        .await
        .expect("count farmers");
    assert_eq!(count, 0);
}
