use std::sync::Arc;

use agrirecords::app_context::{AppContext, RecordPayload};
use agrirecords::auth::RequestSession;
use agrirecords::config::AppConfig;
use agrirecords::database::entities::{activity_logs, crop_productions, farmer_profiles};
use agrirecords::database::test_utils::setup_test_db;
use agrirecords::errors::CoreErrorKind;
use agrirecords::services::ListQuery;
use agrirecords::tokenize::TokenSigner;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};

async fn setup_app() -> AppContext {
    AppContext::new(setup_test_db().await, Arc::new(AppConfig::default()))
}

fn tokenized(app: &AppContext, value: Value) -> RecordPayload {
    RecordPayload::Tokenized(app.tokenizer().encode(&value).expect("sign payload"))
}

async fn seed_farmer(app: &AppContext) -> farmer_profiles::Model {
    app.create_record::<farmer_profiles::Entity>(
        &RequestSession::Anonymous,
        tokenized(app, json!({ "rocbnRegNo": "RB-700", "farmerName": "Awang Ahmad" })),
    )
    .await
    .expect("Failed to create farmer from token")
}

#[tokio::test]
async fn tokenized_create_matches_plain_semantics() {
    let app = setup_app().await;
    let farmer = seed_farmer(&app).await;
    assert_eq!(farmer.rocbn_reg_no, "RB-700");
    assert_eq!(farmer.created_at, farmer.updated_at);

    let crop = app
        .create_record::<crop_productions::Entity>(
            &RequestSession::Anonymous,
            tokenized(
                &app,
                json!({
                    "farmerUUID": farmer.uuid,
                    "cropName": "Padi",
                    "quantityKg": "1200.5",
                    "productionDate": "2024-03-01",
                }),
            ),
        )
        .await
        .expect("create crop from token");
    assert_eq!(crop.farmer_uuid, farmer.uuid);
    assert_eq!(crop.quantity_kg, 1200.5);
}

#[tokio::test]
async fn foreign_signature_is_rejected_without_writes() {
    let app = setup_app().await;
    let forged = TokenSigner::new("not-the-tokenize-secret", None)
        .encode(&json!({ "rocbnRegNo": "RB-701", "farmerName": "Awang Ahmad" }))
        .expect("sign payload");

    let err = app
        .create_record::<farmer_profiles::Entity>(
            &RequestSession::Anonymous,
            RecordPayload::Tokenized(forged),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Unauthorized);

    let err = app
        .create_record::<farmer_profiles::Entity>(
            &RequestSession::Anonymous,
            RecordPayload::Tokenized("garbage".to_string()),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Unauthorized);

    assert_eq!(
        farmer_profiles::Entity::find().count(app.db()).await.unwrap(),
        0
    );
    assert_eq!(
        activity_logs::Entity::find().count(app.db()).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn tokenized_update_checks_required_fields_first() {
    let app = setup_app().await;

    // No such record: the validation error proves nothing was looked up.
    let err = app
        .update_record::<crop_productions::Entity>(
            &RequestSession::Anonymous,
            None,
            tokenized(
                &app,
                json!({ "uuid": uuid::Uuid::new_v4().to_string(), "cropName": "Padi" }),
            ),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Validation);
    assert_eq!(err.message(), "Please fill the farmer fields");
}

#[tokio::test]
async fn tokenized_update_and_delete_take_uuid_from_payload() {
    let app = setup_app().await;
    let farmer = seed_farmer(&app).await;

    let updated = app
        .update_record::<farmer_profiles::Entity>(
            &RequestSession::Anonymous,
            None,
            tokenized(
                &app,
                json!({
                    "uuid": farmer.uuid,
                    "rocbnRegNo": "RB-700",
                    "farmerName": "Awang Ahmad bin Ali",
                }),
            ),
        )
        .await
        .expect("tokenized update");
    assert_eq!(updated.farmer_name, "Awang Ahmad bin Ali");

    let err = app
        .update_record::<farmer_profiles::Entity>(
            &RequestSession::Anonymous,
            None,
            tokenized(&app, json!({ "rocbnRegNo": "RB-700", "farmerName": "x" })),
        )
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Please fill the uuid fields");

    let token = app
        .tokenizer()
        .encode(&json!({ "uuid": farmer.uuid }))
        .expect("sign delete");
    let deleted = app
        .tokenized_delete_record::<farmer_profiles::Entity>(&RequestSession::Anonymous, &token)
        .await
        .expect("tokenized delete");
    assert!(!deleted.deleted_at.is_empty());
}

#[tokio::test]
async fn tokenized_list_is_signed_rows() {
    let app = setup_app().await;
    let farmer = seed_farmer(&app).await;

    let token = app
        .tokenized_list_records::<farmer_profiles::Entity>(
            &RequestSession::Anonymous,
            &ListQuery::default(),
        )
        .await
        .expect("tokenized list");

    let claims = app.tokenizer().decode(&token).expect("verify list token");
    let rows = claims["rows"].as_array().expect("rows array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["uuid"], farmer.uuid.as_str());
    assert_eq!(rows[0]["rocbnRegNo"], "RB-700");
    assert!(rows[0]["id"].is_string());

    let other = TokenSigner::new("someone-else", None);
    assert!(other.decode(&token).is_err());
}
