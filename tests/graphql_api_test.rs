#![cfg(feature = "graphql")]

use std::sync::Arc;

use agrirecords::app_context::AppContext;
use agrirecords::auth::RequestSession;
use agrirecords::config::AppConfig;
use agrirecords::database::test_utils::setup_test_db;
use agrirecords::graphql::{build_schema, GraphQLSchema};
use async_graphql::{Request, Value};
use serde_json::json;

async fn setup_schema(config: AppConfig) -> (Arc<AppContext>, GraphQLSchema) {
    let app = Arc::new(AppContext::new(setup_test_db().await, Arc::new(config)));
    let schema = build_schema(app.clone());
    (app, schema)
}

async fn execute(
    schema: &GraphQLSchema,
    session: &RequestSession,
    query: &str,
) -> async_graphql::Response {
    schema
        .execute(Request::new(query).data(session.clone()))
        .await
}

fn error_code(response: &async_graphql::Response) -> Option<Value> {
    response
        .errors
        .first()
        .and_then(|error| error.extensions.as_ref())
        .and_then(|ext| ext.get("code"))
        .cloned()
}

#[tokio::test]
async fn create_and_resolve_farmer_company() {
    let (_app, schema) = setup_schema(AppConfig::default()).await;
    let session = RequestSession::Anonymous;

    let created = execute(
        &schema,
        &session,
        r#"mutation {
            createCompanyProfile(input: { companyName: "Syarikat Tani Maju", district: "Brunei-Muara" }) {
                uuid
                companyName
            }
        }"#,
    )
    .await;
    assert!(created.errors.is_empty(), "{:?}", created.errors);
    let created = created.data.into_json().expect("json data");
    let company_uuid = created["createCompanyProfile"]["uuid"]
        .as_str()
        .expect("company uuid")
        .to_string();

    let farmer = execute(
        &schema,
        &session,
        &format!(
            r#"mutation {{
                createFarmerProfile(input: {{ rocbnRegNo: "RB-800", farmerName: "Awang Ahmad", companyUUID: "{}" }}) {{
                    rocbnRegNo
                    createdBy {{ username }}
                    company {{ companyName }}
                }}
            }}"#,
            company_uuid
        ),
    )
    .await;
    assert!(farmer.errors.is_empty(), "{:?}", farmer.errors);
    let farmer = farmer.data.into_json().expect("json data");
    assert_eq!(
        farmer["createFarmerProfile"],
        json!({
            "rocbnRegNo": "RB-800",
            "createdBy": { "username": "system" },
            "company": { "companyName": "Syarikat Tani Maju" }
        })
    );

    let listed = execute(
        &schema,
        &session,
        r#"{ allFarmerProfiles(search: "awang") { farmerName } countFarmerProfiles }"#,
    )
    .await;
    assert!(listed.errors.is_empty(), "{:?}", listed.errors);
    let listed = listed.data.into_json().expect("json data");
    assert_eq!(listed["allFarmerProfiles"][0]["farmerName"], "Awang Ahmad");
    assert_eq!(listed["countFarmerProfiles"], 1);
}

#[tokio::test]
async fn update_clears_date_only_when_null_is_sent() {
    let (_app, schema) = setup_schema(AppConfig::default()).await;
    let session = RequestSession::Anonymous;

    let created = execute(
        &schema,
        &session,
        r#"mutation {
            createFarmerProfile(input: { rocbnRegNo: "RB-810", farmerName: "Awang Ahmad", registeredDate: "2024-03-01" }) {
                uuid
            }
        }"#,
    )
    .await;
    assert!(created.errors.is_empty(), "{:?}", created.errors);
    let created = created.data.into_json().expect("json data");
    let uuid = created["createFarmerProfile"]["uuid"]
        .as_str()
        .expect("farmer uuid")
        .to_string();

    let kept = execute(
        &schema,
        &session,
        &format!(
            r#"mutation {{
                updateFarmerProfile(uuid: "{}", input: {{ district: "Tutong" }}) {{ district registeredDate }}
            }}"#,
            uuid
        ),
    )
    .await;
    assert!(kept.errors.is_empty(), "{:?}", kept.errors);
    let kept = kept.data.into_json().expect("json data");
    assert_eq!(
        kept["updateFarmerProfile"],
        json!({ "district": "Tutong", "registeredDate": "2024-03-01" })
    );

    let cleared = execute(
        &schema,
        &session,
        &format!(
            r#"mutation {{
                updateFarmerProfile(uuid: "{}", input: {{ registeredDate: null }}) {{ district registeredDate }}
            }}"#,
            uuid
        ),
    )
    .await;
    assert!(cleared.errors.is_empty(), "{:?}", cleared.errors);
    let cleared = cleared.data.into_json().expect("json data");
    assert_eq!(
        cleared["updateFarmerProfile"],
        json!({ "district": "Tutong", "registeredDate": null })
    );
}

#[tokio::test]
async fn validation_errors_carry_codes() {
    let (_app, schema) = setup_schema(AppConfig::default()).await;
    let session = RequestSession::Anonymous;

    let response = execute(
        &schema,
        &session,
        r#"mutation { createFarmerProfile(input: { farmerName: "Awang Ahmad" }) { uuid } }"#,
    )
    .await;
    assert_eq!(response.errors.len(), 1);
    assert_eq!(
        response.errors[0].message,
        "Please fill the ROCBN Reg. No fields"
    );
    assert_eq!(error_code(&response), Some(Value::from("VALIDATION_FAILED")));
}

#[tokio::test]
async fn tokenized_mutation_through_schema() {
    let (app, schema) = setup_schema(AppConfig::default()).await;
    let token = app
        .tokenizer()
        .encode(&json!({ "companyName": "Kedai Ternakan" }))
        .expect("sign payload");

    let response = execute(
        &schema,
        &RequestSession::Anonymous,
        &format!(
            r#"mutation {{ tokenizedCreateCompanyProfile(token: "{}") {{ companyName }} }}"#,
            token
        ),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().expect("json data");
    assert_eq!(
        data["tokenizedCreateCompanyProfile"]["companyName"],
        "Kedai Ternakan"
    );

    let listed = execute(
        &schema,
        &RequestSession::Anonymous,
        "{ tokenizedAllCompanyProfiles }",
    )
    .await;
    let listed = listed.data.into_json().expect("json data");
    let claims = app
        .tokenizer()
        .decode(listed["tokenizedAllCompanyProfiles"].as_str().expect("token"))
        .expect("verify list token");
    assert_eq!(claims["rows"][0]["companyName"], "Kedai Ternakan");
}

#[tokio::test]
async fn login_and_current_user_over_graphql() {
    let mut config = AppConfig::default();
    config.admin.password = Some("correct-horse-battery".to_string());
    let (app, schema) = setup_schema(config).await;
    app.seed_admin().await.expect("seed admin");

    let login = execute(
        &schema,
        &RequestSession::Anonymous,
        r#"mutation { logIn(input: { username: "admin", password: "correct-horse-battery" }) { token user { username } } }"#,
    )
    .await;
    assert!(login.errors.is_empty(), "{:?}", login.errors);
    let login = login.data.into_json().expect("json data");
    let token = login["logIn"]["token"].as_str().expect("token");

    let header = format!("Bearer {}", token);
    let session = RequestSession::from_authorization(Some(&header), app.auth_service().signer());

    let me = execute(&schema, &session, "{ currentUser { username } }").await;
    let me = me.data.into_json().expect("json data");
    assert_eq!(me["currentUser"]["username"], "admin");

    let out = execute(&schema, &session, "mutation { logOut }").await;
    assert!(out.errors.is_empty(), "{:?}", out.errors);

    let again = execute(&schema, &session, "mutation { logOut }").await;
    assert_eq!(again.errors[0].message, "User already logged out");
    assert_eq!(error_code(&again), Some(Value::from("UNAUTHORIZED")));
}
