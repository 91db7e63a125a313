use std::sync::Arc;

use agrirecords::app_context::AppContext;
use agrirecords::auth::{RequestSession, SESSION_TOKEN_PREFIX};
use agrirecords::config::AppConfig;
use agrirecords::database::test_utils::setup_test_db;
use agrirecords::errors::CoreErrorKind;
use agrirecords::services::{ActivityLogFilter, ListQuery, RegisterUser};

const ADMIN_PASSWORD: &str = "correct-horse-battery";

async fn setup_app() -> AppContext {
    let mut config = AppConfig::default();
    config.admin.password = Some(ADMIN_PASSWORD.to_string());
    AppContext::new(setup_test_db().await, Arc::new(config))
}

fn session_from(app: &AppContext, token: &str) -> RequestSession {
    let header = format!("Bearer {}", token);
    RequestSession::from_authorization(Some(&header), app.auth_service().signer())
}

#[tokio::test]
async fn seed_admin_is_idempotent() {
    let app = setup_app().await;

    let first = app.seed_admin().await.expect("seed admin");
    let second = app.seed_admin().await.expect("seed admin again");
    assert_eq!(first.uuid, second.uuid);
    assert_eq!(first.username, "admin");
    assert!(!first.role_uuid.is_empty());
    assert_ne!(first.password_hash, ADMIN_PASSWORD);
}

#[tokio::test]
async fn seed_admin_requires_password() {
    let app = AppContext::new(setup_test_db().await, Arc::new(AppConfig::default()));
    let err = app.seed_admin().await.unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Validation);
}

#[tokio::test]
async fn login_logout_cycle() {
    let app = setup_app().await;
    app.seed_admin().await.expect("seed admin");

    let err = app.log_in("admin", "wrong-password").await.unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Unauthorized);
    assert_eq!(err.message(), "Invalid username or password");

    let err = app.log_in("nobody", ADMIN_PASSWORD).await.unwrap_err();
    assert_eq!(err.message(), "Invalid username or password");

    let login = app.log_in("admin", ADMIN_PASSWORD).await.expect("log in");
    assert!(login.token.starts_with(SESSION_TOKEN_PREFIX));
    assert!(login.user.last_login_at.is_some());

    let session = session_from(&app, &login.token);
    let current = app
        .current_user(&session)
        .await
        .expect("current user")
        .expect("open session has a user");
    assert_eq!(current.uuid, login.user.uuid);

    app.log_out(&session).await.expect("log out");
    let err = app.log_out(&session).await.unwrap_err();
    assert_eq!(err.message(), "User already logged out");

    assert!(app
        .current_user(&session)
        .await
        .expect("current user")
        .is_none());

    let err = app.log_out(&RequestSession::Anonymous).await.unwrap_err();
    assert_eq!(err.message(), "Invalid Session");
}

#[tokio::test]
async fn admin_sees_seed_activity() {
    let app = setup_app().await;
    let admin = app.seed_admin().await.expect("seed admin");
    let login = app.log_in("admin", ADMIN_PASSWORD).await.expect("log in");
    let session = session_from(&app, &login.token);

    let filter = ActivityLogFilter {
        table_name: Some("users".to_string()),
        ..ActivityLogFilter::default()
    };
    let logs = app
        .list_activity_logs(&session, &filter, &ListQuery::default())
        .await
        .expect("list activity");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].record_uuid, admin.uuid);
    assert_eq!(logs[0].action, "CREATE");
    assert_eq!(logs[0].actor_username, "system");

    let roles = app
        .list_user_roles(&session, &ListQuery::default())
        .await
        .expect("list roles");
    assert_eq!(roles.len(), 1);
    assert!(roles[0]
        .privilege_list()
        .contains(&"ActivityLog:Read".to_string()));
}

#[tokio::test]
async fn register_rejects_bad_input() {
    let app = setup_app().await;
    let session = RequestSession::Anonymous;

    let user = |username: &str, password: &str| RegisterUser {
        username: username.to_string(),
        email: format!("{}@agriculture.gov.bn", username),
        password: password.to_string(),
        role_uuid: None,
    };

    app.register_user(&session, user("officer", "long-enough"))
        .await
        .expect("register officer");

    let err = app
        .register_user(&session, user("officer", "long-enough"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Conflict);
    assert_eq!(err.message(), "Duplicate username");

    let err = app
        .register_user(&session, user("clerk", "short"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Validation);

    let err = app
        .register_user(&session, user("x", "long-enough"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CoreErrorKind::Validation);
}
