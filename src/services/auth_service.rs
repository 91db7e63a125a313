use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IntoActiveModel, QueryFilter, Set, TransactionTrait,
};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{
    privilege, ActiveSession, Actor, ActorSnapshot, RequestSession, SESSION_TOKEN_PREFIX,
};
use crate::config::AppConfig;
use crate::database::entities::activity_logs::ActivityAction;
use crate::database::entities::{
    biosecurity_commodities, commodity_prices, company_profiles, crop_productions,
    farmer_profiles, livestock_productions, user_roles, user_sessions, users,
};
use crate::errors::{AuthError, CoreError, CoreResult};
use crate::records::{coerce, ensure_live_reference, record_json, CoerceMode, ManagedEntity};
use crate::services::activity_log_service::ActivityLogService;
use crate::services::record_service::RecordService;
use crate::tokenize::TokenSigner;

pub const USER_RESOURCE: &str = "User";
pub const ACTIVITY_LOG_RESOURCE: &str = "ActivityLog";

#[derive(Clone, Debug)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role_uuid: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LoginResult {
    /// `token-<signed session token>`, sent back as the bearer value.
    pub token: String,
    pub user: users::Model,
    pub expires_at: DateTime<Utc>,
}

/// Every privilege string the system checks.
pub fn all_privileges() -> Vec<String> {
    let resources = [
        company_profiles::Entity::RESOURCE,
        farmer_profiles::Entity::RESOURCE,
        crop_productions::Entity::RESOURCE,
        livestock_productions::Entity::RESOURCE,
        biosecurity_commodities::Entity::RESOURCE,
        commodity_prices::Entity::RESOURCE,
        user_roles::Entity::RESOURCE,
        USER_RESOURCE,
        ACTIVITY_LOG_RESOURCE,
    ];

    resources
        .iter()
        .flat_map(|resource| ["Read", "Write"].map(|verb| privilege(resource, verb)))
        .collect()
}

/// Credentials, sessions and the bootstrap administrator.
#[derive(Clone)]
pub struct AuthService {
    db: DatabaseConnection,
    config: Arc<AppConfig>,
    signer: TokenSigner,
}

impl AuthService {
    pub fn new(db: DatabaseConnection, config: Arc<AppConfig>) -> Self {
        let signer = config.session_signer();
        Self { db, config, signer }
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    /// Hash a password using bcrypt
    pub fn hash_password(password: &str) -> CoreResult<String> {
        if password.is_empty() {
            return Err(AuthError::WeakPassword("Password cannot be empty".into()).into());
        }

        if password.len() < 8 {
            return Err(AuthError::WeakPassword(
                "Password must be at least 8 characters long".into(),
            )
            .into());
        }

        hash(password, DEFAULT_COST)
            .map_err(|e| CoreError::internal(format!("Failed to hash password: {}", e)))
    }

    /// Verify a password against a hash
    pub fn verify_password(password: &str, hash: &str) -> CoreResult<bool> {
        verify(password, hash)
            .map_err(|e| CoreError::internal(format!("Failed to verify password: {}", e)))
    }

    pub fn validate_email(email: &str) -> CoreResult<()> {
        let invalid = |reason: &str| -> CoreResult<()> {
            Err(AuthError::InvalidEmail(reason.to_string()).into())
        };

        if email.is_empty() {
            return invalid("Email cannot be empty");
        }
        if email.len() > 254 {
            return invalid("Email is too long");
        }

        let Some((local, domain)) = email.split_once('@') else {
            return invalid("must contain exactly one @");
        };
        if domain.contains('@') {
            return invalid("must contain exactly one @");
        }
        if local.is_empty() || domain.is_empty() {
            return invalid("local and domain parts cannot be empty");
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return invalid("domain must contain an inner dot");
        }

        Ok(())
    }

    pub fn validate_username(username: &str) -> CoreResult<()> {
        let invalid = |reason: &str| -> CoreResult<()> {
            Err(AuthError::InvalidUsername(reason.to_string()).into())
        };

        if username.len() < 3 {
            return invalid("Username must be at least 3 characters long");
        }
        if username.len() > 50 {
            return invalid("Username is too long (max 50 characters)");
        }
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
        {
            return invalid("Username can only contain letters, numbers, dots, underscores, and hyphens");
        }

        Ok(())
    }

    /// Create a user inside `txn`, recording a CREATE activity entry.
    pub async fn register(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        input: RegisterUser,
    ) -> CoreResult<users::Model> {
        let username = input.username.trim().to_string();
        let email = input.email.trim().to_string();
        Self::validate_username(&username)?;
        Self::validate_email(&email)?;
        let password_hash = Self::hash_password(&input.password)?;

        if find_live_user(txn, &username).await?.is_some() {
            return Err(AuthError::UsernameExists.into());
        }

        let role_uuid = input
            .role_uuid
            .map(|uuid| uuid.trim().to_string())
            .filter(|uuid| !uuid.is_empty())
            .unwrap_or_default();
        if !role_uuid.is_empty() {
            ensure_live_reference::<user_roles::Entity, _>(txn, &role_uuid, "roleUUID").await?;
        }

        let now = Utc::now();
        let by = serde_json::to_value(actor.snapshot())
            .map_err(|e| CoreError::internal(format!("Failed to serialize actor: {}", e)))?;
        let user = users::ActiveModel {
            id: ActiveValue::NotSet,
            uuid: Set(Uuid::new_v4().to_string()),
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            role_uuid: Set(role_uuid),
            status: Set(users::STATUS_ACTIVE.to_string()),
            last_login_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(String::new()),
            created_by: Set(by.clone()),
            updated_by: Set(by),
            deleted_by: Set(None),
        }
        .insert(txn)
        .await
        .map_err(|e| CoreError::database("insert user", e))?;

        ActivityLogService::append(
            txn,
            &actor.snapshot(),
            ActivityAction::Create,
            "users",
            &user.uuid,
            record_json(&user)?,
        )
        .await?;

        info!("Registered user {}", user.username);
        Ok(user)
    }

    /// Verify credentials, open a session row and sign a session token.
    pub async fn login(&self, username: &str, password: &str) -> CoreResult<LoginResult> {
        let user = find_live_user(&self.db, username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            warn!("Failed login for {}", user.username);
            return Err(AuthError::InvalidCredentials.into());
        }
        if !user.is_usable() {
            return Err(AuthError::UserInvalid.into());
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CoreError::database("begin login", e))?;

        let session = user_sessions::ActiveModel::new(user.uuid.clone(), self.config.session_ttl)
            .insert(&txn)
            .await
            .map_err(|e| CoreError::database("insert session", e))?;

        let mut active = user.into_active_model();
        active.last_login_at = Set(Some(Utc::now()));
        let user = active
            .update(&txn)
            .await
            .map_err(|e| CoreError::database("update last login", e))?;

        txn.commit()
            .await
            .map_err(|e| CoreError::database("commit login", e))?;

        let claims = ActiveSession {
            session_uuid: session.uuid.clone(),
            user: ActorSnapshot {
                uuid: user.uuid.clone(),
                username: user.username.clone(),
            },
        };
        let token = self.signer.encode(&claims)?;

        info!("User {} logged in", user.username);
        Ok(LoginResult {
            token: format!("{}{}", SESSION_TOKEN_PREFIX, token),
            user,
            expires_at: session.expires_at,
        })
    }

    /// Close the request's session. A closed session cannot be closed twice.
    pub async fn logout(&self, session: &RequestSession) -> CoreResult<()> {
        let active = session.active().ok_or(AuthError::InvalidSession)?;

        let row = user_sessions::Entity::find()
            .filter(user_sessions::Column::Uuid.eq(active.session_uuid.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| CoreError::database("load session", e))?
            .filter(|row| row.user_uuid == active.user.uuid)
            .ok_or(AuthError::InvalidSession)?;

        if row.status != user_sessions::STATUS_LOGGED_IN {
            return Err(AuthError::AlreadyLoggedOut.into());
        }

        let row: user_sessions::ActiveModel = row.into();
        row.log_out()
            .update(&self.db)
            .await
            .map_err(|e| CoreError::database("close session", e))?;

        info!("User {} logged out", active.user.username);
        Ok(())
    }

    /// The user behind an open session, if any.
    pub async fn current_user(&self, session: &RequestSession) -> CoreResult<Option<users::Model>> {
        let Some(active) = session.active() else {
            return Ok(None);
        };

        let open = user_sessions::Entity::find()
            .filter(user_sessions::Column::Uuid.eq(active.session_uuid.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| CoreError::database("load session", e))?
            .map(|row| row.is_logged_in())
            .unwrap_or(false);
        if !open {
            return Ok(None);
        }

        let user = users::Entity::find()
            .filter(users::Column::Uuid.eq(active.user.uuid.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| CoreError::database("load user", e))?;

        Ok(user.filter(users::Model::is_usable))
    }

    /// Create the administrator role and user from configuration if missing.
    pub async fn seed_admin(&self) -> CoreResult<users::Model> {
        let admin = &self.config.admin;
        let password = admin
            .password
            .clone()
            .ok_or_else(|| CoreError::validation("AGRIRECORDS_ADMIN_PASSWORD is not set"))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CoreError::database("begin seed", e))?;

        if let Some(existing) = find_live_user(&txn, &admin.username).await? {
            info!("Administrator {} already exists", existing.username);
            return Ok(existing);
        }

        let actor = Actor::system();
        let role = user_roles::Entity::find()
            .filter(user_roles::Column::Name.eq(admin.role_name.as_str()))
            .filter(user_roles::Column::DeletedAt.eq(""))
            .one(&txn)
            .await
            .map_err(|e| CoreError::database("load admin role", e))?;

        let role = match role {
            Some(role) => role,
            None => {
                let input = json!({
                    "name": admin.role_name,
                    "privileges": all_privileges(),
                });
                let payload = match input {
                    serde_json::Value::Object(map) => coerce(
                        user_roles::Entity::fields(),
                        &map,
                        CoerceMode::Create,
                    )?,
                    _ => return Err(CoreError::internal("Role payload is not an object")),
                };
                RecordService::new(self.db.clone())
                    .create::<user_roles::Entity>(&txn, &actor, payload, ActivityAction::Create)
                    .await?
            }
        };

        let user = self
            .register(
                &txn,
                &actor,
                RegisterUser {
                    username: admin.username.clone(),
                    email: admin.email.clone(),
                    password,
                    role_uuid: Some(role.uuid),
                },
            )
            .await?;

        txn.commit()
            .await
            .map_err(|e| CoreError::database("commit seed", e))?;

        info!("Seeded administrator {}", user.username);
        Ok(user)
    }
}

async fn find_live_user<C: ConnectionTrait>(
    conn: &C,
    username: &str,
) -> CoreResult<Option<users::Model>> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .filter(users::Column::DeletedAt.eq(""))
        .one(conn)
        .await
        .map_err(|e| CoreError::database("find user", e))
}
