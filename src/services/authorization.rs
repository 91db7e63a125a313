use std::sync::Arc;

use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{debug, warn};

use crate::auth::{privilege, Actor, Authorizer, PrivilegeAuthorizer, RequestSession};
use crate::config::AppConfig;
use crate::database::entities::{user_roles, user_sessions, users};
use crate::errors::{AuthError, CoreError, CoreResult};

/// Session guard, logged-in check and role privileges.
#[derive(Clone)]
pub struct AuthorizationService {
    db: DatabaseConnection,
    config: Arc<AppConfig>,
}

impl AuthorizationService {
    pub fn new(db: DatabaseConnection, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// Fail with "Invalid Session" unless the request carries a user.
    /// Outside production an anonymous request runs as the system actor.
    pub fn require_session(&self, session: &RequestSession) -> CoreResult<Actor> {
        match session {
            RequestSession::Authenticated(active) => Ok(Actor::user(active)),
            RequestSession::Anonymous if !self.config.is_production() => {
                debug!("No session on request, using development actor");
                Ok(Actor::system())
            }
            RequestSession::Anonymous => Err(AuthError::InvalidSession.into()),
        }
    }

    /// Check that the actor's user is still usable and its session still open.
    pub async fn require_logged_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        actor: &Actor,
    ) -> CoreResult<()> {
        if actor.is_system() {
            return Ok(());
        }

        let user = match &actor.user_uuid {
            Some(uuid) => find_user(conn, uuid).await?,
            None => None,
        };
        let user = user
            .filter(users::Model::is_usable)
            .ok_or(AuthError::UserInvalid)?;

        let session = match &actor.session_uuid {
            Some(uuid) => user_sessions::Entity::find()
                .filter(user_sessions::Column::Uuid.eq(uuid.as_str()))
                .one(conn)
                .await
                .map_err(|e| CoreError::database("load session", e))?,
            None => None,
        };

        match session {
            Some(session) if session.user_uuid == user.uuid && session.is_logged_in() => Ok(()),
            _ => Err(AuthError::AlreadyLoggedOut.into()),
        }
    }

    /// Load the role privileges of the actor's user onto the actor.
    /// A missing user or role leaves the actor without privileges.
    pub async fn with_privileges(&self, actor: Actor) -> CoreResult<Actor> {
        if actor.is_system() {
            return Ok(actor);
        }
        let Some(user_uuid) = actor.user_uuid.clone() else {
            return Ok(actor);
        };

        let Some(user) = find_user(&self.db, &user_uuid)
            .await?
            .filter(users::Model::is_usable)
        else {
            return Ok(actor);
        };

        let role = user_roles::Entity::find()
            .filter(user_roles::Column::Uuid.eq(user.role_uuid.as_str()))
            .filter(user_roles::Column::DeletedAt.eq(""))
            .one(&self.db)
            .await
            .map_err(|e| CoreError::database("load user role", e))?;

        Ok(match role {
            Some(role) => actor.with_privileges(role.privilege_list()),
            None => actor,
        })
    }

    /// Guard plus `"<resource>:Read"`. `Ok(None)` means silently denied.
    pub async fn authorize_read(
        &self,
        session: &RequestSession,
        resource: &str,
    ) -> CoreResult<Option<Actor>> {
        let actor = self.with_privileges(self.require_session(session)?).await?;
        let required = privilege(resource, "Read");

        if actor.has_privilege(&required) {
            Ok(Some(actor))
        } else {
            warn!(
                "Denied {} for user {}, returning empty result",
                required, actor.username
            );
            Ok(None)
        }
    }

    /// Explicit check: fails with FORBIDDEN instead of hiding data.
    pub async fn require_privilege(
        &self,
        actor: Actor,
        resource: &str,
        verb: &str,
    ) -> CoreResult<Actor> {
        let actor = self.with_privileges(actor).await?;
        PrivilegeAuthorizer.authorize(&actor, &privilege(resource, verb))?;
        Ok(actor)
    }
}

async fn find_user<C: ConnectionTrait>(conn: &C, uuid: &str) -> CoreResult<Option<users::Model>> {
    users::Entity::find()
        .filter(users::Column::Uuid.eq(uuid))
        .one(conn)
        .await
        .map_err(|e| CoreError::database("load user", e))
}
