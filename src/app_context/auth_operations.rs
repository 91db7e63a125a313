use tracing::info;

use super::record_operations::commit;
use super::{AppContext, RecordPayload};
use crate::auth::RequestSession;
use crate::database::entities::{user_roles, users};
use crate::errors::CoreResult;
use crate::records::ManagedEntity;
use crate::services::auth_service::USER_RESOURCE;
use crate::services::{ListQuery, LoginResult, RegisterUser};

impl AppContext {
    // ----- Sessions --------------------------------------------------------

    pub async fn log_in(&self, username: &str, password: &str) -> CoreResult<LoginResult> {
        self.auth_service.login(username, password).await
    }

    pub async fn log_out(&self, session: &RequestSession) -> CoreResult<()> {
        self.auth_service.logout(session).await
    }

    pub async fn current_user(&self, session: &RequestSession) -> CoreResult<Option<users::Model>> {
        self.auth_service.current_user(session).await
    }

    /// Requires `User:Write`.
    pub async fn register_user(
        &self,
        session: &RequestSession,
        input: RegisterUser,
    ) -> CoreResult<users::Model> {
        let actor = self.authorization_service.require_session(session)?;
        let actor = self
            .authorization_service
            .require_privilege(actor, USER_RESOURCE, "Write")
            .await?;

        let txn = self.begin_for(&actor).await?;
        let user = self.auth_service.register(&txn, &actor, input).await?;
        commit(txn, "register user").await?;
        Ok(user)
    }

    pub async fn seed_admin(&self) -> CoreResult<users::Model> {
        let user = self.auth_service.seed_admin().await?;
        info!("Administrator account ready: {}", user.username);
        Ok(user)
    }

    // ----- Roles -----------------------------------------------------------

    pub async fn list_user_roles(
        &self,
        session: &RequestSession,
        query: &ListQuery,
    ) -> CoreResult<Vec<user_roles::Model>> {
        self.list_records::<user_roles::Entity>(session, query).await
    }

    /// Requires `UserRole:Write`; failures are FORBIDDEN, not silent.
    pub async fn create_user_role(
        &self,
        session: &RequestSession,
        payload: RecordPayload,
    ) -> CoreResult<user_roles::Model> {
        let actor = self.authorization_service.require_session(session)?;
        let actor = self
            .authorization_service
            .require_privilege(actor, user_roles::Entity::RESOURCE, "Write")
            .await?;
        let input = self.decode_payload(payload)?;
        self.create_as::<user_roles::Entity>(&actor, &input).await
    }

    pub async fn update_user_role(
        &self,
        session: &RequestSession,
        uuid: &str,
        payload: RecordPayload,
    ) -> CoreResult<user_roles::Model> {
        let actor = self.authorization_service.require_session(session)?;
        let actor = self
            .authorization_service
            .require_privilege(actor, user_roles::Entity::RESOURCE, "Write")
            .await?;
        let input = self.decode_payload(payload)?;
        self.update_as::<user_roles::Entity>(&actor, uuid.trim(), &input)
            .await
    }
}
