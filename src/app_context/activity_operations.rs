use super::AppContext;
use crate::auth::RequestSession;
use crate::database::entities::activity_logs;
use crate::errors::CoreResult;
use crate::services::auth_service::ACTIVITY_LOG_RESOURCE;
use crate::services::{ActivityLogFilter, ListQuery};

impl AppContext {
    /// Audit entries, newest first. Silently empty without `ActivityLog:Read`.
    pub async fn list_activity_logs(
        &self,
        session: &RequestSession,
        filter: &ActivityLogFilter,
        query: &ListQuery,
    ) -> CoreResult<Vec<activity_logs::Model>> {
        let allowed = self
            .authorization_service
            .authorize_read(session, ACTIVITY_LOG_RESOURCE)
            .await?;
        if allowed.is_none() {
            return Ok(Vec::new());
        }

        self.activity_log_service
            .list(filter, query.skip, query.take)
            .await
    }

    pub async fn count_activity_logs(
        &self,
        session: &RequestSession,
        filter: &ActivityLogFilter,
    ) -> CoreResult<u64> {
        let allowed = self
            .authorization_service
            .authorize_read(session, ACTIVITY_LOG_RESOURCE)
            .await?;
        match allowed {
            Some(_) => self.activity_log_service.count(filter).await,
            None => Ok(0),
        }
    }
}
