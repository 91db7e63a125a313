use async_graphql::*;

use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::StructuredError;
use crate::graphql::types::{ActivityLog, ActivityLogFilterInput};
use crate::services::ListQuery;

#[derive(Default)]
pub struct ActivityQuery;

#[Object]
impl ActivityQuery {
    /// Audit trail, newest first
    async fn all_activity_logs(
        &self,
        ctx: &Context<'_>,
        filter: Option<ActivityLogFilterInput>,
        skip: Option<i64>,
        take: Option<i64>,
    ) -> Result<Vec<ActivityLog>> {
        let context = ctx.data::<GraphQLContext>()?;
        let logs = context
            .app
            .list_activity_logs(
                &context.session(ctx),
                &filter.unwrap_or_default().into(),
                &ListQuery::new(skip, take, None),
            )
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(logs.into_iter().map(ActivityLog::from).collect())
    }

    async fn count_activity_logs(
        &self,
        ctx: &Context<'_>,
        filter: Option<ActivityLogFilterInput>,
    ) -> Result<u64> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .count_activity_logs(&context.session(ctx), &filter.unwrap_or_default().into())
            .await
            .map_err(StructuredError::from_core_error)
    }
}
