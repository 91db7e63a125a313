use async_graphql::*;

use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::StructuredError;
use crate::graphql::types::{User, UserRole};
use crate::services::ListQuery;

#[derive(Default)]
pub struct AuthQuery;

#[Object]
impl AuthQuery {
    /// The logged-in user, or null
    async fn current_user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let context = ctx.data::<GraphQLContext>()?;
        let user = context
            .app
            .current_user(&context.session(ctx))
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(user.map(User::from))
    }

    async fn all_user_roles(
        &self,
        ctx: &Context<'_>,
        skip: Option<i64>,
        take: Option<i64>,
        search: Option<String>,
    ) -> Result<Vec<UserRole>> {
        let context = ctx.data::<GraphQLContext>()?;
        let roles = context
            .app
            .list_user_roles(&context.session(ctx), &ListQuery::new(skip, take, search))
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(roles.into_iter().map(UserRole::from).collect())
    }
}
