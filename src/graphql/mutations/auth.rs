use async_graphql::*;

use crate::app_context::RecordPayload;
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::StructuredError;
use crate::graphql::types::{
    LoginInput, LoginResponse, RegisterUserInput, User, UserRole, UserRoleInput,
};

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Returns a `token-...` session token for the `Authorization` header
    async fn log_in(&self, ctx: &Context<'_>, input: LoginInput) -> Result<LoginResponse> {
        let context = ctx.data::<GraphQLContext>()?;
        let result = context
            .app
            .log_in(&input.username, &input.password)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(LoginResponse::from(result))
    }

    async fn log_out(&self, ctx: &Context<'_>) -> Result<bool> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .log_out(&context.session(ctx))
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(true)
    }

    async fn register_user(&self, ctx: &Context<'_>, input: RegisterUserInput) -> Result<User> {
        let context = ctx.data::<GraphQLContext>()?;
        let user = context
            .app
            .register_user(&context.session(ctx), input.into())
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(User::from(user))
    }

    async fn create_user_role(&self, ctx: &Context<'_>, input: UserRoleInput) -> Result<UserRole> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = RecordPayload::plain(&input).map_err(StructuredError::from_core_error)?;
        let role = context
            .app
            .create_user_role(&context.session(ctx), payload)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(UserRole::from(role))
    }

    async fn update_user_role(
        &self,
        ctx: &Context<'_>,
        uuid: String,
        input: UserRoleInput,
    ) -> Result<UserRole> {
        let context = ctx.data::<GraphQLContext>()?;
        let payload = RecordPayload::plain(&input).map_err(StructuredError::from_core_error)?;
        let role = context
            .app
            .update_user_role(&context.session(ctx), &uuid, payload)
            .await
            .map_err(StructuredError::from_core_error)?;

        Ok(UserRole::from(role))
    }
}
