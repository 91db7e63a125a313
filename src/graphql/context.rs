use std::sync::Arc;

use crate::app_context::AppContext;
use crate::auth::RequestSession;

#[derive(Clone)]
pub struct GraphQLContext {
    pub app: Arc<AppContext>,
}

impl GraphQLContext {
    pub fn new(app: Arc<AppContext>) -> Self {
        Self { app }
    }

    /// Session attached to the request by the HTTP handler; anonymous if none.
    pub fn session(&self, ctx: &async_graphql::Context<'_>) -> RequestSession {
        ctx.data_opt::<RequestSession>().cloned().unwrap_or_default()
    }
}
