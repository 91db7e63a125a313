pub mod context;
pub mod errors;
pub mod mutations;
pub mod queries;
pub mod types;

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};

use crate::app_context::AppContext;
pub use context::GraphQLContext;
use mutations::Mutation;
use queries::Query;

pub type GraphQLSchema = Schema<Query, Mutation, EmptySubscription>;

/// Schema with the application context attached. The per-request
/// `RequestSession` is added to each request by the HTTP handler.
pub fn build_schema(app: Arc<AppContext>) -> GraphQLSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(GraphQLContext::new(app))
        .finish()
}
