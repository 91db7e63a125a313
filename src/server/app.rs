use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::{http::HeaderMap, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::app_context::AppContext;
use crate::auth::RequestSession;

#[cfg(feature = "graphql")]
use crate::graphql::{build_schema, GraphQLSchema};
#[cfg(feature = "graphql")]
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
#[cfg(feature = "graphql")]
use axum::extract::State;

use super::handlers::health;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<AppContext>,
    #[cfg(feature = "graphql")]
    pub graphql_schema: GraphQLSchema,
}

pub async fn create_app(app: Arc<AppContext>, cors_origin: Option<&str>) -> Result<Router> {
    let state = AppState {
        #[cfg(feature = "graphql")]
        graphql_schema: build_schema(app.clone()),
        app,
    };

    let methods = [
        axum::http::Method::GET,
        axum::http::Method::POST,
        axum::http::Method::OPTIONS,
    ];
    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<axum::http::HeaderValue>()
                    .map_err(|e| anyhow!("Invalid CORS origin: {}", e))?,
            )
            .allow_methods(methods)
            .allow_headers(Any)
            .allow_credentials(false),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
            .allow_credentials(false),
    };

    #[allow(unused_mut)]
    let mut router = Router::new().route("/health", get(health::health_check));

    #[cfg(feature = "graphql")]
    {
        router = router.route(
            "/graphql",
            get(graphql_playground)
                .post(graphql_handler)
                .options(|| async { axum::http::StatusCode::OK }),
        );
    }

    Ok(router
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state))
}

/// Resolve the `Authorization` header into the request's session.
pub fn request_session(state: &AppState, headers: &HeaderMap) -> RequestSession {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    RequestSession::from_authorization(header, state.app.auth_service().signer())
}

#[cfg(feature = "graphql")]
async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let session = request_session(&state, &headers);
    tracing::debug!(
        "GraphQL request received ({})",
        match &session {
            RequestSession::Authenticated(active) => active.user.username.as_str(),
            RequestSession::Anonymous => "anonymous",
        }
    );

    let request = req.into_inner().data(session);
    let response = state.graphql_schema.execute(request).await;
    tracing::debug!("GraphQL request completed");
    response.into()
}

#[cfg(feature = "graphql")]
async fn graphql_playground() -> impl axum::response::IntoResponse {
    axum::response::Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}
