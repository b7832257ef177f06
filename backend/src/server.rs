//! HTTP surface.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/` | Execute a GraphQL request, returns `{data, errors?}`. |
//! | `GET`  | `/` | GraphiQL IDE (when enabled). |
//! | `GET`  | `/health` | Liveness probe. |

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
  Json, Router,
  extract::State,
  http::Method,
  response::{Html, IntoResponse},
  routing::{get, post},
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::graphql::VersoSchema;

/// Builds the axum app around an executable schema.
pub fn router(schema: VersoSchema, graphiql: bool) -> Router {
  let endpoint = if graphiql { get(graphiql_handler).post(graphql_handler) } else { post(graphql_handler) };

  let cors = CorsLayer::new().allow_origin(Any).allow_methods([Method::GET, Method::POST]).allow_headers(Any);

  Router::new()
    .route("/", endpoint)
    .route("/health", get(health_handler))
    .with_state(schema)
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}

/// Binds `config.host:config.port` and serves until a shutdown signal.
pub async fn serve(config: &ServerConfig, schema: VersoSchema) -> std::io::Result<()> {
  let addr = config.socket_addr();
  let listener = tokio::net::TcpListener::bind(addr).await?;

  info!(addr = %addr, graphiql = config.graphiql, "server ready at http://{addr}/");

  axum::serve(listener, router(schema, config.graphiql))
    .with_graceful_shutdown(crate::infrastructure::shutdown::shutdown_signal())
    .await
}

async fn graphql_handler(State(schema): State<VersoSchema>, req: GraphQLRequest) -> GraphQLResponse {
  schema.execute(req.into_inner()).await.into()
}

async fn graphiql_handler() -> impl IntoResponse {
  Html(GraphiQLSource::build().endpoint("/").finish())
}

/// `GET /health`: liveness probe.
async fn health_handler() -> impl IntoResponse {
  Json(json!({ "status": "ok", "service": "verso" }))
}
