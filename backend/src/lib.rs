//! `verso`: read-only GraphQL gateway over the song catalog.
//!
//! Startup wires the pieces in order: configuration, the document store
//! client, the catalog service, the GraphQL schema, and finally the HTTP
//! server. The store is opened once and shared by every request; it is
//! released after the server has drained.

pub mod config;
pub mod graphql;
pub mod infrastructure;
pub mod server;

use anyhow::Context;
use tracing::info;
use verso_config::VersoPaths;
use verso_core::services::CatalogService;

use crate::config::GatewayConfig;
use crate::graphql::SchemaOptions;

pub use infrastructure::telemetry::init_tracing;

/// Runs the gateway until a shutdown signal arrives.
pub async fn run(config: GatewayConfig, paths: &VersoPaths) -> anyhow::Result<()> {
  // --- Dependency Injection Phase ---

  // 1. Persistence adapter (Firestore or SQLite, per config)
  let store = verso_storage::open_store(&config.storage, paths).await.context("failed to open document store")?;

  // 2. Core service over the store
  let catalog = CatalogService::new(store);

  // 3. Schema owns the service for its whole lifetime
  let options = SchemaOptions { apollo_tracing: config.server.monitoring_enabled() };
  if options.apollo_tracing {
    info!("monitoring key present, apollo tracing enabled");
  }
  let schema = graphql::build_schema(catalog, options);

  // 4. Serve; the schema (and the store with it) is dropped when this returns
  server::serve(&config.server, schema).await.context("http server failed")?;

  info!("document store released, shutdown complete");
  Ok(())
}
