//! GraphQL surface of the gateway: seven read-only query fields over the
//! catalog, no mutations, no subscriptions.

pub mod error;
pub mod query;
pub mod types;

use async_graphql::extensions::{ApolloTracing, Tracing};
use async_graphql::{EmptyMutation, EmptySubscription, Schema};

pub use query::{Catalog, QueryRoot};

pub type VersoSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaOptions {
  /// Attach Apollo tracing data to every response.
  pub apollo_tracing: bool,
}

/// Builds the executable schema around an already-open catalog.
///
/// The catalog (and the store client inside it) lives as long as the schema.
pub fn build_schema(catalog: Catalog, options: SchemaOptions) -> VersoSchema {
  let builder = Schema::build(QueryRoot, EmptyMutation, EmptySubscription).data(catalog).extension(Tracing);

  if options.apollo_tracing {
    builder.extension(ApolloTracing).finish()
  } else {
    builder.finish()
  }
}

/// SDL of the public schema.
pub fn schema_sdl() -> String {
  Schema::build(QueryRoot, EmptyMutation, EmptySubscription).finish().sdl()
}
