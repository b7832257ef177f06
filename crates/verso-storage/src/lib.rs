pub mod config;
pub mod error;
pub mod firestore;
pub mod models;
pub mod schema;
pub mod sqlite;

use std::sync::Arc;

use verso_config::VersoPaths;
use verso_core::ports::DocumentStore;

pub use config::{FirestoreConfig, SqliteConfig, StorageBackend, StorageConfig};
pub use error::StorageError;
pub use firestore::{FirestoreStore, GoogleCredentials, StaticToken, TokenSource};
pub use sqlite::SqliteDocumentStore;

/// Construye el store configurado. Se llama una vez al arrancar; el resultado
/// se comparte entre todas las peticiones.
pub async fn open_store(config: &StorageConfig, paths: &VersoPaths) -> Result<Arc<dyn DocumentStore>, StorageError> {
  match config.backend {
    StorageBackend::Firestore => {
      let store = FirestoreStore::from_config(&config.firestore).await?;
      tracing::info!(documents_url = %store.documents_url(), "using firestore document store");
      Ok(Arc::new(store))
    }
    StorageBackend::Sqlite => {
      let db_path = config.sqlite.resolve_path(paths);
      let store = SqliteDocumentStore::open(&db_path.to_string_lossy(), config.sqlite.pool_size)?;
      tracing::info!(db_path = %db_path.display(), "using sqlite document store");
      Ok(Arc::new(store))
    }
  }
}
