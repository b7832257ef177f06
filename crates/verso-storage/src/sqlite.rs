use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use serde_json::{Map, Value};

use verso_core::ports::{Document, DocumentPath, DocumentStore, FieldFilter, StoreError};

use crate::error::StorageError;
use crate::models::{DocumentRow, NewDocumentRow};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Store documental local: una tabla `documents(collection, id, body)` con el
/// cuerpo en JSON. Pensado para desarrollo y pruebas sin Firestore.
///
/// Diesel es síncrono; cada lectura corre en el pool bloqueante de Tokio con
/// su propia conexión del pool r2d2.
#[derive(Clone)]
pub struct SqliteDocumentStore {
  pool: SqlitePool,
}

impl SqliteDocumentStore {
  /// Abre (o crea, junto con su directorio) la base de datos y aplica las
  /// migraciones pendientes.
  pub fn open(database_url: &str, pool_size: u32) -> Result<Self, StorageError> {
    if database_url != ":memory:" {
      if let Some(parent) = std::path::Path::new(database_url).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
      }
    }

    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let builder = if database_url == ":memory:" {
      // cada conexión a `:memory:` es una base distinta: una sola, que no caduque
      Pool::builder().max_size(1).idle_timeout(None).max_lifetime(None)
    } else {
      Pool::builder().max_size(pool_size.max(1))
    };
    let pool = builder
      .build(manager)
      .map_err(|e| StorageError::Connection(e.to_string()))?;

    let mut pooled = pool.get().map_err(|e| StorageError::Connection(e.to_string()))?;
    let conn: &mut SqliteConnection = &mut pooled;
    let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| StorageError::Migration(e.to_string()))?;
    if !applied.is_empty() {
      tracing::info!(database_url, migrations = applied.len(), "sqlite migrations applied");
    }

    Ok(Self { pool })
  }

  /// Inserta o reemplaza un documento. No forma parte del port: sólo lo usan
  /// las herramientas de carga y los tests.
  pub fn put_document(&self, collection: &str, id: &str, fields: &Map<String, Value>) -> Result<(), StorageError> {
    use crate::schema::documents;

    DocumentPath::new(collection, id).map_err(|e| StorageError::InvalidDocument(e.to_string()))?;

    let row = NewDocumentRow { collection, id, body: serde_json::to_string(fields)? };
    let mut pooled = self.pool.get().map_err(|e| StorageError::Connection(e.to_string()))?;
    let conn: &mut SqliteConnection = &mut pooled;

    diesel::replace_into(documents::table).values(&row).execute(conn)?;

    Ok(())
  }

  async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
  where
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
  {
    let pool = self.pool.clone();

    tokio::task::spawn_blocking(move || {
      let mut pooled = pool.get().map_err(|e| StoreError::Backend(e.to_string()))?;
      f(&mut pooled).map_err(|e| StoreError::Backend(e.to_string()))
    })
    .await
    .map_err(|e| StoreError::Backend(format!("sqlite task failed: {e}")))?
  }
}

fn row_to_document(row: DocumentRow) -> Result<Document, StoreError> {
  let fields: Map<String, Value> = serde_json::from_str(&row.body)
    .map_err(|e| StoreError::Malformed(format!("{}/{}: body is not a JSON object: {e}", row.collection, row.id)))?;
  Ok(Document::new(row.id, fields))
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
  async fn get_document(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
    use crate::schema::documents::dsl::*;

    let (wanted_collection, wanted_id) = (path.collection().to_owned(), path.id().to_owned());

    let row = self
      .with_conn(move |conn| {
        documents
          .filter(collection.eq(wanted_collection))
          .filter(id.eq(wanted_id))
          .select(DocumentRow::as_select())
          .first(conn)
          .optional()
      })
      .await?;

    row.map(row_to_document).transpose()
  }

  async fn query_collection(
    &self,
    wanted: &str,
    filter: Option<&FieldFilter>,
  ) -> Result<Vec<Document>, StoreError> {
    use crate::schema::documents::dsl::*;

    let wanted = wanted.to_owned();
    let rows = self
      .with_conn(move |conn| {
        documents.filter(collection.eq(wanted)).order(id.asc()).select(DocumentRow::as_select()).load(conn)
      })
      .await?;

    let mut docs = Vec::with_capacity(rows.len());
    for row in rows {
      let doc = row_to_document(row)?;
      if filter.is_none_or(|f| f.matches(&doc)) {
        docs.push(doc);
      }
    }
    Ok(docs)
  }
}
