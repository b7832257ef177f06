use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Documento crudo tal como lo devuelve el store: su id dentro de la
/// colección y los campos ya convertidos a JSON plano.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
  pub id: String,
  pub fields: Map<String, Value>,
}

impl Document {
  pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
    Self { id: id.into(), fields }
  }

  pub fn field(&self, name: &str) -> Option<&Value> {
    self.fields.get(name)
  }
}

/// Ruta `collection/id` de un documento.
///
/// Un id vacío o con `/` no direcciona un documento de la colección (en
/// Firestore apuntaría a una subcolección), así que se rechaza al construir.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
  collection: String,
  id: String,
}

impl DocumentPath {
  pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Result<Self, StoreError> {
    let collection = collection.into();
    let id = id.into();

    if collection.is_empty() || collection.contains('/') {
      return Err(StoreError::InvalidPath(format!("invalid collection name {collection:?}")));
    }
    if id.is_empty() || id.contains('/') {
      return Err(StoreError::InvalidPath(format!("invalid document id {id:?}")));
    }

    Ok(Self { collection, id })
  }

  pub fn collection(&self) -> &str {
    &self.collection
  }

  pub fn id(&self) -> &str {
    &self.id
  }
}

impl fmt::Display for DocumentPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.collection, self.id)
  }
}

/// Predicado de igualdad sobre un campo de primer nivel.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
  pub field: String,
  pub value: Value,
}

impl FieldFilter {
  pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
    Self { field: field.into(), value: value.into() }
  }

  pub fn matches(&self, doc: &Document) -> bool {
    doc.field(&self.field) == Some(&self.value)
  }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("invalid document path: {0}")]
  InvalidPath(String),

  #[error("transport error: {0}")]
  Transport(String),

  #[error("store returned status {status}: {message}")]
  Status { status: u16, message: String },

  #[error("malformed store response: {0}")]
  Malformed(String),

  #[error("backend error: {0}")]
  Backend(String),
}

/// Port de lectura sobre una base de datos documental.
///
/// Son las dos únicas primitivas que consume el gateway. Las implementaciones
/// deben ser seguras para lecturas concurrentes: se comparten entre todas las
/// peticiones sin ningún lock por encima.
#[async_trait]
pub trait DocumentStore: Send + Sync {
  /// Lee un documento por ruta. `Ok(None)` si no existe.
  async fn get_document(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError>;

  /// Lee todos los documentos de una colección, opcionalmente filtrados por
  /// igualdad de un campo. El orden no está definido.
  async fn query_collection(
    &self,
    collection: &str,
    filter: Option<&FieldFilter>,
  ) -> Result<Vec<Document>, StoreError>;
}

#[async_trait]
impl<T> DocumentStore for Arc<T>
where
  T: DocumentStore + ?Sized,
{
  async fn get_document(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
    (**self).get_document(path).await
  }

  async fn query_collection(
    &self,
    collection: &str,
    filter: Option<&FieldFilter>,
  ) -> Result<Vec<Document>, StoreError> {
    (**self).query_collection(collection, filter).await
  }
}
