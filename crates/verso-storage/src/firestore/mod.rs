//! Adapter de [`DocumentStore`] sobre la API REST v1 de Cloud Firestore.
//!
//! - lectura por id: `GET {documents}/{collection}/{id}`
//! - colección (con o sin filtro): `POST {documents}:runQuery`
//!
//! Sirve igual para el emulador local cambiando `base_url`.

pub mod auth;
pub mod value;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use verso_core::ports::{Document, DocumentPath, DocumentStore, FieldFilter, StoreError};

use crate::config::FirestoreConfig;
use crate::error::StorageError;

pub use auth::{GoogleCredentials, StaticToken, TokenSource};

/// Documento tal como lo serializa la API REST.
#[derive(Debug, Deserialize)]
struct RawDocument {
  /// `projects/{p}/databases/{d}/documents/{collection}/{id}`
  name: String,
  #[serde(default)]
  fields: Map<String, Value>,
}

/// Una línea de la respuesta de `runQuery`. Las líneas sin `document` sólo
/// informan progreso (`readTime`, `skippedResults`).
#[derive(Debug, Deserialize)]
struct RunQueryLine {
  document: Option<RawDocument>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
  error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  message: String,
}

#[derive(Clone)]
pub struct FirestoreStore {
  client: Client,
  documents_url: Url,
  tokens: Arc<dyn TokenSource>,
}

impl FirestoreStore {
  pub fn new(
    client: Client,
    base_url: &str,
    project_id: &str,
    database: &str,
    tokens: Arc<dyn TokenSource>,
  ) -> Result<Self, StorageError> {
    let raw = format!("{}/projects/{project_id}/databases/{database}/documents", base_url.trim_end_matches('/'));
    let documents_url = Url::parse(&raw).map_err(|e| StorageError::InvalidUrl(format!("{raw}: {e}")))?;
    if documents_url.cannot_be_a_base() {
      return Err(StorageError::InvalidUrl(raw));
    }
    Ok(Self { client, documents_url, tokens })
  }

  /// Fuera del emulador las credenciales de Google son obligatorias; el
  /// proyecto se toma de la configuración o, si falta, de las credenciales.
  pub async fn from_config(config: &FirestoreConfig) -> Result<Self, StorageError> {
    let client = Client::builder().user_agent(concat!("verso/", env!("CARGO_PKG_VERSION"))).build()?;

    if config.emulator {
      let project_id =
        config.project_id.as_deref().ok_or(StorageError::MissingSetting("storage.firestore.project_id"))?;
      let token = config.emulator_token();
      if token.is_none() {
        tracing::debug!(token_env = %config.token_env, "emulator requests go out unauthenticated");
      }
      return Self::new(client, &config.base_url, project_id, &config.database, Arc::new(StaticToken::new(token)));
    }

    let credentials = GoogleCredentials::detect(config.service_account.as_deref()).await?;
    let project_id = match &config.project_id {
      Some(project_id) => project_id.clone(),
      None => credentials.project_id().await?,
    };
    Self::new(client, &config.base_url, &project_id, &config.database, Arc::new(credentials))
  }

  pub fn documents_url(&self) -> &str {
    self.documents_url.as_str()
  }

  /// URL del documento con la colección y el id codificados como segmentos,
  /// de modo que `?`, `#` o `%` en un id no cambian el recurso pedido.
  fn document_url(&self, path: &DocumentPath) -> Url {
    let mut url = self.documents_url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
      segments.push(path.collection()).push(path.id());
    }
    url
  }

  async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
    let request = match self.tokens.bearer().await? {
      Some(token) => request.bearer_auth(token),
      None => request,
    };
    request.send().await.map_err(|e| StoreError::Transport(e.to_string()))
  }
}

async fn error_from(response: Response) -> StoreError {
  let status = response.status().as_u16();
  let message = match response.json::<ErrorEnvelope>().await {
    Ok(envelope) => envelope.error.message,
    Err(_) => "no error body".to_string(),
  };
  StoreError::Status { status, message }
}

fn name_id(name: &str) -> Option<&str> {
  name.rsplit('/').next().filter(|id| !id.is_empty())
}

fn into_document(raw: RawDocument) -> Result<Document, StoreError> {
  let id = name_id(&raw.name).ok_or_else(|| StoreError::Malformed(format!("document name without id: {:?}", raw.name)))?;

  Ok(Document::new(id, value::decode_fields(&raw.fields)?))
}

fn run_query_body(collection: &str, filter: Option<&FieldFilter>) -> Value {
  let mut query = json!({ "from": [{ "collectionId": collection }] });

  if let Some(filter) = filter {
    query["where"] = json!({
      "fieldFilter": {
        "field": { "fieldPath": filter.field },
        "op": "EQUAL",
        "value": value::encode_value(&filter.value),
      }
    });
  }

  json!({ "structuredQuery": query })
}

#[async_trait]
impl DocumentStore for FirestoreStore {
  async fn get_document(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
    let url = self.document_url(path);
    tracing::debug!(%path, "firestore get");

    let response = self.send(self.client.get(url.clone())).await?;
    match response.status() {
      StatusCode::NOT_FOUND => Ok(None),
      status if status.is_success() => {
        let raw: RawDocument = response.json().await.map_err(|e| StoreError::Malformed(e.to_string()))?;

        // el nombre puede volver con el id tal cual o codificado
        let encoded_id = url.path_segments().and_then(|segments| segments.last()).unwrap_or_default();
        let returned = name_id(&raw.name).unwrap_or_default();
        if returned != path.id() && returned != encoded_id {
          return Err(StoreError::Malformed(format!("asked for {path}, store answered with {:?}", raw.name)));
        }

        Ok(Some(Document::new(path.id(), value::decode_fields(&raw.fields)?)))
      }
      _ => Err(error_from(response).await),
    }
  }

  async fn query_collection(
    &self,
    collection: &str,
    filter: Option<&FieldFilter>,
  ) -> Result<Vec<Document>, StoreError> {
    let url = format!("{}:runQuery", self.documents_url);
    tracing::debug!(collection, ?filter, "firestore runQuery");

    let request = self.client.post(&url).json(&run_query_body(collection, filter));
    let response = self.send(request).await?;
    if !response.status().is_success() {
      return Err(error_from(response).await);
    }

    let lines: Vec<RunQueryLine> = response.json().await.map_err(|e| StoreError::Malformed(e.to_string()))?;
    lines.into_iter().filter_map(|line| line.document).map(into_document).collect()
  }
}
