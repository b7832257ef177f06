use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::ports::Document;

/// Un documento del store que no encaja con la forma tipada esperada.
#[derive(Debug, thiserror::Error)]
#[error("document {collection}/{id} does not decode: {source}")]
pub struct DecodeError {
  pub collection: String,
  pub id: String,
  #[source]
  pub source: serde_json::Error,
}

/// Convierte un documento crudo en su tipo de dominio.
///
/// El id del documento siempre se toma de su ruta en el store; si el cuerpo
/// trae un campo `id` distinto, prevalece la ruta. Cualquier campo obligatorio
/// ausente o con tipo incorrecto produce un [`DecodeError`].
pub fn decode_document<T: DeserializeOwned>(collection: &str, doc: Document) -> Result<T, DecodeError> {
  let Document { id, mut fields } = doc;

  if let Some(stored) = fields.get("id").and_then(Value::as_str) {
    if stored != id {
      tracing::debug!(collection, id = %id, stored_id = %stored, "document body id differs from its path");
    }
  }
  fields.insert("id".to_owned(), Value::String(id.clone()));

  serde_json::from_value(Value::Object(fields)).map_err(|source| DecodeError {
    collection: collection.to_owned(),
    id,
    source,
  })
}

/// Trata un `null` guardado igual que un campo ausente.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
