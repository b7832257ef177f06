// crates/verso-core/src/errors.rs
use thiserror::Error;

use crate::domain::DecodeError;
use crate::ports::StoreError;

/// Error genérico del núcleo de Verso.
///
/// "No encontrado" no es un error aquí: las búsquedas por id devuelven
/// [`Lookup::NotFound`](crate::Lookup::NotFound) y es la capa de GraphQL quien
/// decide cómo reportarlo.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("invalid id: {0}")]
  InvalidId(String),

  #[error("store error: {0}")]
  Store(#[source] StoreError),

  #[error(transparent)]
  Decode(#[from] DecodeError),
}

impl From<StoreError> for CoreError {
  fn from(err: StoreError) -> Self {
    match err {
      StoreError::InvalidPath(msg) => CoreError::InvalidId(msg),
      other => CoreError::Store(other),
    }
  }
}
