use serde::de::DeserializeOwned;

use crate::domain::{Playlist, PlaylistId, Song, SongId, User, UserId, decode_document};
use crate::errors::CoreError;
use crate::lookup::Lookup;
use crate::ports::{DocumentPath, DocumentStore, FieldFilter};

/// Servicio de consulta del catálogo.
///
/// Cada método hace exactamente una llamada al store y decodifica el
/// resultado. No guarda estado entre llamadas: sin caché, sin reintentos.
pub struct CatalogService<R>
where
  R: DocumentStore,
{
  store: R,
}

impl<R> CatalogService<R>
where
  R: DocumentStore,
{
  pub fn new(store: R) -> Self {
    Self { store }
  }

  // -------- QUERY (read) --------

  pub async fn list_songs(&self) -> Result<Vec<Song>, CoreError> {
    self.list(Song::COLLECTION, None).await
  }

  pub async fn list_users(&self) -> Result<Vec<User>, CoreError> {
    self.list(User::COLLECTION, None).await
  }

  pub async fn list_playlists(&self) -> Result<Vec<Playlist>, CoreError> {
    self.list(Playlist::COLLECTION, None).await
  }

  /// Canciones aportadas por `user_id`. Un usuario sin canciones (o que no
  /// existe) da una lista vacía.
  pub async fn songs_by_user(&self, user_id: &UserId) -> Result<Vec<Song>, CoreError> {
    let filter = FieldFilter::equals(Song::ENTERED_BY_FIELD, user_id.as_str());
    self.list(Song::COLLECTION, Some(&filter)).await
  }

  pub async fn find_user(&self, id: &UserId) -> Result<Lookup<User>, CoreError> {
    self.find(User::COLLECTION, id.as_str()).await
  }

  pub async fn find_song(&self, id: &SongId) -> Result<Lookup<Song>, CoreError> {
    self.find(Song::COLLECTION, id.as_str()).await
  }

  pub async fn find_playlist(&self, id: &PlaylistId) -> Result<Lookup<Playlist>, CoreError> {
    self.find(Playlist::COLLECTION, id.as_str()).await
  }

  async fn find<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Lookup<T>, CoreError> {
    let path = DocumentPath::new(collection, id)?;

    match self.store.get_document(&path).await? {
      Some(doc) => Ok(Lookup::Found(decode_document(collection, doc)?)),
      None => {
        tracing::debug!(%path, "document not found");
        Ok(Lookup::NotFound)
      }
    }
  }

  async fn list<T: DeserializeOwned>(
    &self,
    collection: &str,
    filter: Option<&FieldFilter>,
  ) -> Result<Vec<T>, CoreError> {
    let docs = self.store.query_collection(collection, filter).await?;
    tracing::debug!(collection, count = docs.len(), filtered = filter.is_some(), "collection read");

    // Un solo documento malformado hace fallar toda la lista.
    docs
      .into_iter()
      .map(|doc| decode_document(collection, doc).map_err(CoreError::from))
      .collect()
  }
}
