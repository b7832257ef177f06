use std::sync::Arc;

use async_graphql::{Context, Object, Result};
use verso_core::domain::{PlaylistId, SongId, UserId};
use verso_core::ports::DocumentStore;
use verso_core::services::CatalogService;

use crate::graphql::error::{field_error, found};
use crate::graphql::types::{Playlist, Song, User};

/// The catalog service as held by the schema: one shared store client.
pub type Catalog = CatalogService<Arc<dyn DocumentStore>>;

fn catalog<'a>(ctx: &Context<'a>) -> Result<&'a Catalog> {
  ctx.data::<Catalog>()
}

fn project<T, U: From<T>>(items: Vec<T>) -> Option<Vec<U>> {
  Some(items.into_iter().map(U::from).collect())
}

/// Root query type.
///
/// Every field is nullable: a failing field resolves to `null` with its error
/// in `errors`, and its siblings still resolve.
pub struct QueryRoot;

#[Object]
impl QueryRoot {
  /// All songs in the catalog.
  async fn songs(&self, ctx: &Context<'_>) -> Result<Option<Vec<Song>>> {
    tracing::debug!("resolving songs");
    let songs = catalog(ctx)?.list_songs().await.map_err(|e| field_error("songs", e))?;
    Ok(project(songs))
  }

  /// All registered users.
  async fn users(&self, ctx: &Context<'_>) -> Result<Option<Vec<User>>> {
    tracing::debug!("resolving users");
    let users = catalog(ctx)?.list_users().await.map_err(|e| field_error("users", e))?;
    Ok(project(users))
  }

  async fn user(&self, ctx: &Context<'_>, id: String) -> Result<Option<User>> {
    tracing::debug!(%id, "resolving user");
    let lookup = catalog(ctx)?.find_user(&UserId::new(id.as_str())).await.map_err(|e| field_error("user", e))?;
    Ok(Some(found(lookup, "User", &id)?.into()))
  }

  /// All playlists.
  async fn playlists(&self, ctx: &Context<'_>) -> Result<Option<Vec<Playlist>>> {
    tracing::debug!("resolving playlists");
    let playlists = catalog(ctx)?.list_playlists().await.map_err(|e| field_error("playlists", e))?;
    Ok(project(playlists))
  }

  async fn playlist(&self, ctx: &Context<'_>, id: String) -> Result<Option<Playlist>> {
    tracing::debug!(%id, "resolving playlist");
    let lookup =
      catalog(ctx)?.find_playlist(&PlaylistId::new(id.as_str())).await.map_err(|e| field_error("playlist", e))?;
    Ok(Some(found(lookup, "Playlist", &id)?.into()))
  }

  async fn song(&self, ctx: &Context<'_>, id: String) -> Result<Option<Song>> {
    tracing::debug!(%id, "resolving song");
    let lookup = catalog(ctx)?.find_song(&SongId::new(id.as_str())).await.map_err(|e| field_error("song", e))?;
    Ok(Some(found(lookup, "Song", &id)?.into()))
  }

  /// Songs contributed by the user with the given id.
  async fn songs_by_user(&self, ctx: &Context<'_>, id: String) -> Result<Option<Vec<Song>>> {
    tracing::debug!(%id, "resolving songsByUser");
    let songs = catalog(ctx)?.songs_by_user(&UserId::new(id)).await.map_err(|e| field_error("songsByUser", e))?;
    Ok(project(songs))
  }
}
