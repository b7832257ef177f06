use crate::domain::ids::{PlaylistId, SongId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
  pub id: PlaylistId,
  pub name: Option<String>,
  pub created_by: Option<UserId>,
  #[serde(default, deserialize_with = "crate::domain::decode::null_as_default")]
  pub songs: Vec<PlaylistItem>,
}

impl Playlist {
  pub const COLLECTION: &'static str = "playlists";
}

/// Entrada de una playlist.
///
/// `order` lo decide quien creó la playlist; aquí no se comprueba que sea
/// contiguo, único ni que venga ordenado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
  pub order: i32,
  pub song_id: SongId,
}
