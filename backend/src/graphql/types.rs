//! GraphQL object types. Thin projections of the domain records, kept apart
//! so verso-core stays free of the GraphQL stack.

use async_graphql::{ID, SimpleObject};
use verso_core::domain;

#[derive(Debug, Clone, SimpleObject)]
pub struct User {
  pub id: ID,
  pub name: String,
  pub last_name: String,
  pub username: String,
  pub email: String,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Lyric {
  pub original: Option<String>,
  pub translation: Option<String>,
  pub transliteration: Option<String>,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Song {
  pub id: ID,
  pub name: String,
  /// Language tag of the original lyrics.
  pub language: String,
  /// Id of the user who contributed the song.
  pub entered_by: String,
  pub lyrics: Vec<Lyric>,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct PlaylistItem {
  /// Position chosen by the playlist's author; not guaranteed unique or contiguous.
  pub order: i32,
  pub song_id: String,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Playlist {
  pub id: ID,
  pub name: Option<String>,
  pub created_by: Option<String>,
  pub songs: Vec<PlaylistItem>,
}

impl From<domain::User> for User {
  fn from(user: domain::User) -> Self {
    User {
      id: ID(user.id.into_inner()),
      name: user.name,
      last_name: user.last_name,
      username: user.username,
      email: user.email,
    }
  }
}

impl From<domain::Lyric> for Lyric {
  fn from(lyric: domain::Lyric) -> Self {
    Lyric { original: lyric.original, translation: lyric.translation, transliteration: lyric.transliteration }
  }
}

impl From<domain::Song> for Song {
  fn from(song: domain::Song) -> Self {
    Song {
      id: ID(song.id.into_inner()),
      name: song.name,
      language: song.language,
      entered_by: song.entered_by.into_inner(),
      lyrics: song.lyrics.into_iter().map(Lyric::from).collect(),
    }
  }
}

impl From<domain::PlaylistItem> for PlaylistItem {
  fn from(item: domain::PlaylistItem) -> Self {
    PlaylistItem { order: item.order, song_id: item.song_id.into_inner() }
  }
}

impl From<domain::Playlist> for Playlist {
  fn from(playlist: domain::Playlist) -> Self {
    Playlist {
      id: ID(playlist.id.into_inner()),
      name: playlist.name,
      created_by: playlist.created_by.map(String::from),
      songs: playlist.songs.into_iter().map(PlaylistItem::from).collect(),
    }
  }
}
