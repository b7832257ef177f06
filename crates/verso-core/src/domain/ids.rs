use serde::{Deserialize, Serialize};
use std::fmt;

/// Generates a string-backed identifier newtype.
///
/// Ids come from the document store as opaque strings (the document name
/// within its collection), so no format is imposed here.
macro_rules! document_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      pub fn new(id: impl Into<String>) -> Self {
        $name(id.into())
      }

      pub fn as_str(&self) -> &str {
        &self.0
      }

      pub fn into_inner(self) -> String {
        self.0
      }
    }

    impl From<String> for $name {
      fn from(s: String) -> Self {
        $name(s)
      }
    }

    impl From<&str> for $name {
      fn from(s: &str) -> Self {
        $name(s.to_owned())
      }
    }

    impl From<$name> for String {
      fn from(id: $name) -> Self {
        id.0
      }
    }

    impl AsRef<str> for $name {
      fn as_ref(&self) -> &str {
        &self.0
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }
  };
}

document_id!(
  /// Identificador de un usuario (documento de `users`).
  UserId
);

document_id!(
  /// Identificador de una canción (documento de `songs`).
  SongId
);

document_id!(
  /// Identificador de una playlist (documento de `playlists`).
  PlaylistId
);
