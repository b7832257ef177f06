use crate::domain::ids::{SongId, UserId};
use serde::{Deserialize, Serialize};

/// Una canción con su letra en uno o varios idiomas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
  pub id: SongId,
  pub name: String,
  /// Etiqueta del idioma original (p. ej. `"la"`, `"es"`).
  pub language: String,
  /// Usuario que aportó la canción.
  pub entered_by: UserId,
  /// Líneas de la letra, en el orden guardado.
  #[serde(default, deserialize_with = "crate::domain::decode::null_as_default")]
  pub lyrics: Vec<Lyric>,
}

impl Song {
  pub const COLLECTION: &'static str = "songs";

  /// Campo por el que se filtran las canciones de un usuario.
  pub const ENTERED_BY_FIELD: &'static str = "enteredBy";
}

/// Una línea de letra: texto original, traducción y transliteración.
///
/// Value object sin identidad propia; vive dentro de su [`Song`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lyric {
  pub original: Option<String>,
  pub translation: Option<String>,
  pub transliteration: Option<String>,
}
