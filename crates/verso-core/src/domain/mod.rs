pub mod decode;
pub mod ids;
pub mod playlist;
pub mod song;
pub mod user;

pub use decode::{DecodeError, decode_document};
pub use ids::{PlaylistId, SongId, UserId};
pub use playlist::{Playlist, PlaylistItem};
pub use song::{Lyric, Song};
pub use user::User;
