use verso_config::{TomlConfigBackend, VersoPaths};
use verso_core::domain::SongId;
use verso_core::services::CatalogService;
use verso_storage::{StorageConfig, open_store};

#[tokio::main(flavor = "current_thread")]
async fn main() {
  let song_id = std::env::args().nth(1).unwrap_or_else(|| "s1".to_string());

  // Usa el store configurado en verso.toml / entorno
  let paths = VersoPaths::detect().expect("failed to resolve verso paths");
  let storage = StorageConfig::load_from(&TomlConfigBackend::new(paths.clone())).expect("failed to load config");
  let store = open_store(&storage, &paths).await.expect("failed to open store");

  let catalog = CatalogService::new(store);

  println!("Loading song with id = {song_id}");

  let song = catalog.find_song(&SongId::new(song_id)).await.expect("failed to load song");

  println!("Loaded from store: {song:?}");
}
