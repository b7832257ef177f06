//! Carga un catálogo JSON en el store SQLite local.
//!
//! Formato: `{ "<collection>": { "<id>": { ...campos... } } }`
//!
//! Uso: `seed_sqlite <catalog.json> [db_path]`. Sin `db_path` usa la ruta
//! de `[storage.sqlite]` en verso.toml.

use serde_json::{Map, Value};
use verso_config::{TomlConfigBackend, VersoPaths};
use verso_storage::{SqliteDocumentStore, StorageConfig};

fn main() {
  let mut args = std::env::args().skip(1);
  let catalog_path = args.next().expect("usage: seed_sqlite <catalog.json> [db_path]");

  let paths = VersoPaths::detect().expect("failed to resolve verso paths");
  let storage = StorageConfig::load_from(&TomlConfigBackend::new(paths.clone())).expect("failed to load config");
  let db_path = args.next().map(Into::into).unwrap_or_else(|| storage.sqlite.resolve_path(&paths));

  let store = SqliteDocumentStore::open(&db_path.to_string_lossy(), 1).expect("failed to open sqlite store");

  let raw = std::fs::read_to_string(&catalog_path).expect("failed to read catalog");
  let catalog: Map<String, Value> = serde_json::from_str(&raw).expect("catalog must be a JSON object");

  let mut total = 0;
  for (collection, docs) in &catalog {
    let Value::Object(docs) = docs else {
      panic!("collection {collection:?} must map ids to documents");
    };

    for (id, doc) in docs {
      let Value::Object(fields) = doc else {
        panic!("document {collection}/{id} must be an object");
      };
      store.put_document(collection, id, fields).expect("failed to save document");
      total += 1;
    }
    println!("{collection}: {} documents", docs.len());
  }

  println!("Seeded {total} documents into {}", db_path.display());
}
