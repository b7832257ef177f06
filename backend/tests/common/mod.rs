#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use verso_core::ports::{Document, DocumentPath, DocumentStore, FieldFilter, StoreError};
use verso_core::services::CatalogService;
use verso_lib::graphql::{SchemaOptions, VersoSchema, build_schema};

/// In-memory store. Paths listed in `failing` (and whole collections in
/// `failing_collections`) answer with a transport error.
#[derive(Default)]
pub struct FakeStore {
  docs: BTreeMap<(String, String), Map<String, Value>>,
  failing: BTreeSet<String>,
  failing_collections: BTreeSet<String>,
}

impl FakeStore {
  pub fn with(mut self, collection: &str, id: &str, value: Value) -> Self {
    let Value::Object(fields) = value else { panic!("fixture must be an object") };
    self.docs.insert((collection.to_owned(), id.to_owned()), fields);
    self
  }

  pub fn failing_on(mut self, path: &str) -> Self {
    self.failing.insert(path.to_owned());
    self
  }

  pub fn failing_collection(mut self, collection: &str) -> Self {
    self.failing_collections.insert(collection.to_owned());
    self
  }
}

#[async_trait]
impl DocumentStore for FakeStore {
  async fn get_document(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
    if self.failing.contains(&path.to_string()) {
      return Err(StoreError::Transport("deadline exceeded".into()));
    }
    let key = (path.collection().to_owned(), path.id().to_owned());
    Ok(self.docs.get(&key).map(|fields| Document::new(path.id(), fields.clone())))
  }

  async fn query_collection(
    &self,
    collection: &str,
    filter: Option<&FieldFilter>,
  ) -> Result<Vec<Document>, StoreError> {
    if self.failing_collections.contains(collection) {
      return Err(StoreError::Status { status: 503, message: "unavailable".into() });
    }
    Ok(
      self
        .docs
        .iter()
        .filter(|((c, _), _)| c == collection)
        .map(|((_, id), fields)| Document::new(id.clone(), fields.clone()))
        .filter(|doc| filter.is_none_or(|f| f.matches(doc)))
        .collect(),
    )
  }
}

/// The catalog used across the gateway tests.
pub fn catalog() -> FakeStore {
  FakeStore::default()
    .with(
      "songs",
      "s1",
      json!({
        "id": "s1",
        "name": "Ave Maria",
        "language": "la",
        "enteredBy": "u1",
        "lyrics": [{ "original": "Ave Maria", "translation": "Hail Mary", "transliteration": "" }]
      }),
    )
    .with(
      "songs",
      "s2",
      json!({
        "name": "Sakura Sakura",
        "language": "ja",
        "enteredBy": "u2",
        "lyrics": [{ "original": "さくら さくら", "translation": "cherry blossoms", "transliteration": "sakura sakura" }]
      }),
    )
    .with("users", "u1", json!({ "name": "Ana", "lastName": "Gil", "username": "anagil", "email": "ana@example.com" }))
    .with(
      "users",
      "u2",
      json!({ "name": "Kenji", "lastName": "Mori", "username": "kmori", "email": "kenji@example.com" }),
    )
    .with(
      "playlists",
      "p1",
      json!({ "name": "Evening", "createdBy": "u1", "songs": [{ "order": 2, "songId": "s1" }, { "order": 2, "songId": "s2" }] }),
    )
}

pub fn schema(store: FakeStore) -> VersoSchema {
  build_schema(CatalogService::new(Arc::new(store) as Arc<dyn DocumentStore>), SchemaOptions::default())
}

/// Executes `query` and returns the serialized `{data, errors}` body.
pub async fn execute(schema: &VersoSchema, query: &str) -> Value {
  let response = schema.execute(query).await;
  serde_json::to_value(&response).expect("response serializes")
}

pub fn error_codes(body: &Value) -> Vec<String> {
  body["errors"]
    .as_array()
    .map(|errors| errors.iter().filter_map(|e| e["extensions"]["code"].as_str().map(str::to_owned)).collect())
    .unwrap_or_default()
}
