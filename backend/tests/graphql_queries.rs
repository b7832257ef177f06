mod common;

use common::{FakeStore, catalog, error_codes, execute, schema};
use serde_json::{Value, json};
use verso_lib::graphql::schema_sdl;

#[tokio::test]
async fn song_by_id_returns_the_stored_record() {
  let schema = schema(catalog());

  let body = execute(
    &schema,
    r#"{ song(id: "s1") { id name language enteredBy lyrics { original translation transliteration } } }"#,
  )
  .await;

  assert!(body.get("errors").is_none(), "unexpected errors: {body}");
  assert_eq!(
    body["data"]["song"],
    json!({
      "id": "s1",
      "name": "Ave Maria",
      "language": "la",
      "enteredBy": "u1",
      "lyrics": [{ "original": "Ave Maria", "translation": "Hail Mary", "transliteration": "" }]
    })
  );
}

#[tokio::test]
async fn single_lookups_echo_the_requested_id() {
  let schema = schema(catalog());

  let body = execute(&schema, r#"{ user(id: "u2") { id username } playlist(id: "p1") { id name } song(id: "s2") { id } }"#)
    .await;

  assert_eq!(body["data"]["user"]["id"], "u2");
  assert_eq!(body["data"]["user"]["username"], "kmori");
  assert_eq!(body["data"]["playlist"]["id"], "p1");
  assert_eq!(body["data"]["song"]["id"], "s2");
}

#[tokio::test]
async fn unknown_ids_are_reported_as_not_found_errors() {
  let schema = schema(catalog());

  let body = execute(&schema, r#"{ song(id: "nope") { id } user(id: "nope") { id } playlist(id: "nope") { id } }"#).await;

  assert_eq!(body["data"], json!({ "song": null, "user": null, "playlist": null }));
  assert_eq!(error_codes(&body), vec!["NOT_FOUND", "NOT_FOUND", "NOT_FOUND"]);

  let messages: Vec<&str> = body["errors"].as_array().unwrap().iter().map(|e| e["message"].as_str().unwrap()).collect();
  assert!(messages.contains(&"Song ID not found"));
  assert!(messages.contains(&"User ID not found"));
  assert!(messages.contains(&"Playlist ID not found"));
}

#[tokio::test]
async fn songs_by_user_filters_on_contributor() {
  let schema = schema(catalog());

  let body = execute(&schema, r#"{ mine: songsByUser(id: "u1") { id enteredBy } nobody: songsByUser(id: "u9") { id } }"#)
    .await;

  assert!(body.get("errors").is_none(), "unexpected errors: {body}");
  assert_eq!(body["data"]["mine"], json!([{ "id": "s1", "enteredBy": "u1" }]));
  assert_eq!(body["data"]["nobody"], json!([]));
}

#[tokio::test]
async fn collections_return_every_document_once() {
  let schema = schema(catalog());

  let body = execute(&schema, "{ songs { id } users { id email } playlists { id songs { order songId } } }").await;

  let mut song_ids: Vec<&str> = body["data"]["songs"].as_array().unwrap().iter().map(|s| s["id"].as_str().unwrap()).collect();
  song_ids.sort_unstable();
  assert_eq!(song_ids, vec!["s1", "s2"]);

  assert_eq!(body["data"]["users"].as_array().unwrap().len(), 2);

  // duplicated order values are passed through untouched
  assert_eq!(
    body["data"]["playlists"],
    json!([{ "id": "p1", "songs": [{ "order": 2, "songId": "s1" }, { "order": 2, "songId": "s2" }] }])
  );
}

#[tokio::test]
async fn empty_store_gives_empty_lists() {
  let schema = schema(FakeStore::default());

  let body = execute(&schema, "{ songs { id } users { id } playlists { id } }").await;

  assert!(body.get("errors").is_none());
  assert_eq!(body["data"], json!({ "songs": [], "users": [], "playlists": [] }));
}

#[tokio::test]
async fn store_failure_is_isolated_to_its_field() {
  let schema = schema(catalog().failing_on("songs/s1"));

  let body = execute(&schema, r#"{ song(id: "s1") { id } user(id: "u1") { name } songs { id } }"#).await;

  assert_eq!(body["data"]["song"], Value::Null);
  assert_eq!(body["data"]["user"]["name"], "Ana");
  assert_eq!(body["data"]["songs"].as_array().unwrap().len(), 2);

  let errors = body["errors"].as_array().unwrap();
  assert_eq!(errors.len(), 1);
  assert_eq!(errors[0]["path"], json!(["song"]));
  assert_eq!(errors[0]["message"], "Internal server error");
  assert_eq!(errors[0]["extensions"]["code"], "INTERNAL_SERVER_ERROR");
}

#[tokio::test]
async fn failing_collection_scan_reports_server_error() {
  let schema = schema(catalog().failing_collection("songs"));

  let body = execute(&schema, r#"{ songsByUser(id: "u1") { id } playlists { id } }"#).await;

  assert_eq!(body["data"]["songsByUser"], Value::Null);
  assert_eq!(body["data"]["playlists"].as_array().unwrap().len(), 1);
  assert_eq!(error_codes(&body), vec!["INTERNAL_SERVER_ERROR"]);
}

#[tokio::test]
async fn malformed_documents_fail_closed() {
  let store = catalog().with("users", "broken", json!({ "name": "No Email" }));
  let schema = schema(store);

  let body = execute(&schema, r#"{ user(id: "broken") { id } users { id } song(id: "s1") { id } }"#).await;

  assert_eq!(body["data"]["user"], Value::Null);
  assert_eq!(body["data"]["users"], Value::Null);
  assert_eq!(body["data"]["song"]["id"], "s1");
  assert_eq!(error_codes(&body), vec!["DECODE_ERROR", "DECODE_ERROR"]);

  for error in body["errors"].as_array().unwrap() {
    let message = error["message"].as_str().unwrap();
    assert_eq!(message, "Stored record is malformed");
    assert!(!message.contains("users/broken"));
  }
}

#[tokio::test]
async fn ids_that_are_not_document_names_are_bad_input() {
  let schema = schema(catalog());

  let body = execute(&schema, r#"{ empty: song(id: "") { id } nested: user(id: "u1/private") { id } }"#).await;

  assert_eq!(body["data"], json!({ "empty": null, "nested": null }));
  assert_eq!(error_codes(&body), vec!["BAD_USER_INPUT", "BAD_USER_INPUT"]);
}

#[tokio::test]
async fn id_argument_is_required() {
  let schema = schema(catalog());

  let body = execute(&schema, "{ song { id } }").await;

  assert_eq!(body["data"], Value::Null);
  assert!(body["errors"][0]["message"].as_str().unwrap().contains("id"));
}

#[tokio::test]
async fn variables_are_accepted() {
  let schema = schema(catalog());

  let request = async_graphql::Request::new("query Song($id: String!) { song(id: $id) { name } }")
    .variables(async_graphql::Variables::from_json(json!({ "id": "s2" })));
  let body = serde_json::to_value(schema.execute(request).await).unwrap();

  assert_eq!(body["data"]["song"]["name"], "Sakura Sakura");
}

#[test]
fn sdl_exposes_the_catalog_queries() {
  let sdl = schema_sdl();

  for field in [
    "songs: [Song!]",
    "users: [User!]",
    "user(id: String!): User",
    "playlists: [Playlist!]",
    "playlist(id: String!): Playlist",
    "song(id: String!): Song",
    "songsByUser(id: String!): [Song!]",
  ] {
    assert!(sdl.contains(field), "missing `{field}` in schema:\n{sdl}");
  }

  assert!(sdl.contains("lastName: String!"));
  assert!(sdl.contains("songs: [PlaylistItem!]!"));
  assert!(sdl.contains("lyrics: [Lyric!]!"));
  assert!(sdl.contains("order: Int!"));
  assert!(!sdl.contains("type Mutation"));
}

#[tokio::test]
async fn monitoring_adds_apollo_tracing_to_responses() {
  use std::sync::Arc;
  use verso_core::ports::DocumentStore;
  use verso_core::services::CatalogService;
  use verso_lib::graphql::{SchemaOptions, build_schema};

  let store: Arc<dyn DocumentStore> = Arc::new(catalog());
  let schema = build_schema(CatalogService::new(store), SchemaOptions { apollo_tracing: true });

  let body = execute(&schema, r#"{ song(id: "s1") { id } }"#).await;

  assert_eq!(body["data"]["song"]["id"], "s1");
  assert!(body["extensions"]["tracing"]["duration"].is_number());
}
