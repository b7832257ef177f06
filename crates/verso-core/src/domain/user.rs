use crate::domain::ids::UserId;
use serde::{Deserialize, Serialize};

/// Usuario registrado. Se crea y modifica fuera de este sistema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: UserId,
  pub name: String,
  pub last_name: String,
  pub username: String,
  pub email: String,
}

impl User {
  pub const COLLECTION: &'static str = "users";
}
