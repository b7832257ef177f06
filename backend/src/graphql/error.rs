use async_graphql::{Error, ErrorExtensions};
use verso_core::{CoreError, Lookup};

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const BAD_USER_INPUT: &str = "BAD_USER_INPUT";
pub const DECODE_ERROR: &str = "DECODE_ERROR";
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

fn coded(message: impl Into<String>, code: &'static str) -> Error {
  Error::new(message).extend_with(|_, ext| ext.set("code", code))
}

/// Unwraps a single-entity lookup, turning `NotFound` into an error in the
/// response's `errors` list rather than a value.
pub fn found<T>(lookup: Lookup<T>, kind: &str, id: &str) -> Result<T, Error> {
  match lookup {
    Lookup::Found(value) => Ok(value),
    Lookup::NotFound => {
      let id = id.to_owned();
      Err(Error::new(format!("{kind} ID not found")).extend_with(move |_, ext| {
        ext.set("code", NOT_FOUND);
        ext.set("id", id);
      }))
    }
  }
}

/// Maps a core failure for `field` to the error the client sees. Decode and
/// store failures are logged in full; the client only gets a generic message
/// and the code.
pub fn field_error(field: &str, err: CoreError) -> Error {
  match err {
    CoreError::InvalidId(reason) => coded(reason, BAD_USER_INPUT),
    CoreError::Decode(e) => {
      tracing::error!(field, collection = %e.collection, id = %e.id, error = %e.source, "stored document failed to decode");
      coded("Stored record is malformed", DECODE_ERROR)
    }
    CoreError::Store(e) => {
      tracing::error!(field, error = %e, "document store call failed");
      coded("Internal server error", INTERNAL_SERVER_ERROR)
    }
  }
}
