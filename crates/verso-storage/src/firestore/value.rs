//! Conversión entre el formato tipado de la API REST de Firestore
//! (`{"stringValue": "..."}`, `{"mapValue": {"fields": ...}}`, ...) y JSON plano.

use serde_json::{Map, Number, Value, json};
use verso_core::ports::StoreError;

fn malformed(msg: impl Into<String>) -> StoreError {
  StoreError::Malformed(msg.into())
}

/// Decodifica el mapa `fields` de un documento.
pub fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, StoreError> {
  fields.iter().map(|(name, value)| Ok((name.clone(), decode_value(value)?))).collect()
}

/// Decodifica un único `Value` de Firestore.
///
/// Los enteros llegan como string (`int64` en JSON) y se devuelven como
/// número. Timestamps, referencias y bytes se dejan como string.
pub fn decode_value(value: &Value) -> Result<Value, StoreError> {
  let obj = value.as_object().ok_or_else(|| malformed(format!("expected a typed value object, got {value}")))?;

  let (kind, inner) = match obj.len() {
    1 => obj.iter().next().ok_or_else(|| malformed("empty typed value"))?,
    n => return Err(malformed(format!("typed value must have exactly one key, found {n}"))),
  };

  match kind.as_str() {
    "nullValue" => Ok(Value::Null),
    "booleanValue" => inner.as_bool().map(Value::Bool).ok_or_else(|| malformed("booleanValue is not a bool")),
    "integerValue" => decode_integer(inner),
    "doubleValue" => decode_double(inner),
    "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
      .as_str()
      .map(|s| Value::String(s.to_owned()))
      .ok_or_else(|| malformed(format!("{kind} is not a string"))),
    "geoPointValue" => Ok(inner.clone()),
    "arrayValue" => {
      // un array vacío llega como `{}` sin `values`
      let values = match inner.get("values") {
        Some(Value::Array(values)) => values,
        Some(other) => return Err(malformed(format!("arrayValue.values is not an array: {other}"))),
        None => return Ok(Value::Array(Vec::new())),
      };
      values.iter().map(decode_value).collect::<Result<Vec<_>, _>>().map(Value::Array)
    }
    "mapValue" => match inner.get("fields") {
      Some(Value::Object(fields)) => decode_fields(fields).map(Value::Object),
      Some(other) => Err(malformed(format!("mapValue.fields is not an object: {other}"))),
      None => Ok(Value::Object(Map::new())),
    },
    other => Err(malformed(format!("unsupported value type {other:?}"))),
  }
}

fn decode_integer(inner: &Value) -> Result<Value, StoreError> {
  match inner {
    Value::String(s) => s
      .parse::<i64>()
      .map(|n| Value::Number(n.into()))
      .map_err(|e| malformed(format!("integerValue {s:?}: {e}"))),
    Value::Number(n) if n.is_i64() => Ok(Value::Number(n.clone())),
    other => Err(malformed(format!("integerValue has unexpected shape: {other}"))),
  }
}

fn decode_double(inner: &Value) -> Result<Value, StoreError> {
  let n = match inner {
    Value::Number(n) => n.as_f64(),
    // NaN / Infinity vienen como string y no tienen representación en JSON
    Value::String(s) => s.parse::<f64>().ok(),
    _ => None,
  };

  n.and_then(Number::from_f64).map(Value::Number).ok_or_else(|| malformed(format!("doubleValue {inner} is not finite")))
}

/// Codifica JSON plano al formato de Firestore, para los valores de filtro.
pub fn encode_value(value: &Value) -> Value {
  match value {
    Value::Null => json!({ "nullValue": null }),
    Value::Bool(b) => json!({ "booleanValue": b }),
    Value::Number(n) => match n.as_i64() {
      Some(i) => json!({ "integerValue": i.to_string() }),
      None => json!({ "doubleValue": n.as_f64() }),
    },
    Value::String(s) => json!({ "stringValue": s }),
    Value::Array(values) => json!({ "arrayValue": { "values": values.iter().map(encode_value).collect::<Vec<_>>() } }),
    Value::Object(fields) => {
      let fields: Map<String, Value> = fields.iter().map(|(k, v)| (k.clone(), encode_value(v))).collect();
      json!({ "mapValue": { "fields": fields } })
    }
  }
}
