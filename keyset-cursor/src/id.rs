//! Opaque node ids of the form base64(`{"<kind>": <id>}`).
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Value};

pub use crate::error::GlobalIdError;

pub fn encode_global_id(kind: &str, id: i64) -> String {
    let mut map = Map::new();
    map.insert(kind.to_string(), Value::from(id));
    STANDARD.encode(Value::Object(map).to_string())
}

/// Accepts the base64 form as well as raw JSON.
pub fn decode_global_id(expected: &'static str, token: &str) -> Result<i64, GlobalIdError> {
    let invalid = || GlobalIdError::InvalidGlobalId { expected };
    let json = if token.starts_with('{') {
        token.as_bytes().to_vec()
    } else {
        STANDARD.decode(token).map_err(|_| invalid())?
    };
    let map: Map<String, Value> = serde_json::from_slice(&json).map_err(|_| invalid())?;
    match (map.len(), map.get(expected).and_then(Value::as_i64)) {
        (1, Some(id)) => Ok(id),
        _ => Err(invalid()),
    }
}
