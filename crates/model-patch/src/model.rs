//! Typed model helpers.
//!
//! Models may be authored as plain `Serialize` structs and converted into
//! snapshot values or host maps, and read back out of a host view.

use crate::patch::Host;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to serialize model: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to deserialize model: {0}")]
    Deserialize(#[source] serde_json::Error),
    /// The model serialized to a scalar or sequence; hosts are key/value maps.
    #[error("model did not serialize to an object")]
    NotAnObject,
}

/// Serialize a typed model into a snapshot value.
///
/// # Example
///
/// ```
/// use model_patch::to_model;
/// use serde::Serialize;
/// use serde_json::json;
///
/// #[derive(Serialize)]
/// struct Counter {
///     count: i64,
/// }
///
/// let snapshot = to_model(&Counter { count: 3 }).unwrap();
/// assert_eq!(snapshot, json!({"count": 3}));
/// ```
pub fn to_model<T: Serialize>(model: &T) -> Result<Value, ModelError> {
    serde_json::to_value(model).map_err(ModelError::Serialize)
}

/// Serialize a typed model into a fresh host map.
///
/// # Errors
///
/// Fails with [`ModelError::NotAnObject`] when the model does not serialize
/// to an object.
pub fn to_host<T: Serialize>(model: &T) -> Result<Host, ModelError> {
    match to_model(model)? {
        Value::Object(map) => Ok(map),
        _ => Err(ModelError::NotAnObject),
    }
}

/// Read a typed model back out of a snapshot value or host view.
pub fn from_model<T: DeserializeOwned>(value: &Value) -> Result<T, ModelError> {
    serde_json::from_value(value.clone()).map_err(ModelError::Deserialize)
}
