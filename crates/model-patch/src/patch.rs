//! Diff-and-patch core.
//!
//! Synchronizes a live mutable host object with a freshly computed model
//! snapshot, touching only changed fields. Two shapes are supported: shallow
//! ([`patch`]) replaces changed top-level fields wholesale, nested
//! ([`patch_nested`]) merges changed object fields in place.

use serde_json::{Map, Value};
use thiserror::Error;

/// The mutable host object whose fields are patched.
///
/// The host is owned by the caller (typically a surrounding UI layer) for its
/// whole lifetime; this crate never creates or destroys one, it only mutates
/// selected entries.
pub type Host = Map<String, Value>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// The model snapshot is not an object and cannot be iterated key-wise.
    #[error("model snapshot is not an object")]
    ModelNotObject,
    /// Nested patching tried to merge an object into a field whose current
    /// value is not an object.
    #[error("cannot merge object into non-object field: {0}")]
    NotAnObject(String),
}

/// Apply a shallow patch: copy every key of `new_model` whose value differs
/// from `old_model`'s corresponding value onto the host.
///
/// When `new_model` equals `old_model` the host is untouched. Keys absent
/// from the new model are left alone; no host field outside the snapshot's
/// key set is written. Returns the number of field assignments performed.
///
/// # Example
///
/// ```
/// use model_patch::{patch, Host};
/// use serde_json::json;
///
/// let mut host: Host = json!({"count": 0, "label": "clicks"})
///     .as_object()
///     .unwrap()
///     .clone();
/// let old = json!({"count": 0, "label": "clicks"});
/// let new = json!({"count": 1, "label": "clicks"});
///
/// let writes = patch(&mut host, &old, &new).unwrap();
/// assert_eq!(writes, 1);
/// assert_eq!(host["count"], json!(1));
/// assert_eq!(host["label"], json!("clicks"));
/// ```
///
/// # Errors
///
/// Fails with [`PatchError::ModelNotObject`] when `new_model` differs from
/// `old_model` but is not an object.
pub fn patch(host: &mut Host, old_model: &Value, new_model: &Value) -> Result<usize, PatchError> {
    if new_model == old_model {
        return Ok(0);
    }
    let new_map = new_model.as_object().ok_or(PatchError::ModelNotObject)?;
    let mut writes = 0;
    for (key, new_val) in new_map {
        if old_model.get(key) != Some(new_val) {
            host.insert(key.clone(), new_val.clone());
            writes += 1;
        }
    }
    Ok(writes)
}

/// Apply a nested patch: the host is both the read view and the write target.
///
/// Per key of the new model: an equal value is skipped; a differing object
/// value is merged recursively into the host's existing object at that key,
/// so sub-objects are updated in place rather than replaced; any other
/// differing value is assigned directly. Arrays count as sequences, never as
/// nested records, and are always replaced in full.
///
/// Returns the number of leaf assignments performed.
///
/// # Errors
///
/// Merging an object into an existing non-object field fails with
/// [`PatchError::NotAnObject`]. There is no rollback: assignments made before
/// the failing key remain applied.
pub fn patch_nested(host: &mut Host, new_model: &Value) -> Result<usize, PatchError> {
    let new_map = new_model.as_object().ok_or(PatchError::ModelNotObject)?;
    patch_nested_map(host, new_map)
}

fn patch_nested_map(host: &mut Host, new_map: &Map<String, Value>) -> Result<usize, PatchError> {
    let mut writes = 0;
    for (key, new_val) in new_map {
        match host.get_mut(key) {
            Some(current) if current == new_val => {}
            Some(current) => {
                if let Value::Object(sub) = new_val {
                    match current {
                        Value::Object(target) => writes += patch_nested_map(target, sub)?,
                        _ => return Err(PatchError::NotAnObject(key.clone())),
                    }
                } else {
                    *current = new_val.clone();
                    writes += 1;
                }
            }
            None => {
                host.insert(key.clone(), new_val.clone());
                writes += 1;
            }
        }
    }
    Ok(writes)
}
