//! model-patch - minimal diff-and-patch for Elm-style model updates.
//!
//! A pure update function computes a fresh immutable model from the current
//! state and a message; this crate copies only the changed fields onto a live
//! mutable host object owned by the surrounding UI layer. Nested plain
//! objects can be merged in place, while arrays are always replaced
//! wholesale.
//!
//! # Example
//!
//! ```
//! use model_patch::{Host, UpdateMethod};
//! use serde_json::json;
//!
//! let method = UpdateMethod::pure(|_scope, old, msg| {
//!     if msg == &json!("inc") {
//!         json!({"count": old["count"].as_i64().unwrap_or(0) + 1})
//!     } else {
//!         old.clone()
//!     }
//! });
//!
//! let mut host: Host = json!({"count": 0}).as_object().unwrap().clone();
//! method.call(&mut host, &[json!("inc")]).unwrap();
//! assert_eq!(host["count"], json!(1));
//! ```

pub mod method;
pub mod model;
pub mod patch;

// Re-exports for convenience
pub use method::{BoxError, MethodError, PatchMode, Scope, ScopeSource, UpdateMethod};
pub use model::{from_model, to_host, to_model, ModelError};
pub use patch::{patch, patch_nested, Host, PatchError};

/// Returns the crate version at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
