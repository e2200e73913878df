//! Bound update methods.
//!
//! [`UpdateMethod`] packages a pure Elm-style update function together with
//! the accessors that adapt it to a live host object: how the old-model view
//! is derived, how raw invocation arguments become a message, and what extra
//! scope the update function receives. Calling the method computes the new
//! model and applies the minimal patch onto the host.

use crate::patch::{patch, patch_nested, Host, PatchError};
use serde_json::Value;
use thiserror::Error;

/// Error type update functions may raise; opaque to this crate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Extra context handed to the update function on each call.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    /// The update function receives no extra context.
    None,
    /// A props view derived from the host.
    Props(&'a Value),
    /// A read view of the host itself.
    Host(&'a Host),
}

/// How the [`Scope`] argument is constructed on each call.
///
/// One selector covers the three method shapes (plain, derived props, host
/// view) instead of three parallel factories.
pub enum ScopeSource {
    None,
    Props(Box<dyn Fn(&Host) -> Value>),
    Host,
}

/// Whether changed object fields are merged recursively or assigned wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchMode {
    Shallow,
    Nested,
}

#[derive(Debug, Error)]
pub enum MethodError {
    /// The update function failed while computing the new model. The host is
    /// left untouched.
    #[error("update function failed: {0}")]
    Update(#[source] BoxError),
    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// A configured update method, bound to a host at call time.
///
/// Construction is a factory, not a single call: configure once, then invoke
/// [`UpdateMethod::call`] for every incoming event.
///
/// # Example
///
/// ```
/// use model_patch::{Host, UpdateMethod};
/// use serde_json::json;
///
/// let method = UpdateMethod::pure(|_scope, old, msg| {
///     if msg["type"] == json!("inc") {
///         let count = old["count"].as_i64().unwrap_or(0);
///         json!({"count": count + 1})
///     } else {
///         old.clone()
///     }
/// });
///
/// let mut host: Host = json!({"count": 0}).as_object().unwrap().clone();
/// method.call(&mut host, &[json!({"type": "inc"})]).unwrap();
/// assert_eq!(host["count"], json!(1));
///
/// // A message the update function ignores performs no assignment.
/// let writes = method.call(&mut host, &[json!({"type": "noop"})]).unwrap();
/// assert_eq!(writes, 0);
/// assert_eq!(host["count"], json!(1));
/// ```
pub struct UpdateMethod {
    update: Box<dyn Fn(Scope<'_>, &Value, &Value) -> Result<Value, BoxError>>,
    scope: ScopeSource,
    model: Box<dyn Fn(&Host) -> Value>,
    message: Box<dyn Fn(&[Value]) -> Value>,
    mode: PatchMode,
}

impl UpdateMethod {
    /// Create a method around a fallible update function.
    ///
    /// Defaults: no scope, the old model is a snapshot of the whole host, the
    /// message is the first invocation argument (null when absent), and
    /// patching is shallow.
    pub fn new<F>(update: F) -> Self
    where
        F: Fn(Scope<'_>, &Value, &Value) -> Result<Value, BoxError> + 'static,
    {
        Self {
            update: Box::new(update),
            scope: ScopeSource::None,
            model: Box::new(|host| Value::Object(host.clone())),
            message: Box::new(|args| args.first().cloned().unwrap_or(Value::Null)),
            mode: PatchMode::Shallow,
        }
    }

    /// Create a method around an update function that cannot fail.
    pub fn pure<F>(update: F) -> Self
    where
        F: Fn(Scope<'_>, &Value, &Value) -> Value + 'static,
    {
        Self::new(move |scope, old, msg| Ok(update(scope, old, msg)))
    }

    /// Hand the update function a props view derived from the host.
    pub fn with_props_scope<F>(mut self, props: F) -> Self
    where
        F: Fn(&Host) -> Value + 'static,
    {
        self.scope = ScopeSource::Props(Box::new(props));
        self
    }

    /// Hand the update function a read view of the host itself.
    pub fn with_host_scope(mut self) -> Self {
        self.scope = ScopeSource::Host;
        self
    }

    /// Override how the old-model view is derived from the host.
    ///
    /// The view is both the update function's input and the comparison base
    /// for shallow patching, so a partial view restricts which fields the
    /// method can touch.
    pub fn with_model<F>(mut self, model: F) -> Self
    where
        F: Fn(&Host) -> Value + 'static,
    {
        self.model = Box::new(model);
        self
    }

    /// Override how the raw invocation arguments become a message.
    pub fn with_message<F>(mut self, message: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        self.message = Box::new(message);
        self
    }

    /// Merge changed object fields recursively instead of assigning them
    /// wholesale.
    pub fn nested(mut self) -> Self {
        self.mode = PatchMode::Nested;
        self
    }

    /// Invoke the method against a host instance.
    ///
    /// Computes the old-model view and the message, evaluates the update
    /// function, and applies the configured patch. An update that returns a
    /// model equal to the old view performs no mutation. Returns the number
    /// of field assignments.
    ///
    /// # Errors
    ///
    /// - [`MethodError::Update`] when the update function fails; the host is
    ///   untouched.
    /// - [`MethodError::Patch`] when patch application fails; the host may be
    ///   left partially patched.
    pub fn call(&self, host: &mut Host, args: &[Value]) -> Result<usize, MethodError> {
        let old_model = (self.model)(host);
        let message = (self.message)(args);
        let props;
        let scope = match &self.scope {
            ScopeSource::None => Scope::None,
            ScopeSource::Props(f) => {
                props = f(host);
                Scope::Props(&props)
            }
            ScopeSource::Host => Scope::Host(host),
        };
        let new_model = (self.update)(scope, &old_model, &message).map_err(MethodError::Update)?;
        if new_model == old_model {
            return Ok(0);
        }
        let writes = match self.mode {
            PatchMode::Shallow => patch(host, &old_model, &new_model)?,
            PatchMode::Nested => patch_nested(host, &new_model)?,
        };
        Ok(writes)
    }
}
