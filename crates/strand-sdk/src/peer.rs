//! PeerObject trait — the dynamic-side ABI
//!
//! A director never sees the embedding runtime directly. It talks to the
//! dynamic subclass instance through this trait: a one-time membership probe
//! at construction and name-based resolution of bound-method handles at first
//! call.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::PeerResult;
use crate::value::ScriptValue;

/// A resolved, directly-invokable bound-method handle into the dynamic peer.
///
/// The handle captures its receiver; invoking it runs the dynamic-side method
/// synchronously on the calling thread.
pub type PeerMethod = Arc<dyn Fn(&[ScriptValue]) -> PeerResult<ScriptValue> + Send + Sync>;

/// The dynamic subclass instance, as seen from the native side.
///
/// One embedding runtime per bridge instance; the director holds a non-owning
/// reference to exactly one peer for its whole lifetime.
pub trait PeerObject: Send + Sync {
    /// Does the dynamic subclass itself supply a method with this name?
    ///
    /// This must report only methods genuinely defined by the subclass,
    /// never members inherited from the shim's own exported wrappers, or the
    /// director would dispatch back into itself. Consulted exactly once per
    /// method, when the director is constructed.
    fn declares(&self, name: &str) -> bool;

    /// Resolve a callable bound-method handle by name.
    ///
    /// Called at most once per method slot (the director caches the result).
    /// Returning `None` after `declares` said `true` signals a lifecycle or
    /// consistency bug and surfaces as a resolution error on the native side.
    fn method(&self, name: &str) -> Option<PeerMethod>;
}

/// Table-backed `PeerObject` for runtimes that can enumerate bound methods
/// eagerly.
///
/// The embedding layer collects the subclass's own methods into the table at
/// instance-construction time; membership and resolution then never touch the
/// runtime again.
pub struct ScriptObject {
    class_name: String,
    methods: FxHashMap<String, PeerMethod>,
}

impl ScriptObject {
    /// Create an empty peer for a dynamic class.
    pub fn new(class_name: impl Into<String>) -> Self {
        ScriptObject {
            class_name: class_name.into(),
            methods: FxHashMap::default(),
        }
    }

    /// Register a bound method under its wire name.
    ///
    /// Only methods the dynamic subclass itself defines belong here; the
    /// probe treats presence in this table as "genuinely overridden".
    pub fn define(
        &mut self,
        name: impl Into<String>,
        method: impl Fn(&[ScriptValue]) -> PeerResult<ScriptValue> + Send + Sync + 'static,
    ) {
        self.methods.insert(name.into(), Arc::new(method));
    }

    /// Name of the dynamic class this instance belongs to
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Number of methods the subclass defines
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }
}

impl PeerObject for ScriptObject {
    fn declares(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    fn method(&self, name: &str) -> Option<PeerMethod> {
        self.methods.get(name).cloned()
    }
}

impl std::fmt::Debug for ScriptObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptObject")
            .field("class_name", &self.class_name)
            .field("methods", &self.methods.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PeerError;

    #[test]
    fn test_define_and_declares() {
        let mut obj = ScriptObject::new("MyModel");
        obj.define("nCases", |_args| Ok(ScriptValue::UInt(5)));

        assert_eq!(obj.class_name(), "MyModel");
        assert_eq!(obj.method_count(), 1);
        assert!(obj.declares("nCases"));
        assert!(!obj.declares("nAlts"));
    }

    #[test]
    fn test_method_resolution_and_invoke() {
        let mut obj = ScriptObject::new("MyModel");
        obj.define("alternative_name", |args| {
            match args.first().and_then(ScriptValue::as_int) {
                Some(0) => Ok(ScriptValue::Str("X".into())),
                _ => Err(PeerError::raised("no such alternative")),
            }
        });

        let handle = obj.method("alternative_name").expect("should resolve");
        let out = handle(&[ScriptValue::Int(0)]).unwrap();
        assert_eq!(out, ScriptValue::Str("X".into()));

        let err = handle(&[ScriptValue::Int(3)]).unwrap_err();
        assert_eq!(err.message, "no such alternative");

        assert!(obj.method("missing").is_none());
    }
}
