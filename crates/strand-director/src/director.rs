//! Director — the dispatch engine behind a native base-type handle
//!
//! A director is created as part of constructing a dynamic-side subclass
//! instance. The override probe runs before the value is observable, so no
//! method can be dispatched against a half-built instance. The peer owns the
//! director's lifetime: the back-reference is non-owning, and releasing the
//! director invalidates the cache before the reference is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use strand_sdk::{PeerObject, ScriptValue};

use crate::cache::HandleCache;
use crate::contract::MethodContract;
use crate::error::{BridgeError, BridgeResult};
use crate::registry::OverrideRegistry;

/// Outcome of a dispatch decision for one virtual call.
#[derive(Debug)]
pub enum Dispatch {
    /// Fall through to the native base type's own implementation
    Native,
    /// The dynamic override ran and produced this value
    Value(ScriptValue),
}

/// Per-instance dispatch state for one base-type contract.
pub struct Director {
    contract: Arc<MethodContract>,
    peer: Weak<dyn PeerObject>,
    overrides: OverrideRegistry,
    cache: HandleCache,
    base_routes: Box<[AtomicBool]>,
}

impl Director {
    /// Bind a director to a freshly constructed dynamic peer.
    ///
    /// Probes the peer's declared members immediately; the override table is
    /// fixed from here on. The director holds only a weak back-reference;
    /// the embedding layer keeps the peer alive for the shim's lifetime.
    pub fn bind<P: PeerObject + 'static>(contract: Arc<MethodContract>, peer: &Arc<P>) -> Self {
        let overrides = OverrideRegistry::probe(peer.as_ref(), &contract);
        let cache = HandleCache::new(contract.len());
        let base_routes = (0..contract.len()).map(|_| AtomicBool::new(false)).collect();
        let peer: Weak<dyn PeerObject> = Arc::downgrade(&(peer.clone() as Arc<dyn PeerObject>));
        Director {
            contract,
            peer,
            overrides,
            cache,
            base_routes,
        }
    }

    /// Decide and execute the dynamic half of one virtual call.
    ///
    /// Returns `Dispatch::Native` when the caller must run the native default
    /// (no override, or an explicit base call is in scope), or the override's
    /// result value. Short trailing arguments are padded from the contract's
    /// declared defaults before the handle is invoked.
    ///
    /// # Panics
    /// Panics on a slot index outside the contract; generated shims use
    /// compile-time constants.
    pub fn dispatch(&self, index: usize, args: &[ScriptValue]) -> BridgeResult<Dispatch> {
        let entry = self.contract.entry(index);
        let guard = self.cache.begin_call()?;

        if self.base_routes[index].load(Ordering::Acquire) || !self.overrides.is_overridden(index)
        {
            return if entry.has_native_default() {
                Ok(Dispatch::Native)
            } else {
                Err(BridgeError::no_default(entry.name()))
            };
        }

        // Cache hits return the stored handle without touching the peer; the
        // back-reference is only upgraded inside the one-shot init.
        let handle = guard.resolve(index, || {
            let peer = self.peer.upgrade().ok_or_else(|| {
                BridgeError::resolution(entry.name(), "peer reference already torn down")
            })?;
            peer.method(entry.name()).ok_or_else(|| {
                BridgeError::resolution(entry.name(), "dynamic peer no longer defines this method")
            })
        })?;

        let result = if args.len() < entry.param_count() {
            let padded = entry
                .pad_args(args)
                .map_err(|err| BridgeError::missing_argument(entry.name(), err.param))?;
            handle(&padded)
        } else {
            handle(args)
        };
        // The guard stays held until the invocation returns: invalidate()
        // cannot overlap an in-flight call.
        result.map(Dispatch::Value).map_err(BridgeError::from)
    }

    /// Route dispatch of `index` to the native default while `f` runs.
    ///
    /// Used when the dynamic override explicitly invokes the base
    /// implementation through the shim; without this the call would bounce
    /// back into the override forever. Scoped per instance and per slot; the
    /// flag is restored when `f` returns or unwinds.
    pub fn bypass_override<R>(&self, index: usize, f: impl FnOnce() -> R) -> R {
        struct Reset<'a>(&'a AtomicBool);
        impl Drop for Reset<'_> {
            fn drop(&mut self) {
                self.0.store(false, Ordering::Release);
            }
        }

        let flag = &self.base_routes[index];
        flag.store(true, Ordering::Release);
        let _reset = Reset(flag);
        f()
    }

    /// Begin destruction: clear the handle cache and refuse further calls.
    ///
    /// Waits for in-flight dispatch to drain. Idempotent; also runs on drop.
    pub fn release(&self) {
        self.cache.invalidate();
    }

    /// Has this director been released?
    pub fn is_released(&self) -> bool {
        self.cache.is_released()
    }

    /// The contract this director dispatches against
    pub fn contract(&self) -> &MethodContract {
        &self.contract
    }

    /// Is the method at `index` overridden on the dynamic side?
    pub fn is_overridden(&self, index: usize) -> bool {
        self.overrides.is_overridden(index)
    }

    /// Is the handle for `index` resolved and cached?
    pub fn is_cached(&self, index: usize) -> bool {
        self.cache.is_populated(index)
    }
}

impl Drop for Director {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Director {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Director")
            .field("slots", &self.contract.len())
            .field("overridden", &self.overrides.overridden_count())
            .field("released", &self.is_released())
            .finish()
    }
}
