//! Handle cache — lazily resolved bound-method handles, one slot per contract
//! entry
//!
//! Slots are populate-once: the first completed resolution wins and every
//! later caller observes the same handle. Dispatch holds a shared (reentrant)
//! guard for the duration of an invocation; `invalidate` takes the exclusive
//! side, so teardown cannot overlap an in-flight call and anything after it
//! observes the released flag.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::{RwLock, RwLockReadGuard};
use strand_sdk::PeerMethod;

use crate::error::{BridgeError, BridgeResult};

struct CacheState {
    released: bool,
    slots: Box<[OnceCell<PeerMethod>]>,
}

/// Per-instance table of resolved method handles.
pub struct HandleCache {
    state: RwLock<CacheState>,
}

/// Shared access to the cache for the duration of one dispatch.
///
/// Holding the guard keeps `invalidate` out until the invocation returns.
/// Guards are reentrant on one thread, so dynamic-side code may call back
/// into the native side mid-dispatch.
pub struct CallGuard<'a> {
    state: RwLockReadGuard<'a, CacheState>,
}

impl HandleCache {
    /// Create a cache with one empty slot per contract entry.
    pub fn new(slot_count: usize) -> Self {
        let slots = (0..slot_count).map(|_| OnceCell::new()).collect();
        HandleCache {
            state: RwLock::new(CacheState {
                released: false,
                slots,
            }),
        }
    }

    /// Enter a dispatch: acquire shared access and check the released flag.
    ///
    /// Fails with `UseAfterRelease` once `invalidate` has run (or while it is
    /// racing; the write lock orders the two).
    pub fn begin_call(&self) -> BridgeResult<CallGuard<'_>> {
        let state = self.state.read_recursive();
        if state.released {
            return Err(BridgeError::UseAfterRelease);
        }
        Ok(CallGuard { state })
    }

    /// Clear every slot and refuse all future calls.
    ///
    /// Runs once, when the owning director begins destruction; waits for
    /// in-flight dispatch to drain. Idempotent.
    pub fn invalidate(&self) {
        let mut state = self.state.write();
        if state.released {
            return;
        }
        state.released = true;
        for slot in state.slots.iter_mut() {
            slot.take();
        }
    }

    /// Has `invalidate` run?
    pub fn is_released(&self) -> bool {
        self.state.read_recursive().released
    }

    /// Is the slot at `index` populated? (false once released)
    pub fn is_populated(&self, index: usize) -> bool {
        let state = self.state.read_recursive();
        state
            .slots
            .get(index)
            .map(|slot| slot.get().is_some())
            .unwrap_or(false)
    }
}

impl CallGuard<'_> {
    /// Return the cached handle for `index`, resolving it on first use.
    ///
    /// Concurrent first-callers race benignly: exactly one `init` runs, the
    /// rest block and observe its result.
    pub fn resolve(
        &self,
        index: usize,
        init: impl FnOnce() -> BridgeResult<PeerMethod>,
    ) -> BridgeResult<PeerMethod> {
        self.state.slots[index].get_or_try_init(init).map(Arc::clone)
    }
}

impl std::fmt::Debug for HandleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read_recursive();
        let populated = state.slots.iter().filter(|s| s.get().is_some()).count();
        f.debug_struct("HandleCache")
            .field("released", &state.released)
            .field("slots", &state.slots.len())
            .field("populated", &populated)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use strand_sdk::ScriptValue;

    fn handle(value: u32) -> PeerMethod {
        Arc::new(move |_args| Ok(ScriptValue::UInt(value)))
    }

    #[test]
    fn test_resolve_populates_once() {
        let cache = HandleCache::new(2);
        let inits = AtomicUsize::new(0);

        for _ in 0..3 {
            let guard = cache.begin_call().unwrap();
            let resolved = guard
                .resolve(0, || {
                    inits.fetch_add(1, Ordering::SeqCst);
                    Ok(handle(7))
                })
                .unwrap();
            assert_eq!(resolved(&[]).unwrap(), ScriptValue::UInt(7));
        }

        assert_eq!(inits.load(Ordering::SeqCst), 1);
        assert!(cache.is_populated(0));
        assert!(!cache.is_populated(1));
    }

    #[test]
    fn test_failed_resolution_leaves_slot_empty() {
        let cache = HandleCache::new(1);
        let guard = cache.begin_call().unwrap();

        let err = match guard.resolve(0, || Err(BridgeError::resolution("nCases", "gone"))) {
            Err(e) => e,
            Ok(_) => panic!("expected resolution to fail"),
        };
        assert!(matches!(err, BridgeError::MethodResolution { .. }));
        drop(guard);
        assert!(!cache.is_populated(0));

        // A later attempt may still succeed
        let guard = cache.begin_call().unwrap();
        guard.resolve(0, || Ok(handle(1))).unwrap();
        assert!(cache.is_populated(0));
    }

    #[test]
    fn test_invalidate_clears_and_refuses() {
        let cache = HandleCache::new(1);
        {
            let guard = cache.begin_call().unwrap();
            guard.resolve(0, || Ok(handle(9))).unwrap();
        }
        assert!(cache.is_populated(0));

        cache.invalidate();
        assert!(cache.is_released());
        assert!(!cache.is_populated(0));
        assert!(matches!(
            cache.begin_call(),
            Err(BridgeError::UseAfterRelease)
        ));

        // Idempotent
        cache.invalidate();
        assert!(cache.is_released());
    }
}
