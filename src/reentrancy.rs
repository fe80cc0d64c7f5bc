//! Debug-only reentrancy guard.
//!
//! The map calls user code (the injected hash closure) while its internal
//! state may be transiently inconsistent. Entering a guarded section twice
//! without releasing the first guard panics in debug builds; in release
//! builds the guard compiles away to nothing.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-instance reentry tracker. Embed in a struct and open each public
/// entry-point with `let _g = self.reentrancy.enter();`.
#[derive(Debug, Default)]
pub struct ReentryCheck {
    #[cfg(debug_assertions)]
    engaged: Cell<bool>,
    // Keeps the owning structure !Send + !Sync, matching its
    // single-threaded contract.
    _nosend: PhantomData<*mut ()>,
}

impl ReentryCheck {
    pub const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            engaged: Cell::new(false),
            _nosend: PhantomData,
        }
    }

    /// Enter a guarded section. Panics in debug builds if already entered.
    #[inline]
    pub fn enter(&self) -> ReentryGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.engaged.get(),
                "reentrancy detected: nested entry into the map (hash function called back in?)"
            );
            self.engaged.set(true);
            return ReentryGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            return ReentryGuard { _z: PhantomData };
        }
    }
}

/// RAII guard returned by [`ReentryCheck::enter`].
pub struct ReentryGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a ReentryCheck,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for ReentryGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.engaged.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::ReentryCheck;

    #[test]
    fn sequential_entries_are_ok() {
        let r = ReentryCheck::new();
        drop(r.enter());
        drop(r.enter());
    }

    #[cfg(debug_assertions)]
    #[test]
    fn nested_entry_panics_in_debug() {
        let r = ReentryCheck::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _g1 = r.enter();
            let _g2 = r.enter();
        }));
        assert!(res.is_err(), "expected nested entry to panic in debug builds");
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn nested_entry_is_noop_in_release() {
        let r = ReentryCheck::new();
        let _g1 = r.enter();
        let _g2 = r.enter();
    }
}
