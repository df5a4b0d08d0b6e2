//! Run-once guard
//!
//! Runs an action at most once per distinct key for the life of the guard.
//! Declare the guard as a `static` and it lasts for the life of the process;
//! [`run_once!`](crate::run_once) does that for a single call site.

use parking_lot::Mutex;
use std::collections::BTreeSet;

/// Remembers which keys have already fired.
///
/// The key is recorded before the action runs, so an action that panics is
/// still considered done, and an action may safely re-enter the same guard.
///
/// # Example
/// ```
/// use rust_spew_system::OnceGuard;
///
/// static WARNED: OnceGuard<u32> = OnceGuard::new();
///
/// let mut fired = 0;
/// for item in [7, 7, 3, 7] {
///     WARNED.run_once(item, || fired += 1);
/// }
/// assert_eq!(fired, 2);
/// ```
pub struct OnceGuard<K: Ord> {
    seen: Mutex<BTreeSet<K>>,
}

impl<K: Ord> OnceGuard<K> {
    pub const fn new() -> Self {
        Self {
            seen: parking_lot::const_mutex(BTreeSet::new()),
        }
    }

    /// Run `action` if `key` has not been seen. Returns whether it ran.
    pub fn run_once<F: FnOnce()>(&self, key: K, action: F) -> bool {
        let first = self.seen.lock().insert(key);
        if first {
            action();
        }
        first
    }

    pub fn has_run(&self, key: &K) -> bool {
        self.seen.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }
}

impl<K: Ord> Default for OnceGuard<K> {
    fn default() -> Self {
        Self::new()
    }
}
