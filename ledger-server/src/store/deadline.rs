//! Per-thread commit deadline
//!
//! A request handler installs its deadline on the blocking thread that runs
//! the storage work. [`TenantStore`](super::TenantStore) checks it once the
//! write lock is held and again right before commit, so a request that ran
//! out of time is aborted instead of committed behind the caller's back.

use std::cell::Cell;
use std::time::Instant;

thread_local! {
    static DEADLINE: Cell<Option<Instant>> = const { Cell::new(None) };
}

/// Restores the previous deadline when dropped
struct Restore(Option<Instant>);

impl Drop for Restore {
    fn drop(&mut self) {
        DEADLINE.set(self.0);
    }
}

/// Run `f` with `deadline` installed for every transaction it opens
pub fn with_deadline<T>(deadline: Option<Instant>, f: impl FnOnce() -> T) -> T {
    let _restore = Restore(DEADLINE.replace(deadline));
    f()
}

pub(super) fn expired() -> bool {
    DEADLINE.get().is_some_and(|deadline| Instant::now() >= deadline)
}
