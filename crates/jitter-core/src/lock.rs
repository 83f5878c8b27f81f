//! Spin lock used to serialize jitter buffer operations
//!
//! Critical sections in the buffer are short and bounded, so waiters busy-wait
//! instead of parking. The raw lock plugs into `lock_api`, which gives us the
//! scoped guard (`SpinMutexGuard`) that releases on every exit path.

use std::hint;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::lock_api::{self, GuardSend, RawMutex};

/// Raw test-and-test-and-set spin lock
pub struct RawSpinLock {
    locked: AtomicBool,
}

unsafe impl RawMutex for RawSpinLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self {
        locked: AtomicBool::new(false),
    };

    type GuardMarker = GuardSend;

    fn lock(&self) {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            // Spin on a plain load so contended waiters don't hammer the cache line
            while self.locked.load(Ordering::Relaxed) {
                hint::spin_loop();
            }
        }
    }

    fn try_lock(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }

    fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

/// Mutex backed by [`RawSpinLock`]
pub type SpinMutex<T> = lock_api::Mutex<RawSpinLock, T>;

/// Scoped guard for [`SpinMutex`]
pub type SpinMutexGuard<'a, T> = lock_api::MutexGuard<'a, RawSpinLock, T>;
