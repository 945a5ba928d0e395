//! Utility types

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicBool, Ordering};

/// Write-once container initialized at startup and read-only afterwards
pub struct InitOnce<T> {
    state: AtomicBool,
    inner: UnsafeCell<MaybeUninit<T>>,
}

impl<T> InitOnce<T> {
    /// Constructs an uninitialized container
    pub const fn new() -> Self {
        Self {
            state: AtomicBool::new(false),
            inner: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Returns `true` if the value has been set
    #[inline(always)]
    pub fn is_initialized(&self) -> bool {
        self.state.load(Ordering::Acquire)
    }

    /// Returns the stored value.
    ///
    /// Panics if the container has not been initialized yet.
    pub fn get(&self) -> &T {
        assert!(self.is_initialized(), "Access to uninitialized InitOnce<T>");
        unsafe { (*self.inner.get()).assume_init_ref() }
    }

    /// Stores `value`. Panics on double-initialization.
    pub fn init(&self, value: T) {
        assert!(
            self.state
                .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
                .is_ok(),
            "Double-initialization of InitOnce<T>"
        );

        unsafe {
            (*self.inner.get()).write(value);
        }
    }
}

unsafe impl<T> Sync for InitOnce<T> {}
