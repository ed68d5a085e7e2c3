//! ESP-IDF provider for the `critical-section` 1.x symbols.
//!
//! `embassy-sync`'s `CriticalSectionRawMutex` (used by the status board)
//! links against `_critical_section_1_0_acquire/release`.  On the target
//! these are backed by a process-wide std mutex with a per-thread nesting
//! depth, so nested sections on one task do not deadlock.

use core::cell::{Cell, RefCell};
use std::sync::{Mutex, MutexGuard, PoisonError};

static SECTION_LOCK: Mutex<()> = Mutex::new(());

thread_local! {
    static DEPTH: Cell<u8> = const { Cell::new(0) };
    static HELD: RefCell<Option<MutexGuard<'static, ()>>> = const { RefCell::new(None) };
}

#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_acquire() -> u8 {
    DEPTH.with(|depth| {
        let d = depth.get();
        if d == 0 {
            // The guarded data is `()`, so a poisoned lock carries no
            // broken invariant.
            let guard = SECTION_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
            HELD.with(|held| *held.borrow_mut() = Some(guard));
        }
        let d = d.saturating_add(1);
        depth.set(d);
        d
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_release(_token: u8) {
    DEPTH.with(|depth| match depth.get() {
        0 => {}
        1 => {
            depth.set(0);
            HELD.with(|held| *held.borrow_mut() = None);
        }
        d => depth.set(d - 1),
    })
}
