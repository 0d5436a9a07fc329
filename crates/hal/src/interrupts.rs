//! Global interrupt gate (IME) control and critical sections.
//!
//! Only the gate is saved and restored; per-source enables are left alone.
//! Pairs must nest strictly LIFO within one context. This is not a counting
//! lock: restoring out of order writes back a stale gate value.

use crate::hw::Hardware;
use crate::mmio::Reg16;

const IME_ON: u16 = 1;

/// Saved IME contents. Opaque to callers; only [`restore`] consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct IrqState(u16);

/// Read the gate without changing it.
#[inline(always)]
pub fn capture(hw: &Hardware<'_>) -> IrqState {
    IrqState(hw.io().int.master.get())
}

/// Close the gate and return what it was.
#[inline(always)]
pub fn disable(hw: &Hardware<'_>) -> IrqState {
    let state = capture(hw);
    hw.io().int.master.set(0);
    state
}

/// Write back exactly the captured pattern.
#[inline(always)]
pub fn restore(hw: &Hardware<'_>, state: IrqState) {
    hw.io().int.master.set(state.0);
}

/// Open the gate unconditionally.
///
/// This is the only way back after [`crate::irq::disable_all`], which closes
/// the gate without saving it.
#[inline(always)]
pub fn enable(hw: &Hardware<'_>) {
    hw.io().int.master.set(IME_ON);
}

#[inline(always)]
pub fn is_enabled(hw: &Hardware<'_>) -> bool {
    hw.io().int.master.get() & IME_ON != 0
}

/// Run `f` with the gate closed, then restore it.
pub fn free<R>(hw: &Hardware<'_>, f: impl FnOnce() -> R) -> R {
    let _guard = IrqGuard::new(hw);
    f()
}

/// Closes the gate on creation and restores it on drop.
pub struct IrqGuard<'a> {
    master: &'a Reg16,
    state: IrqState,
}

impl<'a> IrqGuard<'a> {
    pub fn new(hw: &Hardware<'a>) -> Self {
        Self {
            master: &hw.io().int.master,
            state: disable(hw),
        }
    }
}

impl Drop for IrqGuard<'_> {
    fn drop(&mut self) {
        self.master.set(self.state.0);
    }
}

// The console has no other way to mask interrupts, so `critical_section::with`
// is routed through the same gate.
#[cfg(all(feature = "critical-section-impl", target_arch = "arm"))]
mod cs {
    use super::{IrqState, disable, restore};
    use crate::hw::Hardware;

    struct ImeCriticalSection;
    critical_section::set_impl!(ImeCriticalSection);

    unsafe impl critical_section::Impl for ImeCriticalSection {
        unsafe fn acquire() -> critical_section::RawRestoreState {
            // SAFETY: register-only view; nothing but IME is touched.
            let hw = unsafe { Hardware::platform() };
            disable(&hw).0
        }

        unsafe fn release(state: critical_section::RawRestoreState) {
            // SAFETY: as in `acquire`.
            let hw = unsafe { Hardware::platform() };
            restore(&hw, IrqState(state));
        }
    }
}
