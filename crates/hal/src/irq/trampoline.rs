//! Interrupt trap entry.
//!
//! The BIOS takes the IRQ exception, saves the scratch registers and jumps to
//! the address stored in the user vector. [`isr_trampoline`] is that address.
//! It acknowledges the request and hands the caught sources to the global
//! [`InterruptController`].

use core::sync::atomic::{AtomicBool, Ordering};

use super::controller::InterruptController;
use super::source::IrqMask;
use crate::hw::Hardware;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrampolineState {
    Idle,
    Dispatching,
}

pub struct Trampoline {
    dispatching: AtomicBool,
}

impl Default for Trampoline {
    fn default() -> Self {
        Self::new()
    }
}

impl Trampoline {
    pub const fn new() -> Self {
        Self {
            dispatching: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> TrampolineState {
        if self.dispatching.load(Ordering::Relaxed) {
            TrampolineState::Dispatching
        } else {
            TrampolineState::Idle
        }
    }

    /// Handle one trap.
    ///
    /// Every raised bit is acknowledged in IF before any handler runs, so a
    /// source that fires again during its own handler is seen on the next
    /// trap instead of being lost. Only sources also set in IE are
    /// dispatched. Returns the dispatched set.
    pub fn service(&self, hw: &Hardware<'_>, controller: &InterruptController) -> IrqMask {
        let int = &hw.io().int;

        let raised = IrqMask::from_bits_truncate(int.flags.get());
        int.flags.acknowledge(raised.bits());
        // The BIOS halt calls wait on this word, not on IF.
        #[cfg(feature = "bios-ack")]
        hw.bios().check.set_bits(raised.bits());

        let caught = raised & IrqMask::from_bits_truncate(int.enable.get());

        self.dispatching.store(true, Ordering::Relaxed);
        controller.dispatch(caught);
        self.dispatching.store(false, Ordering::Relaxed);

        caught
    }
}

pub static TRAMPOLINE: Trampoline = Trampoline::new();

/// IRQ entry called by the BIOS in ARM state with IRQs masked in CPSR.
#[cfg(target_arch = "arm")]
#[unsafe(no_mangle)]
#[instruction_set(arm::a32)]
pub extern "C" fn isr_trampoline() {
    // SAFETY: running on the console; this is the nested context the
    // single-writer rule allows for.
    let hw = unsafe { Hardware::platform() };
    TRAMPOLINE.service(&hw, &super::INTERRUPTS);
}

/// Point the BIOS user-IRQ vector at [`isr_trampoline`].
///
/// Call once at start-up with IME closed.
#[cfg(target_arch = "arm")]
pub fn install(hw: &Hardware<'_>) {
    let entry = isr_trampoline as extern "C" fn() as usize as u32;
    hw.bios().vector.set(entry);
    log::debug!("irq: trampoline installed at {entry:#010x}");
}
