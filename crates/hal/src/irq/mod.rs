//! Per-source interrupt handlers.
//!
//! Sources are armed with [`enable`] and serviced by the trampoline, which
//! calls back into the global [`INTERRUPTS`] table.

pub mod controller;
pub mod source;
pub mod trampoline;

pub use controller::{Handler, InterruptController};
pub use source::{Enabler, EnablerRegister, Interrupt, IrqMask};
#[cfg(target_arch = "arm")]
pub use trampoline::{install, isr_trampoline};
pub use trampoline::{TRAMPOLINE, Trampoline, TrampolineState};

use crate::hw::Hardware;

/// The controller the trampoline dispatches from.
pub static INTERRUPTS: InterruptController = InterruptController::new();

/// [`InterruptController::enable`] on [`INTERRUPTS`].
pub fn enable(hw: &Hardware<'_>, handler: Handler, sources: impl IntoIterator<Item = Interrupt>) {
    INTERRUPTS.enable(hw, handler, sources);
}

/// [`InterruptController::disable`] on [`INTERRUPTS`].
pub fn disable(hw: &Hardware<'_>, sources: impl IntoIterator<Item = Interrupt>) {
    INTERRUPTS.disable(hw, sources);
}

/// [`InterruptController::disable_all`] on [`INTERRUPTS`].
pub fn disable_all(hw: &Hardware<'_>) {
    INTERRUPTS.disable_all(hw);
}
