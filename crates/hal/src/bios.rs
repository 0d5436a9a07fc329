//! Words the BIOS reserves at the top of internal work RAM.

use core::mem::offset_of;

use crate::mmio::{Reg16, Reg32};

/// Overlay at [`crate::config::BIOS_IRQ_BASE`].
#[repr(C)]
pub struct BiosIrq {
    /// Interrupt-check flags. `IntrWait`/`VBlankIntrWait` sleep until a bit
    /// they wait on is set here, so the trampoline ORs in what it caught.
    pub check: Reg16, // 0x0300_7FF8
    _unused: u16,
    /// Address of the user IRQ handler, called in ARM state.
    pub vector: Reg32, // 0x0300_7FFC
}

const _: () = assert!(offset_of!(BiosIrq, vector) == 4);
