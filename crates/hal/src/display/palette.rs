use core::ptr;

use crate::config::PALETTE_BANKS;
use crate::error::HalError;
use crate::mmio::Reg16;

/// Sixteen colours used by one 4bpp tile or sprite.
pub type PaletteBank = [Reg16; 16];

/// 256 colours. Entry 0 of the background palette is the backdrop; entry 0 of
/// every bank is transparent.
#[repr(C)]
pub struct PaletteRam {
    colors: [Reg16; 256],
}

impl PaletteRam {
    /// The palette as used by 8bpp graphics.
    pub fn full(&self) -> &[Reg16; 256] {
        &self.colors
    }

    /// The same memory split into the sixteen 4bpp banks.
    pub fn bank(&self, bank: usize) -> Result<&PaletteBank, HalError> {
        // SAFETY: 256 cells reinterpreted as 16 rows of 16, same element type.
        let banks = unsafe { &*ptr::from_ref(&self.colors).cast::<[PaletteBank; PALETTE_BANKS]>() };
        banks.get(bank).ok_or(HalError::NoSuchPaletteBank(bank))
    }
}

/// Palette RAM at [`crate::config::PALETTE_BASE`].
#[repr(C)]
pub struct PaletteMemory {
    pub background: PaletteRam,
    pub sprite: PaletteRam,
}

const _: () = assert!(core::mem::offset_of!(PaletteMemory, sprite) == 0x200);
