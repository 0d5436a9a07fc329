//! Host-side stand-in for the console's memory map.
//!
//! Every register block lives in a zeroed heap allocation, matching the
//! power-on state closely enough for the register helpers. IF is
//! write-one-to-clear here as on hardware (see [`crate::mmio::Reg16::acknowledge`]).

use crate::bios::BiosIrq;
use crate::display::{PaletteMemory, SpriteRam, Vram};
use crate::hw::Hardware;
use crate::io::IoRegs;
use crate::irq::IrqMask;

pub struct Board {
    io: Box<IoRegs>,
    bios: Box<BiosIrq>,
    vram: Box<Vram>,
    palettes: Box<PaletteMemory>,
    oam: Box<SpriteRam>,
}

fn zeroed<T>() -> Box<T> {
    // SAFETY: only used for register overlays, which are plain integer cells
    // and padding. All-zero is a valid value for each of them.
    unsafe { Box::<T>::new_zeroed().assume_init() }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            io: zeroed(),
            bios: zeroed(),
            vram: zeroed(),
            palettes: zeroed(),
            oam: zeroed(),
        }
    }

    pub fn hardware(&self) -> Hardware<'_> {
        Hardware::from_parts(&self.io, &self.bios, &self.vram, &self.palettes, &self.oam)
    }

    /// Latch requests in IF as a peripheral would.
    pub fn raise(&self, sources: IrqMask) {
        self.io.int.flags.set_bits(sources.bits());
    }
}
