//! The hardware context.
//!
//! [`Hardware`] is the only way to reach a register. It is built once, from
//! the fixed platform addresses on the console or from a [`crate::testing::Board`]
//! on the host, and then handed by reference to every component.

use crate::bios::BiosIrq;
use crate::config;
use crate::display::{PaletteMemory, SpriteRam, Sprites, Vram};
use crate::error::HalError;
use crate::io::IoRegs;
use crate::irq::EnablerRegister;
use crate::keypad::Keypad;
use crate::mmio::Reg16;
use crate::timer::Timer;

pub struct Hardware<'a> {
    io: &'a IoRegs,
    bios: &'a BiosIrq,
    vram: &'a Vram,
    palettes: &'a PaletteMemory,
    oam: &'a SpriteRam,
}

impl Hardware<'static> {
    /// Bind the typed views to the console's memory map.
    ///
    /// # Safety
    /// Only valid on the console itself. The foreground must build a single
    /// instance; the ISR trampoline builds its own for the nested context.
    /// Every register is then shared between the two contexts under the
    /// single-writer rule: foreground code must not touch IE/IF/IME or the
    /// enabler bits except through [`crate::irq`] and [`crate::interrupts`].
    pub unsafe fn platform() -> Self {
        unsafe {
            Self {
                io: &*(config::IO_BASE as *const IoRegs),
                bios: &*(config::BIOS_IRQ_BASE as *const BiosIrq),
                vram: &*(config::VRAM_BASE as *const Vram),
                palettes: &*(config::PALETTE_BASE as *const PaletteMemory),
                oam: &*(config::OAM_BASE as *const SpriteRam),
            }
        }
    }
}

impl<'a> Hardware<'a> {
    pub(crate) const fn from_parts(
        io: &'a IoRegs,
        bios: &'a BiosIrq,
        vram: &'a Vram,
        palettes: &'a PaletteMemory,
        oam: &'a SpriteRam,
    ) -> Self {
        Self {
            io,
            bios,
            vram,
            palettes,
            oam,
        }
    }

    pub fn io(&self) -> &'a IoRegs {
        self.io
    }

    pub fn bios(&self) -> &'a BiosIrq {
        self.bios
    }

    pub fn vram(&self) -> &'a Vram {
        self.vram
    }

    pub fn palettes(&self) -> &'a PaletteMemory {
        self.palettes
    }

    pub fn sprites(&self) -> Sprites<'a> {
        Sprites::new(&self.io.lcd, self.oam)
    }

    pub fn keypad(&self) -> &'a Keypad {
        &self.io.keypad
    }

    pub fn timer(&self, index: usize) -> Result<&'a Timer, HalError> {
        self.io.timer.get(index).ok_or(HalError::NoSuchTimer(index))
    }

    /// Resolve an entry of the interrupt source table to its register.
    pub(crate) fn enabler_register(&self, register: EnablerRegister) -> &'a Reg16 {
        match register {
            EnablerRegister::DisplayStatus => &self.io.lcd.dispstat,
            EnablerRegister::TimerControl(id) => &self.io.timer[id.index()].control,
            EnablerRegister::KeypadControl => &self.io.keypad.control,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Board;
    use crate::timer::TimerId;

    #[test]
    fn timer_index_is_checked() {
        let board = Board::new();
        let hw = board.hardware();
        assert!(hw.timer(3).is_ok());
        assert_eq!(hw.timer(4).err(), Some(HalError::NoSuchTimer(4)));
    }

    #[test]
    fn enabler_registers_resolve_into_the_io_block() {
        let board = Board::new();
        let hw = board.hardware();
        let io = hw.io();

        assert!(core::ptr::eq(
            hw.enabler_register(EnablerRegister::DisplayStatus),
            &io.lcd.dispstat
        ));
        assert!(core::ptr::eq(
            hw.enabler_register(EnablerRegister::TimerControl(TimerId::Timer2)),
            &io.timer[2].control
        ));
        assert!(core::ptr::eq(
            hw.enabler_register(EnablerRegister::KeypadControl),
            &io.keypad.control
        ));
    }
}
