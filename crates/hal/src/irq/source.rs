//! Interrupt sources and the table mapping each to its peripheral enable bit.

use bitflags::bitflags;

use crate::config::IRQ_SOURCE_COUNT;
use crate::display::DisplayStatus;
use crate::error::HalError;
use crate::keypad::KeyControl;
use crate::timer::{TimerControl, TimerId};

/// An interrupt source. The discriminant is its bit in IE and IF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Interrupt {
    VBlank = 0,
    HBlank = 1,
    /// Scanline matched the DISPSTAT V-Count setting.
    VCounter = 2,
    Timer0 = 3,
    Timer1 = 4,
    Timer2 = 5,
    Timer3 = 6,
    Serial = 7,
    Dma0 = 8,
    Dma1 = 9,
    Dma2 = 10,
    Dma3 = 11,
    Keypad = 12,
    /// External line on the cartridge slot.
    GamePak = 13,
}

bitflags! {
    /// A set of sources, bit-compatible with IE and IF.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct IrqMask: u16 {
        const VBLANK = 1 << 0;
        const HBLANK = 1 << 1;
        const VCOUNTER = 1 << 2;
        const TIMER0 = 1 << 3;
        const TIMER1 = 1 << 4;
        const TIMER2 = 1 << 5;
        const TIMER3 = 1 << 6;
        const SERIAL = 1 << 7;
        const DMA0 = 1 << 8;
        const DMA1 = 1 << 9;
        const DMA2 = 1 << 10;
        const DMA3 = 1 << 11;
        const KEYPAD = 1 << 12;
        const GAMEPAK = 1 << 13;
    }
}

/// Register holding a source's peripheral-side enable bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnablerRegister {
    DisplayStatus,
    TimerControl(TimerId),
    KeypadControl,
}

/// The peripheral bit that must be set for a source to assert its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enabler {
    pub register: EnablerRegister,
    pub mask: u16,
}

impl Enabler {
    const fn new(register: EnablerRegister, mask: u16) -> Self {
        Self { register, mask }
    }
}

impl Interrupt {
    pub const COUNT: usize = IRQ_SOURCE_COUNT;

    /// Every source in ascending bit order, which is also dispatch order.
    pub const ALL: [Interrupt; IRQ_SOURCE_COUNT] = [
        Self::VBlank,
        Self::HBlank,
        Self::VCounter,
        Self::Timer0,
        Self::Timer1,
        Self::Timer2,
        Self::Timer3,
        Self::Serial,
        Self::Dma0,
        Self::Dma1,
        Self::Dma2,
        Self::Dma3,
        Self::Keypad,
        Self::GamePak,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn mask(self) -> IrqMask {
        IrqMask::from_bits_retain(1 << self as u16)
    }

    /// Peripheral enable bit for this source.
    ///
    /// `None` means the source has no wiring here yet (serial, DMA, cartridge).
    /// Enabling such a source still installs its handler and sets its IE bit,
    /// but the peripheral has to be armed by the caller.
    pub const fn enabler(self) -> Option<Enabler> {
        use EnablerRegister::{DisplayStatus as Dispstat, KeypadControl, TimerControl as Tmcnt};

        let timer_irq = TimerControl::IRQ_ENABLE.bits();
        match self {
            Self::VBlank => Some(Enabler::new(Dispstat, DisplayStatus::VBLANK_IRQ.bits())),
            Self::HBlank => Some(Enabler::new(Dispstat, DisplayStatus::HBLANK_IRQ.bits())),
            Self::VCounter => Some(Enabler::new(Dispstat, DisplayStatus::VCOUNTER_IRQ.bits())),
            Self::Timer0 => Some(Enabler::new(Tmcnt(TimerId::Timer0), timer_irq)),
            Self::Timer1 => Some(Enabler::new(Tmcnt(TimerId::Timer1), timer_irq)),
            Self::Timer2 => Some(Enabler::new(Tmcnt(TimerId::Timer2), timer_irq)),
            Self::Timer3 => Some(Enabler::new(Tmcnt(TimerId::Timer3), timer_irq)),
            Self::Keypad => Some(Enabler::new(KeypadControl, KeyControl::IRQ_ENABLE.bits())),
            Self::Serial | Self::Dma0 | Self::Dma1 | Self::Dma2 | Self::Dma3 | Self::GamePak => None,
        }
    }
}

impl TryFrom<u8> for Interrupt {
    type Error = HalError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(id))
            .copied()
            .ok_or(HalError::UnknownSource(id))
    }
}

impl From<Interrupt> for IrqMask {
    fn from(source: Interrupt) -> Self {
        source.mask()
    }
}

impl FromIterator<Interrupt> for IrqMask {
    fn from_iter<I: IntoIterator<Item = Interrupt>>(sources: I) -> Self {
        sources
            .into_iter()
            .fold(IrqMask::empty(), |mask, source| mask | source.mask())
    }
}

impl IrqMask {
    /// Sources in this set, in ascending bit order.
    pub fn sources(self) -> impl Iterator<Item = Interrupt> {
        Interrupt::ALL
            .into_iter()
            .filter(move |source| self.contains(source.mask()))
    }
}
