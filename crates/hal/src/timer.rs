//! The four 16-bit hardware timers.

use bitflags::bitflags;

use crate::mmio::Reg16;

bitflags! {
    /// TMxCNT_H bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TimerControl: u16 {
        /// Prescaler field, see [`Prescaler`].
        const PRESCALER = 0b11;
        /// Count overflows of the previous timer instead of clock ticks.
        const CASCADE = 1 << 2;
        const IRQ_ENABLE = 1 << 6;
        const START = 1 << 7;
    }
}

/// Clock divider applied when not cascading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Prescaler {
    Div1 = 0,
    Div64 = 1,
    Div256 = 2,
    Div1024 = 3,
}

/// Timer number, used by the interrupt source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerId {
    Timer0,
    Timer1,
    Timer2,
    Timer3,
}

impl TimerId {
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[repr(C)]
pub struct Timer {
    /// Reads the running count, writes the reload value.
    pub counter: Reg16,
    pub control: Reg16,
}

impl Timer {
    pub fn start(&self) {
        self.control.set_bits(TimerControl::START.bits());
    }

    pub fn stop(&self) {
        self.control.clear_bits(TimerControl::START.bits());
    }

    pub fn is_running(&self) -> bool {
        TimerControl::from_bits_retain(self.control.get()).contains(TimerControl::START)
    }

    /// Value loaded into the counter on start and on every overflow.
    pub fn set_reload(&self, reload: u16) {
        self.counter.set(reload);
    }

    pub fn counter(&self) -> u16 {
        self.counter.get()
    }

    pub fn set_prescaler(&self, prescaler: Prescaler) {
        self.control
            .replace_bits(TimerControl::PRESCALER.bits(), prescaler as u16);
    }

    pub fn set_cascade(&self, cascade: bool) {
        if cascade {
            self.control.set_bits(TimerControl::CASCADE.bits());
        } else {
            self.control.clear_bits(TimerControl::CASCADE.bits());
        }
    }
}
