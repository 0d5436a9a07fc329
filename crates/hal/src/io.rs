//! The I/O register block at [`crate::config::IO_BASE`].
//!
//! This is the nested layout: every peripheral lives inside one overlay, so
//! interrupt code and peripheral code share a single bound view and can never
//! disagree about an address.

use core::mem::offset_of;

use crate::config::TIMER_COUNT;
use crate::display::LcdRegs;
use crate::keypad::Keypad;
use crate::mmio::Reg16;
use crate::sound::SoundRegs;
use crate::timer::Timer;

#[repr(C)]
pub struct IoRegs {
    pub lcd: LcdRegs,                  // 0x000
    pub sound: SoundRegs,              // 0x060
    _dma: [u16; (0x100 - 0x0B0) / 2],  // 0x0B0
    pub timer: [Timer; TIMER_COUNT],   // 0x100
    _unused0: [u16; 0x10 / 2],         // 0x110
    _serial1: [u16; 0x10 / 2],         // 0x120
    pub keypad: Keypad,                // 0x130
    _serial2: [u16; (0x200 - 0x134) / 2], // 0x134
    pub int: InterruptRegs,            // 0x200
}

/// Interrupt controller registers.
#[repr(C)]
pub struct InterruptRegs {
    /// IE: one bit per source allowed to request service.
    pub enable: Reg16, // 0x200
    /// IF: reads the active requests, writing 1s acknowledges them.
    pub flags: Reg16, // 0x202
    /// WAITCNT and an unused halfword. Not owned by this crate.
    _waitcnt: [u16; 2], // 0x204
    /// IME: global gate, bit 0.
    pub master: Reg16, // 0x208
}

const _: () = {
    assert!(offset_of!(IoRegs, sound) == 0x060);
    assert!(offset_of!(IoRegs, timer) == 0x100);
    assert!(offset_of!(IoRegs, keypad) == 0x130);
    assert!(offset_of!(IoRegs, int) == 0x200);
    assert!(offset_of!(InterruptRegs, flags) == 0x002);
    assert!(offset_of!(InterruptRegs, master) == 0x008);
};
