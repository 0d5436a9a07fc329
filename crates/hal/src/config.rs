//! Platform constants.
//!
//! The console has a single fixed memory map, so configuration is compile
//! time only: these constants plus the Cargo features `bios-ack` and
//! `critical-section-impl`.

/// I/O register block (LCD, sound, DMA, timers, serial, keypad, interrupts).
pub const IO_BASE: usize = 0x0400_0000;

/// BIOS interrupt-check word; the user IRQ vector follows at `+4`.
pub const BIOS_IRQ_BASE: usize = 0x0300_7FF8;

/// Background palette; the sprite palette follows at `+0x200`.
pub const PALETTE_BASE: usize = 0x0500_0000;

pub const VRAM_BASE: usize = 0x0600_0000;

/// Object attribute memory.
pub const OAM_BASE: usize = 0x0700_0000;

pub const SCREEN_WIDTH: usize = 240;
pub const SCREEN_HEIGHT: usize = 160;

pub const TIMER_COUNT: usize = 4;
pub const SPRITE_COUNT: usize = 128;
pub const PALETTE_BANKS: usize = 16;

/// Number of interrupt sources, one bit each in IE/IF.
pub const IRQ_SOURCE_COUNT: usize = 14;
