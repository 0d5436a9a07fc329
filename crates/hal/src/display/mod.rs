//! LCD controller registers and the VRAM views built on them.

mod palette;
mod sprite;
mod tile;

pub use palette::{PaletteBank, PaletteMemory, PaletteRam};
pub use sprite::{
    SpriteAttrs, SpriteFlip, SpriteRam, SpriteShape, SpriteSize, SpriteXAttrs, SpriteYAttrs,
    Sprites, SPRITE_4BPP_S1_OFFSET, SPRITE_8BPP_S1_OFFSET,
};
pub use tile::{Tile4, Tile8, TileBlock, Vram};

use bitflags::bitflags;
use core::mem::offset_of;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::HalError;
use crate::mmio::{Reg16, Reg32};

bitflags! {
    /// DISPCNT bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DisplayControl: u16 {
        /// Video mode field, see [`DisplayMode`].
        const MODE = 0b111;
        /// Show the second bitmap frame in modes 4 and 5.
        const FRAME_SELECT = 1 << 4;
        /// Allow OAM access during H-Blank.
        const HBLANK_INTERVAL_FREE = 1 << 5;
        /// One-dimensional sprite tile mapping.
        const OBJ_VRAM_1D = 1 << 6;
        const FORCED_BLANK = 1 << 7;
        const BG0 = 1 << 8;
        const BG1 = 1 << 9;
        const BG2 = 1 << 10;
        const BG3 = 1 << 11;
        const OBJ = 1 << 12;
        const WIN0 = 1 << 13;
        const WIN1 = 1 << 14;
        const OBJ_WIN = 1 << 15;
        /// All four background enables.
        const BG_ALL = 0xF << 8;
    }
}

bitflags! {
    /// DISPSTAT bits. The low three are read-only status.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DisplayStatus: u16 {
        /// Set during lines 160..=226.
        const VBLANK = 1 << 0;
        const HBLANK = 1 << 1;
        /// Current line equals the V-Count setting.
        const VCOUNTER = 1 << 2;
        const VBLANK_IRQ = 1 << 3;
        const HBLANK_IRQ = 1 << 4;
        const VCOUNTER_IRQ = 1 << 5;
        /// V-Count setting field (bits 8..=15).
        const VCOUNT_SETTING = 0xFF << 8;
    }
}

/// BG mode selected in DISPCNT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum DisplayMode {
    /// Four regular tiled backgrounds.
    Mode0 = 0,
    Mode1 = 1,
    Mode2 = 2,
    /// Single 240x160 15-bit bitmap on BG2.
    Mode3 = 3,
    /// Two paletted 240x160 bitmap frames.
    Mode4 = 4,
    /// Two 160x128 15-bit bitmap frames.
    Mode5 = 5,
}

#[repr(C)]
pub struct BgOffset {
    pub h: Reg16,
    pub v: Reg16,
}

/// Rotation/scaling parameters of BG2 or BG3.
#[repr(C)]
pub struct AffineBg {
    pub pa: Reg16,
    pub pb: Reg16,
    pub pc: Reg16,
    pub pd: Reg16,
    pub x: Reg32,
    pub y: Reg32,
}

#[repr(C)]
pub struct LcdRegs {
    pub dispcnt: Reg16,         // 0x00
    _green_swap: Reg16,         // 0x02
    pub dispstat: Reg16,        // 0x04
    pub vcount: Reg16,          // 0x06
    pub bgcnt: [Reg16; 4],      // 0x08
    pub bg_offset: [BgOffset; 4], // 0x10
    pub bg2: AffineBg,          // 0x20
    pub bg3: AffineBg,          // 0x30
    pub win0h: Reg16,           // 0x40
    pub win1h: Reg16,           // 0x42
    pub win0v: Reg16,           // 0x44
    pub win1v: Reg16,           // 0x46
    pub winin: Reg16,           // 0x48
    pub winout: Reg16,          // 0x4A
    pub mosaic: Reg16,          // 0x4C
    _unused0: Reg16,            // 0x4E
    pub bldcnt: Reg16,          // 0x50
    pub bldalpha: Reg16,        // 0x52
    pub bldy: Reg16,            // 0x54
    _unused1: [u16; 5],         // 0x56
}

const _: () = {
    assert!(offset_of!(LcdRegs, dispstat) == 0x04);
    assert!(offset_of!(LcdRegs, bg2) == 0x20);
    assert!(offset_of!(LcdRegs, win0h) == 0x40);
    assert!(offset_of!(LcdRegs, bldy) == 0x54);
    assert!(core::mem::size_of::<LcdRegs>() == 0x60);
};

impl LcdRegs {
    pub fn control(&self) -> DisplayControl {
        DisplayControl::from_bits_retain(self.dispcnt.get())
    }

    pub fn status(&self) -> DisplayStatus {
        DisplayStatus::from_bits_retain(self.dispstat.get())
    }

    /// Select a BG mode, leaving every other DISPCNT bit alone.
    pub fn set_mode(&self, mode: DisplayMode) {
        self.dispcnt
            .replace_bits(DisplayControl::MODE.bits(), mode as u16);
    }

    /// Mode 3 with only BG2 visible, forced blank off. Sprite bits are kept.
    pub fn configure_mode3(&self) {
        self.dispcnt.clear_bits(
            (DisplayControl::MODE | DisplayControl::BG_ALL | DisplayControl::FORCED_BLANK).bits(),
        );
        self.dispcnt
            .set_bits(DisplayMode::Mode3 as u16 | DisplayControl::BG2.bits());
    }

    pub fn in_vblank(&self) -> bool {
        self.status().contains(DisplayStatus::VBLANK)
    }

    /// Line currently being drawn, 0..=227.
    pub fn scanline(&self) -> u16 {
        self.vcount.get() & 0xFF
    }

    /// Line that sets the V-Counter flag (and its interrupt, if enabled).
    pub fn set_vcount_target(&self, line: u8) {
        self.dispstat
            .replace_bits(DisplayStatus::VCOUNT_SETTING.bits(), u16::from(line) << 8);
    }
}

/// A 15-bit BGR colour as stored in VRAM and palette RAM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb15(u16);

impl Rgb15 {
    pub const BLACK: Self = Self(0);
    pub const WHITE: Self = Self(0x7FFF);

    /// Each channel is 5 bits; higher bits are dropped.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self((r as u16 & 0x1F) | (g as u16 & 0x1F) << 5 | (b as u16 & 0x1F) << 10)
    }

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & 0x7FFF)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }
}

/// The mode 3 framebuffer, one [`Rgb15`] per pixel.
#[repr(C)]
pub struct Mode3 {
    rows: [[Reg16; SCREEN_WIDTH]; SCREEN_HEIGHT],
}

impl Mode3 {
    pub const fn size(&self) -> (usize, usize) {
        (SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    fn cell(&self, x: usize, y: usize) -> Result<&Reg16, HalError> {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .ok_or(HalError::PixelOutOfBounds)
    }

    pub fn set_pixel(&self, x: usize, y: usize, color: Rgb15) -> Result<(), HalError> {
        self.cell(x, y)?.set(color.bits());
        Ok(())
    }

    pub fn pixel(&self, x: usize, y: usize) -> Result<Rgb15, HalError> {
        Ok(Rgb15::from_bits(self.cell(x, y)?.get()))
    }

    /// Fill the whole frame with one colour.
    pub fn clear(&self, color: Rgb15) {
        for cell in self.rows.iter().flatten() {
            cell.set(color.bits());
        }
    }
}
