use bitflags::bitflags;

use super::{DisplayControl, LcdRegs};
use crate::config::SPRITE_COUNT;
use crate::error::HalError;
use crate::mmio::Reg16;

/// Add to a 4bpp tile index that lives in [`super::TileBlock::S1`].
pub const SPRITE_4BPP_S1_OFFSET: u16 = 512;
/// Add to an 8bpp tile index that lives in [`super::TileBlock::S1`].
pub const SPRITE_8BPP_S1_OFFSET: u16 = 256;

const ATTR0_8BPP: u16 = 1 << 13;
const ATTR2_TILE: u16 = 0x3FF;

/// Attribute 0 shape field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum SpriteShape {
    Square = 0,
    Wide = 1,
    Tall = 2,
}

/// Attribute 1 size field; the pixel size depends on the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum SpriteSize {
    Small = 0,
    Medium = 1,
    Large = 2,
    XLarge = 3,
}

bitflags! {
    /// Attribute 1 flip bits (regular sprites only).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SpriteFlip: u16 {
        const H = 1 << 12;
        const V = 1 << 13;
    }
}

/// Attribute 0 settings chosen at setup time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpriteYAttrs(u16);

impl SpriteYAttrs {
    pub const fn new(shape: SpriteShape) -> Self {
        Self((shape as u16) << 14)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }
}

/// Attribute 1 settings chosen at setup time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpriteXAttrs(u16);

impl SpriteXAttrs {
    pub const fn new(size: SpriteSize) -> Self {
        Self((size as u16) << 14)
    }

    pub const fn flipped(self, flip: SpriteFlip) -> Self {
        Self(self.0 | flip.bits())
    }

    pub const fn bits(self) -> u16 {
        self.0
    }
}

/// One OAM entry. The fourth halfword belongs to the interleaved affine
/// parameter table.
#[repr(C)]
pub struct SpriteAttrs {
    pub attr0: Reg16,
    pub attr1: Reg16,
    pub attr2: Reg16,
    _affine: Reg16,
}

impl SpriteAttrs {
    /// Set up a 4bpp sprite using palette `bank`.
    pub fn setup4(&self, priority: u16, tile: u16, bank: u16, y: SpriteYAttrs, x: SpriteXAttrs) {
        self.attr0.set(y.bits());
        self.attr1.set(x.bits());
        self.attr2
            .set((bank & 0xF) << 12 | (priority & 0x3) << 10 | (tile & ATTR2_TILE));
    }

    /// Set up an 8bpp sprite. `tile` counts 8bpp tiles, as in
    /// [`crate::display::Vram::tiles8`].
    pub fn setup8(&self, priority: u16, tile: u16, y: SpriteYAttrs, x: SpriteXAttrs) {
        // Hardware tile numbers always count 4bpp tiles.
        let tile = tile << 1;
        self.attr0.set(y.bits() | ATTR0_8BPP);
        self.attr1.set(x.bits());
        self.attr2.set((priority & 0x3) << 10 | (tile & ATTR2_TILE));
    }

    /// `x` wraps at 512, `y` at 256.
    pub fn set_pos(&self, x: u16, y: u16) {
        self.attr0.replace_bits(0x0FF, y);
        self.attr1.replace_bits(0x1FF, x);
    }
}

/// Object attribute memory at [`crate::config::OAM_BASE`].
#[repr(C)]
pub struct SpriteRam {
    entries: [SpriteAttrs; SPRITE_COUNT],
}

/// Sprite access together with the DISPCNT bits that control sprites.
pub struct Sprites<'a> {
    lcd: &'a LcdRegs,
    oam: &'a SpriteRam,
}

impl<'a> Sprites<'a> {
    pub(crate) fn new(lcd: &'a LcdRegs, oam: &'a SpriteRam) -> Self {
        Self { lcd, oam }
    }

    pub fn get(&self, index: usize) -> Result<&'a SpriteAttrs, HalError> {
        self.oam
            .entries
            .get(index)
            .ok_or(HalError::NoSuchSprite(index))
    }

    /// Show sprites, tiles laid out as a 32x32 grid.
    pub fn enable_2d(&self) {
        self.lcd.dispcnt.clear_bits(DisplayControl::OBJ_VRAM_1D.bits());
        self.lcd.dispcnt.set_bits(DisplayControl::OBJ.bits());
    }

    /// Show sprites, tiles laid out consecutively.
    pub fn enable_1d(&self) {
        self.lcd
            .dispcnt
            .set_bits((DisplayControl::OBJ | DisplayControl::OBJ_VRAM_1D).bits());
    }

    pub fn disable(&self) {
        self.lcd.dispcnt.clear_bits(DisplayControl::OBJ.bits());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Board;

    #[test]
    fn setup4_packs_bank_priority_and_tile() {
        let board = Board::new();
        let sprite = board.hardware().sprites().get(3).unwrap();

        sprite.setup4(
            2,
            0x4FF,
            0x1A,
            SpriteYAttrs::new(SpriteShape::Wide),
            SpriteXAttrs::new(SpriteSize::Large).flipped(SpriteFlip::H),
        );

        assert_eq!(sprite.attr0.get(), 1 << 14);
        assert_eq!(sprite.attr1.get(), 2 << 14 | 1 << 12);
        assert_eq!(sprite.attr2.get(), 0xA << 12 | 2 << 10 | 0x0FF);
    }

    #[test]
    fn setup8_doubles_the_tile_index() {
        let board = Board::new();
        let sprite = board.hardware().sprites().get(0).unwrap();

        sprite.setup8(
            1,
            SPRITE_8BPP_S1_OFFSET + 3,
            SpriteYAttrs::new(SpriteShape::Square),
            SpriteXAttrs::new(SpriteSize::Small),
        );

        assert_eq!(sprite.attr0.get(), 1 << 13);
        assert_eq!(sprite.attr2.get(), 1 << 10 | (512 + 6));
    }

    #[test]
    fn set_pos_keeps_setup_bits() {
        let board = Board::new();
        let sprite = board.hardware().sprites().get(127).unwrap();
        sprite.setup4(
            0,
            1,
            0,
            SpriteYAttrs::new(SpriteShape::Tall),
            SpriteXAttrs::new(SpriteSize::Medium),
        );

        sprite.set_pos(300, 40);
        sprite.set_pos(511, 255);

        assert_eq!(sprite.attr0.get(), 2 << 14 | 255);
        assert_eq!(sprite.attr1.get(), 1 << 14 | 511);
    }

    #[test]
    fn sprite_index_is_checked() {
        let board = Board::new();
        assert_eq!(
            board.hardware().sprites().get(128).err(),
            Some(HalError::NoSuchSprite(128))
        );
    }

    #[test]
    fn mapping_mode_switches() {
        let board = Board::new();
        let hw = board.hardware();
        let sprites = hw.sprites();

        sprites.enable_1d();
        assert!(hw.io().lcd.control().contains(DisplayControl::OBJ | DisplayControl::OBJ_VRAM_1D));

        sprites.enable_2d();
        assert!(hw.io().lcd.control().contains(DisplayControl::OBJ));
        assert!(!hw.io().lcd.control().contains(DisplayControl::OBJ_VRAM_1D));

        sprites.disable();
        assert!(!hw.io().lcd.control().contains(DisplayControl::OBJ));
    }
}
