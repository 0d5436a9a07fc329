use core::ptr;

use super::Mode3;
use crate::mmio::Reg32;

/// An 8x8 tile at 4 bits per pixel.
pub type Tile4 = [Reg32; 8];

/// An 8x8 tile at 8 bits per pixel.
pub type Tile8 = [Reg32; 16];

/// 16KiB character blocks. `B0`..`B3` hold background tiles, `S0`/`S1` sprite
/// tiles. Tile indices count from the start of the selected block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileBlock {
    B0,
    B1,
    B2,
    B3,
    S0,
    S1,
}

impl TileBlock {
    const fn index(self) -> usize {
        self as usize
    }
}

/// The 96KiB of video RAM at [`crate::config::VRAM_BASE`].
///
/// The same bytes are a bitmap framebuffer in modes 3-5 and tile data in the
/// tiled modes. 4bpp and 8bpp tile views alias each other: writing an 8bpp
/// tile overwrites two 4bpp tiles.
#[repr(C)]
pub struct Vram {
    blocks: [[Tile4; 512]; 6],
}

const _: () = assert!(core::mem::size_of::<Vram>() == 0x18000);

impl Vram {
    pub fn tiles4(&self, block: TileBlock) -> &[Tile4; 512] {
        &self.blocks[block.index()]
    }

    pub fn tiles8(&self, block: TileBlock) -> &[Tile8; 256] {
        let tiles = self.tiles4(block);
        // SAFETY: both arrays are 16KiB of `Reg32` with the same alignment.
        unsafe { &*ptr::from_ref(tiles).cast::<[Tile8; 256]>() }
    }

    /// The bitmap framebuffer used in mode 3.
    pub fn mode3(&self) -> &Mode3 {
        // SAFETY: the 75KiB framebuffer lies within VRAM and `Mode3` is made of
        // `Reg16` cells, whose alignment `Vram` satisfies.
        unsafe { &*ptr::from_ref(self).cast::<Mode3>() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Board;

    #[test]
    fn eight_bpp_tiles_alias_pairs_of_four_bpp_tiles() {
        let board = Board::new();
        let vram = board.hardware().vram();

        vram.tiles8(TileBlock::S0)[1][8].set(0x1234_5678);

        assert_eq!(vram.tiles4(TileBlock::S0)[3][0].get(), 0x1234_5678);
        assert_eq!(vram.tiles4(TileBlock::S0)[2][0].get(), 0);
    }

    #[test]
    fn blocks_are_sixteen_kib_apart() {
        let board = Board::new();
        let vram = board.hardware().vram();
        let b0 = ptr::from_ref(vram.tiles4(TileBlock::B0)) as usize;
        let s1 = ptr::from_ref(vram.tiles4(TileBlock::S1)) as usize;
        assert_eq!(s1 - b0, 5 * 0x4000);
    }

    #[test]
    fn mode3_starts_at_vram_base() {
        let board = Board::new();
        let vram = board.hardware().vram();
        vram.mode3()
            .set_pixel(1, 0, crate::display::Rgb15::WHITE)
            .unwrap();
        assert_eq!(vram.tiles4(TileBlock::B0)[0][0].get(), 0x7FFF_0000);
    }
}
