//! Sound register layout.
//!
//! Channel programming is left to callers; only the master switch has a
//! helper.

use bitflags::bitflags;
use core::mem::offset_of;

use crate::mmio::{Reg8, Reg16, Reg32};

bitflags! {
    /// SOUNDCNT_X bits. The low four are read-only channel status.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SoundMaster: u16 {
        const SOUND1_ON = 1 << 0;
        const SOUND2_ON = 1 << 1;
        const SOUND3_ON = 1 << 2;
        const SOUND4_ON = 1 << 3;
        const MASTER_ENABLE = 1 << 7;
    }
}

#[repr(C)]
pub struct SoundRegs {
    pub sound1cnt_l: Reg16,      // 0x60 sweep
    pub sound1cnt_h: Reg16,      // 0x62 duty/length/envelope
    pub sound1cnt_x: Reg16,      // 0x64 frequency/control
    _unused0: u16,               // 0x66
    pub sound2cnt_l: Reg16,      // 0x68 duty/length/envelope
    _unused1: u16,               // 0x6A
    pub sound2cnt_h: Reg16,      // 0x6C frequency/control
    _unused2: u16,               // 0x6E
    pub sound3cnt_l: Reg16,      // 0x70 stop/wave RAM select
    pub sound3cnt_h: Reg16,      // 0x72 length/volume
    pub sound3cnt_x: Reg16,      // 0x74 frequency/control
    _unused3: u16,               // 0x76
    pub sound4cnt_l: Reg16,      // 0x78 length/envelope
    _unused4: u16,               // 0x7A
    pub sound4cnt_h: Reg16,      // 0x7C frequency/control
    _unused5: u16,               // 0x7E
    pub soundcnt_l: Reg16,       // 0x80 stereo/volume/enable
    pub soundcnt_h: Reg16,       // 0x82 mixing/DMA control
    pub soundcnt_x: Reg16,       // 0x84 master on/off
    _unused6: u16,               // 0x86
    pub soundbias: Reg16,        // 0x88
    _unused7: [u16; 3],          // 0x8A
    /// Channel 3 wave pattern, two banks of 16 samples.
    pub wave_ram: [[Reg8; 8]; 2], // 0x90
    pub fifo_a: Reg32,           // 0xA0
    pub fifo_b: Reg32,           // 0xA4
    _unused8: [u16; 4],          // 0xA8
}

const _: () = {
    assert!(offset_of!(SoundRegs, soundcnt_l) == 0x20);
    assert!(offset_of!(SoundRegs, wave_ram) == 0x30);
    assert!(offset_of!(SoundRegs, fifo_a) == 0x40);
    assert!(core::mem::size_of::<SoundRegs>() == 0x50);
};

impl SoundRegs {
    /// Power the sound circuit. Must precede any other sound register write.
    pub fn master_enable(&self) {
        self.soundcnt_x.set_bits(SoundMaster::MASTER_ENABLE.bits());
    }

    /// Power down; the hardware also resets every sound register.
    pub fn master_disable(&self) {
        self.soundcnt_x.clear_bits(SoundMaster::MASTER_ENABLE.bits());
    }

    pub fn status(&self) -> SoundMaster {
        SoundMaster::from_bits_truncate(self.soundcnt_x.get())
    }
}
