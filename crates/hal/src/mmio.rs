//! Memory-mapped register cells.
//!
//! Every peripheral block in this crate is a `#[repr(C)]` overlay built from
//! these cells and bound once over a fixed address (see [`crate::hw`]). All
//! access is volatile, so the compiler can neither elide nor reorder it
//! relative to other volatile accesses.

use core::cell::UnsafeCell;
use core::ops::{BitAnd, BitOr, Not};
use core::ptr::{read_volatile, write_volatile};

/// A fixed-width hardware register.
#[repr(transparent)]
pub struct Reg<T: Copy>(UnsafeCell<T>);

pub type Reg8 = Reg<u8>;
pub type Reg16 = Reg<u16>;
pub type Reg32 = Reg<u32>;

impl<T: Copy> Reg<T> {
    /// Read the current value.
    #[inline(always)]
    pub fn get(&self) -> T {
        // SAFETY: the cell is only ever reached through an overlay bound to a
        // valid, suitably aligned register address.
        unsafe { read_volatile(self.0.get()) }
    }

    /// Write the full register width.
    #[inline(always)]
    pub fn set(&self, value: T) {
        // SAFETY: see `get`.
        unsafe { write_volatile(self.0.get(), value) }
    }
}

impl<T> Reg<T>
where
    T: Copy + BitOr<Output = T> + BitAnd<Output = T> + Not<Output = T>,
{
    /// `set(get() | mask)`. Not atomic: two writers racing on one register
    /// lose updates.
    #[inline(always)]
    pub fn set_bits(&self, mask: T) {
        self.set(self.get() | mask);
    }

    /// `set(get() & !mask)`. Same single-writer caveat as [`Reg::set_bits`].
    #[inline(always)]
    pub fn clear_bits(&self, mask: T) {
        self.set(self.get() & !mask);
    }

    /// Replace the bits selected by `field` with the matching bits of `value`.
    #[inline(always)]
    pub fn replace_bits(&self, field: T, value: T) {
        self.set((self.get() & !field) | (value & field));
    }
}

impl Reg16 {
    /// Write-one-to-clear access for request registers.
    ///
    /// The hardware clears exactly the bits written as 1.
    #[cfg(target_arch = "arm")]
    #[inline(always)]
    pub fn acknowledge(&self, mask: u16) {
        self.set(mask);
    }

    /// Write-one-to-clear access for request registers.
    ///
    /// Host builds back the register with plain memory, so the clearing the
    /// hardware would do is performed here.
    #[cfg(not(target_arch = "arm"))]
    #[inline(always)]
    pub fn acknowledge(&self, mask: u16) {
        self.clear_bits(mask);
    }
}
