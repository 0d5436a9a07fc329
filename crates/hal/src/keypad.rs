//! Keypad status and wake-on configuration.

use bitflags::bitflags;

use crate::mmio::Reg16;

bitflags! {
    /// One bit per key, as laid out in KEYINPUT and KEYCNT.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Key: u16 {
        const A = 1 << 0;
        const B = 1 << 1;
        const SELECT = 1 << 2;
        const START = 1 << 3;
        const RIGHT = 1 << 4;
        const LEFT = 1 << 5;
        const UP = 1 << 6;
        const DOWN = 1 << 7;
        const R = 1 << 8;
        const L = 1 << 9;
    }
}

bitflags! {
    /// KEYCNT bits above the key selection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KeyControl: u16 {
        const IRQ_ENABLE = 1 << 14;
        /// Fire only when all selected keys are held (AND) instead of any (OR).
        const IRQ_ALL = 1 << 15;
    }
}

#[repr(C)]
pub struct Keypad {
    /// KEYINPUT, active low.
    pub status: Reg16,
    /// KEYCNT.
    pub control: Reg16,
}

impl Keypad {
    /// Keys currently held down.
    pub fn pressed(&self) -> Key {
        Key::from_bits_truncate(!self.status.get())
    }

    /// Replace the key selection that raises the keypad interrupt. The
    /// interrupt enable and AND/OR condition are left as they are.
    pub fn wake_on(&self, keys: Key) {
        self.control.clear_bits(Key::all().bits());
        self.control.set_bits(keys.bits());
    }

    pub fn set_wake_on_all(&self, all: bool) {
        if all {
            self.control.set_bits(KeyControl::IRQ_ALL.bits());
        } else {
            self.control.clear_bits(KeyControl::IRQ_ALL.bits());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Board;

    #[test]
    fn pressed_inverts_active_low_status() {
        let board = Board::new();
        let keypad = board.hardware().keypad();
        keypad.status.set(0x03FF & !(Key::A | Key::LEFT).bits());
        assert_eq!(keypad.pressed(), Key::A | Key::LEFT);

        keypad.status.set(0x03FF);
        assert!(keypad.pressed().is_empty());
    }

    #[test]
    fn wake_on_replaces_selection_only() {
        let board = Board::new();
        let keypad = board.hardware().keypad();
        keypad
            .control
            .set((KeyControl::IRQ_ENABLE | KeyControl::IRQ_ALL).bits() | Key::B.bits());

        keypad.wake_on(Key::START | Key::SELECT);

        assert_eq!(
            keypad.control.get(),
            (KeyControl::IRQ_ENABLE | KeyControl::IRQ_ALL).bits()
                | (Key::START | Key::SELECT).bits()
        );
    }

    #[test]
    fn wake_condition_toggle() {
        let board = Board::new();
        let keypad = board.hardware().keypad();
        keypad.set_wake_on_all(true);
        assert_eq!(keypad.control.get(), KeyControl::IRQ_ALL.bits());
        keypad.set_wake_on_all(false);
        assert_eq!(keypad.control.get(), 0);
    }
}
