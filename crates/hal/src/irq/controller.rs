use core::cell::UnsafeCell;

use super::source::{Interrupt, IrqMask};
use crate::hw::Hardware;
use crate::interrupts::IrqGuard;

/// Interrupt handler. Receives the source it was registered for, so one
/// function can serve several sources.
pub type Handler = fn(Interrupt);

type Slots = [Option<Handler>; Interrupt::COUNT];

/// Per-source handler table plus the register bookkeeping that goes with it.
///
/// Slots change only through [`enable`](Self::enable),
/// [`disable`](Self::disable) and [`disable_all`](Self::disable_all), which
/// must be called from the foreground, never from a handler. Only the
/// trampoline calls [`dispatch`](Self::dispatch). Neither rule is checked.
pub struct InterruptController {
    slots: UnsafeCell<Slots>,
}

// SAFETY: single core. The foreground mutates slots only with IME closed, so
// the trampoline (the only other reader) cannot observe a write in progress.
unsafe impl Sync for InterruptController {}

impl Default for InterruptController {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptController {
    pub const fn new() -> Self {
        Self {
            slots: UnsafeCell::new([None; Interrupt::COUNT]),
        }
    }

    fn slot(&self, source: Interrupt) -> Option<Handler> {
        // SAFETY: plain copy out of the table; see the `Sync` impl.
        unsafe { (*self.slots.get())[source.index()] }
    }

    /// # Safety
    /// Foreground only, with IME closed, and the borrow must end before IME
    /// reopens.
    #[allow(clippy::mut_from_ref)]
    unsafe fn slots_mut(&self) -> &mut Slots {
        unsafe { &mut *self.slots.get() }
    }

    pub fn is_registered(&self, source: Interrupt) -> bool {
        self.slot(source).is_some()
    }

    /// Install `handler` for each of `sources` and let them fire.
    ///
    /// A source that already has a handler is left untouched: the first
    /// registration wins until [`disable`](Self::disable) clears it. For the
    /// others the peripheral enable bit is set (if the source has one), any
    /// stale request in IF is acknowledged, the IE bit is set and the handler
    /// is stored. IME is closed for the whole call and then restored, so an
    /// interrupt never sees a source half configured.
    pub fn enable(
        &self,
        hw: &Hardware<'_>,
        handler: Handler,
        sources: impl IntoIterator<Item = Interrupt>,
    ) {
        let _gate = IrqGuard::new(hw);
        let int = &hw.io().int;

        for source in sources {
            // SAFETY: `_gate` holds IME closed; the borrow ends this iteration.
            let slot = unsafe { &mut self.slots_mut()[source.index()] };
            if slot.is_some() {
                log::trace!("irq: {source:?} already has a handler, keeping it");
                continue;
            }

            if let Some(enabler) = source.enabler() {
                hw.enabler_register(enabler.register).set_bits(enabler.mask);
            }
            int.flags.acknowledge(source.mask().bits());
            int.enable.set_bits(source.mask().bits());
            *slot = Some(handler);

            log::trace!("irq: {source:?} enabled");
        }
    }

    /// Stop `sources` from firing and forget their handlers.
    ///
    /// Mirrors [`enable`](Self::enable): peripheral enable bit cleared, IE bit
    /// cleared, pending request acknowledged, slot emptied, all with IME
    /// closed. A request the peripheral raised just before this call may
    /// still be taken once IME reopens and is then dropped.
    pub fn disable(&self, hw: &Hardware<'_>, sources: impl IntoIterator<Item = Interrupt>) {
        let _gate = IrqGuard::new(hw);
        let int = &hw.io().int;

        for source in sources {
            if let Some(enabler) = source.enabler() {
                hw.enabler_register(enabler.register)
                    .clear_bits(enabler.mask);
            }
            int.enable.clear_bits(source.mask().bits());
            int.flags.acknowledge(source.mask().bits());
            // SAFETY: `_gate` holds IME closed.
            unsafe { self.slots_mut()[source.index()] = None };

            log::trace!("irq: {source:?} disabled");
        }
    }

    /// Close IME and forget every handler.
    ///
    /// IME is not restored and no IE or peripheral bit is touched: the
    /// hardware may keep raising requests, they are simply never dispatched
    /// until a handler is enabled again and the gate reopened with
    /// [`crate::interrupts::enable`].
    pub fn disable_all(&self, hw: &Hardware<'_>) {
        hw.io().int.master.set(0);
        // SAFETY: IME closed on the line above.
        unsafe { *self.slots_mut() = [None; Interrupt::COUNT] };

        log::debug!("irq: all handlers removed, IME closed");
    }

    /// Run the handler of every source in `caught`, lowest bit first. Each
    /// handler returns before the next starts.
    ///
    /// A caught source without a handler is dropped: it has already been
    /// acknowledged, so there is nothing left to do with it.
    pub fn dispatch(&self, caught: IrqMask) {
        for source in caught.sources() {
            match self.slot(source) {
                Some(handler) => handler(source),
                None => log::trace!("irq: {source:?} caught with no handler, dropped"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplayStatus;
    use crate::keypad::KeyControl;
    use crate::testing::Board;
    use crate::timer::TimerControl;
    use std::cell::RefCell;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::vec::Vec;

    fn noop(_: Interrupt) {}

    #[test]
    fn enable_sets_enabler_and_ie_bits() {
        let board = Board::new();
        let hw = board.hardware();
        let ic = InterruptController::new();

        ic.enable(
            &hw,
            noop,
            [Interrupt::VBlank, Interrupt::Timer2, Interrupt::Keypad, Interrupt::Serial],
        );

        let io = hw.io();
        assert_eq!(io.lcd.dispstat.get(), DisplayStatus::VBLANK_IRQ.bits());
        assert_eq!(io.timer[2].control.get(), TimerControl::IRQ_ENABLE.bits());
        assert_eq!(io.keypad.control.get(), KeyControl::IRQ_ENABLE.bits());
        assert_eq!(
            io.int.enable.get(),
            (IrqMask::VBLANK | IrqMask::TIMER2 | IrqMask::KEYPAD | IrqMask::SERIAL).bits()
        );
        for source in [Interrupt::VBlank, Interrupt::Timer2, Interrupt::Keypad, Interrupt::Serial] {
            assert!(ic.is_registered(source));
        }
        assert!(!ic.is_registered(Interrupt::HBlank));
    }

    #[test]
    fn enable_then_disable_clears_everything_it_set() {
        let board = Board::new();
        let hw = board.hardware();
        let io = hw.io();
        let ic = InterruptController::new();
        // Bits owned by other code must survive.
        io.lcd.dispstat.set(DisplayStatus::VCOUNT_SETTING.bits());
        io.timer[0].control.set(TimerControl::START.bits());

        let set = [
            Interrupt::VBlank,
            Interrupt::HBlank,
            Interrupt::Timer0,
            Interrupt::Keypad,
            Interrupt::Dma1,
        ];
        ic.enable(&hw, noop, set);
        ic.disable(&hw, set);

        assert_eq!(io.lcd.dispstat.get(), DisplayStatus::VCOUNT_SETTING.bits());
        assert_eq!(io.timer[0].control.get(), TimerControl::START.bits());
        assert_eq!(io.keypad.control.get(), 0);
        assert_eq!(io.int.enable.get(), 0);
        for source in set {
            assert!(!ic.is_registered(source));
        }
    }

    #[test]
    fn first_registration_wins() {
        static FIRST: AtomicUsize = AtomicUsize::new(0);
        static SECOND: AtomicUsize = AtomicUsize::new(0);
        fn first(_: Interrupt) {
            FIRST.fetch_add(1, Ordering::SeqCst);
        }
        fn second(_: Interrupt) {
            SECOND.fetch_add(1, Ordering::SeqCst);
        }

        let board = Board::new();
        let hw = board.hardware();
        let ic = InterruptController::new();

        ic.enable(&hw, first, [Interrupt::Timer1]);
        ic.enable(&hw, second, [Interrupt::Timer1]);
        ic.dispatch(IrqMask::TIMER1);

        assert_eq!(FIRST.load(Ordering::SeqCst), 1);
        assert_eq!(SECOND.load(Ordering::SeqCst), 0);

        ic.disable(&hw, [Interrupt::Timer1]);
        ic.enable(&hw, second, [Interrupt::Timer1]);
        ic.dispatch(IrqMask::TIMER1);

        assert_eq!(FIRST.load(Ordering::SeqCst), 1);
        assert_eq!(SECOND.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn skipped_source_keeps_its_pending_request() {
        let board = Board::new();
        let hw = board.hardware();
        let ic = InterruptController::new();
        ic.enable(&hw, noop, [Interrupt::HBlank]);

        board.raise(IrqMask::HBLANK | IrqMask::VCOUNTER);
        ic.enable(&hw, noop, [Interrupt::HBlank, Interrupt::VCounter]);

        // HBlank was already registered and is left alone; VCounter's stale
        // request is acknowledged.
        assert_eq!(hw.io().int.flags.get(), IrqMask::HBLANK.bits());
    }

    #[test]
    fn enable_and_disable_restore_the_gate() {
        let board = Board::new();
        let hw = board.hardware();
        let ic = InterruptController::new();

        crate::interrupts::enable(&hw);
        ic.enable(&hw, noop, [Interrupt::VBlank]);
        assert!(crate::interrupts::is_enabled(&hw));
        ic.disable(&hw, [Interrupt::VBlank]);
        assert!(crate::interrupts::is_enabled(&hw));

        hw.io().int.master.set(0);
        ic.enable(&hw, noop, [Interrupt::VBlank]);
        assert!(!crate::interrupts::is_enabled(&hw));
    }

    #[test]
    fn disable_all_on_fresh_controller() {
        let board = Board::new();
        let hw = board.hardware();
        let ic = InterruptController::new();
        hw.io().int.master.set(1);

        ic.disable_all(&hw);

        assert_eq!(hw.io().int.master.get(), 0);
        for source in Interrupt::ALL {
            assert!(!ic.is_registered(source));
        }
    }

    #[test]
    fn disable_all_leaves_source_enables() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn count(_: Interrupt) {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }

        let board = Board::new();
        let hw = board.hardware();
        let ic = InterruptController::new();
        crate::interrupts::enable(&hw);
        ic.enable(&hw, count, [Interrupt::VBlank, Interrupt::Keypad]);

        ic.disable_all(&hw);

        assert!(!crate::interrupts::is_enabled(&hw));
        assert!(!ic.is_registered(Interrupt::VBlank));
        assert!(!ic.is_registered(Interrupt::Keypad));
        assert_eq!(hw.io().lcd.dispstat.get(), DisplayStatus::VBLANK_IRQ.bits());
        assert_eq!(
            hw.io().int.enable.get(),
            (IrqMask::VBLANK | IrqMask::KEYPAD).bits()
        );

        ic.dispatch(IrqMask::VBLANK | IrqMask::KEYPAD);
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);

        // Re-enabling after disable_all installs again.
        ic.enable(&hw, count, [Interrupt::VBlank]);
        ic.dispatch(IrqMask::VBLANK);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dispatch_skips_sources_without_handler() {
        static HANDLED: AtomicUsize = AtomicUsize::new(0);
        fn handled(source: Interrupt) {
            assert_eq!(source, Interrupt::Timer3);
            HANDLED.fetch_add(1, Ordering::SeqCst);
        }

        let board = Board::new();
        let hw = board.hardware();
        let ic = InterruptController::new();
        ic.enable(&hw, handled, [Interrupt::Timer3]);

        ic.dispatch(IrqMask::TIMER3 | IrqMask::SERIAL);

        assert_eq!(HANDLED.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dispatch_runs_in_ascending_source_order() {
        thread_local! {
            static ORDER: RefCell<Vec<Interrupt>> = const { RefCell::new(Vec::new()) };
        }
        fn record(source: Interrupt) {
            ORDER.with(|order| order.borrow_mut().push(source));
        }

        let board = Board::new();
        let hw = board.hardware();
        let ic = InterruptController::new();
        ic.enable(&hw, record, [Interrupt::GamePak, Interrupt::Keypad]);
        ic.enable(&hw, record, [Interrupt::HBlank, Interrupt::Timer0]);

        ic.dispatch(IrqMask::all());

        ORDER.with(|order| {
            assert_eq!(
                *order.borrow(),
                [
                    Interrupt::HBlank,
                    Interrupt::Timer0,
                    Interrupt::Keypad,
                    Interrupt::GamePak
                ]
            );
        });
    }
}
