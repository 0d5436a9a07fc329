#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! Hardware access for a 32-bit handheld console.
//!
//! Register blocks are typed overlays over the fixed memory map, reached
//! through a [`Hardware`] context. On top of them sit the interrupt core:
//! [`irq`] for per-source handlers and [`interrupts`] for the global gate.

pub mod bios;
pub mod config;
pub mod display;
pub mod error;
pub mod hw;
pub mod interrupts;
pub mod io;
pub mod irq;
pub mod keypad;
pub mod mmio;
pub mod sound;
pub mod timer;

#[cfg(any(test, feature = "std"))]
pub mod testing;

pub use error::HalError;
pub use hw::Hardware;
pub use interrupts::{IrqGuard, IrqState};
pub use irq::{Handler, Interrupt, InterruptController, IrqMask};
