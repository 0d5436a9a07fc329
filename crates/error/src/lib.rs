//! Error declarations for the Pocket HAL.
//!
//! The interrupt core never fails; errors only exist where an untrusted integer
//! (a timer number, a pixel coordinate, a raw source id) crosses into a typed
//! API. `define_hal_error!` keeps those error types uniform: every variant gets
//! a stable 16-bit code (peripheral block in the high byte) and a description
//! usable without `alloc`.
//!
//! ```ignore
//! define_hal_error! {
//!     pub enum TimerError(0x03) {
//!         NoSuchTimer(usize) = 0x01 => "Timer index out of range",
//!         Busy = 0x02 => "Timer already running",
//!     }
//! }
//! ```

#![no_std]

/// Declare a HAL error enum.
///
/// Variants are either bare or carry a single `Copy + Display` payload, which
/// is appended to the `Display` output.
#[macro_export]
macro_rules! define_hal_error {
    (@pat $variant:ident ($payload:ty)) => { Self::$variant(_) };
    (@pat $variant:ident) => { Self::$variant };

    (@bind $variant:ident ($payload:ty) $value:ident) => { Self::$variant($value) };
    (@bind $variant:ident $value:ident) => { Self::$variant };

    (@write $self:ident $f:ident $desc:literal ($payload:ty) $value:ident) => {
        write!($f, "H{:04X}: {} ({})", $self.code(), $desc, $value)
    };
    (@write $self:ident $f:ident $desc:literal $value:ident) => {
        write!($f, "H{:04X}: {}", $self.code(), $desc)
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident($block:literal) {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(($payload:ty))? = $code:literal => $desc:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $(($payload))?,
            )*
        }

        impl $name {
            /// Peripheral block identifier shared by every variant.
            pub const BLOCK: u8 = $block;

            /// Block in the high byte, variant in the low byte.
            pub const fn code(&self) -> u16 {
                match self {
                    $(
                        $crate::define_hal_error!(@pat $variant $(($payload))?) => {
                            (($block as u16) << 8) | $code
                        }
                    )*
                }
            }

            /// Static description of the variant, without its payload.
            pub const fn describe(&self) -> &'static str {
                match self {
                    $(
                        $crate::define_hal_error!(@pat $variant $(($payload))?) => $desc,
                    )*
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $(
                        $crate::define_hal_error!(@bind $variant $(($payload))? value) => {
                            $crate::define_hal_error!(@write self f $desc $(($payload))? value)
                        }
                    )*
                }
            }
        }

        impl core::error::Error for $name {}
    };
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    define_hal_error! {
        /// Errors raised by a fictional DMA block.
        pub enum DmaError(0x0D) {
            /// Channel number past the last channel.
            NoSuchChannel(usize) = 0x01 => "DMA channel out of range",
            /// Transfer requested while the channel is running.
            Busy = 0x02 => "DMA channel busy",
        }
    }

    #[test]
    fn codes_carry_block_in_high_byte() {
        assert_eq!(DmaError::NoSuchChannel(7).code(), 0x0D01);
        assert_eq!(DmaError::Busy.code(), 0x0D02);
        assert_eq!(DmaError::BLOCK, 0x0D);
    }

    #[test]
    fn describe_ignores_payload() {
        assert_eq!(DmaError::NoSuchChannel(4).describe(), "DMA channel out of range");
        assert_eq!(DmaError::Busy.describe(), "DMA channel busy");
    }

    #[test]
    fn display_appends_payload() {
        assert_eq!(
            format!("{}", DmaError::NoSuchChannel(4)),
            "H0D01: DMA channel out of range (4)"
        );
        assert_eq!(format!("{}", DmaError::Busy), "H0D02: DMA channel busy");
    }

    #[test]
    fn payload_participates_in_equality() {
        assert_eq!(DmaError::NoSuchChannel(1), DmaError::NoSuchChannel(1));
        assert_ne!(DmaError::NoSuchChannel(1), DmaError::NoSuchChannel(2));
    }
}
