use pocket_error::define_hal_error;

define_hal_error! {
    /// Errors from converting raw indices into typed peripheral handles.
    ///
    /// The interrupt core itself never returns these; they only appear where
    /// an untrusted integer is checked on its way in.
    pub enum HalError(0x01) {
        /// Raw source id past the last interrupt source.
        UnknownSource(u8) = 0x01 => "No interrupt source with this id",
        /// Timer number past the last timer.
        NoSuchTimer(usize) = 0x02 => "Timer index out of range",
        /// Pixel coordinate outside the visible frame.
        PixelOutOfBounds = 0x03 => "Pixel outside the framebuffer",
        /// Sprite number past the end of OAM.
        NoSuchSprite(usize) = 0x04 => "Sprite index out of range",
        /// Palette bank past the sixteenth bank.
        NoSuchPaletteBank(usize) = 0x05 => "Palette bank out of range",
    }
}
