//! Panel geometry.
//!
//! The panel size is a type parameter of [`Framebuffer`](crate::Framebuffer)
//! and [`Oled`](crate::Oled), so buffer length and the height-dependent init
//! constants are fixed at compile time.

/// Compile-time description of a supported panel.
pub trait PanelSize {
    /// Width in pixels.
    const WIDTH: u8;
    /// Height in pixels. Always a multiple of 8.
    const HEIGHT: u8;
    /// Pixel payload size in bytes (`WIDTH * HEIGHT / 8`).
    const BUFFER_SIZE: usize = Self::WIDTH as usize * Self::HEIGHT as usize / 8;
    /// Argument of the multiplex ratio command.
    const MUX_RATIO: u8;
    /// Argument of the COM pins hardware configuration command.
    const COM_PINS: u8;

    /// Backing storage: one framing byte followed by the pixel payload.
    type Buffer: AsRef<[u8]> + AsMut<[u8]>;

    /// Zeroed backing storage.
    fn new_buffer() -> Self::Buffer;
}

/// 128×64 panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Panel128x64;

impl PanelSize for Panel128x64 {
    const WIDTH: u8 = 128;
    const HEIGHT: u8 = 64;
    const MUX_RATIO: u8 = 0x3F;
    const COM_PINS: u8 = 0x12;

    type Buffer = [u8; 128 * 64 / 8 + 1];

    fn new_buffer() -> Self::Buffer {
        [0; 128 * 64 / 8 + 1]
    }
}

/// 128×32 panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Panel128x32;

impl PanelSize for Panel128x32 {
    const WIDTH: u8 = 128;
    const HEIGHT: u8 = 32;
    const MUX_RATIO: u8 = 0x1F;
    const COM_PINS: u8 = 0x02;

    type Buffer = [u8; 128 * 32 / 8 + 1];

    fn new_buffer() -> Self::Buffer {
        [0; 128 * 32 / 8 + 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_sizes_include_framing_byte() {
        assert_eq!(Panel128x64::BUFFER_SIZE, 1024);
        assert_eq!(Panel128x64::new_buffer().len(), 1025);
        assert_eq!(Panel128x32::BUFFER_SIZE, 512);
        assert_eq!(Panel128x32::new_buffer().len(), 513);
    }

    #[test]
    fn height_dependent_constants() {
        assert_eq!((Panel128x64::MUX_RATIO, Panel128x64::COM_PINS), (0x3F, 0x12));
        assert_eq!((Panel128x32::MUX_RATIO, Panel128x32::COM_PINS), (0x1F, 0x02));
    }
}
