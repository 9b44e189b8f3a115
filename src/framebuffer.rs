//! In-memory pixel buffer.
//!
//! Pixels are packed column-major in pages of 8 rows, matching the SSD1306
//! horizontal addressing mode: pixel `(x, y)` lives in byte
//! `x + 1 + (y / 8) * WIDTH`, bit `y % 8`. Byte 0 is the
//! [`Tag::BulkData`] framing byte, so the whole buffer goes to the
//! transport in one call.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::color::Color;
use crate::command::Tag;
use crate::size::PanelSize;

/// Packed monochrome framebuffer plus text cursor.
pub struct Framebuffer<S: PanelSize> {
    buffer: S::Buffer,
    pub(crate) cursor_x: u16,
    pub(crate) cursor_y: u16,
}

impl<S: PanelSize> Default for Framebuffer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PanelSize> Framebuffer<S> {
    /// All-off buffer with the cursor at the origin.
    pub fn new() -> Self {
        let mut buffer = S::new_buffer();
        if let Some(tag) = buffer.as_mut().first_mut() {
            *tag = Tag::BulkData.byte();
        }
        Self {
            buffer,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    /// Panel width in pixels.
    pub const fn width(&self) -> u8 {
        S::WIDTH
    }

    /// Panel height in pixels.
    pub const fn height(&self) -> u8 {
        S::HEIGHT
    }

    /// Byte index and bit mask of `(x, y)`, or `None` off-panel.
    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= i32::from(S::WIDTH) || y >= i32::from(S::HEIGHT) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((x + 1 + (y / 8) * usize::from(S::WIDTH), 1u8 << (y % 8)))
    }

    /// Set or clear one pixel in signed coordinates; off-panel is ignored.
    pub(crate) fn plot(&mut self, x: i32, y: i32, color: Color) {
        let Some((index, mask)) = Self::locate(x, y) else {
            return;
        };
        if let Some(byte) = self.buffer.as_mut().get_mut(index) {
            match color {
                Color::White => *byte |= mask,
                Color::Black => *byte &= !mask,
            }
        }
    }

    /// Set or clear one pixel. Coordinates outside the panel are ignored.
    pub fn set_pixel(&mut self, x: u8, y: u8, color: Color) {
        self.plot(i32::from(x), i32::from(y), color);
    }

    /// Current state of one pixel, or `None` outside the panel.
    pub fn pixel(&self, x: u8, y: u8) -> Option<Color> {
        let (index, mask) = Self::locate(i32::from(x), i32::from(y))?;
        let byte = self.buffer.as_ref().get(index)?;
        Some(if byte & mask != 0 {
            Color::White
        } else {
            Color::Black
        })
    }

    /// Set every pixel to `color`. The framing byte is untouched.
    pub fn fill(&mut self, color: Color) {
        let value = match color {
            Color::Black => 0x00,
            Color::White => 0xFF,
        };
        if let Some(payload) = self.buffer.as_mut().get_mut(1..) {
            payload.fill(value);
        }
    }

    /// Framing byte followed by the pixel payload.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    /// Pixel payload only.
    pub fn payload(&self) -> &[u8] {
        self.buffer.as_ref().get(1..).unwrap_or(&[])
    }

    /// Move the text cursor. No bounds check; writes that would not fit are
    /// rejected by [`write_char`](Self::write_char).
    pub fn set_cursor(&mut self, x: u8, y: u8) {
        self.cursor_x = u16::from(x);
        self.cursor_y = u16::from(y);
    }

    /// Text cursor `(x, y)`.
    pub fn cursor(&self) -> (u16, u16) {
        (self.cursor_x, self.cursor_y)
    }
}

// ── embedded-graphics ────────────────────────────────────────────────────

impl<S: PanelSize> OriginDimensions for Framebuffer<S> {
    fn size(&self) -> Size {
        Size::new(u32::from(S::WIDTH), u32::from(S::HEIGHT))
    }
}

impl<S: PanelSize> DrawTarget for Framebuffer<S> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.plot(point.x, point.y, color.into());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::{Panel128x32, Panel128x64};

    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    type Fb = Framebuffer<Panel128x64>;

    #[test]
    fn new_buffer_is_tagged_and_blank() {
        let fb = Fb::new();
        assert_eq!(fb.as_bytes().len(), 1025);
        assert_eq!(fb.as_bytes()[0], 0x40);
        assert!(fb.payload().iter().all(|&b| b == 0));
        assert_eq!(fb.cursor(), (0, 0));
    }

    #[test]
    fn set_pixel_addresses_page_and_bit() {
        let mut fb = Fb::new();
        fb.set_pixel(5, 13, Color::White);
        // page 1, column 5, bit 5
        assert_eq!(fb.as_bytes()[5 + 1 + 128], 1 << 5);
        assert_eq!(fb.pixel(5, 13), Some(Color::White));

        fb.set_pixel(5, 13, Color::Black);
        assert_eq!(fb.as_bytes()[5 + 1 + 128], 0);
        assert_eq!(fb.pixel(5, 13), Some(Color::Black));
    }

    #[test]
    fn corners_map_to_first_and_last_payload_bytes() {
        let mut fb = Fb::new();
        fb.set_pixel(0, 0, Color::White);
        fb.set_pixel(127, 63, Color::White);
        assert_eq!(fb.as_bytes()[1], 0x01);
        assert_eq!(fb.as_bytes()[1024], 0x80);
    }

    #[test]
    fn out_of_range_pixels_are_ignored() {
        let mut fb = Fb::new();
        fb.set_pixel(128, 0, Color::White);
        fb.set_pixel(0, 64, Color::White);
        fb.set_pixel(255, 255, Color::White);
        fb.plot(-1, 3, Color::White);
        assert!(fb.payload().iter().all(|&b| b == 0));
        assert_eq!(fb.pixel(128, 0), None);
    }

    #[test]
    fn short_panel_clips_at_row_32() {
        let mut fb = Framebuffer::<Panel128x32>::new();
        fb.set_pixel(0, 32, Color::White);
        assert!(fb.payload().iter().all(|&b| b == 0));
        fb.set_pixel(0, 31, Color::White);
        assert_eq!(fb.as_bytes()[1 + 3 * 128], 0x80);
    }

    #[test]
    fn fill_keeps_framing_byte() {
        let mut fb = Fb::new();
        fb.fill(Color::Black);
        fb.fill(Color::White);
        assert_eq!(fb.as_bytes()[0], 0x40);
        assert!(fb.payload().iter().all(|&b| b == 0xFF));

        fb.fill(Color::Black);
        assert_eq!(fb.as_bytes()[0], 0x40);
        assert!(fb.payload().iter().all(|&b| b == 0x00));
    }

    #[test]
    fn set_cursor_is_unchecked() {
        let mut fb = Fb::new();
        fb.set_cursor(200, 100);
        assert_eq!(fb.cursor(), (200, 100));
    }

    #[test]
    fn embedded_graphics_primitives_draw_into_buffer() {
        let mut fb = Fb::new();
        Rectangle::new(Point::new(-2, -2), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.pixel(0, 0), Some(Color::White));
        assert_eq!(fb.pixel(1, 1), Some(Color::White));
        assert_eq!(fb.pixel(2, 2), Some(Color::Black));
        assert_eq!(fb.size(), Size::new(128, 64));
    }

    #[test]
    fn embedded_graphics_clear_fills() {
        let mut fb = Fb::new();
        fb.clear(BinaryColor::On).unwrap();
        assert!(fb.payload().iter().all(|&b| b == 0xFF));
        assert_eq!(fb.as_bytes()[0], 0x40);
    }
}
