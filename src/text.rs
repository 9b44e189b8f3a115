//! Text rendering at the framebuffer cursor.

use crate::color::Color;
use crate::font::Font;
use crate::framebuffer::Framebuffer;
use crate::size::PanelSize;

impl<S: PanelSize> Framebuffer<S> {
    /// Render `ch` at the cursor and advance the cursor by its width.
    ///
    /// Glyph cells are opaque: lit bits paint `color`, unlit bits paint the
    /// inverse. Returns the character written, or `None` if it has no glyph
    /// or the cell would not fit on the current line. A rejected character
    /// leaves both the buffer and the cursor untouched.
    pub fn write_char(&mut self, ch: char, font: &Font<'_>, color: Color) -> Option<char> {
        let index = Font::glyph_index(ch)?;
        let advance = font.glyph_width(ch)?;

        let (x0, y0) = (u32::from(self.cursor_x), u32::from(self.cursor_y));
        if x0 + u32::from(advance) > u32::from(S::WIDTH)
            || y0 + u32::from(font.height) > u32::from(S::HEIGHT)
        {
            return None;
        }

        for row in 0..font.height {
            let bits = font.scanline(index, row);
            for column in 0..advance {
                // columns past the 16-bit scanline are unlit
                let lit = column < 16 && bits & (0x8000 >> column) != 0;
                let paint = if lit { color } else { !color };
                self.plot(
                    (x0 + u32::from(column)) as i32,
                    (y0 + u32::from(row)) as i32,
                    paint,
                );
            }
        }

        self.cursor_x += u16::from(advance);
        Some(ch)
    }

    /// Write each character of `text` in turn.
    ///
    /// # Errors
    ///
    /// Stops at the first character [`write_char`](Self::write_char)
    /// rejects and returns it. Characters before it stay drawn.
    pub fn write_str(&mut self, text: &str, font: &Font<'_>, color: Color) -> Result<(), char> {
        for ch in text.chars() {
            self.write_char(ch, font, color).ok_or(ch)?;
        }
        Ok(())
    }
}
