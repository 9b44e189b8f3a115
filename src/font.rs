//! Font descriptors.
//!
//! Glyph tables are supplied by the application. Each glyph is `height`
//! rows of one `u16` scanline, MSB first: bit 15 is the leftmost column.
//! Glyphs cover printable ASCII, `' '` (32) to `'~'` (126).

/// First printable character with a glyph.
pub const FIRST_CHAR: char = ' ';

/// Last printable character with a glyph.
pub const LAST_CHAR: char = '~';

/// Number of glyphs in a table.
pub const GLYPH_COUNT: usize = 95;

/// Borrowed glyph table plus its metrics.
#[derive(Debug, Clone, Copy)]
pub struct Font<'a> {
    /// Glyph cell width in pixels (monospaced advance).
    pub width: u8,
    /// Glyph cell height in pixels.
    pub height: u8,
    /// `GLYPH_COUNT * height` scanlines.
    pub data: &'a [u16],
    /// Per-glyph advance for proportional fonts, `None` for monospaced.
    pub char_width: Option<&'a [u8]>,
}

impl<'a> Font<'a> {
    /// Monospaced font.
    pub const fn new(width: u8, height: u8, data: &'a [u16]) -> Self {
        Self {
            width,
            height,
            data,
            char_width: None,
        }
    }

    /// Proportional font with one advance entry per glyph.
    pub const fn proportional(width: u8, height: u8, data: &'a [u16], char_width: &'a [u8]) -> Self {
        Self {
            width,
            height,
            data,
            char_width: Some(char_width),
        }
    }

    /// Table index of `ch`, or `None` outside printable ASCII.
    pub fn glyph_index(ch: char) -> Option<usize> {
        if (FIRST_CHAR..=LAST_CHAR).contains(&ch) {
            Some(ch as usize - FIRST_CHAR as usize)
        } else {
            None
        }
    }

    /// Advance of `ch` in pixels, or `None` outside printable ASCII.
    ///
    /// A proportional table that is too short yields a zero advance.
    pub fn glyph_width(&self, ch: char) -> Option<u8> {
        let index = Self::glyph_index(ch)?;
        Some(match self.char_width {
            Some(widths) => widths.get(index).copied().unwrap_or(0),
            None => self.width,
        })
    }

    /// Scanline `row` of glyph `index`. Missing entries read as blank.
    pub fn scanline(&self, index: usize, row: u8) -> u16 {
        self.data
            .get(index * usize::from(self.height) + usize::from(row))
            .copied()
            .unwrap_or(0)
    }

    /// `true` if the tables have exactly one entry per glyph (row).
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == GLYPH_COUNT * usize::from(self.height)
            && self.char_width.map_or(true, |widths| widths.len() == GLYPH_COUNT)
    }
}
