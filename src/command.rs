//! Framing tags, SSD1306 opcodes and command sequence building.
//!
//! Every transmission starts with a framing [`Tag`]. A pixel flush is a
//! single [`Tag::BulkData`] byte followed by the whole payload; everything
//! else is a run of `[tag, byte]` pairs built with [`CommandBuffer`].

use display_interface::DisplayError;
use heapless::Vec;

use crate::size::PanelSize;

/// Framing tag preceding bytes sent to the panel.
///
/// The values are SSD1306 control bytes, so the I2C transport can forward
/// them to the panel unchanged.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tag {
    /// All remaining bytes of the transmission are pixel data.
    BulkData = 0x40,
    /// The next single byte is data.
    Data = 0xC0,
    /// The next single byte is a command.
    Command = 0x80,
}

impl Tag {
    /// Raw control byte.
    pub const fn byte(self) -> u8 {
        self as u8
    }
}

/// SSD1306 command opcodes.
pub mod cmd {
    pub const MEMORY_ADDRESSING_MODE: u8 = 0x20;
    pub const MUX_RATIO: u8 = 0xA8;
    pub const DISPLAY_OFFSET: u8 = 0xD3;
    pub const START_LINE: u8 = 0x40;
    pub const SEGMENT_REMAP: u8 = 0xA1;
    pub const COM_SCAN_DEC: u8 = 0xC8;
    pub const COM_PINS: u8 = 0xDA;
    pub const CONTRAST: u8 = 0x81;
    pub const RESUME_FROM_RAM: u8 = 0xA4;
    pub const NORMAL_DISPLAY: u8 = 0xA6;
    pub const CLOCK_DIV: u8 = 0xD5;
    pub const CHARGE_PUMP: u8 = 0x8D;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
}

/// Maximum encoded length (tags included) of one command sequence.
pub const COMMAND_CAPACITY: usize = 64;

/// Fixed-capacity run of `[Tag::Command, byte]` pairs.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    bytes: Vec<u8, COMMAND_CAPACITY>,
}

impl CommandBuffer {
    /// Empty sequence.
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append one command byte.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::OutOfBoundsError`] if the pair does not fit;
    /// the buffer is left unchanged in that case.
    pub fn push(&mut self, command: u8) -> Result<(), DisplayError> {
        self.bytes
            .extend_from_slice(&[Tag::Command.byte(), command])
            .map_err(|()| DisplayError::OutOfBoundsError)
    }

    /// Append several command bytes in order.
    pub fn extend(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        for &command in commands {
            self.push(command)?;
        }
        Ok(())
    }

    /// Encoded bytes, ready for [`Transport::transmit`](crate::Transport::transmit).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of command bytes (not counting tags).
    pub fn len(&self) -> usize {
        self.bytes.len() / 2
    }

    /// `true` if no command has been pushed.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Panel configuration sequence sent by [`Oled::init`](crate::Oled::init).
pub fn init_sequence<S: PanelSize>(brightness: u8) -> Result<CommandBuffer, DisplayError> {
    let mut sequence = CommandBuffer::new();
    sequence.extend(&[
        cmd::MEMORY_ADDRESSING_MODE,
        0x00, // horizontal
        cmd::MUX_RATIO,
        S::MUX_RATIO,
        cmd::DISPLAY_OFFSET,
        0x00,
        cmd::START_LINE,
        cmd::SEGMENT_REMAP,
        cmd::COM_SCAN_DEC,
        cmd::COM_PINS,
        S::COM_PINS,
        cmd::CONTRAST,
        brightness,
        cmd::RESUME_FROM_RAM,
        cmd::NORMAL_DISPLAY,
        cmd::CLOCK_DIV,
        0x80,
        cmd::CHARGE_PUMP,
        0x14, // enable
        cmd::DISPLAY_ON,
    ])?;
    Ok(sequence)
}

/// Contrast control sequence.
pub fn contrast(value: u8) -> Result<CommandBuffer, DisplayError> {
    let mut sequence = CommandBuffer::new();
    sequence.extend(&[cmd::CONTRAST, value])?;
    Ok(sequence)
}

/// Display on/off sequence.
pub fn power(on: bool) -> Result<CommandBuffer, DisplayError> {
    let mut sequence = CommandBuffer::new();
    sequence.push(if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF })?;
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::{Panel128x32, Panel128x64};

    #[test]
    fn push_interleaves_command_tags() {
        let mut sequence = CommandBuffer::new();
        sequence.push(0xAE).unwrap();
        sequence.push(0x12).unwrap();
        assert_eq!(sequence.as_bytes(), &[0x80, 0xAE, 0x80, 0x12]);
        assert_eq!(sequence.len(), 2);
    }

    #[test]
    fn push_past_capacity_is_rejected_without_partial_write() {
        let mut sequence = CommandBuffer::new();
        for _ in 0..COMMAND_CAPACITY / 2 {
            sequence.push(0x00).unwrap();
        }
        assert!(matches!(
            sequence.push(0xFF),
            Err(DisplayError::OutOfBoundsError)
        ));
        assert_eq!(sequence.as_bytes().len(), COMMAND_CAPACITY);
    }

    #[test]
    fn init_sequence_for_128x64() {
        let sequence = init_sequence::<Panel128x64>(0x7F).unwrap();
        let commands: std::vec::Vec<u8> =
            sequence.as_bytes().chunks(2).map(|pair| pair[1]).collect();
        assert!(sequence.as_bytes().chunks(2).all(|pair| pair[0] == 0x80));
        assert_eq!(
            commands,
            [
                0x20, 0x00, 0xA8, 0x3F, 0xD3, 0x00, 0x40, 0xA1, 0xC8, 0xDA, 0x12, 0x81, 0x7F,
                0xA4, 0xA6, 0xD5, 0x80, 0x8D, 0x14, 0xAF,
            ]
        );
    }

    #[test]
    fn init_sequence_for_128x32_uses_short_panel_constants() {
        let sequence = init_sequence::<Panel128x32>(0xFF).unwrap();
        let bytes = sequence.as_bytes();
        // mux ratio argument, COM pins argument, contrast argument
        assert_eq!(bytes[7], 0x1F);
        assert_eq!(bytes[21], 0x02);
        assert_eq!(bytes[25], 0xFF);
    }

    #[test]
    fn contrast_and_power_sequences() {
        assert_eq!(contrast(0x42).unwrap().as_bytes(), &[0x80, 0x81, 0x80, 0x42]);
        assert_eq!(power(true).unwrap().as_bytes(), &[0x80, 0xAF]);
        assert_eq!(power(false).unwrap().as_bytes(), &[0x80, 0xAE]);
    }
}
