//! Error types for the OLED framebuffer driver.

use core::fmt;

use display_interface::DisplayError;

/// Errors that can occur during OLED display operations.
///
/// Only bus traffic can fail. Drawing into the framebuffer is clipped
/// per pixel and never returns an error.
#[derive(Debug)]
pub enum OledError {
    /// Transport failure (bus write, data/command line or reset line).
    Transport(DisplayError),
}

impl From<DisplayError> for OledError {
    fn from(e: DisplayError) -> Self {
        OledError::Transport(e)
    }
}

/// Short description of a transport failure.
fn describe(e: &DisplayError) -> &'static str {
    match e {
        DisplayError::BusWriteError => "bus write failed",
        DisplayError::DCError => "data/command line failed",
        DisplayError::RSError => "reset line failed",
        DisplayError::CSError => "chip select failed",
        DisplayError::OutOfBoundsError => "command sequence too long",
        _ => "display interface error",
    }
}

impl fmt::Display for OledError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OledError::Transport(e) => write!(f, "Transport error: {}", describe(e)),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OledError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::Transport(e) => defmt::write!(f, "Transport error: {}", describe(e)),
        }
    }
}
