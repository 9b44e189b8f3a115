//! Framebuffer driver for SSD1306 monochrome OLED panels.
//!
//! This crate keeps a packed 1-bit-per-pixel copy of the panel in RAM,
//! rasterizes lines, arcs, circles, rectangles, bitmaps and proportional
//! text into it, and pushes the whole buffer to the panel in one transfer
//! through either of two transports:
//!
//! - [`I2cInterface`] — addressed block writes over I2C.
//! - [`SpiInterface`] — SPI with a data/command select line and a reset line.
//!
//! Drawing never touches the bus. Only [`Oled::init`], [`Oled::update`],
//! [`Oled::set_contrast`] and [`Oled::set_display_on`] generate traffic.
//!
//! # Quick Start
//!
//! ```ignore
//! use oled_framebuffer::{Color, I2cInterface, Oled, Panel128x64, CONTRAST_RESET};
//!
//! let mut oled: Oled<_, Panel128x64> = Oled::new(I2cInterface::new(i2c));
//! oled.init(CONTRAST_RESET)?;
//!
//! let fb = oled.framebuffer_mut();
//! fb.draw_rectangle(0, 0, 127, 63, Color::White);
//! fb.set_cursor(4, 4);
//! fb.write_str("Hello", &FONT_6X8, Color::White).ok();
//!
//! oled.update()?;
//! ```
//!
//! The [`Framebuffer`] also implements `embedded-graphics`'
//! [`DrawTarget`](embedded_graphics::draw_target::DrawTarget), so any
//! `embedded-graphics` primitive can be drawn into the same buffer.
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging via [`defmt`].

#![cfg_attr(not(test), no_std)]

pub mod color;
pub mod command;
pub mod driver;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod interface;
pub mod raster;
pub mod size;
pub mod text;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use color::Color;
pub use driver::{Oled, BRIGHTNESS_FULL, CONTRAST_RESET};
pub use error::OledError;
pub use font::Font;
pub use framebuffer::Framebuffer;
pub use interface::{I2cInterface, SpiInterface, Transport};
pub use raster::Vertex;
pub use size::{Panel128x32, Panel128x64, PanelSize};
