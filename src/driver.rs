//! Panel driver: framebuffer plus transport.
//!
//! [`Oled`] owns a [`Transport`] and a [`Framebuffer`] and manages the panel
//! lifecycle: construction without bus traffic, explicit initialisation,
//! whole-buffer flush and out-of-band contrast/power commands.

use crate::color::Color;
use crate::command;
use crate::error::OledError;
use crate::framebuffer::Framebuffer;
use crate::interface::Transport;
use crate::size::PanelSize;

/// Contrast for full brightness.
pub const BRIGHTNESS_FULL: u8 = 0xFF;

/// SSD1306 power-on reset contrast.
pub const CONTRAST_RESET: u8 = 0x7F;

/// Blocking driver for an SSD1306 panel.
///
/// # Lifecycle
///
/// 1. [`Oled::new()`] — wraps the transport without any bus traffic.
/// 2. [`Oled::init()`] — resets and configures the panel, clears it.
/// 3. Draw into the buffer via [`Oled::framebuffer_mut()`].
/// 4. [`Oled::update()`] — transfers the buffer to the panel.
///
/// # Example
///
/// ```no_run
/// use oled_framebuffer::{Color, I2cInterface, Oled, Panel128x64, CONTRAST_RESET};
///
/// # fn example(i2c: impl embedded_hal::i2c::I2c) -> Result<(), oled_framebuffer::OledError> {
/// let mut oled: Oled<_, Panel128x64> = Oled::new(I2cInterface::new(i2c));
/// oled.init(CONTRAST_RESET)?;
/// oled.framebuffer_mut().draw_circle(64, 32, 20, Color::White);
/// oled.update()?;
/// # Ok(())
/// # }
/// ```
pub struct Oled<DI, S: PanelSize> {
    interface: DI,
    framebuffer: Framebuffer<S>,
    /// Set only after every step of `init()` succeeded.
    initialized: bool,
    /// Mirrors the last power command that was sent successfully.
    display_on: bool,
}

impl<DI, S> Oled<DI, S>
where
    DI: Transport,
    S: PanelSize,
{
    /// Construct an uninitialised driver with a blank buffer.
    ///
    /// No bus traffic is generated. Call [`init()`](Self::init) before
    /// expecting anything on the panel.
    pub fn new(interface: DI) -> Self {
        Self {
            interface,
            framebuffer: Framebuffer::new(),
            initialized: false,
            display_on: false,
        }
    }

    /// Bring the panel up.
    ///
    /// Resets the panel (SPI only), switches it off, sends the configuration
    /// sequence with contrast `brightness`, switches it on, then clears the
    /// buffer, flushes it and homes the cursor.
    ///
    /// # Errors
    ///
    /// Returns the first transport failure. Steps already taken are not
    /// rolled back and the driver stays uninitialised.
    pub fn init(&mut self, brightness: u8) -> Result<(), OledError> {
        if let Err(e) = self.bring_up(brightness) {
            #[cfg(feature = "defmt")]
            defmt::error!("OLED init failed: {}", e);
            return Err(e);
        }

        self.initialized = true;
        #[cfg(feature = "defmt")]
        defmt::info!("OLED initialised ({}x{})", S::WIDTH, S::HEIGHT);
        Ok(())
    }

    fn bring_up(&mut self, brightness: u8) -> Result<(), OledError> {
        self.interface.reset()?;
        self.set_display_on(false)?;

        let sequence = command::init_sequence::<S>(brightness)?;
        self.interface.transmit(sequence.as_bytes())?;

        self.set_display_on(true)?;
        self.framebuffer.fill(Color::Black);
        self.update()?;
        self.framebuffer.set_cursor(0, 0);
        Ok(())
    }

    /// Transfer the whole buffer to the panel in one transmission.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::Transport`] on a bus failure. The buffer is
    /// unchanged, so the flush can simply be retried.
    pub fn update(&mut self) -> Result<(), OledError> {
        if let Err(e) = self.interface.transmit(self.framebuffer.as_bytes()) {
            #[cfg(feature = "defmt")]
            defmt::warn!("OLED flush failed");
            return Err(e.into());
        }
        Ok(())
    }

    /// Set panel contrast (0 = dimmest, 255 = brightest).
    pub fn set_contrast(&mut self, value: u8) -> Result<(), OledError> {
        let sequence = command::contrast(value)?;
        self.interface.transmit(sequence.as_bytes())?;
        #[cfg(feature = "defmt")]
        defmt::debug!("OLED contrast {=u8}", value);
        Ok(())
    }

    /// Switch the panel on or off. The buffer and panel RAM are kept.
    ///
    /// The cached state changes only if the command was sent.
    pub fn set_display_on(&mut self, on: bool) -> Result<(), OledError> {
        let sequence = command::power(on)?;
        self.interface.transmit(sequence.as_bytes())?;
        self.display_on = on;
        #[cfg(feature = "defmt")]
        defmt::debug!("OLED display on: {=bool}", on);
        Ok(())
    }

    /// Last power state sent to the panel. No bus traffic.
    pub fn display_on(&self) -> bool {
        self.display_on
    }

    /// Check whether [`init()`](Self::init) has completed successfully.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The drawing surface.
    pub fn framebuffer(&self) -> &Framebuffer<S> {
        &self.framebuffer
    }

    /// The drawing surface, for rasterizing. Changes reach the panel on the
    /// next [`update()`](Self::update).
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer<S> {
        &mut self.framebuffer
    }

    /// Give back the transport.
    pub fn release(self) -> DI {
        self.interface
    }
}
