//! Transport adapters.
//!
//! A driver talks to its panel through exactly one of two transports:
//!
//! - [`I2cInterface`] forwards each transmission as one addressed block
//!   write. The framing tags are SSD1306 control bytes, so the panel parses
//!   them itself.
//! - [`SpiInterface`] strips the tags and expresses them on the DC line:
//!   high for data, low for commands.
//!
//! [`Transport`] is sealed; these two types are the only implementors.

use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

use crate::command::Tag;

mod sealed {
    pub trait Sealed {}
}

/// Default 7-bit I2C address of SSD1306 modules.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// Reset line low/high settle time.
pub const RESET_PULSE_MS: u32 = 10;

/// Wait after reset before the panel accepts commands.
pub const BOOT_WAIT_MS: u32 = 100;

/// Byte transport to the panel.
pub trait Transport: sealed::Sealed {
    /// Send one framed transmission.
    ///
    /// If the first byte is [`Tag::BulkData`], the rest of `bytes` is one
    /// contiguous pixel payload. Otherwise `bytes` is a run of
    /// `[tag, payload]` pairs.
    ///
    /// # Errors
    ///
    /// The first bus or line failure aborts the transmission.
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), DisplayError>;

    /// Hardware reset and boot wait, for transports that own a reset line.
    fn reset(&mut self) -> Result<(), DisplayError>;
}

// ── I2C ──────────────────────────────────────────────────────────────────

/// Addressed-bus transport.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    /// Transport at [`DEFAULT_I2C_ADDRESS`].
    pub fn new(i2c: I2C) -> Self {
        Self::new_custom_address(i2c, DEFAULT_I2C_ADDRESS)
    }

    /// Transport at a specific 7-bit address (typically `0x3C` or `0x3D`).
    pub fn new_custom_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Target address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the I2C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> sealed::Sealed for I2cInterface<I2C> {}

impl<I2C> Transport for I2cInterface<I2C>
where
    I2C: I2c,
{
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.i2c
            .write(self.address, bytes)
            .map_err(|_| DisplayError::BusWriteError)
    }

    fn reset(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

// ── SPI ──────────────────────────────────────────────────────────────────

/// Line-selected bus transport.
///
/// Chip select is handled by the [`SpiDevice`]. `DC` selects data (high)
/// or command (low); `RST` is the active-low panel reset.
pub struct SpiInterface<SPI, DC, RST, DELAY> {
    spi: SPI,
    dc: DC,
    rst: RST,
    delay: DELAY,
}

impl<SPI, DC, RST, DELAY> SpiInterface<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Construct the transport. No pin or bus activity happens here.
    pub fn new(spi: SPI, dc: DC, rst: RST, delay: DELAY) -> Self {
        Self { spi, dc, rst, delay }
    }

    /// Give back the peripherals.
    pub fn release(self) -> (SPI, DC, RST, DELAY) {
        (self.spi, self.dc, self.rst, self.delay)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.spi.write(bytes).map_err(|_| DisplayError::BusWriteError)
    }
}

impl<SPI, DC, RST, DELAY> sealed::Sealed for SpiInterface<SPI, DC, RST, DELAY> {}

impl<SPI, DC, RST, DELAY> Transport for SpiInterface<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        let Some((&first, payload)) = bytes.split_first() else {
            return Ok(());
        };

        if first == Tag::BulkData.byte() {
            self.dc.set_high().map_err(|_| DisplayError::DCError)?;
            return self.write(payload);
        }

        // chunks_exact leaves a trailing tag without payload in its remainder
        for pair in bytes.chunks_exact(2) {
            if let &[tag, byte] = pair {
                if tag == Tag::Data.byte() {
                    self.dc.set_high().map_err(|_| DisplayError::DCError)?;
                } else {
                    self.dc.set_low().map_err(|_| DisplayError::DCError)?;
                }
                self.write(&[byte])?;
            }
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_PULSE_MS);
        self.delay.delay_ms(BOOT_WAIT_MS);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use embedded_hal::spi::{ErrorKind as SpiErrorKind, ErrorType, Operation};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    /// `SpiDevice::write` is checked by the mock as start + write + end.
    fn spi_device_write(data: &[u8]) -> [SpiTransaction<u8>; 3] {
        [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(data.to_vec()),
            SpiTransaction::transaction_end(),
        ]
    }

    /// SPI device that accepts `ok_writes` writes and then fails.
    struct FailingSpi {
        ok_writes: usize,
        writes: usize,
    }

    impl ErrorType for FailingSpi {
        type Error = SpiErrorKind;
    }

    impl SpiDevice for FailingSpi {
        fn transaction(
            &mut self,
            _operations: &mut [Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            self.writes += 1;
            if self.writes > self.ok_writes {
                Err(SpiErrorKind::Other)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn i2c_sends_whole_sequence_as_one_write() {
        let expectations = [I2cTransaction::write(0x3C, vec![0x80, 0xAE, 0x80, 0x81])];
        let mut iface = I2cInterface::new(I2cMock::new(&expectations));

        iface.transmit(&[0x80, 0xAE, 0x80, 0x81]).unwrap();

        iface.release().done();
    }

    #[test]
    fn i2c_custom_address_and_bulk_payload() {
        let expectations = [I2cTransaction::write(0x3D, vec![0x40, 0xFF, 0x00, 0x18])];
        let mut iface = I2cInterface::new_custom_address(I2cMock::new(&expectations), 0x3D);
        assert_eq!(iface.address(), 0x3D);

        iface.transmit(&[0x40, 0xFF, 0x00, 0x18]).unwrap();
        iface.reset().unwrap();

        iface.release().done();
    }

    #[test]
    fn i2c_empty_transmission_is_skipped() {
        let mut iface = I2cInterface::new(I2cMock::new(&[]));
        iface.transmit(&[]).unwrap();
        iface.release().done();
    }

    #[test]
    fn spi_bulk_data_sets_dc_once_and_sends_one_block() {
        let spi = SpiMock::new(&spi_device_write(&[0x01, 0x02, 0x03]));
        let dc = PinMock::new(&[PinTransaction::set(PinState::High)]);
        let rst = PinMock::new(&[]);
        let mut iface = SpiInterface::new(spi, dc, rst, NoopDelay);

        iface.transmit(&[0x40, 0x01, 0x02, 0x03]).unwrap();

        let (mut spi, mut dc, mut rst, _) = iface.release();
        spi.done();
        dc.done();
        rst.done();
    }

    #[test]
    fn spi_pairs_toggle_dc_per_byte() {
        let mut expectations = Vec::new();
        expectations.extend(spi_device_write(&[0x81]));
        expectations.extend(spi_device_write(&[0x7F]));
        expectations.extend(spi_device_write(&[0x55]));
        let spi = SpiMock::new(&expectations);
        let dc = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let rst = PinMock::new(&[]);
        let mut iface = SpiInterface::new(spi, dc, rst, NoopDelay);

        iface
            .transmit(&[0x80, 0x81, 0x80, 0x7F, 0xC0, 0x55])
            .unwrap();

        let (mut spi, mut dc, mut rst, _) = iface.release();
        spi.done();
        dc.done();
        rst.done();
    }

    #[test]
    fn spi_trailing_tag_is_ignored() {
        let spi = SpiMock::new(&spi_device_write(&[0xAF]));
        let dc = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let rst = PinMock::new(&[]);
        let mut iface = SpiInterface::new(spi, dc, rst, NoopDelay);

        iface.transmit(&[0x80, 0xAF, 0x80]).unwrap();

        let (mut spi, mut dc, mut rst, _) = iface.release();
        spi.done();
        dc.done();
        rst.done();
    }

    #[test]
    fn spi_first_failure_aborts_remaining_pairs() {
        let spi = FailingSpi {
            ok_writes: 1,
            writes: 0,
        };
        let dc = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::Low),
        ]);
        let rst = PinMock::new(&[]);
        let mut iface = SpiInterface::new(spi, dc, rst, NoopDelay);

        let result = iface.transmit(&[0x80, 0xAE, 0x80, 0x81, 0x80, 0x7F]);
        assert!(matches!(result, Err(DisplayError::BusWriteError)));

        let (spi, mut dc, mut rst, _) = iface.release();
        assert_eq!(spi.writes, 2);
        dc.done();
        rst.done();
    }

    #[test]
    fn spi_reset_pulses_rst_low_then_high() {
        let spi = SpiMock::<u8>::new(&[]);
        let dc = PinMock::new(&[]);
        let rst = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let mut iface = SpiInterface::new(spi, dc, rst, NoopDelay);

        iface.reset().unwrap();

        let (mut spi, mut dc, mut rst, _) = iface.release();
        spi.done();
        dc.done();
        rst.done();
    }
}
