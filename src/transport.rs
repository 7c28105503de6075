//! Bus capability consumed by the driver.
//!
//! The driver never owns bus framing: it only asks a [`Transport`] (or
//! [`AsyncTransport`]) to send a byte slice to, or fill a buffer from, a
//! 7-bit slave address. Any `embedded-hal` I2C bus already is one.

use embedded_hal::i2c::I2c;
use embedded_hal_async::i2c::I2c as AsyncI2c;

/// Blocking send/receive capability for one bus.
///
/// Each call must block until the bus transaction has completed or failed.
/// Timeouts, retries and arbitration are the implementation's business;
/// the driver only distinguishes success from failure.
pub trait Transport {
    /// Bus-specific failure, passed through unchanged.
    type Error;

    /// Write `data` to the slave at `address` in one transaction.
    fn send(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Fill `buffer` from the slave at `address` in one transaction.
    fn receive(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// One-time platform setup, run by [`Ds1307::init`](crate::Ds1307::init).
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Platform teardown, run by [`Ds1307::deinit`](crate::Ds1307::deinit).
    fn deinit(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Async counterpart of [`Transport`] for Embassy-style executors.
#[allow(async_fn_in_trait)]
pub trait AsyncTransport {
    /// Bus-specific failure, passed through unchanged.
    type Error;

    /// Write `data` to the slave at `address` in one transaction.
    async fn send(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Fill `buffer` from the slave at `address` in one transaction.
    async fn receive(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// One-time platform setup, run by [`Ds1307Async::init`](crate::Ds1307Async::init).
    async fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Platform teardown, run by [`Ds1307Async::deinit`](crate::Ds1307Async::deinit).
    async fn deinit(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

// Bus bring-up belongs to the HAL, so init/deinit keep their no-op defaults.
impl<I2C> Transport for I2C
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn send(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.write(address, data)
    }

    fn receive(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.read(address, buffer)
    }
}

impl<I2C> AsyncTransport for I2C
where
    I2C: AsyncI2c,
{
    type Error = I2C::Error;

    async fn send(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.write(address, data).await
    }

    async fn receive(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.read(address, buffer).await
    }
}
