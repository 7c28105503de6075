//! Async interface for the DS1307, for Embassy and other async executors.
//!
//! Same operations and validation as the blocking [`Ds1307`](crate::Ds1307);
//! only the transport calls are awaited. Transfers are still strictly
//! sequential: each future issues one bus call at a time.

use crate::datetime::{DateTime, Oscillator, TimeRegisters};
use crate::driver::{read_registers_async, write_registers_async, SendBuffer};
use crate::ds1307::ram_register;
use crate::error::Ds1307Error;
use crate::out_wave::OutWave;
use crate::registers::{CONTROL, DEFAULT_SEND_BUFFER_SIZE, RAM_SIZE, SECONDS, TIME_REGISTER_COUNT};
use crate::transport::AsyncTransport;

/// Async driver for the DS1307.
///
/// See [`Ds1307`](crate::Ds1307) for the meaning of `N` and of each
/// operation's errors.
///
/// # Example
///
/// ```no_run
/// use ds1307_driver::{Ds1307Async, Oscillator};
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// // `i2c` is any `embedded-hal-async` I2C implementation
/// let mut rtc: Ds1307Async<_> = Ds1307Async::new(i2c);
///
/// if rtc.oscillator().await.unwrap() == Oscillator::Halted {
///     rtc.set_oscillator(Oscillator::Running).await.unwrap();
/// }
/// let now = rtc.datetime().await.unwrap();
/// # }
/// ```
pub struct Ds1307Async<T, const N: usize = DEFAULT_SEND_BUFFER_SIZE> {
    transport: T,
}

impl<T, const N: usize> Ds1307Async<T, N>
where
    T: AsyncTransport,
{
    /// Create a new driver. No bus traffic is generated.
    pub fn new(transport: T) -> Self {
        let () = SendBuffer::<N>::ASSERT_USABLE;
        Self { transport }
    }

    /// Give the transport back.
    pub fn release(self) -> T {
        self.transport
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Run the transport's one-time platform setup.
    pub async fn init(&mut self) -> Result<(), Ds1307Error<T::Error>> {
        self.transport.init().await?;
        Ok(())
    }

    /// Run the transport's platform teardown.
    pub async fn deinit(&mut self) -> Result<(), Ds1307Error<T::Error>> {
        self.transport.deinit().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Clock
    // -----------------------------------------------------------------------

    /// Write the date and time and the oscillator state in one transaction.
    pub async fn set_datetime(
        &mut self,
        datetime: &DateTime,
        oscillator: Oscillator,
    ) -> Result<(), Ds1307Error<T::Error>> {
        datetime.validate().map_err(|invalid| {
            #[cfg(feature = "defmt")]
            defmt::warn!("DS1307 date/time rejected: {}", invalid);

            Ds1307Error::InvalidParameter(invalid)
        })?;

        let registers = datetime.to_registers(oscillator);
        write_registers_async::<_, N>(&mut self.transport, SECONDS, &registers).await
    }

    /// Read the current date and time.
    pub async fn datetime(&mut self) -> Result<DateTime, Ds1307Error<T::Error>> {
        let mut registers: TimeRegisters = [0; TIME_REGISTER_COUNT];
        read_registers_async(&mut self.transport, SECONDS, &mut registers).await?;
        Ok(DateTime::from_registers(&registers))
    }

    /// Report whether the oscillator is running.
    pub async fn oscillator(&mut self) -> Result<Oscillator, Ds1307Error<T::Error>> {
        let mut seconds = [0u8; 1];
        read_registers_async(&mut self.transport, SECONDS, &mut seconds).await?;
        Ok(Oscillator::from_seconds_register(seconds[0]))
    }

    /// Start or stop the oscillator without disturbing the stored seconds.
    ///
    /// Same read-modify-write as [`Ds1307::set_oscillator`](crate::Ds1307::set_oscillator),
    /// with the same rollover window.
    pub async fn set_oscillator(
        &mut self,
        oscillator: Oscillator,
    ) -> Result<(), Ds1307Error<T::Error>> {
        let mut seconds = [0u8; 1];
        read_registers_async(&mut self.transport, SECONDS, &mut seconds).await?;

        let updated = oscillator.apply_to_seconds_register(seconds[0]);
        write_registers_async::<_, N>(&mut self.transport, SECONDS, &[updated]).await
    }

    // -----------------------------------------------------------------------
    // Non-volatile RAM
    // -----------------------------------------------------------------------

    /// Write `data` into battery-backed RAM starting at `offset` (0–55).
    pub async fn write_ram(
        &mut self,
        offset: u8,
        data: &[u8],
    ) -> Result<(), Ds1307Error<T::Error>> {
        let register = ram_register(offset, data.len()).map_err(Ds1307Error::InvalidParameter)?;
        write_registers_async::<_, N>(&mut self.transport, register, data).await
    }

    /// Fill `buffer` from battery-backed RAM starting at `offset` (0–55).
    ///
    /// `buffer` is only written once the whole read has succeeded.
    pub async fn read_ram(
        &mut self,
        offset: u8,
        buffer: &mut [u8],
    ) -> Result<(), Ds1307Error<T::Error>> {
        let register = ram_register(offset, buffer.len()).map_err(Ds1307Error::InvalidParameter)?;

        let mut scratch = [0u8; RAM_SIZE];
        let scratch = &mut scratch[..buffer.len()];
        read_registers_async(&mut self.transport, register, scratch).await?;

        buffer.copy_from_slice(scratch);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // SQW/OUT pin
    // -----------------------------------------------------------------------

    /// Select the signal on the SQW/OUT pin, overwriting the control register.
    pub async fn set_out_wave(&mut self, wave: OutWave) -> Result<(), Ds1307Error<T::Error>> {
        write_registers_async::<_, N>(&mut self.transport, CONTROL, &[wave.control_byte()]).await
    }

    /// Read back the signal currently selected on the SQW/OUT pin.
    pub async fn out_wave(&mut self) -> Result<OutWave, Ds1307Error<T::Error>> {
        let mut control = [0u8; 1];
        read_registers_async(&mut self.transport, CONTROL, &mut control).await?;
        Ok(OutWave::from_control_byte(control[0]))
    }
}
