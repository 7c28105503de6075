//! Blocking interface for the DS1307 real-time clock.
//!
//! [`Ds1307`] wraps the register transfer layer with input validation,
//! BCD conversion, and the chip's fixed register map.

use crate::datetime::{DateTime, Oscillator, TimeRegisters};
use crate::driver::{read_registers, write_registers, SendBuffer};
use crate::error::{Ds1307Error, InvalidParameter};
use crate::out_wave::OutWave;
use crate::registers::{
    CONTROL, DEFAULT_SEND_BUFFER_SIZE, RAM_SIZE, RAM_START, SECONDS, TIME_REGISTER_COUNT,
};
use crate::transport::Transport;

/// Map a RAM offset and length onto the register range it covers.
///
/// Returns the first register, or an error if the span is empty or would
/// leave the 56-byte window.
pub(crate) fn ram_register(offset: u8, len: usize) -> Result<u8, InvalidParameter> {
    if len == 0 || usize::from(offset) + len > RAM_SIZE {
        #[cfg(feature = "defmt")]
        defmt::warn!("DS1307 RAM span rejected: offset {=u8}, {=usize} bytes", offset, len);

        return Err(InvalidParameter::RamWindow);
    }
    Ok(RAM_START + offset)
}

/// Blocking driver for the DS1307.
///
/// `N` is the send-buffer capacity in bytes: one byte carries the register
/// address and up to `N - 1` carry data, so longer writes are split into
/// several bus transactions. It must be at least 2; 9 (the default) lets a
/// full date/time go out in one transaction.
///
/// The driver holds no state besides the transport. Callers sharing one
/// chip between threads must serialise access themselves.
///
/// # Example
///
/// ```no_run
/// use ds1307_driver::{DateTime, Ds1307, Oscillator, OutWave};
///
/// # fn example(i2c: impl embedded_hal::i2c::I2c) {
/// // `i2c` is any `embedded-hal` I2C implementation
/// let mut rtc: Ds1307<_> = Ds1307::new(i2c);
/// rtc.init().unwrap();
///
/// let start = DateTime::new(23, 11, 23, 5, 10, 2, 0).unwrap();
/// rtc.set_datetime(&start, Oscillator::Running).unwrap();
/// rtc.set_out_wave(OutWave::OneHz).unwrap();
///
/// let now = rtc.datetime().unwrap();
/// # }
/// ```
pub struct Ds1307<T, const N: usize = DEFAULT_SEND_BUFFER_SIZE> {
    transport: T,
}

impl<T, const N: usize> Ds1307<T, N>
where
    T: Transport,
{
    /// Create a new driver. No bus traffic is generated.
    ///
    /// # Arguments
    /// * `transport` — bus capability (takes ownership for exclusive access)
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
    ///
    /// # Errors
    /// * [`Ds1307Error::Transport`] if the platform setup fails
    pub fn init(&mut self) -> Result<(), Ds1307Error<T::Error>> {
        self.transport.init()?;
        Ok(())
    }

    /// Run the transport's platform teardown.
    pub fn deinit(&mut self) -> Result<(), Ds1307Error<T::Error>> {
        self.transport.deinit()?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Clock
    // -----------------------------------------------------------------------

    /// Write the date and time and the oscillator state in one transaction.
    ///
    /// `oscillator` is written to the clock-halt flag alongside the seconds.
    /// Pass [`Oscillator::Running`] to start (or keep) the clock counting.
    ///
    /// # Errors
    /// * [`Ds1307Error::InvalidParameter`] naming the first out-of-range
    ///   field; nothing is sent
    /// * [`Ds1307Error::Transport`] on communication failure
    pub fn set_datetime(
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
        write_registers::<_, N>(&mut self.transport, SECONDS, &registers)
    }

    /// Read the current date and time.
    ///
    /// The clock-halt flag is not part of the result; see
    /// [`oscillator`](Self::oscillator).
    ///
    /// # Errors
    /// * [`Ds1307Error::Transport`] on communication failure. No partial
    ///   value is ever returned.
    pub fn datetime(&mut self) -> Result<DateTime, Ds1307Error<T::Error>> {
        let mut registers: TimeRegisters = [0; TIME_REGISTER_COUNT];
        read_registers(&mut self.transport, SECONDS, &mut registers)?;
        Ok(DateTime::from_registers(&registers))
    }

    /// Report whether the oscillator is running.
    ///
    /// A halted oscillator after power-up means the backup battery was
    /// missing or flat and the stored time is not trustworthy.
    pub fn oscillator(&mut self) -> Result<Oscillator, Ds1307Error<T::Error>> {
        let mut seconds = [0u8; 1];
        read_registers(&mut self.transport, SECONDS, &mut seconds)?;
        Ok(Oscillator::from_seconds_register(seconds[0]))
    }

    /// Start or stop the oscillator without disturbing the stored seconds.
    ///
    /// Reads the seconds register and writes it back with only the
    /// clock-halt flag changed.
    ///
    /// The read and the write are separate bus transactions. If the running
    /// clock ticks between them, the stale seconds value is written back:
    /// the clock loses up to one second, and a tick from 59 to 00 in that
    /// window also loses the minute carry (the minutes register has already
    /// advanced, so the time jumps back by up to a minute). Stop the clock
    /// right after reading the time, or rewrite the full time with
    /// [`set_datetime`](Self::set_datetime), when that matters.
    pub fn set_oscillator(&mut self, oscillator: Oscillator) -> Result<(), Ds1307Error<T::Error>> {
        let mut seconds = [0u8; 1];
        read_registers(&mut self.transport, SECONDS, &mut seconds)?;

        let updated = oscillator.apply_to_seconds_register(seconds[0]);
        write_registers::<_, N>(&mut self.transport, SECONDS, &[updated])
    }

    // -----------------------------------------------------------------------
    // Non-volatile RAM
    // -----------------------------------------------------------------------

    /// Write `data` into battery-backed RAM starting at `offset`.
    ///
    /// # Arguments
    /// * `offset` — zero-based RAM offset (0–55)
    /// * `data` — 1 to `56 - offset` bytes
    ///
    /// # Errors
    /// * [`Ds1307Error::InvalidParameter`] with
    ///   [`InvalidParameter::RamWindow`] if the span is empty or runs past
    ///   the end of RAM; nothing is sent
    /// * [`Ds1307Error::Transport`] on communication failure. Chunks sent
    ///   before the failure remain written.
    pub fn write_ram(&mut self, offset: u8, data: &[u8]) -> Result<(), Ds1307Error<T::Error>> {
        let register = ram_register(offset, data.len()).map_err(Ds1307Error::InvalidParameter)?;
        write_registers::<_, N>(&mut self.transport, register, data)
    }

    /// Fill `buffer` from battery-backed RAM starting at `offset`.
    ///
    /// `buffer` is only written once the whole read has succeeded.
    ///
    /// # Errors
    /// * [`Ds1307Error::InvalidParameter`] with
    ///   [`InvalidParameter::RamWindow`] if the span is empty or runs past
    ///   the end of RAM; nothing is sent
    /// * [`Ds1307Error::Transport`] on communication failure
    pub fn read_ram(&mut self, offset: u8, buffer: &mut [u8]) -> Result<(), Ds1307Error<T::Error>> {
        let register = ram_register(offset, buffer.len()).map_err(Ds1307Error::InvalidParameter)?;

        let mut scratch = [0u8; RAM_SIZE];
        let scratch = &mut scratch[..buffer.len()];
        read_registers(&mut self.transport, register, scratch)?;

        buffer.copy_from_slice(scratch);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // SQW/OUT pin
    // -----------------------------------------------------------------------

    /// Select the signal on the SQW/OUT pin.
    ///
    /// Overwrites the whole control register; the current chip state is not
    /// read.
    pub fn set_out_wave(&mut self, wave: OutWave) -> Result<(), Ds1307Error<T::Error>> {
        write_registers::<_, N>(&mut self.transport, CONTROL, &[wave.control_byte()])
    }

    /// Read back the signal currently selected on the SQW/OUT pin.
    pub fn out_wave(&mut self) -> Result<OutWave, Ds1307Error<T::Error>> {
        let mut control = [0u8; 1];
        read_registers(&mut self.transport, CONTROL, &mut control)?;
        Ok(OutWave::from_control_byte(control[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{BusError, Event, MockBus};
    use crate::registers::DEVICE_ADDRESS;
    use std::vec;
    use std::vec::Vec;

    fn sample() -> DateTime {
        DateTime {
            second: 0,
            minute: 2,
            hour: 10,
            weekday: 5,
            day: 23,
            month: 11,
            year: 23,
        }
    }

    fn rtc() -> Ds1307<MockBus> {
        Ds1307::new(MockBus::new())
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    #[test]
    fn new_generates_no_traffic() {
        let rtc = rtc();
        assert!(rtc.release().events.is_empty());
    }

    #[test]
    fn init_and_deinit_call_platform_hooks() {
        let mut rtc = rtc();
        rtc.init().unwrap();
        rtc.deinit().unwrap();
        assert_eq!(rtc.release().events, vec![Event::Init, Event::Deinit]);
    }

    #[test]
    fn init_failure_is_reported() {
        let mut bus = MockBus::new();
        bus.fail_init = true;
        let mut rtc: Ds1307<_> = Ds1307::new(bus);
        assert_eq!(rtc.init(), Err(Ds1307Error::Transport(BusError)));
    }

    // ── Clock ────────────────────────────────────────────────────────

    #[test]
    fn set_datetime_writes_seven_bcd_registers_in_one_frame() {
        let mut rtc = rtc();
        rtc.set_datetime(&sample(), Oscillator::Running).unwrap();

        assert_eq!(
            rtc.release().events,
            vec![Event::Send(
                DEVICE_ADDRESS,
                vec![0x00, 0x00, 0x02, 0x10, 0x05, 0x23, 0x11, 0x23]
            )]
        );
    }

    #[test]
    fn set_datetime_can_leave_oscillator_halted() {
        let mut rtc = rtc();
        let datetime = DateTime { second: 37, ..sample() };
        rtc.set_datetime(&datetime, Oscillator::Halted).unwrap();

        assert_eq!(rtc.release().sent()[0][1], 0xB7);
    }

    #[test]
    fn set_datetime_rejects_hour_24_without_bus_traffic() {
        let mut rtc = rtc();
        let datetime = DateTime { hour: 24, ..sample() };

        assert_eq!(
            rtc.set_datetime(&datetime, Oscillator::Running),
            Err(Ds1307Error::InvalidParameter(InvalidParameter::Hour))
        );
        assert!(rtc.release().events.is_empty());
    }

    #[test]
    fn set_datetime_with_small_buffer_splits_frames() {
        let mut rtc: Ds1307<MockBus, 4> = Ds1307::new(MockBus::new());
        rtc.set_datetime(&sample(), Oscillator::Running).unwrap();

        assert_eq!(
            rtc.release().sent(),
            vec![
                vec![0x00, 0x00, 0x02, 0x10],
                vec![0x03, 0x05, 0x23, 0x11],
                vec![0x06, 0x23],
            ]
        );
    }

    #[test]
    fn datetime_reads_seven_registers_from_seconds() {
        let mut bus = MockBus::new();
        bus.queue_read(&[0x45, 0x59, 0x23, 0x07, 0x31, 0x12, 0x99]);
        let mut rtc: Ds1307<_> = Ds1307::new(bus);

        let now = rtc.datetime().unwrap();

        assert_eq!(
            now,
            DateTime {
                second: 45,
                minute: 59,
                hour: 23,
                weekday: 7,
                day: 31,
                month: 12,
                year: 99,
            }
        );
        assert_eq!(
            rtc.release().events,
            vec![
                Event::Send(DEVICE_ADDRESS, vec![0x00]),
                Event::Receive(DEVICE_ADDRESS, 7),
            ]
        );
    }

    #[test]
    fn datetime_ignores_halt_flag() {
        let mut bus = MockBus::new();
        bus.queue_read(&[0x80, 0x02, 0x10, 0x05, 0x23, 0x11, 0x23]);
        let mut rtc: Ds1307<_> = Ds1307::new(bus);

        assert_eq!(rtc.datetime().unwrap().second, 0);
    }

    #[test]
    fn datetime_receive_failure_returns_no_value() {
        let mut bus = MockBus::new();
        bus.fail_receive = true;
        let mut rtc: Ds1307<_> = Ds1307::new(bus);

        assert_eq!(rtc.datetime(), Err(Ds1307Error::Transport(BusError)));
    }

    #[test]
    fn oscillator_reads_halt_flag() {
        let mut bus = MockBus::new();
        bus.queue_read(&[0x80]);
        bus.queue_read(&[0x12]);
        let mut rtc: Ds1307<_> = Ds1307::new(bus);

        assert_eq!(rtc.oscillator(), Ok(Oscillator::Halted));
        assert_eq!(rtc.oscillator(), Ok(Oscillator::Running));
    }

    #[test]
    fn set_oscillator_preserves_seconds() {
        let mut bus = MockBus::new();
        bus.queue_read(&[0xA4]);
        let mut rtc: Ds1307<_> = Ds1307::new(bus);

        rtc.set_oscillator(Oscillator::Running).unwrap();

        assert_eq!(
            rtc.release().events,
            vec![
                Event::Send(DEVICE_ADDRESS, vec![0x00]),
                Event::Receive(DEVICE_ADDRESS, 1),
                Event::Send(DEVICE_ADDRESS, vec![0x00, 0x24]),
            ]
        );
    }

    #[test]
    fn halting_writes_back_the_seconds_that_were_read() {
        let mut bus = MockBus::new();
        bus.queue_read(&[0x59]);
        let mut rtc: Ds1307<_> = Ds1307::new(bus);

        rtc.set_oscillator(Oscillator::Halted).unwrap();

        assert_eq!(rtc.release().sent(), vec![vec![0x00], vec![0x00, 0xD9]]);
    }

    #[test]
    fn set_oscillator_does_not_write_after_failed_read() {
        let mut bus = MockBus::new();
        bus.fail_receive = true;
        let mut rtc: Ds1307<_> = Ds1307::new(bus);

        assert!(rtc.set_oscillator(Oscillator::Halted).is_err());
        assert_eq!(rtc.release().sent().len(), 1);
    }

    // ── Non-volatile RAM ─────────────────────────────────────────────

    #[test]
    fn write_ram_rejects_span_past_window() {
        let mut rtc = rtc();
        let data = [0u8; 10];

        assert_eq!(
            rtc.write_ram(50, &data),
            Err(Ds1307Error::InvalidParameter(InvalidParameter::RamWindow))
        );
        assert!(rtc.release().events.is_empty());
    }

    #[test]
    fn write_ram_accepts_span_ending_at_last_register() {
        let mut rtc = rtc();
        rtc.write_ram(50, &[1, 2, 3, 4, 5, 6]).unwrap();

        // 0x08 + 50 = 0x3A; six bytes end at 0x3F.
        assert_eq!(rtc.release().sent(), vec![vec![0x3A, 1, 2, 3, 4, 5, 6]]);
    }

    #[test]
    fn write_ram_rejects_empty_and_out_of_range_offset() {
        let mut rtc = rtc();
        assert_eq!(
            rtc.write_ram(0, &[]),
            Err(Ds1307Error::InvalidParameter(InvalidParameter::RamWindow))
        );
        assert_eq!(
            rtc.write_ram(56, &[1]),
            Err(Ds1307Error::InvalidParameter(InvalidParameter::RamWindow))
        );
        assert!(rtc.release().events.is_empty());
    }

    #[test]
    fn full_ram_write_uses_seven_contiguous_frames() {
        let mut rtc = rtc();
        let data: Vec<u8> = (0..56).collect();
        rtc.write_ram(0, &data).unwrap();

        let sent = rtc.release().sent();
        assert_eq!(sent.len(), 7);
        for (i, frame) in sent.iter().enumerate() {
            assert_eq!(frame.len(), 9);
            assert_eq!(frame[0], 0x08 + 8 * i as u8);
            assert_eq!(&frame[1..], &data[8 * i..8 * i + 8]);
        }
    }

    #[test]
    fn write_ram_failure_mid_transfer_stops() {
        let mut bus = MockBus::new();
        bus.fail_send_at = Some(2);
        let mut rtc: Ds1307<_> = Ds1307::new(bus);

        assert_eq!(
            rtc.write_ram(0, &[0u8; 56]),
            Err(Ds1307Error::Transport(BusError))
        );
        assert_eq!(rtc.release().sent().len(), 3);
    }

    #[test]
    fn read_ram_reads_from_biased_address() {
        let mut bus = MockBus::new();
        bus.queue_read(&[9, 8, 7]);
        let mut rtc: Ds1307<_> = Ds1307::new(bus);

        let mut buffer = [0u8; 3];
        rtc.read_ram(4, &mut buffer).unwrap();

        assert_eq!(buffer, [9, 8, 7]);
        assert_eq!(
            rtc.release().events,
            vec![
                Event::Send(DEVICE_ADDRESS, vec![0x0C]),
                Event::Receive(DEVICE_ADDRESS, 3),
            ]
        );
    }

    #[test]
    fn read_ram_whole_window_is_one_receive() {
        let mut bus = MockBus::new();
        bus.queue_read(&[0x5A; 56]);
        let mut rtc: Ds1307<_> = Ds1307::new(bus);

        let mut buffer = [0u8; 56];
        rtc.read_ram(0, &mut buffer).unwrap();

        assert_eq!(buffer, [0x5A; 56]);
        assert_eq!(rtc.release().events.len(), 2);
    }

    #[test]
    fn read_ram_rejects_span_past_window() {
        let mut rtc = rtc();
        let mut buffer = [0u8; 2];
        assert_eq!(
            rtc.read_ram(55, &mut buffer),
            Err(Ds1307Error::InvalidParameter(InvalidParameter::RamWindow))
        );
        assert!(rtc.release().events.is_empty());
    }

    #[test]
    fn read_ram_failure_leaves_buffer_untouched() {
        let mut bus = MockBus::new();
        bus.fail_receive = true;
        let mut rtc: Ds1307<_> = Ds1307::new(bus);

        let mut buffer = [0x11u8; 4];
        assert!(rtc.read_ram(0, &mut buffer).is_err());
        assert_eq!(buffer, [0x11; 4]);
    }

    // ── SQW/OUT pin ──────────────────────────────────────────────────

    #[test]
    fn set_out_wave_one_hz_writes_control_register() {
        let mut rtc = rtc();
        rtc.set_out_wave(OutWave::OneHz).unwrap();

        assert_eq!(
            rtc.release().events,
            vec![Event::Send(DEVICE_ADDRESS, vec![0x07, 0x10])]
        );
    }

    #[test]
    fn set_out_wave_covers_every_mode() {
        let mut rtc = rtc();
        for wave in OutWave::ALL {
            rtc.set_out_wave(wave).unwrap();
        }

        assert_eq!(
            rtc.release().sent(),
            vec![
                vec![0x07, 0x00],
                vec![0x07, 0x80],
                vec![0x07, 0x10],
                vec![0x07, 0x11],
                vec![0x07, 0x12],
                vec![0x07, 0x13],
            ]
        );
    }

    #[test]
    fn out_wave_decodes_control_register() {
        let mut bus = MockBus::new();
        bus.queue_read(&[0x12]);
        let mut rtc: Ds1307<_> = Ds1307::new(bus);

        assert_eq!(rtc.out_wave(), Ok(OutWave::EightKHz));
    }

    #[test]
    fn set_out_wave_reports_transport_failure() {
        let mut bus = MockBus::new();
        bus.fail_send_at = Some(0);
        let mut rtc: Ds1307<_> = Ds1307::new(bus);

        assert_eq!(
            rtc.set_out_wave(OutWave::High),
            Err(Ds1307Error::Transport(BusError))
        );
    }
}
