//! Calendar value type and its register image.
//!
//! [`DateTime`] is always in plain decimal at the API boundary. Conversion
//! to and from the chip's seven BCD registers happens on copies, never on
//! the caller's value.

use crate::bcd::{bcd_to_decimal, decimal_to_bcd, decode_seconds, encode_seconds};
use crate::error::InvalidParameter;
use crate::registers::{CLOCK_HALT, TIME_REGISTER_COUNT};

/// Raw contents of registers `0x00..=0x06`.
pub(crate) type TimeRegisters = [u8; TIME_REGISTER_COUNT];

/// Date and time as stored by the DS1307 (24-hour form, years 2000–2099).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// 0–59
    pub second: u8,
    /// 0–59
    pub minute: u8,
    /// 0–23
    pub hour: u8,
    /// 1–7. The chip only increments it; which day is 1 is up to the user.
    pub weekday: u8,
    /// 1–31
    pub day: u8,
    /// 1–12
    pub month: u8,
    /// 0–99, meaning 2000–2099
    pub year: u8,
}

impl DateTime {
    /// Build a validated value.
    ///
    /// # Errors
    /// Returns the first field found out of range.
    pub fn new(
        year: u8,
        month: u8,
        day: u8,
        weekday: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, InvalidParameter> {
        let datetime = Self {
            second,
            minute,
            hour,
            weekday,
            day,
            month,
            year,
        };
        datetime.validate()?;
        Ok(datetime)
    }

    /// Check every field against its range. Nothing is clamped.
    pub fn validate(&self) -> Result<(), InvalidParameter> {
        if self.second > 59 {
            return Err(InvalidParameter::Second);
        }
        if self.minute > 59 {
            return Err(InvalidParameter::Minute);
        }
        if self.hour > 23 {
            return Err(InvalidParameter::Hour);
        }
        if !(1..=7).contains(&self.weekday) {
            return Err(InvalidParameter::WeekDay);
        }
        if !(1..=31).contains(&self.day) {
            return Err(InvalidParameter::Day);
        }
        if !(1..=12).contains(&self.month) {
            return Err(InvalidParameter::Month);
        }
        if self.year > 99 {
            return Err(InvalidParameter::Year);
        }
        Ok(())
    }

    /// Four-digit year.
    pub fn full_year(&self) -> u16 {
        2000 + u16::from(self.year)
    }

    /// Encode into the seven time-keeping registers.
    ///
    /// The caller must have validated `self`; the clock-halt bit is taken
    /// from `oscillator`.
    pub(crate) fn to_registers(self, oscillator: Oscillator) -> TimeRegisters {
        [
            encode_seconds(self.second, oscillator == Oscillator::Halted),
            decimal_to_bcd(self.minute),
            decimal_to_bcd(self.hour),
            decimal_to_bcd(self.weekday),
            decimal_to_bcd(self.day),
            decimal_to_bcd(self.month),
            decimal_to_bcd(self.year),
        ]
    }

    /// Decode the seven time-keeping registers. The clock-halt bit is dropped.
    pub(crate) fn from_registers(registers: &TimeRegisters) -> Self {
        Self {
            second: decode_seconds(registers[0]),
            minute: bcd_to_decimal(registers[1]),
            hour: bcd_to_decimal(registers[2]),
            weekday: bcd_to_decimal(registers[3]),
            day: bcd_to_decimal(registers[4]),
            month: bcd_to_decimal(registers[5]),
            year: bcd_to_decimal(registers[6]),
        }
    }
}

/// State of the 32.768 kHz oscillator, held in bit 7 of the seconds register.
///
/// The chip powers up halted. Writing [`Oscillator::Running`] clears the
/// clock-halt flag and starts time-keeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oscillator {
    /// Clock-halt flag clear: the clock is counting.
    Running,
    /// Clock-halt flag set: the clock is stopped.
    Halted,
}

impl Oscillator {
    pub(crate) fn from_seconds_register(register: u8) -> Self {
        if register & CLOCK_HALT != 0 {
            Oscillator::Halted
        } else {
            Oscillator::Running
        }
    }

    /// Return `register` with only the clock-halt flag changed.
    pub(crate) fn apply_to_seconds_register(self, register: u8) -> u8 {
        match self {
            Oscillator::Running => register & !CLOCK_HALT,
            Oscillator::Halted => register | CLOCK_HALT,
        }
    }
}
