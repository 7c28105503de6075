//! Error types for the DS1307 driver.

use core::fmt;

/// Errors that can occur when talking to the DS1307.
///
/// Every operation either succeeds, rejects its input before touching the
/// bus, or reports the transport failure it ran into.
#[derive(Debug, PartialEq, Eq)]
pub enum Ds1307Error<E> {
    /// The transport's `send` or `receive` reported a failure.
    ///
    /// Nothing is retried or rolled back: a multi-chunk write that fails
    /// part-way leaves the earlier chunks applied on the chip.
    Transport(E),

    /// A caller-supplied value is outside its documented range. The bus was
    /// not touched.
    InvalidParameter(InvalidParameter),
}

/// Which input was rejected by [`Ds1307Error::InvalidParameter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidParameter {
    /// Seconds must be 0–59.
    Second,
    /// Minutes must be 0–59.
    Minute,
    /// Hours must be 0–23.
    Hour,
    /// Day of week must be 1–7.
    WeekDay,
    /// Day of month must be 1–31.
    Day,
    /// Month must be 1–12.
    Month,
    /// Two-digit year must be 0–99.
    Year,
    /// The requested RAM span is empty or runs past the 56-byte window.
    RamWindow,
}

// Allow ergonomic `?` propagation from raw transport errors.
impl<E> From<E> for Ds1307Error<E> {
    fn from(error: E) -> Self {
        Ds1307Error::Transport(error)
    }
}

impl fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match self {
            InvalidParameter::Second => "second out of range (0-59)",
            InvalidParameter::Minute => "minute out of range (0-59)",
            InvalidParameter::Hour => "hour out of range (0-23)",
            InvalidParameter::WeekDay => "weekday out of range (1-7)",
            InvalidParameter::Day => "day out of range (1-31)",
            InvalidParameter::Month => "month out of range (1-12)",
            InvalidParameter::Year => "year out of range (0-99)",
            InvalidParameter::RamWindow => "RAM span outside the 56-byte window",
        };
        f.write_str(message)
    }
}

impl<E: fmt::Debug> fmt::Display for Ds1307Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Ds1307Error::Transport(e) => write!(f, "Transport error: {:?}", e),
            Ds1307Error::InvalidParameter(p) => write!(f, "Invalid parameter: {}", p),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Ds1307Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Ds1307Error::Transport(e) => defmt::write!(f, "Transport error: {}", e),
            Ds1307Error::InvalidParameter(p) => defmt::write!(f, "Invalid parameter: {}", p),
        }
    }
}
