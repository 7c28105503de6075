//! Driver for the Maxim DS1307 I2C real-time clock.
//!
//! The DS1307 keeps time in seven BCD registers, drives a programmable
//! SQW/OUT pin, and has 56 bytes of battery-backed RAM. This crate provides
//! blocking and async drivers built on any `embedded-hal` /
//! `embedded-hal-async` I2C bus, or on any custom [`Transport`].
//!
//! # Architecture
//!
//! - **`bcd`** — packed BCD codec for the time registers.
//! - **`driver`** (crate-private) — register transfer layer: frames writes
//!   into send-buffer-sized chunks and issues pointer-then-receive reads.
//! - **[`Ds1307`]** / **[`Ds1307Async`]** (public) — validated clock, RAM,
//!   and output-wave operations.
//!
//! All date/time values cross the API in plain decimal; the caller's
//! [`DateTime`] is never modified.
//!
//! # Quick start
//!
//! ```no_run
//! use ds1307_driver::{DateTime, Ds1307, Oscillator};
//!
//! # fn example(mut i2c: impl embedded_hal::i2c::I2c) {
//! let mut rtc: Ds1307<_> = Ds1307::new(&mut i2c);
//!
//! let start = DateTime::new(23, 11, 23, 5, 10, 2, 0).unwrap();
//! rtc.set_datetime(&start, Oscillator::Running).unwrap();
//! rtc.write_ram(0, b"boot").unwrap();
//!
//! let now = rtc.datetime().unwrap();
//! # }
//! ```
//!
//! # Send-buffer size
//!
//! Both drivers take a const generic `N`, the largest frame the transport
//! is asked to send (default [`DEFAULT_SEND_BUFFER_SIZE`]). One byte of every
//! frame is the register address, so writes longer than `N - 1` bytes are
//! split. `N` below 2 fails to compile.
//!
//! # Features
//!
//! - **`defmt`** — [`defmt::Format`] implementations on public types and
//!   trace/warn logging of transfers and rejected requests.

#![no_std]

#[cfg(test)]
extern crate std;

pub use asynch::Ds1307Async;
pub use datetime::{DateTime, Oscillator};
pub use ds1307::Ds1307;
pub use error::{Ds1307Error, InvalidParameter};
pub use out_wave::OutWave;
pub use registers::{DEFAULT_SEND_BUFFER_SIZE, DEVICE_ADDRESS, RAM_SIZE};
pub use transport::{AsyncTransport, Transport};

pub mod bcd;

mod asynch;
mod datetime;
mod driver;
mod ds1307;
mod error;
mod out_wave;
mod registers;
mod transport;

#[cfg(test)]
mod mock;
