//! DS1307 register map and control-register bit layout.
//!
//! The chip exposes a single flat 8-bit address space:
//! - `0x00..=0x06`: time-keeping registers, one BCD byte per field
//! - `0x07`: control register for the SQW/OUT pin
//! - `0x08..=0x3F`: 56 bytes of battery-backed general-purpose RAM
//!
//! The internal register pointer auto-increments after every byte, so a
//! single framed write or read can cover any contiguous range.

// ---------------------------------------------------------------------------
// Bus
// ---------------------------------------------------------------------------

/// Fixed 7-bit I2C address of the DS1307.
pub const DEVICE_ADDRESS: u8 = 0x68;

// ---------------------------------------------------------------------------
// Time-keeping registers
// ---------------------------------------------------------------------------

/// Seconds register. Bit 7 is the clock-halt (CH) flag.
pub const SECONDS: u8 = 0x00;

/// Minutes register.
#[allow(dead_code)]
pub const MINUTES: u8 = 0x01;

/// Hours register (24-hour form).
#[allow(dead_code)]
pub const HOURS: u8 = 0x02;

/// Day-of-week register (1–7).
#[allow(dead_code)]
pub const WEEKDAY: u8 = 0x03;

/// Day-of-month register.
#[allow(dead_code)]
pub const DATE: u8 = 0x04;

/// Month register.
#[allow(dead_code)]
pub const MONTH: u8 = 0x05;

/// Two-digit year register.
#[allow(dead_code)]
pub const YEAR: u8 = 0x06;

/// Number of consecutive time-keeping registers starting at [`SECONDS`].
pub const TIME_REGISTER_COUNT: usize = 7;

/// Clock-halt flag in the seconds register. Set = oscillator stopped.
pub const CLOCK_HALT: u8 = 1 << 7;

// ---------------------------------------------------------------------------
// Control register
// ---------------------------------------------------------------------------

/// Control register for the SQW/OUT pin.
pub const CONTROL: u8 = 0x07;

/// OUT: static output level when the square wave is disabled.
pub const CONTROL_OUT: u8 = 1 << 7;

/// SQWE: square-wave enable.
pub const CONTROL_SQWE: u8 = 1 << 4;

/// RS1: rate select, high bit.
pub const CONTROL_RS1: u8 = 1 << 1;

/// RS0: rate select, low bit.
pub const CONTROL_RS0: u8 = 1 << 0;

/// Mask covering both rate-select bits.
pub const CONTROL_RS_MASK: u8 = CONTROL_RS1 | CONTROL_RS0;

// ---------------------------------------------------------------------------
// Non-volatile RAM
// ---------------------------------------------------------------------------

/// First register of the battery-backed RAM window.
pub const RAM_START: u8 = 0x08;

/// Size of the battery-backed RAM window in bytes.
pub const RAM_SIZE: usize = 56;

// ---------------------------------------------------------------------------
// Transfer configuration
// ---------------------------------------------------------------------------

/// Default send-buffer capacity: the register-address byte plus 8 data bytes.
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 9;

/// Smallest usable send buffer: one address byte and one data byte.
pub const MIN_SEND_BUFFER_SIZE: usize = 2;
