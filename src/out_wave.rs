//! SQW/OUT pin modes and their control-register encoding.

use crate::registers::{CONTROL_OUT, CONTROL_RS0, CONTROL_RS1, CONTROL_RS_MASK, CONTROL_SQWE};

/// Signal driven on the SQW/OUT pin.
///
/// Each mode maps to exactly one control-register value; the bits are never
/// combined by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutWave {
    /// Static logic 0.
    Low,
    /// Static logic 1.
    High,
    /// 1 Hz square wave.
    OneHz,
    /// 4.096 kHz square wave.
    FourKHz,
    /// 8.192 kHz square wave.
    EightKHz,
    /// 32.768 kHz square wave.
    ThirtyTwoKHz,
}

impl OutWave {
    /// Every mode, in control-register order.
    pub const ALL: [OutWave; 6] = [
        OutWave::Low,
        OutWave::High,
        OutWave::OneHz,
        OutWave::FourKHz,
        OutWave::EightKHz,
        OutWave::ThirtyTwoKHz,
    ];

    /// Full control-register value selecting this mode.
    pub fn control_byte(self) -> u8 {
        match self {
            OutWave::Low => 0,
            OutWave::High => CONTROL_OUT,
            OutWave::OneHz => CONTROL_SQWE,
            OutWave::FourKHz => CONTROL_SQWE | CONTROL_RS0,
            OutWave::EightKHz => CONTROL_SQWE | CONTROL_RS1,
            OutWave::ThirtyTwoKHz => CONTROL_SQWE | CONTROL_RS1 | CONTROL_RS0,
        }
    }

    /// Mode the chip produces for a given control-register value.
    ///
    /// SQWE takes precedence over OUT, matching the pin's behaviour; bits
    /// outside OUT/SQWE/RS are ignored.
    pub fn from_control_byte(control: u8) -> Self {
        if control & CONTROL_SQWE != 0 {
            match control & CONTROL_RS_MASK {
                0 => OutWave::OneHz,
                CONTROL_RS0 => OutWave::FourKHz,
                CONTROL_RS1 => OutWave::EightKHz,
                _ => OutWave::ThirtyTwoKHz,
            }
        } else if control & CONTROL_OUT != 0 {
            OutWave::High
        } else {
            OutWave::Low
        }
    }

    /// Output frequency in hertz, or `None` for a static level.
    pub fn frequency_hz(self) -> Option<u32> {
        match self {
            OutWave::Low | OutWave::High => None,
            OutWave::OneHz => Some(1),
            OutWave::FourKHz => Some(4_096),
            OutWave::EightKHz => Some(8_192),
            OutWave::ThirtyTwoKHz => Some(32_768),
        }
    }
}
