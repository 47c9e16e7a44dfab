//! MCP47X6 configuration options
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.

use serde::{Deserialize, Serialize};

/// The DAC resolution, which selects between the parts of the family.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// MCP4706
    Bits8 = 8,
    /// MCP4716
    Bits10 = 10,
    /// MCP4726
    Bits12 = 12,
}

impl Resolution {
    /// The number of bits in a DAC code.
    pub fn bits(&self) -> u8 {
        *self as u8
    }

    /// The largest code the DAC accepts, i.e. `2^bits - 1`.
    pub fn max_code(&self) -> u16 {
        (1u16 << self.bits()) - 1
    }

    /// Saturate a code into the range of the DAC.
    pub fn clamp(&self, code: u16) -> u16 {
        code.min(self.max_code())
    }
}

/// The source of the DAC reference voltage.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reference {
    /// The reference is taken from VDD.
    Supply = 0b00,
    /// The VREF pin is used without the internal buffer.
    UnbufferedPin = 0b01,
    /// The VREF pin is used through the internal buffer.
    BufferedPin = 0b10,
}

impl Reference {
    pub(crate) fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b00 => Some(Reference::Supply),
            0b01 => Some(Reference::UnbufferedPin),
            0b10 => Some(Reference::BufferedPin),
            _ => None,
        }
    }
}

/// The output buffer gain.
///
/// # Note
/// The gain only takes effect when the reference is taken from the VREF pin.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gain {
    X1 = 0,
    X2 = 1,
}

impl Gain {
    pub(crate) fn from_bit(bit: bool) -> Self {
        if bit {
            Gain::X2
        } else {
            Gain::X1
        }
    }
}

/// The output state of the DAC. In the power-down states, the output is pulled to ground through
/// the given resistance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerDown {
    Normal = 0b00,
    Pulldown1k = 0b01,
    Pulldown100k = 0b10,
    Pulldown500k = 0b11,
}

impl PowerDown {
    pub(crate) fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => PowerDown::Normal,
            0b01 => PowerDown::Pulldown1k,
            0b10 => PowerDown::Pulldown100k,
            _ => PowerDown::Pulldown500k,
        }
    }
}

/// Where a write should be stored on the device.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Target {
    /// Takes effect immediately, but is lost on power loss.
    Volatile,

    /// Takes effect immediately and also becomes the power-on default.
    ///
    /// # Note
    /// The device is busy until the EEPROM write completes. See `Mcp47x6::is_busy()`.
    Eeprom,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_code_per_resolution() {
        assert_eq!(Resolution::Bits8.max_code(), 0xFF);
        assert_eq!(Resolution::Bits10.max_code(), 0x3FF);
        assert_eq!(Resolution::Bits12.max_code(), 0xFFF);
    }

    #[test]
    fn clamp_saturates() {
        for resolution in [Resolution::Bits8, Resolution::Bits10, Resolution::Bits12] {
            let max = resolution.max_code();
            assert_eq!(resolution.clamp(0), 0);
            assert_eq!(resolution.clamp(max - 1), max - 1);
            assert_eq!(resolution.clamp(max), max);
            assert_eq!(resolution.clamp(max + 1), max);
            assert_eq!(resolution.clamp(u16::MAX), max);
        }
    }

    #[test]
    fn unused_reference_encoding() {
        assert_eq!(Reference::from_bits(0b10), Some(Reference::BufferedPin));
        assert_eq!(Reference::from_bits(0b11), None);
    }
}
