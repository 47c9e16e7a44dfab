//! MCP47X6 voltage and code conversion
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.

use crate::config::Resolution;

/// A linear mapping between output voltage and DAC code.
///
/// # Note
/// The full-scale voltage is an assumption about the reference voltage applied to the device. It
/// is never communicated to the DAC.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Scale {
    full_scale: f32,
    max_code: u16,
}

impl Scale {
    /// Construct a new scale.
    ///
    /// # Args
    /// * `full_scale` - The voltage corresponding to the maximum code.
    /// * `resolution` - The resolution of the DAC.
    pub fn new(full_scale: f32, resolution: Resolution) -> Self {
        Scale {
            full_scale,
            max_code: resolution.max_code(),
        }
    }

    /// Check that a full-scale voltage can be used for conversions.
    pub fn is_valid_full_scale(full_scale: f32) -> bool {
        full_scale.is_finite() && full_scale > 0.0
    }

    /// Convert a voltage into a DAC code.
    ///
    /// # Note
    /// The result is rounded half-up. Voltages above full scale produce codes above the range of
    /// the DAC and must be clamped by the caller.
    ///
    /// # Returns
    /// The code, or None if the voltage is negative or not a number.
    pub fn code(&self, volts: f32) -> Option<u16> {
        if !(volts >= 0.0) {
            return None;
        }

        // Float to integer casts saturate, so very large voltages land on u16::MAX.
        Some((volts / self.full_scale * self.max_code as f32 + 0.5) as u16)
    }

    /// Convert a DAC code into the voltage it produces.
    pub fn voltage(&self, code: u16) -> f32 {
        code as f32 / self.max_code as f32 * self.full_scale
    }
}
