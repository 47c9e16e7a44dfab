//! MCP47X6 persistent settings
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
//!
//! # Design
//! The device EEPROM only holds the power-on configuration and code. The full-scale voltage used
//! for conversions lives on the host, so the complete driver configuration is captured in
//! [Settings] and can be stored by the application (e.g. in a board EEPROM or flash).
//!
//! Settings are stored as a fixed-size record:
//!
//! | Bytes  | Content                                  |
//! |--------|------------------------------------------|
//! | 0..4   | CRC32 (big endian) over bytes 4..32      |
//! | 4..32  | postcard-encoded version and settings    |
use serde::{Deserialize, Serialize};

use crate::config::{Gain, PowerDown, Reference};
use crate::conversion::Scale;

/// The size of a serialized settings record.
pub const RECORD_LEN: usize = 32;

/// The expected semver of the settings record. This version must be updated whenever the
/// `Settings` layout is updated.
const EXPECTED_VERSION: SemVersion = SemVersion {
    major: 1,
    minor: 0,
    patch: 0,
};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct SemVersion {
    major: u8,
    minor: u8,
    patch: u8,
}

/// Represents possible errors when storing or loading settings.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Error {
    /// The record is corrupt or was written by an incompatible version.
    Invalid,
    /// The record does not have the expected size.
    Bounds,
    /// The full-scale voltage is unusable.
    Range,
}

/// Represents the complete configuration of a DAC.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Settings {
    pub reference: Reference,
    pub gain: Gain,
    pub power_down: PowerDown,

    /// The assumed reference voltage in volts.
    pub full_scale: f32,
}

impl Default for Settings {
    /// The power-on configuration of an unprogrammed device, assuming a 5V supply.
    fn default() -> Self {
        Self {
            reference: Reference::Supply,
            gain: Gain::X1,
            power_down: PowerDown::Normal,
            full_scale: 5.0,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Record {
    version: SemVersion,
    settings: Settings,
}

impl Settings {
    /// Check that the settings are usable.
    pub fn validate(&self) -> Result<(), Error> {
        if !Scale::is_valid_full_scale(self.full_scale) {
            return Err(Error::Range);
        }

        Ok(())
    }

    /// Serialize the settings into a storage record.
    ///
    /// # Args
    /// * `buf` - The buffer to serialize into.
    ///
    /// # Returns
    /// The serialized record.
    pub fn serialize_into<'a>(&self, buf: &'a mut [u8; RECORD_LEN]) -> Result<&'a [u8], Error> {
        self.validate()?;

        *buf = [0; RECORD_LEN];
        let record = Record {
            version: EXPECTED_VERSION,
            settings: *self,
        };
        postcard::to_slice(&record, &mut buf[4..]).map_err(|_| Error::Bounds)?;

        let crc = calculate_crc32(&buf[4..]);
        buf[..4].copy_from_slice(&crc.to_be_bytes());

        Ok(&buf[..])
    }

    /// Attempt to deserialize settings from a storage record.
    ///
    /// # Returns
    /// The settings if the record was intact and valid. Otherwise, an error.
    pub fn try_deserialize(data: &[u8]) -> Result<Self, Error> {
        if data.len() != RECORD_LEN {
            return Err(Error::Bounds);
        }

        let (crc, payload) = data.split_at(4);
        if crc != calculate_crc32(payload).to_be_bytes() {
            log::warn!("Settings record CRC mismatch");
            return Err(Error::Invalid);
        }

        let record: Record = postcard::from_bytes(payload).map_err(|_| Error::Invalid)?;
        if record.version != EXPECTED_VERSION {
            log::warn!("Unsupported settings version: {:?}", record.version);
            return Err(Error::Invalid);
        }

        record.settings.validate()?;

        Ok(record.settings)
    }
}

fn calculate_crc32(data: &[u8]) -> u32 {
    let mut crc32 = crc_any::CRC::crc32();
    crc32.digest(data);

    crc32.get_crc() as u32
}
