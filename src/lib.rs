//! Driver for the MCP47X6 single-channel digital-to-analog converter.
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
//!
//! # Description
//! This driver supports the 8-bit MCP4706, the 10-bit MCP4716 and the 12-bit MCP4726. It allows
//! configuring the reference source, output gain and power-down mode, programming the output as a
//! raw code or a voltage, and persisting any of these to the device EEPROM.
//!
//! The driver caches the device configuration. Every write transmits the complete configuration,
//! so the cache must be the source of truth for the device. Voltages are converted using a
//! full-scale voltage supplied by the user, since the driver cannot measure the reference.
#![cfg_attr(not(test), no_std)]
#![deny(warnings)]

use embedded_hal::{delay::DelayNs, i2c::I2c};

mod config;
mod conversion;
mod error;
mod frame;
pub mod settings;
mod status;

pub use config::{Gain, PowerDown, Reference, Resolution, Target};
pub use error::Error;
pub use settings::Settings;
pub use status::Status;

use conversion::Scale;
use frame::{Command, Frame, Readback, MAX_FRAME_LEN};

/// The 7-bit I2C address of a device with address bits A2..A0 = 000.
pub const DEFAULT_ADDRESS: u8 = 0x60;

/// The driver representing the DAC.
pub struct Mcp47x6<I2C> {
    i2c: I2C,
    address: u8,
    resolution: Resolution,
    reference: Reference,
    gain: Gain,
    power_down: PowerDown,
    full_scale: f32,
    last_status: u8,
}

impl<I2C> Mcp47x6<I2C>
where
    I2C: I2c,
{
    /// Construct a driver for the DAC.
    ///
    /// # Note
    /// No bus traffic is generated. The cached configuration assumes the device is using the
    /// supply as reference with unity gain and the output enabled, and that the supply is 5V.
    ///
    /// # Args
    /// * `i2c` - The I2C bus to communicate with the DAC.
    /// * `address` - The 7-bit I2C address of the device.
    /// * `resolution` - The resolution of the connected part.
    pub fn new(i2c: I2C, address: u8, resolution: Resolution) -> Self {
        let defaults = Settings::default();
        Mcp47x6 {
            i2c,
            address,
            resolution,
            reference: defaults.reference,
            gain: defaults.gain,
            power_down: defaults.power_down,
            full_scale: defaults.full_scale,
            last_status: 0,
        }
    }

    /// Construct a driver for the DAC at the default address.
    ///
    /// # Args
    /// * `i2c` - The I2C bus to communicate with the DAC.
    /// * `resolution` - The resolution of the connected part.
    pub fn default(i2c: I2C, resolution: Resolution) -> Self {
        Mcp47x6::new(i2c, DEFAULT_ADDRESS, resolution)
    }

    /// Construct a driver for the 8-bit MCP4706.
    pub fn mcp4706(i2c: I2C, address: u8) -> Self {
        Mcp47x6::new(i2c, address, Resolution::Bits8)
    }

    /// Construct a driver for the 10-bit MCP4716.
    pub fn mcp4716(i2c: I2C, address: u8) -> Self {
        Mcp47x6::new(i2c, address, Resolution::Bits10)
    }

    /// Construct a driver for the 12-bit MCP4726.
    pub fn mcp4726(i2c: I2C, address: u8) -> Self {
        Mcp47x6::new(i2c, address, Resolution::Bits12)
    }

    /// Release the I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn reference(&self) -> Reference {
        self.reference
    }

    pub fn gain(&self) -> Gain {
        self.gain
    }

    pub fn power_down(&self) -> PowerDown {
        self.power_down
    }

    pub fn full_scale_voltage(&self) -> f32 {
        self.full_scale
    }

    /// The status byte captured by the most recent successful read.
    ///
    /// # Note
    /// A failed read leaves the previous status in place, so this is only meaningful directly after
    /// a successful `read_code()`.
    pub fn status(&self) -> Status {
        Status(self.last_status)
    }

    /// Set the voltage that corresponds to the full-scale code.
    ///
    /// # Note
    /// This is only used to convert between voltages and codes and is never sent to the device.
    ///
    /// # Args
    /// * `volts` - The voltage applied to the selected reference.
    pub fn set_full_scale_voltage(&mut self, volts: f32) -> Result<(), Error<I2C::Error>> {
        if !Scale::is_valid_full_scale(volts) {
            return Err(Error::Range);
        }

        self.full_scale = volts;
        Ok(())
    }

    /// Select the reference source.
    ///
    /// # Args
    /// * `reference` - The new reference source.
    /// * `target` - Specifies if the setting should also become the power-on default.
    pub fn set_reference(
        &mut self,
        reference: Reference,
        target: Target,
    ) -> Result<(), Error<I2C::Error>> {
        log::debug!("Setting reference to {:?}", reference);
        self.reference = reference;
        self.write_config(target)
    }

    /// Select the output gain.
    ///
    /// # Note
    /// The configuration-only frame does not carry the gain. The new gain is transmitted with the
    /// next code write.
    ///
    /// # Args
    /// * `gain` - The new output gain.
    /// * `target` - Specifies if the setting should also become the power-on default.
    pub fn set_gain(&mut self, gain: Gain, target: Target) -> Result<(), Error<I2C::Error>> {
        log::debug!("Setting gain to {:?}", gain);
        self.gain = gain;
        self.write_config(target)
    }

    /// Select the power-down mode.
    ///
    /// # Args
    /// * `power_down` - The new power-down mode.
    /// * `target` - Specifies if the setting should also become the power-on default.
    pub fn set_power_down(
        &mut self,
        power_down: PowerDown,
        target: Target,
    ) -> Result<(), Error<I2C::Error>> {
        log::debug!("Setting power-down mode to {:?}", power_down);
        self.power_down = power_down;
        self.write_config(target)
    }

    /// Get a snapshot of the current driver configuration.
    pub fn settings(&self) -> Settings {
        Settings {
            reference: self.reference,
            gain: self.gain,
            power_down: self.power_down,
            full_scale: self.full_scale,
        }
    }

    /// Apply a complete configuration to the driver and the device.
    ///
    /// # Note
    /// The configuration is transmitted in a single configuration-only frame.
    ///
    /// # Args
    /// * `settings` - The configuration to apply.
    /// * `target` - Specifies if the configuration should also become the power-on default.
    pub fn apply_settings(
        &mut self,
        settings: &Settings,
        target: Target,
    ) -> Result<(), Error<I2C::Error>> {
        settings.validate().map_err(|_| Error::Range)?;

        log::debug!("Applying {:?}", settings);
        self.reference = settings.reference;
        self.gain = settings.gain;
        self.power_down = settings.power_down;
        self.full_scale = settings.full_scale;
        self.write_config(target)
    }

    /// Write a raw code to the DAC output.
    ///
    /// # Args
    /// * `code` - The DAC code. Codes above the range of the DAC are saturated.
    /// * `target` - Specifies if the code should also become the power-on default.
    pub fn write_code(&mut self, code: u16, target: Target) -> Result<(), Error<I2C::Error>> {
        let clamped = self.resolution.clamp(code);
        if clamped != code {
            log::warn!("DAC code {} saturated to {}", code, clamped);
        }

        let frame = Frame::write(
            Command::from(target),
            self.reference,
            self.power_down,
            self.gain,
            self.resolution,
            clamped,
        );

        self.transmit(&frame)
    }

    /// Set the output voltage of the DAC.
    ///
    /// # Args
    /// * `volts` - The desired output voltage. Voltages above full scale are saturated.
    /// * `target` - Specifies if the output should also become the power-on default.
    ///
    /// # Returns
    /// The code that was programmed into the DAC.
    pub fn write_voltage(&mut self, volts: f32, target: Target) -> Result<u16, Error<I2C::Error>> {
        let code = Scale::new(self.full_scale, self.resolution)
            .code(volts)
            .ok_or(Error::Range)?;

        let code = self.resolution.clamp(code);
        self.write_code(code, target)?;

        Ok(code)
    }

    /// Read back the code currently driving the DAC output.
    ///
    /// # Note
    /// The status byte of the response is captured and available through `status()`.
    pub fn read_code(&mut self) -> Result<u16, Error<I2C::Error>> {
        let mut buf = [0u8; MAX_FRAME_LEN];
        let data = &mut buf[..Readback::len(self.resolution)];
        self.i2c.read(self.address, data)?;
        log::trace!("DAC {:#04x} read {:02x?}", self.address, data);

        let readback = Readback::decode(self.resolution, data).ok_or(Error::Size)?;
        self.last_status = readback.status;

        Ok(readback.code)
    }

    /// Read back the voltage currently output by the DAC.
    pub fn read_voltage(&mut self) -> Result<f32, Error<I2C::Error>> {
        let code = self.read_code()?;
        Ok(Scale::new(self.full_scale, self.resolution).voltage(code))
    }

    /// Check if the device is busy writing to EEPROM.
    ///
    /// # Note
    /// This performs a read of the device. If the read fails, the device is reported busy.
    pub fn is_busy(&mut self) -> bool {
        match self.read_code() {
            Ok(_) => !self.status().ready(),
            Err(_) => {
                log::warn!("DAC {:#04x} status read failed", self.address);
                true
            }
        }
    }

    /// Wait for a pending EEPROM write to complete.
    ///
    /// # Args
    /// * `delay` - A means of delaying between polls.
    /// * `timeout_ms` - The maximum number of milliseconds to wait.
    pub fn wait_ready(
        &mut self,
        delay: &mut impl DelayNs,
        timeout_ms: u32,
    ) -> Result<(), Error<I2C::Error>> {
        for _ in 0..timeout_ms {
            if !self.is_busy() {
                return Ok(());
            }

            delay.delay_ms(1);
        }

        if self.is_busy() {
            Err(Error::Timeout)
        } else {
            Ok(())
        }
    }

    fn write_config(&mut self, target: Target) -> Result<(), Error<I2C::Error>> {
        let frame = Frame::config(
            Command::from(target),
            self.reference,
            self.power_down,
            self.resolution,
        );

        self.transmit(&frame)
    }

    fn transmit(&mut self, frame: &Frame) -> Result<(), Error<I2C::Error>> {
        log::trace!("DAC {:#04x} write {:02x?}", self.address, frame.as_bytes());
        self.i2c.write(self.address, frame.as_bytes())?;

        Ok(())
    }
}
