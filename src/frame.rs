//! MCP47X6 command frame encoding and decoding
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.
//!
//! # Description
//! Every write to the device is a single frame of a header byte followed by the DAC code. The
//! header carries the command and the full configuration:
//!
//! | Bits | 7..5    | 4..3      | 2..1       | 0    |
//! |------|---------|-----------|------------|------|
//! |      | Command | Reference | Power-down | Gain |
//!
//! The code is left-aligned into one (8-bit parts) or two (10/12-bit parts) bytes. The device
//! answers a read with two status bytes followed by the code in the same alignment.
use bit_field::BitField;

use crate::config::{Gain, PowerDown, Reference, Resolution, Target};

/// The largest frame the device uses in either direction.
pub const MAX_FRAME_LEN: usize = 4;

#[doc(hidden)]
#[derive(Debug, Copy, Clone, PartialEq)]
/// Represents the write commands used by the driver.
pub enum Command {
    WriteVolatile = 0b010,
    WriteAll = 0b011,
}

impl From<Target> for Command {
    fn from(target: Target) -> Self {
        match target {
            Target::Volatile => Command::WriteVolatile,
            Target::Eeprom => Command::WriteAll,
        }
    }
}

/// The placement of a DAC code within the data bytes of a frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Layout {
    /// The number of data bytes carrying the code.
    pub width: usize,
    /// The code is shifted right by this amount to produce the first data byte.
    pub msb_shift: u8,
    /// The code is shifted left by this amount to produce the second data byte.
    pub lsb_shift: u8,
    /// The valid bits of a code.
    pub mask: u16,
}

impl Layout {
    pub fn of(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Bits12 => Layout {
                width: 2,
                msb_shift: 4,
                lsb_shift: 4,
                mask: 0x0FFF,
            },
            Resolution::Bits10 => Layout {
                width: 2,
                msb_shift: 2,
                lsb_shift: 6,
                mask: 0x03FF,
            },
            Resolution::Bits8 => Layout {
                width: 1,
                msb_shift: 0,
                lsb_shift: 0,
                mask: 0x00FF,
            },
        }
    }

    /// Pack a code into its data bytes. Only the first `width` bytes are meaningful.
    pub fn encode(&self, code: u16) -> [u8; 2] {
        let code = code & self.mask;
        if self.width == 1 {
            [code as u8, 0]
        } else {
            [(code >> self.msb_shift) as u8, (code << self.lsb_shift) as u8]
        }
    }

    /// Unpack a code from `width` data bytes.
    pub fn decode(&self, data: &[u8]) -> u16 {
        let code = if self.width == 1 {
            data[0] as u16
        } else {
            ((data[0] as u16) << self.msb_shift) | ((data[1] >> self.lsb_shift) as u16)
        };

        code & self.mask
    }
}

/// Build the header byte of a frame.
///
/// # Args
/// * `command` - The write command.
/// * `reference` - The reference source.
/// * `power_down` - The power-down mode.
/// * `gain` - The output gain. Configuration-only frames leave the gain bit clear.
pub fn header(command: Command, reference: Reference, power_down: PowerDown, gain: Gain) -> u8 {
    *0u8.set_bits(5..8, command as u8)
        .set_bits(3..5, reference as u8)
        .set_bits(1..3, power_down as u8)
        .set_bit(0, gain == Gain::X2)
}

/// An outgoing frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    data: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl Frame {
    fn new(header: u8, payload: &[u8]) -> Self {
        let mut data = [0; MAX_FRAME_LEN];
        data[0] = header;
        data[1..][..payload.len()].copy_from_slice(payload);

        Frame {
            data,
            len: 1 + payload.len(),
        }
    }

    /// Construct a frame that only updates the configuration bits.
    ///
    /// # Note
    /// The data bytes are zero-padded to the width of the part's code.
    pub fn config(
        command: Command,
        reference: Reference,
        power_down: PowerDown,
        resolution: Resolution,
    ) -> Self {
        let layout = Layout::of(resolution);
        let padding = [0u8; 2];
        Frame::new(
            header(command, reference, power_down, Gain::X1),
            &padding[..layout.width],
        )
    }

    /// Construct a frame that writes the configuration along with a DAC code.
    pub fn write(
        command: Command,
        reference: Reference,
        power_down: PowerDown,
        gain: Gain,
        resolution: Resolution,
        code: u16,
    ) -> Self {
        let layout = Layout::of(resolution);
        let payload = layout.encode(code);
        Frame::new(
            header(command, reference, power_down, gain),
            &payload[..layout.width],
        )
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

/// The decoded content of a read-back frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Readback {
    pub status: u8,
    pub code: u16,
}

impl Readback {
    /// The number of bytes to request from the device for a read-back.
    pub fn len(resolution: Resolution) -> usize {
        2 + Layout::of(resolution).width
    }

    /// Decode a read-back frame.
    ///
    /// # Args
    /// * `resolution` - The resolution of the part that produced the frame.
    /// * `data` - The received bytes. Must contain at least `Readback::len(resolution)` bytes.
    ///
    /// # Returns
    /// The decoded frame, or None if too few bytes were provided.
    pub fn decode(resolution: Resolution, data: &[u8]) -> Option<Self> {
        if data.len() < Readback::len(resolution) {
            return None;
        }

        // The first status byte is not used.
        Some(Readback {
            status: data[1],
            code: Layout::of(resolution).decode(&data[2..]),
        })
    }
}
