//! Error type definitions for the MCP47X6 driver
//!
//! # Copyright
//! Copyright (C) 2020 QUARTIQ GmbH - All Rights Reserved
//! Unauthorized usage, editing, or copying is strictly prohibited.
//! Proprietary and confidential.

/// Represents possible errors from the DAC driver.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Error<E> {
    /// The I2C transaction failed. This covers missing devices, NACKs and short reads.
    Interface(E),

    /// The device returned fewer bytes than requested.
    Size,

    /// A voltage could not be represented by the DAC.
    Range,

    /// The device did not become ready in time.
    Timeout,
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Interface(e)
    }
}
