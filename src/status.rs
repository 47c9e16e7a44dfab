//! MCP47X6 status byte

use bit_field::BitField;

use crate::config::{Gain, PowerDown, Reference};

/// The status byte returned by the device during a read.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Status(pub u8);

impl Status {
    /// Check if the device has finished any pending EEPROM write.
    pub fn ready(&self) -> bool {
        self.0.get_bit(7)
    }

    /// Check the power-on-reset flag. The device ignores commands until its supply is above the
    /// POR threshold.
    pub fn power_on_reset(&self) -> bool {
        self.0.get_bit(6)
    }

    /// The reference source reported by the device, if it is one the driver can select.
    pub fn reference(&self) -> Option<Reference> {
        Reference::from_bits(self.0.get_bits(3..5))
    }

    pub fn power_down(&self) -> PowerDown {
        PowerDown::from_bits(self.0.get_bits(1..3))
    }

    pub fn gain(&self) -> Gain {
        Gain::from_bit(self.0.get_bit(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_bit() {
        assert!(Status(0x80).ready());
        assert!(!Status(0x7F).ready());
        assert!(!Status::default().ready());
    }

    #[test]
    fn configuration_fields() {
        let status = Status(0b1_1_0_10_11_1);
        assert!(status.ready());
        assert!(status.power_on_reset());
        assert_eq!(status.reference(), Some(Reference::BufferedPin));
        assert_eq!(status.power_down(), PowerDown::Pulldown500k);
        assert_eq!(status.gain(), Gain::X2);

        let status = Status(0b0_0_0_11_00_0);
        assert_eq!(status.reference(), None);
        assert_eq!(status.power_down(), PowerDown::Normal);
        assert_eq!(status.gain(), Gain::X1);
    }
}
