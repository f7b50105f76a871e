//! 48-bit relative time counter timestamp

use super::TIMESTAMP_LEN;
use crate::{PcmError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest value the 48-bit counter can hold.
pub const RTC_MAX: u64 = (1 << 48) - 1;

/// Relative time counter value.
///
/// Wire layout: counter as 48-bit little-endian in bytes [0,6), bytes [6,8) reserved
/// and always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct RtcTime {
    count: u64,
}

impl RtcTime {
    /// Create a counter value, rejecting anything wider than 48 bits.
    pub fn new(count: u64) -> Result<Self> {
        if count > RTC_MAX {
            return Err(PcmError::malformed(
                "RTC timestamp",
                format!("Counter {:#x} exceeds 48 bits", count),
            ));
        }
        Ok(Self { count })
    }

    /// Raw counter ticks.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub(crate) fn decode(bytes: &[u8; TIMESTAMP_LEN]) -> Result<Self> {
        let reserved = u16::from_le_bytes([bytes[6], bytes[7]]);
        if reserved != 0 {
            return Err(PcmError::malformed(
                "RTC timestamp",
                format!("Reserved bytes must be zero, found {:#06x}", reserved),
            ));
        }

        let mut wide = [0u8; 8];
        wide[..6].copy_from_slice(&bytes[..6]);
        Ok(Self { count: u64::from_le_bytes(wide) })
    }

    pub(crate) fn encode(&self) -> [u8; TIMESTAMP_LEN] {
        // count <= RTC_MAX, so the top two bytes are the zero reserved field
        self.count.to_le_bytes()
    }
}

impl fmt::Display for RtcTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RTC={:#014x}", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn counter_survives_wire_form(count in 0..=RTC_MAX) {
            let rtc = RtcTime::new(count).unwrap();
            let bytes = rtc.encode();
            prop_assert_eq!(&bytes[6..], &[0u8, 0u8]);
            prop_assert_eq!(RtcTime::decode(&bytes).unwrap(), rtc);
        }
    }

    #[test]
    fn counter_wider_than_48_bits_is_rejected() {
        assert!(RtcTime::new(RTC_MAX).is_ok());
        assert!(matches!(RtcTime::new(RTC_MAX + 1), Err(PcmError::MalformedBuffer { .. })));
    }

    #[test]
    fn reserved_bytes_must_be_zero() {
        let bytes = [0x01, 0, 0, 0, 0, 0, 0x00, 0x80];
        let err = RtcTime::decode(&bytes).unwrap_err();
        assert!(err.to_string().contains("Reserved"));
    }

    #[test]
    fn little_endian_layout() {
        let bytes = [0x06, 0x05, 0x04, 0x03, 0x02, 0x01, 0x00, 0x00];
        assert_eq!(RtcTime::decode(&bytes).unwrap().count(), 0x0102_0304_0506);
    }
}
