//! IEEE-1588 precision time timestamp

use super::TIMESTAMP_LEN;
use crate::{PcmError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// IEEE-1588 time of day.
///
/// Wire layout: nanoseconds as u32 little-endian in bytes [0,4), seconds as u32
/// little-endian in bytes [4,8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct PtpTime {
    seconds: u32,
    nanoseconds: u32,
}

impl PtpTime {
    pub fn new(seconds: u32, nanoseconds: u32) -> Result<Self> {
        if nanoseconds >= NANOS_PER_SECOND {
            return Err(PcmError::malformed(
                "PTP timestamp",
                format!("Nanoseconds {} out of range", nanoseconds),
            ));
        }
        Ok(Self { seconds, nanoseconds })
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn nanoseconds(&self) -> u32 {
        self.nanoseconds
    }

    pub(crate) fn decode(bytes: &[u8; TIMESTAMP_LEN]) -> Result<Self> {
        let nanoseconds = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let seconds = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        Self::new(seconds, nanoseconds)
    }

    pub(crate) fn encode(&self) -> [u8; TIMESTAMP_LEN] {
        let mut out = [0u8; TIMESTAMP_LEN];
        out[..4].copy_from_slice(&self.nanoseconds.to_le_bytes());
        out[4..].copy_from_slice(&self.seconds.to_le_bytes());
        out
    }
}

impl fmt::Display for PtpTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PTP={}.{:09}", self.seconds, self.nanoseconds)
    }
}
