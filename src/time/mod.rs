//! Intra-packet timestamp codecs.
//!
//! Every framed-mode minor frame starts with an 8-byte intra-packet time stamp. The
//! recorder writes it in one of two formats, chosen per channel:
//!
//! - [`RtcTime`]: the 48-bit relative time counter (10 MHz recorder clock)
//! - [`PtpTime`]: IEEE-1588 precision time (seconds + nanoseconds)
//!
//! [`TimestampSource`] selects the format once for a packet and is then used to decode
//! every record in it. [`Timestamp`] holds a decoded value and knows how to encode
//! itself, so encoding never needs the source.

mod ptp;
mod rtc;

pub use ptp::{NANOS_PER_SECOND, PtpTime};
pub use rtc::{RTC_MAX, RtcTime};

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire width of every intra-packet timestamp.
pub const TIMESTAMP_LEN: usize = 8;

/// Timestamp format used by a channel's intra-packet headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimestampSource {
    /// 48-bit relative time counter
    #[default]
    #[serde(rename = "rtc")]
    RelativeTimeCounter,
    /// IEEE-1588 precision time protocol
    #[serde(rename = "ptp")]
    Precision,
}

impl TimestampSource {
    /// Decode an 8-byte timestamp in this format.
    pub fn decode(self, bytes: &[u8; TIMESTAMP_LEN]) -> Result<Timestamp> {
        match self {
            TimestampSource::RelativeTimeCounter => RtcTime::decode(bytes).map(Timestamp::Rtc),
            TimestampSource::Precision => PtpTime::decode(bytes).map(Timestamp::Ptp),
        }
    }
}

/// A decoded intra-packet timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timestamp {
    Rtc(RtcTime),
    Ptp(PtpTime),
}

impl Timestamp {
    /// Encode to the 8-byte wire form.
    pub fn encode(&self) -> [u8; TIMESTAMP_LEN] {
        match self {
            Timestamp::Rtc(rtc) => rtc.encode(),
            Timestamp::Ptp(ptp) => ptp.encode(),
        }
    }

    /// Format this timestamp was decoded from.
    pub fn source(&self) -> TimestampSource {
        match self {
            Timestamp::Rtc(_) => TimestampSource::RelativeTimeCounter,
            Timestamp::Ptp(_) => TimestampSource::Precision,
        }
    }
}

impl From<RtcTime> for Timestamp {
    fn from(value: RtcTime) -> Self {
        Timestamp::Rtc(value)
    }
}

impl From<PtpTime> for Timestamp {
    fn from(value: PtpTime) -> Self {
        Timestamp::Ptp(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Rtc(rtc) => write!(f, "{}", rtc),
            Timestamp::Ptp(ptp) => write!(f, "{}", ptp),
        }
    }
}
