//! Builders for hand-assembled PCM buffers shared by unit tests and benchmarks.

#![cfg(any(test, feature = "benchmark"))]

use crate::pcm::format::{FILL_BYTE, MODE_THROUGHPUT};
use crate::time::{PtpTime, RtcTime, Timestamp};

/// RTC timestamp for tests; panics on counters wider than 48 bits.
pub fn rtc(count: u64) -> RtcTime {
    RtcTime::new(count).expect("test RTC counter fits in 48 bits")
}

/// PTP timestamp for tests; panics on nanoseconds out of range.
pub fn ptp(seconds: u32, nanoseconds: u32) -> PtpTime {
    PtpTime::new(seconds, nanoseconds).expect("test PTP nanoseconds in range")
}

/// One framed-mode record: timestamp, little-endian data header, then `body` verbatim.
pub fn framed_record(timestamp: impl Into<Timestamp>, data_header: u16, body: &[u8]) -> Vec<u8> {
    let mut record = timestamp.into().encode().to_vec();
    record.extend_from_slice(&data_header.to_le_bytes());
    record.extend_from_slice(body);
    record
}

/// Packet body from a channel word and records, adding a fill byte after odd records.
pub fn framed_packet(mode_word: u32, records: &[Vec<u8>]) -> Vec<u8> {
    let mut buffer = mode_word.to_le_bytes().to_vec();
    for record in records {
        buffer.extend_from_slice(record);
        if record.len() % 2 == 1 {
            buffer.push(FILL_BYTE);
        }
    }
    buffer
}

/// Throughput-mode packet body carrying `stream` after the channel word.
pub fn throughput_packet(stream: &[u8]) -> Vec<u8> {
    let mut buffer = MODE_THROUGHPUT.to_le_bytes().to_vec();
    buffer.extend_from_slice(stream);
    buffer
}

/// Framed packet of `frame_count` RTC-stamped records with `payload_size` sample bytes
/// each. Sample bytes count up from the record index so records differ.
pub fn sample_framed_packet(frame_count: usize, payload_size: usize) -> Vec<u8> {
    let records: Vec<Vec<u8>> = (0..frame_count)
        .map(|i| {
            let body: Vec<u8> = (0..payload_size).map(|j| (i + j) as u8).collect();
            framed_record(rtc(i as u64 * 1000), i as u16, &body)
        })
        .collect();
    framed_packet(0, &records)
}
