//! PCM payload wire constants and bounds-checked field readers
//!
//! ## PCM Data Format 1 Layout
//!
//! ```text
//! +----------------+------------------------------------------------------+
//! | channel word   | body                                                 |
//! | 4 bytes LE     | throughput: raw bit-stream to end of packet          |
//! |                | framed: N x (record [+ 1 fill byte if record is odd]) |
//! +----------------+------------------------------------------------------+
//!
//! framed record:
//! +-----------+-------------+---------------------------+-------------------+
//! | timestamp | data header | sync + SFID (optional)    | minor frame data  |
//! | 8 bytes   | 2 bytes LE  | 6 bytes                   | frame_payload_size|
//! +-----------+-------------+---------------------------+-------------------+
//! ```

use crate::{PcmError, Result};

/// Bit 20 of the channel-specific word selects throughput mode.
pub const MODE_THROUGHPUT: u32 = 1 << 20;

/// Size of the channel-specific data word.
pub const CHANNEL_WORD_LEN: usize = 4;

/// Fixed intra-packet header: 8-byte timestamp + 2-byte data header.
pub const INTRA_PACKET_HEADER_LEN: usize = 10;

/// Offset of the intra-packet data header within a record.
pub const DATA_HEADER_OFFSET: usize = 8;

/// Sync word (4 bytes) plus SFID (2 bytes) following the intra-packet header.
pub const SYNC_SFID_LEN: usize = 6;

/// Value written after odd-length records.
pub const FILL_BYTE: u8 = 0x00;

/// Whether a channel-specific word selects throughput mode.
pub fn is_throughput(mode_word: u32) -> bool {
    mode_word & MODE_THROUGHPUT == MODE_THROUGHPUT
}

/// Total on-wire size of one framed record, excluding any fill byte.
///
/// Rejects payload sizes whose record, with its fill byte, does not fit in `usize`.
pub fn record_len(frame_payload_size: usize) -> Result<usize> {
    frame_payload_size
        .checked_add(INTRA_PACKET_HEADER_LEN)
        .filter(|&len| padded_len(len).is_some())
        .ok_or_else(|| {
            PcmError::configuration(format!(
                "Frame payload size {} overflows the record length",
                frame_payload_size
            ))
        })
}

/// Distance between the starts of consecutive framed records.
pub fn record_stride(frame_payload_size: usize) -> Result<usize> {
    let record = record_len(frame_payload_size)?;
    padded_len(record).ok_or_else(|| {
        PcmError::configuration(format!("Record length {} overflows with fill byte", record))
    })
}

/// Record length plus the fill byte that follows odd-length records.
pub fn padded_len(len: usize) -> Option<usize> {
    len.checked_add(len % 2)
}

pub(crate) fn read_u16_le(data: &[u8], offset: usize, context: &str) -> Result<u16> {
    let bytes = field(data, offset, 2, context)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

pub(crate) fn read_u32_le(data: &[u8], offset: usize, context: &str) -> Result<u32> {
    let bytes = field(data, offset, 4, context)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

pub(crate) fn read_array<const N: usize>(
    data: &[u8],
    offset: usize,
    context: &str,
) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(field(data, offset, N, context)?);
    Ok(out)
}

/// Slice `len` bytes at `offset`, failing with a `MalformedBuffer` naming the field.
pub(crate) fn field<'a>(
    data: &'a [u8],
    offset: usize,
    len: usize,
    context: &str,
) -> Result<&'a [u8]> {
    offset.checked_add(len).and_then(|end| data.get(offset..end)).ok_or_else(|| {
        PcmError::malformed(
            context,
            format!(
                "Insufficient data at offset {} (need {} bytes, have {})",
                offset,
                len,
                data.len().saturating_sub(offset)
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throughput_bit() {
        assert!(is_throughput(0x0010_0000));
        assert!(is_throughput(0xFFFF_FFFF));
        assert!(!is_throughput(0x0000_0000));
        assert!(!is_throughput(0xFFEF_FFFF));
    }

    #[test]
    fn padding_rounds_up_to_even() {
        assert_eq!(padded_len(14), Some(14));
        assert_eq!(padded_len(15), Some(16));
        assert_eq!(padded_len(0), Some(0));
        assert_eq!(padded_len(usize::MAX), None);
    }

    #[test]
    fn record_len_adds_header() {
        assert_eq!(record_len(4).unwrap(), 14);
        assert_eq!(record_stride(3).unwrap(), 14);
        assert_eq!(record_stride(4).unwrap(), 14);
        assert!(matches!(record_len(usize::MAX), Err(PcmError::Configuration { .. })));
    }

    #[test]
    fn record_without_room_for_fill_byte_is_rejected() {
        // record_len would be usize::MAX, which is odd and has no room for the fill byte
        assert!(matches!(record_len(usize::MAX - 10), Err(PcmError::Configuration { .. })));
        assert!(matches!(record_stride(usize::MAX - 10), Err(PcmError::Configuration { .. })));
        assert!(record_stride(usize::MAX - 11).is_ok());
    }

    #[test]
    fn short_reads_report_available_bytes() {
        let data = [0x34, 0x12, 0xFF];
        assert_eq!(read_u16_le(&data, 0, "test").unwrap(), 0x1234);

        let err = read_u32_le(&data, 1, "data header").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("data header"));
        assert!(msg.contains("need 4 bytes, have 2"));

        assert!(field(&data, usize::MAX, 2, "overflow").is_err());
    }
}
