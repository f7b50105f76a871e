//! Minor frame codec
//!
//! A minor frame is one record of a PCM payload. In framed mode it carries an
//! intra-packet header (timestamp + 16-bit data header, optionally followed by the
//! extracted sync word and SFID) and the frame's sample bytes. In throughput mode it
//! is the raw bit-stream with no header at all.
//!
//! ## Sync word byte order
//!
//! Decoding reads the sync/SFID region as three little-endian 16-bit words
//! `(msw, lsw, sfid)` and forms `sync_word = lsw | msw << 16`. Encoding writes
//! `sync_word` as big-endian u32 followed by `sfid` as big-endian u16. The two do not
//! agree: bytes produced by [`MinorFrame::encode`] decode to different sync/SFID
//! values. Only frames without a sync field round-trip exactly.

use super::format::{
    DATA_HEADER_OFFSET, INTRA_PACKET_HEADER_LEN, SYNC_SFID_LEN, read_array, read_u16_le,
};
use crate::time::{TIMESTAMP_LEN, Timestamp, TimestampSource};
use crate::{PcmError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Frame synchronization word and its subframe id, always present as a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncField {
    pub sync_word: u32,
    pub sfid: u16,
}

/// Intra-packet header of a framed-mode record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntraPacketHeader {
    /// Always set after decode; must be set before encode.
    pub timestamp: Option<Timestamp>,
    /// Intra-packet data header word
    pub data_header: u16,
    pub sync: Option<SyncField>,
}

impl IntraPacketHeader {
    pub fn new(timestamp: Timestamp, data_header: u16) -> Self {
        Self { timestamp: Some(timestamp), data_header, sync: None }
    }

    pub fn with_sync(mut self, sync_word: u32, sfid: u16) -> Self {
        self.sync = Some(SyncField { sync_word, sfid });
        self
    }

    fn encoded_len(&self) -> usize {
        INTRA_PACKET_HEADER_LEN + if self.sync.is_some() { SYNC_SFID_LEN } else { 0 }
    }
}

/// How a minor frame is laid out on the wire. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameLayout {
    Throughput,
    Framed(IntraPacketHeader),
}

/// One record of a PCM payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MinorFrame {
    layout: FrameLayout,
    payload: Vec<u8>,
}

impl MinorFrame {
    /// Throughput-mode frame holding the raw bit-stream.
    pub fn throughput(payload: impl Into<Vec<u8>>) -> Self {
        Self { layout: FrameLayout::Throughput, payload: payload.into() }
    }

    /// Framed-mode frame.
    pub fn framed(header: IntraPacketHeader, payload: impl Into<Vec<u8>>) -> Self {
        Self { layout: FrameLayout::Framed(header), payload: payload.into() }
    }

    /// Decode a throughput-mode region. The whole region becomes the payload.
    pub fn decode_throughput(region: &[u8]) -> Self {
        trace!(len = region.len(), "Decoding throughput minor frame");
        Self::throughput(region)
    }

    /// Decode one framed-mode record.
    ///
    /// `region` is exactly one record (`frame_payload_size + 10` bytes inside a
    /// packet). With `extract_sync_sfid`, the six bytes after the data header are
    /// taken as sync word and SFID and removed from the payload.
    pub fn decode_framed(
        region: &[u8],
        source: TimestampSource,
        extract_sync_sfid: bool,
    ) -> Result<Self> {
        let ts_bytes: [u8; TIMESTAMP_LEN] = read_array(region, 0, "intra-packet timestamp")?;
        let timestamp = source.decode(&ts_bytes)?;
        let data_header = read_u16_le(region, DATA_HEADER_OFFSET, "intra-packet data header")?;

        let mut consumed = INTRA_PACKET_HEADER_LEN;
        let sync = if extract_sync_sfid {
            let msw = read_u16_le(region, consumed, "sync word")?;
            let lsw = read_u16_le(region, consumed + 2, "sync word")?;
            let sfid = read_u16_le(region, consumed + 4, "SFID")?;
            consumed += SYNC_SFID_LEN;
            Some(SyncField { sync_word: u32::from(lsw) | (u32::from(msw) << 16), sfid })
        } else {
            None
        };

        trace!(
            len = region.len(),
            data_header,
            has_sync = sync.is_some(),
            "Decoded framed minor frame"
        );

        Ok(Self {
            layout: FrameLayout::Framed(IntraPacketHeader {
                timestamp: Some(timestamp),
                data_header,
                sync,
            }),
            payload: region[consumed..].to_vec(),
        })
    }

    /// Encode to wire form.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut out)?;
        Ok(out)
    }

    /// Append the wire form to `out`. On error nothing is written.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        match &self.layout {
            FrameLayout::Throughput => out.extend_from_slice(&self.payload),
            FrameLayout::Framed(header) => {
                let timestamp = header.timestamp.ok_or_else(|| {
                    PcmError::configuration("Timestamp should be defined in non-throughput mode")
                })?;
                out.extend_from_slice(&timestamp.encode());
                out.extend_from_slice(&header.data_header.to_le_bytes());
                if let Some(sync) = header.sync {
                    out.extend_from_slice(&sync.sync_word.to_be_bytes());
                    out.extend_from_slice(&sync.sfid.to_be_bytes());
                }
                out.extend_from_slice(&self.payload);
            }
        }
        Ok(())
    }

    /// Length of [`MinorFrame::encode`]'s output.
    pub fn encoded_len(&self) -> usize {
        match &self.layout {
            FrameLayout::Throughput => self.payload.len(),
            FrameLayout::Framed(header) => header.encoded_len() + self.payload.len(),
        }
    }

    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    pub fn is_throughput(&self) -> bool {
        matches!(self.layout, FrameLayout::Throughput)
    }

    pub fn header(&self) -> Option<&IntraPacketHeader> {
        match &self.layout {
            FrameLayout::Throughput => None,
            FrameLayout::Framed(header) => Some(header),
        }
    }

    pub fn timestamp(&self) -> Option<Timestamp> {
        self.header().and_then(|h| h.timestamp)
    }

    pub fn data_header(&self) -> Option<u16> {
        self.header().map(|h| h.data_header)
    }

    pub fn sync(&self) -> Option<SyncField> {
        self.header().and_then(|h| h.sync)
    }

    /// Sample bytes of this frame.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

impl fmt::Display for MinorFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.layout {
            FrameLayout::Throughput => {
                write!(f, "Minor Frame Throughput mode Payload_len={}", self.payload.len())
            }
            FrameLayout::Framed(header) => {
                write!(f, "Minor Frame. Time=")?;
                match &header.timestamp {
                    Some(ts) => write!(f, "{}", ts)?,
                    None => write!(f, "None")?,
                }
                write!(f, " DataHdr={:#06X} Payload_len={}", header.data_header, self.payload.len())
            }
        }
    }
}
