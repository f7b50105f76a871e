//! PCM data packet codec
//!
//! A [`DataPacket`] is the body of a Chapter 10 PCM packet (format 1): the 4-byte
//! channel-specific word followed either by one throughput-mode bit-stream or by a
//! run of fixed-size framed-mode records.
//!
//! ## Usage Example
//!
//! ```rust
//! use pcmframe::{DataPacket, IntraPacketHeader, MinorFrame, RtcTime, TimestampSource};
//!
//! fn build() -> pcmframe::Result<()> {
//!     let mut packet = DataPacket::new(TimestampSource::RelativeTimeCounter)
//!         .with_frame_payload_size(4);
//!     let timestamp = RtcTime::new(1000)?.into();
//!     let header = IntraPacketHeader::new(timestamp, 0x0001);
//!     packet.append(MinorFrame::framed(header, vec![1, 2, 3, 4]));
//!
//!     let bytes = packet.encode()?;
//!
//!     let mut decoded = DataPacket::new(TimestampSource::RelativeTimeCounter)
//!         .with_frame_payload_size(4);
//!     decoded.decode(&bytes, false)?;
//!     assert_eq!(decoded, packet);
//!     Ok(())
//! }
//! # build().unwrap();
//! ```

use super::format::{
    CHANNEL_WORD_LEN, FILL_BYTE, is_throughput, read_u32_le, record_len, record_stride,
};
use super::minor_frame::MinorFrame;
use crate::config::ChannelConfig;
use crate::time::TimestampSource;
use crate::{PcmError, Result};
use std::fmt;
use std::ops::Index;
use tracing::{debug, trace};

/// Payload of one PCM packet.
#[derive(Debug, Clone)]
pub struct DataPacket {
    /// Channel-specific data word; bit 20 selects throughput mode
    mode_word: u32,
    time_source: TimestampSource,
    frame_payload_size: Option<usize>,
    frames: Vec<MinorFrame>,
}

impl DataPacket {
    /// Empty packet in framed mode with no frames.
    pub fn new(time_source: TimestampSource) -> Self {
        Self { mode_word: 0, time_source, frame_payload_size: None, frames: Vec::new() }
    }

    /// Empty packet set up from a channel configuration.
    pub fn from_config(config: &ChannelConfig) -> Self {
        Self {
            mode_word: 0,
            time_source: config.time_source,
            frame_payload_size: config.frame_payload_size,
            frames: Vec::new(),
        }
    }

    /// Decode a packet body using the channel configuration for geometry and sync
    /// extraction.
    pub fn decode_with_config(buffer: &[u8], config: &ChannelConfig) -> Result<Self> {
        let mut packet = Self::from_config(config);
        packet.decode(buffer, config.extract_sync_sfid)?;
        Ok(packet)
    }

    pub fn with_frame_payload_size(mut self, size: usize) -> Self {
        self.frame_payload_size = Some(size);
        self
    }

    pub fn with_mode_word(mut self, mode_word: u32) -> Self {
        self.mode_word = mode_word;
        self
    }

    /// Sample bytes per framed-mode record, excluding the intra-packet header.
    pub fn set_frame_payload_size(&mut self, size: usize) {
        self.frame_payload_size = Some(size);
    }

    pub fn frame_payload_size(&self) -> Option<usize> {
        self.frame_payload_size
    }

    pub fn set_mode_word(&mut self, mode_word: u32) {
        self.mode_word = mode_word;
    }

    pub fn mode_word(&self) -> u32 {
        self.mode_word
    }

    pub fn time_source(&self) -> TimestampSource {
        self.time_source
    }

    pub fn is_throughput(&self) -> bool {
        is_throughput(self.mode_word)
    }

    /// Decode a packet body, replacing the mode word and frames.
    ///
    /// Framed mode needs the frame payload size to be configured first. Bytes left
    /// over after the last complete record are ignored. When a record fails, the
    /// error carries its offset and the buffer length, and the packet is left as it
    /// was before the call.
    pub fn decode(&mut self, buffer: &[u8], extract_sync_sfid: bool) -> Result<()> {
        let mode_word = read_u32_le(buffer, 0, "PCM channel-specific word")?;
        let body = &buffer[CHANNEL_WORD_LEN..];

        let frames = if is_throughput(mode_word) {
            trace!(len = body.len(), "Decoding throughput-mode PCM packet");
            vec![MinorFrame::decode_throughput(body)]
        } else {
            self.decode_records(buffer, extract_sync_sfid)?
        };

        debug!(
            mode_word,
            frames = frames.len(),
            len = buffer.len(),
            "Decoded PCM packet"
        );

        self.mode_word = mode_word;
        self.frames = frames;
        Ok(())
    }

    fn decode_records(&self, buffer: &[u8], extract_sync_sfid: bool) -> Result<Vec<MinorFrame>> {
        let payload_size = self.frame_payload_size.ok_or_else(|| {
            PcmError::configuration("Frame payload size must be set to decode framed-mode PCM")
        })?;
        let record = record_len(payload_size)?;
        let stride = record_stride(payload_size)?;

        let mut frames = Vec::with_capacity((buffer.len() - CHANNEL_WORD_LEN) / stride);
        let mut offset = CHANNEL_WORD_LEN;
        while let Some(region) = offset.checked_add(record).and_then(|end| buffer.get(offset..end))
        {
            let frame = MinorFrame::decode_framed(region, self.time_source, extract_sync_sfid)
                .map_err(|e| PcmError::offset_decode(offset, buffer.len(), e))?;
            frames.push(frame);
            offset += stride;
        }

        let trailing = buffer.len().saturating_sub(offset);
        if trailing > 0 {
            debug!(trailing, record, "Ignoring bytes after last complete minor frame");
        }

        Ok(frames)
    }

    /// Encode the packet body.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let throughput = self.is_throughput();
        self.check_frame_layouts(throughput)?;

        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.mode_word.to_le_bytes());
        for frame in &self.frames {
            let start = out.len();
            frame.encode_into(&mut out)?;
            if !throughput && (out.len() - start) % 2 == 1 {
                out.push(FILL_BYTE);
            }
        }

        trace!(len = out.len(), frames = self.frames.len(), "Encoded PCM packet");
        Ok(out)
    }

    /// Length of [`DataPacket::encode`]'s output, including fill bytes.
    pub fn encoded_len(&self) -> usize {
        let throughput = self.is_throughput();
        CHANNEL_WORD_LEN
            + self
                .frames
                .iter()
                .map(|f| {
                    // frame lengths are bounded by isize::MAX, so the fill byte cannot overflow
                    let len = f.encoded_len();
                    if throughput { len } else { len + len % 2 }
                })
                .sum::<usize>()
    }

    fn check_frame_layouts(&self, throughput: bool) -> Result<()> {
        if throughput {
            if self.frames.len() != 1 || !self.frames[0].is_throughput() {
                return Err(PcmError::configuration(format!(
                    "Throughput-mode packet must hold exactly one throughput frame, \
                     found {} frame(s)",
                    self.frames.len()
                )));
            }
            return Ok(());
        }

        if let Some(index) = self.frames.iter().position(MinorFrame::is_throughput) {
            return Err(PcmError::configuration(format!(
                "Framed-mode packet holds a throughput frame at index {}",
                index
            )));
        }

        // Every record shares one length: the configured one, or else the first frame's.
        let expected = match self.frame_payload_size {
            Some(size) => record_len(size)?,
            None => match self.frames.first() {
                Some(first) => first.encoded_len(),
                None => return Ok(()),
            },
        };
        if let Some((index, frame)) =
            self.frames.iter().enumerate().find(|(_, f)| f.encoded_len() != expected)
        {
            return Err(PcmError::configuration(format!(
                "Framed-mode record {} is {} bytes, expected {}",
                index,
                frame.encoded_len(),
                expected
            )));
        }
        Ok(())
    }

    /// Add a frame at the end of the packet.
    pub fn append(&mut self, frame: MinorFrame) {
        self.frames.push(frame);
    }

    pub fn get(&self, index: usize) -> Option<&MinorFrame> {
        self.frames.get(index)
    }

    /// Fresh iterator over the frames in packet order.
    pub fn iter(&self) -> std::slice::Iter<'_, MinorFrame> {
        self.frames.iter()
    }

    pub fn frames(&self) -> &[MinorFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl PartialEq for DataPacket {
    fn eq(&self, other: &Self) -> bool {
        self.mode_word == other.mode_word && self.frames == other.frames
    }
}

impl Eq for DataPacket {}

impl Index<usize> for DataPacket {
    type Output = MinorFrame;

    fn index(&self, index: usize) -> &Self::Output {
        &self.frames[index]
    }
}

impl<'a> IntoIterator for &'a DataPacket {
    type Item = &'a MinorFrame;
    type IntoIter = std::slice::Iter<'a, MinorFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl fmt::Display for DataPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PCM Data Packet Format 1. Channel Specific Word ={:#010X}", self.mode_word)?;
        for frame in &self.frames {
            writeln!(f, "{}", frame)?;
        }
        Ok(())
    }
}
