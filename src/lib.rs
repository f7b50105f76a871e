//! Codec for the PCM payload of IRIG-106 Chapter 10 recording packets.
//!
//! A PCM packet body starts with a 32-bit channel-specific word. When bit 20 is set
//! the rest of the body is one undivided throughput-mode bit-stream; otherwise it is a
//! run of fixed-size minor frames, each with an 8-byte timestamp and a 16-bit
//! intra-packet data header.
//!
//! # Features
//!
//! - **Byte-exact**: `encode` reproduces the wire layout, fill bytes included
//! - **Two time sources**: relative time counter and IEEE-1588 timestamps
//! - **Channel configuration**: frame geometry loaded from YAML
//! - **Positional errors**: failing records are reported with their byte offset
//!
//! ## Example
//!
//! ```rust
//! use pcmframe::{ChannelConfig, DataPacket};
//!
//! fn decode(body: &[u8]) -> pcmframe::Result<()> {
//!     let config = ChannelConfig::from_yaml_str("time_source: rtc\nframe_payload_size: 4\n")?;
//!     let packet = DataPacket::decode_with_config(body, &config)?;
//!     for frame in &packet {
//!         println!("{}", frame);
//!     }
//!     Ok(())
//! }
//!
//! // channel word + one 14-byte record
//! let mut body = vec![0u8; 4];
//! body.extend_from_slice(&[0u8; 14]);
//! decode(&body).unwrap();
//! ```

pub mod config;
mod error;
pub mod pcm;
pub mod test_utils;
pub mod time;

pub use config::ChannelConfig;
pub use error::*;
pub use pcm::{DataPacket, FrameLayout, IntraPacketHeader, MinorFrame, SyncField};
pub use time::{PtpTime, RtcTime, Timestamp, TimestampSource};
