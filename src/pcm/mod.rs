//! PCM payload codec (Chapter 10 PCM data, format 1)
//!
//! [`DataPacket`] handles the whole payload; [`MinorFrame`] handles one record.

pub mod format;
mod minor_frame;
mod packet;

pub use minor_frame::{FrameLayout, IntraPacketHeader, MinorFrame, SyncField};
pub use packet::DataPacket;
