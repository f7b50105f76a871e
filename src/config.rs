//! Channel configuration for PCM decoding
//!
//! The frame geometry of a PCM channel cannot be recovered from the packet itself.
//! It comes from the recorder setup that accompanies the recording, usually as a
//! small YAML document per channel:
//!
//! ```yaml
//! time_source: ptp
//! frame_payload_size: 64
//! extract_sync_sfid: true
//! ```

use crate::pcm::format::record_stride;
use crate::time::TimestampSource;
use crate::{PcmError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Externally supplied geometry of one PCM channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelConfig {
    /// Intra-packet timestamp format
    pub time_source: TimestampSource,
    /// Sample bytes per framed-mode record, excluding the 10-byte intra-packet header
    pub frame_payload_size: Option<usize>,
    /// Split the sync word and SFID out of every framed-mode record
    pub extract_sync_sfid: bool,
}

impl ChannelConfig {
    /// Parse and validate a YAML channel configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        debug!(
            time_source = ?config.time_source,
            frame_payload_size = ?config.frame_payload_size,
            extract_sync_sfid = config.extract_sync_sfid,
            "Loaded PCM channel configuration"
        );
        Ok(config)
    }

    /// Read a YAML channel configuration from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(&path)
            .map_err(|e| PcmError::file_error(path.as_ref().to_path_buf(), e))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(size) = self.frame_payload_size {
            record_stride(size)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let yaml = "time_source: ptp\nframe_payload_size: 64\nextract_sync_sfid: true\n";
        let config = ChannelConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config,
            ChannelConfig {
                time_source: TimestampSource::Precision,
                frame_payload_size: Some(64),
                extract_sync_sfid: true,
            }
        );
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = ChannelConfig::from_yaml_str("frame_payload_size: 4").unwrap();
        assert_eq!(config.time_source, TimestampSource::RelativeTimeCounter);
        assert_eq!(config.frame_payload_size, Some(4));
        assert!(!config.extract_sync_sfid);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = ChannelConfig::from_yaml_str("frame_size: 4").unwrap_err();
        assert!(matches!(err, PcmError::Configuration { .. }));
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let yaml = format!("frame_payload_size: {}", usize::MAX);
        assert!(ChannelConfig::from_yaml_str(&yaml).is_err());
    }

    #[test]
    fn payload_without_room_for_fill_byte_is_rejected() {
        let yaml = format!("frame_payload_size: {}", usize::MAX - 10);
        let err = ChannelConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, PcmError::Configuration { .. }));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let path = std::env::temp_dir()
            .join(format!("pcmframe-channel-{}.yaml", std::process::id()));
        std::fs::write(&path, "time_source: rtc\nframe_payload_size: 12\n").unwrap();

        let config = ChannelConfig::load(&path).unwrap();
        assert_eq!(config.frame_payload_size, Some(12));
        std::fs::remove_file(&path).unwrap();

        let err = ChannelConfig::load(&path).unwrap_err();
        assert!(matches!(err, PcmError::File { .. }));
    }
}
