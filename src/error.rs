//! Error types for PCM payload decoding and encoding.
//!
//! All errors implement the `std::error::Error` trait and carry enough structured
//! context to locate the failing region of a packet.
//!
//! ## Error Categories
//!
//! - **Malformed Buffer**: a timestamp or header region cannot be decoded, or the
//!   buffer is too short for a declared region
//! - **Configuration**: the codec was asked to do something the channel setup
//!   does not allow (framed encode without a timestamp, framed decode without a
//!   frame payload size, a config file that does not parse)
//! - **Offset Decode**: a minor frame inside a packet failed to decode; wraps the
//!   underlying error with the record offset and total buffer length
//! - **File**: a channel configuration file could not be read
//!
//! ## Recovery
//!
//! Per-frame failures are never retried by the codec. The caller decides whether to
//! skip the packet or abort the stream:
//!
//! ```rust
//! use pcmframe::PcmError;
//!
//! let cause = PcmError::malformed("PTP timestamp", "nanoseconds out of range");
//! let error = PcmError::offset_decode(18, 64, cause);
//! if error.is_packet_local() {
//!     println!("Skipping packet");
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for PCM codec operations.
pub type Result<T, E = PcmError> = std::result::Result<T, E>;

/// Main error type for PCM codec operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PcmError {
    #[error("Malformed buffer in {context}: {details}")]
    MalformedBuffer { context: String, details: String },

    #[error("Configuration error: {reason}")]
    Configuration {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unpacking payload at offset {offset} of {buffer_len} failed")]
    OffsetDecode {
        offset: usize,
        buffer_len: usize,
        #[source]
        source: Box<PcmError>,
    },

    #[error("Channel configuration file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PcmError {
    /// Returns whether the failure is confined to the packet being decoded, so a
    /// stream consumer can drop the packet and carry on with the next one.
    pub fn is_packet_local(&self) -> bool {
        match self {
            PcmError::MalformedBuffer { .. } => true,
            PcmError::OffsetDecode { .. } => true,
            PcmError::Configuration { .. } => false,
            PcmError::File { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            PcmError::MalformedBuffer { .. } => vec![
                "Check the channel time source matches the recorder setup",
                "Verify the packet body was extracted without the outer header",
                "Skip the packet and continue with the stream",
            ],
            PcmError::Configuration { .. } => vec![
                "Set the frame payload size from the channel geometry",
                "Attach a timestamp to every framed minor frame before encoding",
                "Check the channel configuration file syntax",
            ],
            PcmError::OffsetDecode { .. } => vec![
                "Verify the configured frame payload size",
                "Check whether sync/SFID extraction should be enabled",
                "Skip the packet and continue with the stream",
            ],
            PcmError::File { .. } => vec![
                "Check file exists and is readable",
                "Check file permissions",
            ],
        }
    }

    /// Byte offset of the failing record, when the error came from a packet decode.
    pub fn failing_offset(&self) -> Option<usize> {
        match self {
            PcmError::OffsetDecode { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Helper constructor for malformed buffer errors.
    pub fn malformed(context: impl Into<String>, details: impl Into<String>) -> Self {
        PcmError::MalformedBuffer { context: context.into(), details: details.into() }
    }

    /// Helper constructor for configuration errors.
    pub fn configuration(reason: impl Into<String>) -> Self {
        PcmError::Configuration { reason: reason.into(), source: None }
    }

    /// Helper constructor for configuration errors with source.
    pub fn configuration_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        PcmError::Configuration { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor wrapping a per-frame failure with its position in the packet.
    pub fn offset_decode(offset: usize, buffer_len: usize, source: PcmError) -> Self {
        PcmError::OffsetDecode { offset, buffer_len, source: Box::new(source) }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        PcmError::File { path, source }
    }
}

impl From<serde_yaml_ng::Error> for PcmError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        PcmError::configuration_with_source("Channel configuration YAML is invalid", Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn offset_errors_keep_position_and_cause(
                offset in 4usize..0x10000usize,
                extra in 0usize..0x10000usize,
                details in "[a-z ]{1,40}"
            ) {
                let buffer_len = offset + extra;
                let err = PcmError::offset_decode(
                    offset,
                    buffer_len,
                    PcmError::malformed("RTC timestamp", details.clone()),
                );

                let msg = err.to_string();
                prop_assert!(msg.contains(&offset.to_string()));
                prop_assert!(msg.contains(&buffer_len.to_string()));
                prop_assert_eq!(err.failing_offset(), Some(offset));

                let source = std::error::Error::source(&err).map(|s| s.to_string());
                prop_assert!(source.is_some_and(|s| s.contains(&details)));
            }

            #[test]
            fn messages_include_context(
                context in "\\w+",
                details in ".*",
                reason in ".*"
            ) {
                let malformed = PcmError::malformed(context.clone(), details.clone());
                let config = PcmError::configuration(reason.clone());

                prop_assert!(malformed.to_string().contains(&context));
                prop_assert!(malformed.to_string().contains(&details));
                prop_assert!(config.to_string().contains(&reason));
            }
        }
    }

    #[test]
    fn error_traits_validation() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<PcmError>();

        let error = PcmError::configuration("test");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn packet_local_classification() {
        assert!(PcmError::malformed("header", "short").is_packet_local());
        assert!(
            PcmError::offset_decode(4, 20, PcmError::malformed("header", "short"))
                .is_packet_local()
        );
        assert!(!PcmError::configuration("no payload size").is_packet_local());

        for err in [PcmError::malformed("a", "b"), PcmError::configuration("c")] {
            let suggestions = err.recovery_suggestions();
            assert!(!suggestions.is_empty());
            assert!(suggestions.iter().all(|s| s.len() > 5));
        }
    }

    #[test]
    fn yaml_errors_become_configuration_errors() {
        let yaml_err = serde_yaml_ng::from_str::<u32>("not: [a number").unwrap_err();
        let err: PcmError = yaml_err.into();
        assert!(matches!(err, PcmError::Configuration { source: Some(_), .. }));
    }
}
