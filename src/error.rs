//! # KNX Value Error Handling
//!
//! This module defines the KnxValueError enum, which represents the different
//! error types that can occur in the knx-values crate.

use thiserror::Error;

/// Represents the different error types that can occur in the knx-values crate.
#[derive(Debug, Error)]
pub enum KnxValueError {
    /// Indicates that no transcoder is registered for the requested value type.
    #[error("Unknown value type: {0}")]
    UnknownValueType(String),

    /// Indicates that a value cannot be represented in the target wire format.
    #[error("Could not encode value {value}: {reason}")]
    Conversion { value: String, reason: String },

    /// Indicates that an inbound payload does not match the shape or length
    /// the bound codec expects. The last-known value of the decoding
    /// remote value stays untouched.
    #[error("Could not parse payload {payload}: {reason}")]
    PayloadParse { payload: String, reason: String },

    /// Indicates two transcoders claiming the same identity in one table.
    /// Raised while building a table, never at lookup time.
    #[error("Duplicate transcoder registration: {0}")]
    DuplicateTranscoder(String),

    /// Indicates an invalid group address string or component.
    #[error("Invalid group address: {0}")]
    InvalidGroupAddress(String),
}

impl KnxValueError {
    /// Conversion error carrying the offending value for diagnostics.
    pub(crate) fn conversion(value: impl ToString, reason: impl Into<String>) -> Self {
        KnxValueError::Conversion {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Parse error carrying the offending payload for diagnostics.
    pub(crate) fn payload_parse(payload: impl ToString, reason: impl Into<String>) -> Self {
        KnxValueError::PayloadParse {
            payload: payload.to_string(),
            reason: reason.into(),
        }
    }
}
