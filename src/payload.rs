//! Wire payload shapes exchanged in group telegrams.
//!
//! A group value travels in one of two shapes: embedded in the free bits
//! of the APCI octet itself (small flags, up to 6 bits) or as a separate
//! byte sequence following it. A codec declares the exact shape it
//! accepts; the two are never coerced into each other.

use std::fmt;

use crate::constants::BINARY_PAYLOAD_MAX;
use crate::error::KnxValueError;

/// Raw on-wire representation of a group value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Small value carried in the APCI octet (up to 6 bits).
    Binary(u8),
    /// Byte sequence payload.
    Array(Vec<u8>),
}

impl Payload {
    /// Wrap a small value into a binary payload.
    ///
    /// Fails when the value does not fit the 6 usable bits of the APCI
    /// octet.
    pub fn binary(value: u8) -> Result<Self, KnxValueError> {
        if value > BINARY_PAYLOAD_MAX {
            return Err(KnxValueError::conversion(
                value,
                format!("binary payloads are limited to {BINARY_PAYLOAD_MAX:#04x}"),
            ));
        }
        Ok(Payload::Binary(value))
    }

    /// Wrap a byte sequence into an array payload.
    pub fn array(bytes: impl Into<Vec<u8>>) -> Self {
        Payload::Array(bytes.into())
    }

    /// Payload length in bytes. Binary payloads occupy no extra octets.
    pub fn len(&self) -> usize {
        match self {
            Payload::Binary(_) => 0,
            Payload::Array(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Binary(value) => write!(f, "<Binary {value:#04x}>"),
            Payload::Array(bytes) => write!(f, "<Array 0x{}>", hex::encode(bytes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_in_range() {
        assert_eq!(Payload::binary(0x3F).unwrap(), Payload::Binary(0x3F));
        assert_eq!(Payload::binary(0).unwrap(), Payload::Binary(0));
    }

    #[test]
    fn test_binary_out_of_range() {
        assert!(Payload::binary(0x40).is_err());
    }

    #[test]
    fn test_len() {
        assert_eq!(Payload::Binary(1).len(), 0);
        assert_eq!(Payload::array([0x01, 0xF4]).len(), 2);
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Payload::array([0x01, 0xF4]).to_string(), "<Array 0x01f4>");
        assert_eq!(Payload::Binary(0x01).to_string(), "<Binary 0x01>");
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Payload::array([1, 2]), Payload::array(vec![1u8, 2]));
        assert_ne!(Payload::array([1, 2]), Payload::array([1, 2, 0]));
        assert_ne!(Payload::Binary(1), Payload::array([1]));
    }
}
