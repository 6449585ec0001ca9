//! Remote value for raw, width-parametrized payloads.
//!
//! No registry lookup is involved; the payload width is fixed at
//! construction. Width 0 selects the binary payload shape, width N a
//! big-endian unsigned integer in exactly N bytes.

use crate::error::KnxValueError;
use crate::payload::Payload;

use super::{RemoteValue, ValueCodec};

/// Raw codec with a payload width picked at construction.
#[derive(Debug, Clone, Copy)]
pub struct RawCodec {
    payload_length: usize,
}

impl RawCodec {
    pub fn new(payload_length: usize) -> Self {
        RawCodec { payload_length }
    }

    pub fn payload_length(&self) -> usize {
        self.payload_length
    }
}

impl ValueCodec for RawCodec {
    type Value = i64;

    fn to_knx(&self, value: &i64) -> Result<Payload, KnxValueError> {
        let value = *value;
        if value < 0 {
            return Err(KnxValueError::conversion(value, "raw values are unsigned"));
        }
        if self.payload_length == 0 {
            return u8::try_from(value)
                .map_err(|_| {
                    KnxValueError::conversion(value, "value does not fit a binary payload")
                })
                .and_then(Payload::binary);
        }
        let unsigned = value as u64;
        if self.payload_length < 8 && (unsigned >> (8 * self.payload_length)) != 0 {
            return Err(KnxValueError::conversion(
                value,
                format!("value does not fit {} bytes", self.payload_length),
            ));
        }
        let mut bytes = vec![0u8; self.payload_length];
        let used = self.payload_length.min(8);
        bytes[self.payload_length - used..].copy_from_slice(&unsigned.to_be_bytes()[8 - used..]);
        Ok(Payload::Array(bytes))
    }

    fn from_knx(&self, payload: &Payload) -> Result<i64, KnxValueError> {
        match payload {
            Payload::Binary(value) if self.payload_length == 0 => Ok(i64::from(*value)),
            Payload::Array(bytes) if bytes.len() == self.payload_length => {
                let (lead, tail) = bytes.split_at(bytes.len().saturating_sub(8));
                if lead.iter().any(|&byte| byte != 0) {
                    return Err(KnxValueError::payload_parse(
                        payload,
                        "value exceeds the supported integer range",
                    ));
                }
                let mut unsigned: u64 = 0;
                for &byte in tail {
                    unsigned = (unsigned << 8) | u64::from(byte);
                }
                i64::try_from(unsigned).map_err(|_| {
                    KnxValueError::payload_parse(
                        payload,
                        "value exceeds the supported integer range",
                    )
                })
            }
            other => Err(KnxValueError::payload_parse(
                other,
                match self.payload_length {
                    0 => "expected a binary payload".to_string(),
                    length => format!("expected a {length}-byte array payload"),
                },
            )),
        }
    }
}

/// Raw remote value, width parametrized at construction.
pub type RemoteValueRaw = RemoteValue<RawCodec>;

impl RemoteValueRaw {
    /// Remote value over a raw codec of the given width.
    pub fn with_payload_length(payload_length: usize) -> Self {
        RemoteValue::new(RawCodec::new(payload_length))
    }
}
