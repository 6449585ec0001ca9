//! Remote value with linear scaling onto the single-byte wire domain.
//!
//! The configured interval maps linearly onto the wire bytes 0..=255.
//! Descending intervals are legal. Input outside the interval would
//! land outside the byte domain; that is rejected as a conversion
//! error rather than clamped or wrapped.

use crate::constants::SCALING_RAW_MAX;
use crate::error::KnxValueError;
use crate::payload::Payload;

use super::{RemoteValue, ValueCodec};

/// Linear map between a configured interval and the byte domain.
#[derive(Debug, Clone, Copy)]
pub struct ScalingCodec {
    range_from: i32,
    range_to: i32,
}

impl ScalingCodec {
    pub fn new(range_from: i32, range_to: i32) -> Self {
        ScalingCodec {
            range_from,
            range_to,
        }
    }

    pub fn range(&self) -> (i32, i32) {
        (self.range_from, self.range_to)
    }

    fn delta(&self) -> f64 {
        (i64::from(self.range_to) - i64::from(self.range_from)) as f64
    }
}

impl Default for ScalingCodec {
    /// The percentage mapping, 0..=100.
    fn default() -> Self {
        ScalingCodec::new(0, 100)
    }
}

impl ValueCodec for ScalingCodec {
    type Value = i32;

    fn to_knx(&self, value: &i32) -> Result<Payload, KnxValueError> {
        let offset = (i64::from(*value) - i64::from(self.range_from)) as f64;
        let raw = (offset / self.delta() * f64::from(SCALING_RAW_MAX)).round();
        if !(0.0..=f64::from(SCALING_RAW_MAX)).contains(&raw) {
            return Err(KnxValueError::conversion(
                value,
                format!(
                    "outside scaling range [{}, {}]",
                    self.range_from, self.range_to
                ),
            ));
        }
        Ok(Payload::Array(vec![raw as u8]))
    }

    fn from_knx(&self, payload: &Payload) -> Result<i32, KnxValueError> {
        match payload {
            Payload::Array(bytes) if bytes.len() == 1 => {
                let scaled =
                    (f64::from(bytes[0]) / f64::from(SCALING_RAW_MAX) * self.delta()).round();
                // The result lies between the range endpoints, so it
                // fits i32.
                Ok(scaled as i32 + self.range_from)
            }
            other => Err(KnxValueError::payload_parse(
                other,
                "expected a single-byte array payload",
            )),
        }
    }

    fn unit_of_measurement(&self) -> Option<&'static str> {
        Some("%")
    }
}

/// Scaling remote value over a caller-configured interval.
pub type RemoteValueScaling = RemoteValue<ScalingCodec>;

impl RemoteValueScaling {
    /// Remote value mapping `range_from..=range_to` onto the byte
    /// domain.
    pub fn with_range(range_from: i32, range_to: i32) -> Self {
        RemoteValue::new(ScalingCodec::new(range_from, range_to))
    }
}
