//! The 2-byte signed datapoint family (DPT 8.x).
//!
//! Wire format: 2 bytes, big-endian two's-complement. The logical value
//! is the raw integer times the subtype resolution. Encoding rounds
//! half away from zero (`f64::round`); resolution-scaled values are
//! lossy in general, so round trips are only exact to one unit of
//! resolution.

use crate::dpt::{CodecKind, DptTranscoder};
use crate::error::KnxValueError;
use crate::payload::Payload;

const PAYLOAD_LENGTH: usize = 2;

const fn subtype(
    sub: u16,
    value_type: &'static str,
    resolution: f64,
    unit: &'static str,
) -> DptTranscoder {
    DptTranscoder {
        dpt_main_number: 8,
        dpt_sub_number: Some(sub),
        value_type,
        payload_length: PAYLOAD_LENGTH,
        unit,
        resolution,
        value_min: -32768.0,
        value_max: 32767.0,
        kind: CodecKind::Signed16,
    }
}

/// DPT 8.*** family base.
pub const DPT_2BYTE_SIGNED: DptTranscoder = DptTranscoder {
    dpt_main_number: 8,
    dpt_sub_number: None,
    value_type: "2byte_signed",
    payload_length: PAYLOAD_LENGTH,
    unit: "",
    resolution: 1.0,
    value_min: -32768.0,
    value_max: 32767.0,
    kind: CodecKind::Signed16,
};

/// DPT 8.001 DPT_Value_2_Count (pulses).
pub const DPT_VALUE_2_COUNT: DptTranscoder = subtype(1, "pulse_2byte_signed", 1.0, "pulses");

/// DPT 8.002 DPT_DeltaTimeMsec.
pub const DPT_DELTA_TIME_MS: DptTranscoder = subtype(2, "delta_time_ms", 1.0, "ms");

/// DPT 8.003 DPT_DeltaTime10Msec.
pub const DPT_DELTA_TIME_10MS: DptTranscoder = subtype(3, "delta_time_10ms", 10.0, "ms");

/// DPT 8.004 DPT_DeltaTime100Msec.
pub const DPT_DELTA_TIME_100MS: DptTranscoder = subtype(4, "delta_time_100ms", 100.0, "ms");

/// DPT 8.005 DPT_DeltaTimeSec.
pub const DPT_DELTA_TIME_SEC: DptTranscoder = subtype(5, "delta_time_sec", 1.0, "s");

/// DPT 8.006 DPT_DeltaTimeMin.
pub const DPT_DELTA_TIME_MIN: DptTranscoder = subtype(6, "delta_time_min", 1.0, "min");

/// DPT 8.007 DPT_DeltaTimeHrs.
pub const DPT_DELTA_TIME_HRS: DptTranscoder = subtype(7, "delta_time_hrs", 1.0, "h");

/// DPT 8.010 DPT_Percent_V16.
pub const DPT_PERCENT_V16: DptTranscoder = subtype(10, "percentV16", 0.01, "%");

/// DPT 8.011 DPT_Rotation_Angle.
pub const DPT_ROTATION_ANGLE: DptTranscoder = subtype(11, "rotation_angle", 1.0, "°");

/// DPT 8.012 DPT_Length_m.
pub const DPT_LENGTH_M: DptTranscoder = subtype(12, "length_m", 1.0, "m");

/// Every transcoder of the family, base included.
pub static TRANSCODERS: &[DptTranscoder] = &[
    DPT_2BYTE_SIGNED,
    DPT_VALUE_2_COUNT,
    DPT_DELTA_TIME_MS,
    DPT_DELTA_TIME_10MS,
    DPT_DELTA_TIME_100MS,
    DPT_DELTA_TIME_SEC,
    DPT_DELTA_TIME_MIN,
    DPT_DELTA_TIME_HRS,
    DPT_PERCENT_V16,
    DPT_ROTATION_ANGLE,
    DPT_LENGTH_M,
];

/// Decode a 2-byte array payload into `raw × resolution`.
pub(crate) fn decode(dpt: &DptTranscoder, payload: &Payload) -> Result<f64, KnxValueError> {
    let bytes = match payload {
        Payload::Array(bytes) if bytes.len() == dpt.payload_length => bytes,
        other => {
            return Err(KnxValueError::payload_parse(
                other,
                format!(
                    "{} expects a {}-byte array payload",
                    dpt.dpt_number(),
                    dpt.payload_length
                ),
            ))
        }
    };
    let raw = i16::from_be_bytes([bytes[0], bytes[1]]);
    Ok(f64::from(raw) * dpt.resolution)
}

/// Encode `round(value / resolution)` as big-endian two's-complement.
pub(crate) fn encode(dpt: &DptTranscoder, value: f64) -> Result<Payload, KnxValueError> {
    if !value.is_finite() {
        return Err(KnxValueError::conversion(
            value,
            format!("{} expects a finite value", dpt.dpt_number()),
        ));
    }
    let raw = (value / dpt.resolution).round();
    // The declared bounds coincide with the native i16 field here, so a
    // single check covers both the logical range and the narrowing.
    if raw < dpt.value_min || raw > dpt.value_max {
        return Err(KnxValueError::conversion(
            value,
            format!(
                "raw value {raw} out of range [{}, {}] for {}",
                dpt.value_min,
                dpt.value_max,
                dpt.dpt_number()
            ),
        ));
    }
    let raw = raw as i16;
    Ok(Payload::Array(raw.to_be_bytes().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_unit_resolution() {
        let payload = DPT_VALUE_2_COUNT.to_knx(-23614.0).unwrap();
        assert_eq!(payload, Payload::Array(vec![0xA3, 0xC2]));
        assert_eq!(DPT_VALUE_2_COUNT.from_knx(&payload).unwrap(), -23614.0);
    }

    #[test]
    fn test_encode_scaled_resolution() {
        // 123.45 % → raw 12345 = 0x3039
        let payload = DPT_PERCENT_V16.to_knx(123.45).unwrap();
        assert_eq!(payload, Payload::Array(vec![0x30, 0x39]));
        assert_eq!(DPT_PERCENT_V16.from_knx(&payload).unwrap(), 123.45);

        // 1000 ms at 10 ms resolution → raw 100
        let payload = DPT_DELTA_TIME_10MS.to_knx(1000.0).unwrap();
        assert_eq!(payload, Payload::Array(vec![0x00, 0x64]));
    }

    #[test]
    fn test_encode_rounds_half_away_from_zero() {
        // 25 ms at 10 ms resolution → raw 2.5 → 3
        let payload = DPT_DELTA_TIME_10MS.to_knx(25.0).unwrap();
        assert_eq!(payload, Payload::Array(vec![0x00, 0x03]));
        let payload = DPT_DELTA_TIME_10MS.to_knx(-25.0).unwrap();
        assert_eq!(payload, Payload::Array(vec![0xFF, 0xFD]));
    }

    #[test]
    fn test_encode_range_limits() {
        assert_eq!(
            DPT_ROTATION_ANGLE.to_knx(-32768.0).unwrap(),
            Payload::Array(vec![0x80, 0x00])
        );
        assert_eq!(
            DPT_ROTATION_ANGLE.to_knx(32767.0).unwrap(),
            Payload::Array(vec![0x7F, 0xFF])
        );
        assert!(DPT_ROTATION_ANGLE.to_knx(32768.0).is_err());
        assert!(DPT_ROTATION_ANGLE.to_knx(-32769.0).is_err());
    }

    #[test]
    fn test_encode_scaled_raw_overflows() {
        // 400 % → raw 40000, outside the signed 16-bit field
        assert!(matches!(
            DPT_PERCENT_V16.to_knx(400.0),
            Err(KnxValueError::Conversion { .. })
        ));
    }

    #[test]
    fn test_encode_non_finite() {
        assert!(DPT_LENGTH_M.to_knx(f64::NAN).is_err());
        assert!(DPT_LENGTH_M.to_knx(f64::INFINITY).is_err());
    }

    #[test]
    fn test_decode_wrong_shape() {
        for payload in [
            Payload::Array(vec![0x01]),
            Payload::Array(vec![0x01, 0x02, 0x03]),
            Payload::Binary(1),
        ] {
            assert!(matches!(
                DPT_DELTA_TIME_SEC.from_knx(&payload),
                Err(KnxValueError::PayloadParse { .. })
            ));
        }
    }

    #[test]
    fn test_decode_negative() {
        let payload = Payload::Array(vec![0xFF, 0xFF]);
        assert_eq!(DPT_DELTA_TIME_MS.from_knx(&payload).unwrap(), -1.0);
        assert_eq!(DPT_DELTA_TIME_100MS.from_knx(&payload).unwrap(), -100.0);
    }
}
