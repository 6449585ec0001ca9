//! Stateless helpers for one-shot group communication.
//!
//! Each helper resolves its transcoder at the call boundary, encodes,
//! and hands the telegram to the transport; sending never blocks and is
//! never retried. Reading is the only asynchronous operation.

use log::debug;

use crate::address::GroupAddress;
use crate::constants::BINARY_PAYLOAD_MAX;
use crate::dpt::{DptLookup, TranscoderTable};
use crate::error::KnxValueError;
use crate::payload::Payload;
use crate::telegram::{Apci, Telegram};
use crate::transport::{TelegramSender, ValueReader};

/// Value accepted by the send helpers.
///
/// Resolved once at the call boundary: pre-encoded payloads pass
/// through, numbers go through a transcoder when a value type is given,
/// and untyped values fall back to their natural payload shape.
#[derive(Debug, Clone, PartialEq)]
pub enum TelegramValue {
    /// Already encoded; sent as-is.
    Payload(Payload),
    /// Numeric value: typed, or a small flag when untyped.
    Number(f64),
    /// Raw bytes, sent as an array payload when untyped.
    Bytes(Vec<u8>),
}

impl From<Payload> for TelegramValue {
    fn from(payload: Payload) -> Self {
        TelegramValue::Payload(payload)
    }
}

impl From<f64> for TelegramValue {
    fn from(number: f64) -> Self {
        TelegramValue::Number(number)
    }
}

impl From<i64> for TelegramValue {
    fn from(number: i64) -> Self {
        TelegramValue::Number(number as f64)
    }
}

impl From<i32> for TelegramValue {
    fn from(number: i32) -> Self {
        TelegramValue::Number(f64::from(number))
    }
}

impl From<Vec<u8>> for TelegramValue {
    fn from(bytes: Vec<u8>) -> Self {
        TelegramValue::Bytes(bytes)
    }
}

impl From<&[u8]> for TelegramValue {
    fn from(bytes: &[u8]) -> Self {
        TelegramValue::Bytes(bytes.to_vec())
    }
}

/// Outcome of a group read.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadValue {
    /// Decoded through the requested transcoder.
    Decoded(f64),
    /// No value type given; the raw payload of the response.
    Raw(Payload),
}

fn resolve_payload(
    table: &TranscoderTable,
    value: TelegramValue,
    value_type: Option<DptLookup<'_>>,
) -> Result<Payload, KnxValueError> {
    match (value, value_type) {
        (TelegramValue::Payload(payload), _) => Ok(payload),
        (TelegramValue::Number(number), Some(lookup)) => table.resolve(lookup)?.to_knx(number),
        (TelegramValue::Bytes(bytes), Some(_)) => Err(KnxValueError::conversion(
            format!("0x{}", hex::encode(&bytes)),
            "typed values must be numeric",
        )),
        (TelegramValue::Number(number), None) => {
            // Untyped fallback: an integer flag becomes a binary payload.
            if number.fract() != 0.0 || !(0.0..=f64::from(BINARY_PAYLOAD_MAX)).contains(&number) {
                return Err(KnxValueError::conversion(
                    number,
                    "untyped numeric values are sent as binary payloads",
                ));
            }
            Payload::binary(number as u8)
        }
        (TelegramValue::Bytes(bytes), None) => Ok(Payload::Array(bytes)),
    }
}

/// Send a GroupValueWrite telegram.
pub fn group_value_write(
    sender: &dyn TelegramSender,
    table: &TranscoderTable,
    group_address: GroupAddress,
    value: impl Into<TelegramValue>,
    value_type: Option<DptLookup<'_>>,
) -> Result<(), KnxValueError> {
    let payload = resolve_payload(table, value.into(), value_type)?;
    debug!("Sending GroupValueWrite {payload} to {group_address}");
    sender.enqueue(Telegram::new(group_address, Apci::GroupValueWrite(payload)));
    Ok(())
}

/// Send a GroupValueResponse telegram.
pub fn group_value_response(
    sender: &dyn TelegramSender,
    table: &TranscoderTable,
    group_address: GroupAddress,
    value: impl Into<TelegramValue>,
    value_type: Option<DptLookup<'_>>,
) -> Result<(), KnxValueError> {
    let payload = resolve_payload(table, value.into(), value_type)?;
    debug!("Sending GroupValueResponse {payload} to {group_address}");
    sender.enqueue(Telegram::new(
        group_address,
        Apci::GroupValueResponse(payload),
    ));
    Ok(())
}

/// Send a GroupValueRead telegram. Does not wait for a reply.
pub fn group_value_read(sender: &dyn TelegramSender, group_address: GroupAddress) {
    debug!("Sending GroupValueRead to {group_address}");
    sender.enqueue(Telegram::new(group_address, Apci::GroupValueRead));
}

/// Read a value from a group address.
///
/// The round trip is delegated to `reader`, which applies its own
/// timeout; `None` means no response arrived. With a value type the
/// response payload is decoded through the resolved transcoder,
/// otherwise it is returned raw. An unknown value type surfaces before
/// anything is sent.
pub async fn read_group_value(
    reader: &dyn ValueReader,
    table: &TranscoderTable,
    group_address: GroupAddress,
    value_type: Option<DptLookup<'_>>,
) -> Result<Option<ReadValue>, KnxValueError> {
    let transcoder = match value_type {
        Some(lookup) => Some(table.resolve(lookup)?),
        None => None,
    };
    let Some(response) = reader.read(group_address).await else {
        return Ok(None);
    };
    match (transcoder, response.payload) {
        (Some(transcoder), Apci::GroupValueWrite(payload))
        | (Some(transcoder), Apci::GroupValueResponse(payload)) => {
            Ok(Some(ReadValue::Decoded(transcoder.from_knx(&payload)?)))
        }
        (None, Apci::GroupValueWrite(payload)) | (None, Apci::GroupValueResponse(payload)) => {
            Ok(Some(ReadValue::Raw(payload)))
        }
        (_, Apci::GroupValueRead) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpt::default_table;

    #[test]
    fn test_resolve_payload_passthrough() {
        let table = default_table();
        let payload = Payload::array([0x12, 0x34]);
        let resolved = resolve_payload(
            table,
            TelegramValue::Payload(payload.clone()),
            Some("percentV16".into()),
        )
        .unwrap();
        assert_eq!(resolved, payload);
    }

    #[test]
    fn test_resolve_payload_typed() {
        let table = default_table();
        let resolved =
            resolve_payload(table, TelegramValue::Number(500.0), Some("length_m".into())).unwrap();
        assert_eq!(resolved, Payload::array([0x01, 0xF4]));
    }

    #[test]
    fn test_resolve_payload_untyped_fallbacks() {
        let table = default_table();
        assert_eq!(
            resolve_payload(table, TelegramValue::Number(1.0), None).unwrap(),
            Payload::Binary(1)
        );
        assert_eq!(
            resolve_payload(table, TelegramValue::Bytes(vec![0xAB, 0xCD]), None).unwrap(),
            Payload::array([0xAB, 0xCD])
        );
        assert!(resolve_payload(table, TelegramValue::Number(1.5), None).is_err());
        assert!(resolve_payload(table, TelegramValue::Number(64.0), None).is_err());
        assert!(resolve_payload(table, TelegramValue::Number(-1.0), None).is_err());
    }

    #[test]
    fn test_resolve_payload_typed_bytes_rejected() {
        let table = default_table();
        assert!(matches!(
            resolve_payload(
                table,
                TelegramValue::Bytes(vec![1]),
                Some("percentV16".into())
            ),
            Err(KnxValueError::Conversion { .. })
        ));
    }
}
