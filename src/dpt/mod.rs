//! Datapoint type (DPT) transcoding.
//!
//! A datapoint type maps a logical value domain to an exact wire
//! encoding, identified by a main category and a subtype number. A
//! transcoder is plain data here — identity, scaling and bounds
//! dispatched over a small codec discriminant — rather than one type
//! per subtype. The [`TranscoderTable`] indexes transcoders by
//! value-type string and by (main, sub) number pair; it is built once
//! and read-only afterwards.

pub mod signed16;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::KnxValueError;
use crate::payload::Payload;

/// Wire codec families a transcoder can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CodecKind {
    /// 2 bytes, big-endian two's-complement signed.
    Signed16,
}

/// A datapoint transcoder: identity plus codec parameters.
///
/// The logical value is `raw wire integer × resolution`; encoding
/// divides the resolution back out and narrows to the wire field.
/// `value_min`/`value_max` bound the scaled raw integer.
#[derive(Debug, Clone, Copy)]
pub struct DptTranscoder {
    pub dpt_main_number: u8,
    /// `None` only for the abstract base of a family.
    pub dpt_sub_number: Option<u16>,
    /// Stable public identifier, e.g. `"percentV16"`.
    pub value_type: &'static str,
    /// Byte length of the array payload; 0 would mean a binary payload.
    pub payload_length: usize,
    pub unit: &'static str,
    pub resolution: f64,
    pub value_min: f64,
    pub value_max: f64,
    pub(crate) kind: CodecKind,
}

impl DptTranscoder {
    /// Dotted DPT number, e.g. `"8.010"`; families without a subtype
    /// render as `"8.***"`.
    pub fn dpt_number(&self) -> String {
        match self.dpt_sub_number {
            Some(sub) => format!("{}.{:03}", self.dpt_main_number, sub),
            None => format!("{}.***", self.dpt_main_number),
        }
    }

    /// Decode a wire payload into its logical value.
    pub fn from_knx(&self, payload: &Payload) -> Result<f64, KnxValueError> {
        match self.kind {
            CodecKind::Signed16 => signed16::decode(self, payload),
        }
    }

    /// Encode a logical value into its wire payload.
    pub fn to_knx(&self, value: f64) -> Result<Payload, KnxValueError> {
        match self.kind {
            CodecKind::Signed16 => signed16::encode(self, value),
        }
    }
}

/// Lookup key accepted by [`TranscoderTable::resolve`].
#[derive(Debug, Clone, Copy)]
pub enum DptLookup<'a> {
    /// Value-type string, e.g. `"rotation_angle"`.
    ValueType(&'a str),
    /// (main, sub) number pair, e.g. `(8, 11)`.
    Number(u8, u16),
    /// Already resolved; passed through unchanged.
    Transcoder(&'static DptTranscoder),
}

impl<'a> From<&'a str> for DptLookup<'a> {
    fn from(value_type: &'a str) -> Self {
        DptLookup::ValueType(value_type)
    }
}

impl From<(u8, u16)> for DptLookup<'static> {
    fn from((main, sub): (u8, u16)) -> Self {
        DptLookup::Number(main, sub)
    }
}

impl From<&'static DptTranscoder> for DptLookup<'static> {
    fn from(transcoder: &'static DptTranscoder) -> Self {
        DptLookup::Transcoder(transcoder)
    }
}

/// Immutable transcoder registry.
///
/// Identity (main, sub, value_type) is unique across one table. Tables
/// are built by an explicit constructor and never mutated afterwards;
/// a duplicate identity fails the build, which is a startup error of
/// the embedding program rather than a runtime condition.
pub struct TranscoderTable {
    by_value_type: HashMap<&'static str, &'static DptTranscoder>,
    by_number: HashMap<(u8, Option<u16>), &'static DptTranscoder>,
}

impl TranscoderTable {
    /// Table over every built-in transcoder.
    pub fn new() -> Result<Self, KnxValueError> {
        Self::with_transcoders(signed16::TRANSCODERS)
    }

    /// Table over a caller-provided transcoder set.
    pub fn with_transcoders(
        transcoders: &'static [DptTranscoder],
    ) -> Result<Self, KnxValueError> {
        let mut by_value_type = HashMap::new();
        let mut by_number = HashMap::new();
        for transcoder in transcoders {
            if by_value_type
                .insert(transcoder.value_type, transcoder)
                .is_some()
            {
                return Err(KnxValueError::DuplicateTranscoder(
                    transcoder.value_type.to_string(),
                ));
            }
            let number = (transcoder.dpt_main_number, transcoder.dpt_sub_number);
            if by_number.insert(number, transcoder).is_some() {
                return Err(KnxValueError::DuplicateTranscoder(transcoder.dpt_number()));
            }
        }
        Ok(TranscoderTable {
            by_value_type,
            by_number,
        })
    }

    /// Resolve a lookup key to its transcoder.
    pub fn resolve<'a>(
        &self,
        lookup: impl Into<DptLookup<'a>>,
    ) -> Result<&'static DptTranscoder, KnxValueError> {
        match lookup.into() {
            DptLookup::ValueType(value_type) => self
                .by_value_type
                .get(value_type)
                .copied()
                .ok_or_else(|| KnxValueError::UnknownValueType(value_type.to_string())),
            DptLookup::Number(main, sub) => self
                .by_number
                .get(&(main, Some(sub)))
                .copied()
                .ok_or_else(|| KnxValueError::UnknownValueType(format!("{main}.{sub:03}"))),
            DptLookup::Transcoder(transcoder) => Ok(transcoder),
        }
    }
}

/// The table over the built-in transcoder set, constructed on first use.
pub fn default_table() -> &'static TranscoderTable {
    // The built-in set is vetted; a duplicate identity in it is a bug in
    // this crate, not a recoverable condition.
    static TABLE: Lazy<TranscoderTable> = Lazy::new(|| {
        TranscoderTable::new().expect("built-in transcoder table has duplicate identities")
    });
    &TABLE
}
