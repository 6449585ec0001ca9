//! Remote value backed by a registry transcoder.

use crate::dpt::{DptLookup, DptTranscoder, TranscoderTable};
use crate::error::KnxValueError;
use crate::payload::Payload;

use super::{RemoteValue, ValueCodec};

/// Codec delegating to a resolved datapoint transcoder.
#[derive(Debug, Clone, Copy)]
pub struct DptCodec {
    transcoder: &'static DptTranscoder,
}

impl DptCodec {
    pub fn new(transcoder: &'static DptTranscoder) -> Self {
        DptCodec { transcoder }
    }

    pub fn transcoder(&self) -> &'static DptTranscoder {
        self.transcoder
    }
}

impl ValueCodec for DptCodec {
    type Value = f64;

    fn to_knx(&self, value: &f64) -> Result<Payload, KnxValueError> {
        self.transcoder.to_knx(*value)
    }

    fn from_knx(&self, payload: &Payload) -> Result<f64, KnxValueError> {
        self.transcoder.from_knx(payload)
    }

    fn unit_of_measurement(&self) -> Option<&'static str> {
        (!self.transcoder.unit.is_empty()).then_some(self.transcoder.unit)
    }
}

/// Remote value bound to a registry transcoder.
pub type RemoteValueDpt = RemoteValue<DptCodec>;

impl RemoteValueDpt {
    /// Resolve `lookup` in `table` and bind the resulting transcoder.
    pub fn resolve<'a>(
        table: &TranscoderTable,
        lookup: impl Into<DptLookup<'a>>,
    ) -> Result<Self, KnxValueError> {
        Ok(RemoteValue::new(DptCodec::new(table.resolve(lookup)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpt::default_table;

    #[test]
    fn test_resolved_codec_round_trip() {
        let mut remote = RemoteValueDpt::resolve(default_table(), "percentV16").unwrap();
        let payload = remote.to_knx(&42.5).unwrap();
        assert_eq!(payload, Payload::array([0x10, 0x9A]));
        assert_eq!(*remote.from_knx(&payload).unwrap(), 42.5);
        assert_eq!(remote.unit_of_measurement(), Some("%"));
    }

    #[test]
    fn test_unknown_type() {
        assert!(RemoteValueDpt::resolve(default_table(), "made_up").is_err());
    }
}
