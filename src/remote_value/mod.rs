//! Remote values: a codec bound to bus addresses plus last-known-value
//! state.
//!
//! One remote value exists per addressable signal per device; instances
//! share no mutable state. `from_knx` mutates the stored value, so a
//! single writer per instance is assumed — drive one instance from one
//! task.

pub mod dpt;
pub mod raw;
pub mod scaling;

pub use dpt::{DptCodec, RemoteValueDpt};
pub use raw::{RawCodec, RemoteValueRaw};
pub use scaling::{RemoteValueScaling, ScalingCodec};

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

use crate::address::GroupAddress;
use crate::error::KnxValueError;
use crate::payload::Payload;
use crate::telegram::{Apci, Telegram};

/// Encode/decode pair a [`RemoteValue`] delegates to.
pub trait ValueCodec {
    type Value: Clone + PartialEq + fmt::Debug;

    /// Convert a logical value into its wire payload.
    fn to_knx(&self, value: &Self::Value) -> Result<Payload, KnxValueError>;

    /// Convert a wire payload back into a logical value.
    fn from_knx(&self, payload: &Payload) -> Result<Self::Value, KnxValueError>;

    /// Presentation hint, not part of the wire contract.
    fn unit_of_measurement(&self) -> Option<&'static str> {
        None
    }
}

/// Callback invoked after every successful inbound update.
pub type UpdateCallback<T> = Box<dyn Fn(&T) + Send + Sync>;

/// How the state updater requests fresh reads for a value.
///
/// Held as configuration only; the component acting on it lives outside
/// this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncState {
    /// Expire-tracked reads with the default interval.
    Default,
    /// Never request a read.
    Disabled,
    /// Read once after connection, never again.
    Init,
    /// Re-read when the value is older than the given minutes.
    Expire(f64),
    /// Re-read on a fixed interval in minutes.
    Every(f64),
}

/// Default re-read interval in minutes.
pub const SYNC_STATE_DEFAULT_MINUTES: f64 = 60.0;

impl Default for SyncState {
    fn default() -> Self {
        SyncState::Default
    }
}

impl FromStr for SyncState {
    type Err = KnxValueError;

    /// Accepts `"init"`, `"expire"`, `"expire 30"`, `"every"`,
    /// `"every 10"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KnxValueError::conversion(s, "not a valid sync_state policy");
        let mut parts = s.split_whitespace();
        let keyword = parts.next().ok_or_else(invalid)?;
        let minutes = match parts.next() {
            Some(part) => Some(part.parse::<f64>().map_err(|_| invalid())?),
            None => None,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        match (keyword, minutes) {
            ("init", None) => Ok(SyncState::Init),
            ("expire", minutes) => Ok(SyncState::Expire(
                minutes.unwrap_or(SYNC_STATE_DEFAULT_MINUTES),
            )),
            ("every", minutes) => Ok(SyncState::Every(
                minutes.unwrap_or(SYNC_STATE_DEFAULT_MINUTES),
            )),
            _ => Err(invalid()),
        }
    }
}

impl<'de> Deserialize<'de> for SyncState {
    /// Configuration accepts a bool (on/off), a number (expire minutes)
    /// or a policy string.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SyncStateVisitor;

        impl Visitor<'_> for SyncStateVisitor {
            type Value = SyncState;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a bool, a number of minutes or a sync_state string")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
                Ok(if value {
                    SyncState::Default
                } else {
                    SyncState::Disabled
                })
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(SyncState::Expire(value as f64))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(SyncState::Expire(value as f64))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
                Ok(SyncState::Expire(value))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(SyncStateVisitor)
    }
}

/// A codec bound to a write address and an optional state address.
///
/// The write address is where outbound values go; the state address is
/// where state responses come from. Inbound updates through
/// [`RemoteValue::from_knx`] replace the stored value and fire the
/// update callback exactly once.
pub struct RemoteValue<C: ValueCodec> {
    codec: C,
    group_address: Option<GroupAddress>,
    group_address_state: Option<GroupAddress>,
    sync_state: SyncState,
    value: Option<C::Value>,
    after_update_cb: Option<UpdateCallback<C::Value>>,
}

impl<C: ValueCodec> RemoteValue<C> {
    pub fn new(codec: C) -> Self {
        RemoteValue {
            codec,
            group_address: None,
            group_address_state: None,
            sync_state: SyncState::default(),
            value: None,
            after_update_cb: None,
        }
    }

    /// Address outbound writes are sent to.
    pub fn with_group_address(mut self, address: GroupAddress) -> Self {
        self.group_address = Some(address);
        self
    }

    /// Address state responses are received from.
    pub fn with_state_address(mut self, address: GroupAddress) -> Self {
        self.group_address_state = Some(address);
        self
    }

    pub fn with_sync_state(mut self, sync_state: SyncState) -> Self {
        self.sync_state = sync_state;
        self
    }

    /// Callback invoked after every successful update.
    pub fn with_after_update(
        mut self,
        callback: impl Fn(&C::Value) + Send + Sync + 'static,
    ) -> Self {
        self.after_update_cb = Some(Box::new(callback));
        self
    }

    pub fn group_address(&self) -> Option<GroupAddress> {
        self.group_address
    }

    pub fn group_address_state(&self) -> Option<GroupAddress> {
        self.group_address_state
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync_state
    }

    pub fn unit_of_measurement(&self) -> Option<&'static str> {
        self.codec.unit_of_measurement()
    }

    /// Last successfully decoded value.
    pub fn value(&self) -> Option<&C::Value> {
        self.value.as_ref()
    }

    /// Encode a value for an outbound write.
    pub fn to_knx(&self, value: &C::Value) -> Result<Payload, KnxValueError> {
        self.codec.to_knx(value)
    }

    /// Decode an inbound payload, store it and fire the update callback.
    ///
    /// On error the stored value stays untouched and no callback runs.
    pub fn from_knx(&mut self, payload: &Payload) -> Result<&C::Value, KnxValueError> {
        let new_value = self.codec.from_knx(payload)?;
        let stored: &C::Value = self.value.insert(new_value);
        if let Some(callback) = &self.after_update_cb {
            callback(stored);
        }
        Ok(stored)
    }

    /// Feed an inbound telegram to this remote value.
    ///
    /// Write and response telegrams addressed to one of the bound
    /// addresses update the value; everything else is ignored. Returns
    /// whether the telegram was consumed.
    pub fn process(&mut self, telegram: &Telegram) -> Result<bool, KnxValueError> {
        let addressed = [self.group_address, self.group_address_state]
            .contains(&Some(telegram.destination_address));
        if !addressed {
            return Ok(false);
        }
        match &telegram.payload {
            Apci::GroupValueWrite(payload) | Apci::GroupValueResponse(payload) => {
                self.from_knx(payload)?;
                Ok(true)
            }
            Apci::GroupValueRead => Ok(false),
        }
    }
}

impl<C: ValueCodec> fmt::Debug for RemoteValue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteValue")
            .field("group_address", &self.group_address)
            .field("group_address_state", &self.group_address_state)
            .field("sync_state", &self.sync_state)
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_state_from_str() {
        assert_eq!("init".parse::<SyncState>().unwrap(), SyncState::Init);
        assert_eq!(
            "expire".parse::<SyncState>().unwrap(),
            SyncState::Expire(60.0)
        );
        assert_eq!(
            "expire 30".parse::<SyncState>().unwrap(),
            SyncState::Expire(30.0)
        );
        assert_eq!(
            "every 2.5".parse::<SyncState>().unwrap(),
            SyncState::Every(2.5)
        );
        assert!("sometimes".parse::<SyncState>().is_err());
        assert!("expire 30 40".parse::<SyncState>().is_err());
        assert!("".parse::<SyncState>().is_err());
    }

    #[test]
    fn test_sync_state_deserialize() {
        assert_eq!(
            serde_json::from_str::<SyncState>("true").unwrap(),
            SyncState::Default
        );
        assert_eq!(
            serde_json::from_str::<SyncState>("false").unwrap(),
            SyncState::Disabled
        );
        assert_eq!(
            serde_json::from_str::<SyncState>("15").unwrap(),
            SyncState::Expire(15.0)
        );
        assert_eq!(
            serde_json::from_str::<SyncState>("\"every 10\"").unwrap(),
            SyncState::Every(10.0)
        );
        assert!(serde_json::from_str::<SyncState>("\"never\"").is_err());
    }
}
