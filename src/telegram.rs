//! Group telegrams.
//!
//! Only the application-layer service and its payload are modeled here.
//! Frame encoding, TPCI and the transport state machine belong to the
//! layer that moves frames on the bus.

use std::fmt;

use crate::address::GroupAddress;
use crate::constants::{
    APCI_GROUP_VALUE_READ, APCI_GROUP_VALUE_RESPONSE, APCI_GROUP_VALUE_WRITE,
};
use crate::payload::Payload;

/// Application-layer service of a group telegram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Apci {
    /// Request the current value of a group object.
    GroupValueRead,
    /// Write a new value.
    GroupValueWrite(Payload),
    /// Answer to a GroupValueRead.
    GroupValueResponse(Payload),
}

impl Apci {
    /// APCI service code on the wire.
    pub fn service_code(&self) -> u16 {
        match self {
            Apci::GroupValueRead => APCI_GROUP_VALUE_READ,
            Apci::GroupValueWrite(_) => APCI_GROUP_VALUE_WRITE,
            Apci::GroupValueResponse(_) => APCI_GROUP_VALUE_RESPONSE,
        }
    }

    /// Payload carried by write and response services.
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Apci::GroupValueRead => None,
            Apci::GroupValueWrite(payload) | Apci::GroupValueResponse(payload) => Some(payload),
        }
    }
}

/// A group telegram: destination plus application-layer service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Telegram {
    pub destination_address: GroupAddress,
    pub payload: Apci,
}

impl Telegram {
    pub fn new(destination_address: GroupAddress, payload: Apci) -> Self {
        Telegram {
            destination_address,
            payload,
        }
    }
}

impl fmt::Display for Telegram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Apci::GroupValueRead => write!(f, "GroupValueRead to {}", self.destination_address),
            Apci::GroupValueWrite(payload) => {
                write!(f, "GroupValueWrite {payload} to {}", self.destination_address)
            }
            Apci::GroupValueResponse(payload) => write!(
                f,
                "GroupValueResponse {payload} to {}",
                self.destination_address
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_codes() {
        assert_eq!(Apci::GroupValueRead.service_code(), 0x0000);
        assert_eq!(
            Apci::GroupValueResponse(Payload::Binary(1)).service_code(),
            0x0040
        );
        assert_eq!(
            Apci::GroupValueWrite(Payload::Binary(1)).service_code(),
            0x0080
        );
    }

    #[test]
    fn test_payload_accessor() {
        assert_eq!(Apci::GroupValueRead.payload(), None);
        let payload = Payload::array([0x2A]);
        assert_eq!(
            Apci::GroupValueWrite(payload.clone()).payload(),
            Some(&payload)
        );
    }
}
