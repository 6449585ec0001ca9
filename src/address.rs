//! KNX group address handling.
//!
//! Group addresses are 16-bit logical bus endpoints. Three textual
//! styles exist:
//! - 3-level: `main/middle/sub` with 5/3/8 bits (the common style)
//! - 2-level: `main/sub` with 5/11 bits
//! - free: a plain decimal number
//!
//! All three parse through [`FromStr`]; formatting uses the 3-level
//! style.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::KnxValueError;

/// A 16-bit KNX group address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupAddress {
    raw: u16,
}

impl GroupAddress {
    /// Maximum main group (5 bits).
    pub const MAX_MAIN: u8 = 31;
    /// Maximum middle group (3 bits).
    pub const MAX_MIDDLE: u8 = 7;
    /// Maximum sub group in the 2-level style (11 bits).
    pub const MAX_SUB_2LEVEL: u16 = 2047;

    /// 3-level address `main/middle/sub`.
    pub fn new(main: u8, middle: u8, sub: u8) -> Result<Self, KnxValueError> {
        if main > Self::MAX_MAIN || middle > Self::MAX_MIDDLE {
            return Err(KnxValueError::InvalidGroupAddress(format!(
                "{main}/{middle}/{sub}"
            )));
        }
        Ok(GroupAddress {
            raw: (u16::from(main) << 11) | (u16::from(middle) << 8) | u16::from(sub),
        })
    }

    /// 2-level address `main/sub`.
    pub fn new_2level(main: u8, sub: u16) -> Result<Self, KnxValueError> {
        if main > Self::MAX_MAIN || sub > Self::MAX_SUB_2LEVEL {
            return Err(KnxValueError::InvalidGroupAddress(format!("{main}/{sub}")));
        }
        Ok(GroupAddress {
            raw: (u16::from(main) << 11) | sub,
        })
    }

    /// The raw 16-bit representation.
    pub const fn raw(self) -> u16 {
        self.raw
    }

    /// Main group (0-31).
    pub const fn main(self) -> u8 {
        ((self.raw >> 11) & 0x1F) as u8
    }

    /// Middle group of the 3-level style (0-7).
    pub const fn middle(self) -> u8 {
        ((self.raw >> 8) & 0x07) as u8
    }

    /// Sub group of the 3-level style (0-255).
    pub const fn sub(self) -> u8 {
        (self.raw & 0xFF) as u8
    }

    /// Sub group of the 2-level style (0-2047).
    pub const fn sub_2level(self) -> u16 {
        self.raw & 0x07FF
    }
}

impl From<u16> for GroupAddress {
    fn from(raw: u16) -> Self {
        GroupAddress { raw }
    }
}

impl From<GroupAddress> for u16 {
    fn from(address: GroupAddress) -> u16 {
        address.raw
    }
}

impl fmt::Display for GroupAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.main(), self.middle(), self.sub())
    }
}

impl FromStr for GroupAddress {
    type Err = KnxValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KnxValueError::InvalidGroupAddress(s.to_string());
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [free] => free
                .parse::<u16>()
                .map(GroupAddress::from)
                .map_err(|_| invalid()),
            [main, sub] => {
                let main = main.parse::<u8>().map_err(|_| invalid())?;
                let sub = sub.parse::<u16>().map_err(|_| invalid())?;
                Self::new_2level(main, sub).map_err(|_| invalid())
            }
            [main, middle, sub] => {
                let main = main.parse::<u8>().map_err(|_| invalid())?;
                let middle = middle.parse::<u8>().map_err(|_| invalid())?;
                let sub = sub.parse::<u8>().map_err(|_| invalid())?;
                Self::new(main, middle, sub).map_err(|_| invalid())
            }
            _ => Err(invalid()),
        }
    }
}

impl Serialize for GroupAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for GroupAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupAddressVisitor;

        impl Visitor<'_> for GroupAddressVisitor {
            type Value = GroupAddress;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a group address string or raw u16")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                value.parse().map_err(de::Error::custom)
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                u16::try_from(value)
                    .map(GroupAddress::from)
                    .map_err(|_| de::Error::custom("group address exceeds 16 bits"))
            }
        }

        deserializer.deserialize_any(GroupAddressVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_3level() {
        let address = GroupAddress::new(1, 2, 3).unwrap();
        assert_eq!(address.main(), 1);
        assert_eq!(address.middle(), 2);
        assert_eq!(address.sub(), 3);
        assert_eq!(address.raw(), 0x0A03);
    }

    #[test]
    fn test_new_3level_out_of_range() {
        assert!(GroupAddress::new(32, 0, 0).is_err());
        assert!(GroupAddress::new(0, 8, 0).is_err());
    }

    #[test]
    fn test_new_2level() {
        let address = GroupAddress::new_2level(1, 234).unwrap();
        assert_eq!(address.main(), 1);
        assert_eq!(address.sub_2level(), 234);
        assert!(GroupAddress::new_2level(0, 2048).is_err());
    }

    #[test]
    fn test_parse_styles() {
        assert_eq!("1/2/3".parse::<GroupAddress>().unwrap().raw(), 0x0A03);
        assert_eq!("1/234".parse::<GroupAddress>().unwrap().raw(), 0x08EA);
        assert_eq!("2563".parse::<GroupAddress>().unwrap().raw(), 2563);
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "a/b/c", "32/0/0", "1/2/3/4", "1/2048", "65536"] {
            assert!(input.parse::<GroupAddress>().is_err(), "parsed {input:?}");
        }
    }

    #[test]
    fn test_display_roundtrip() {
        let address: GroupAddress = "5/3/77".parse().unwrap();
        assert_eq!(address.to_string(), "5/3/77");
        assert_eq!(address.to_string().parse::<GroupAddress>().unwrap(), address);
    }

    #[test]
    fn test_serde() {
        let address: GroupAddress = serde_json::from_str("\"1/2/3\"").unwrap();
        assert_eq!(address.raw(), 0x0A03);
        let address: GroupAddress = serde_json::from_str("2563").unwrap();
        assert_eq!(address.raw(), 2563);
        assert_eq!(
            serde_json::to_string(&GroupAddress::new(1, 2, 3).unwrap()).unwrap(),
            "\"1/2/3\""
        );
    }
}
