//! # knx-values - KNX Datapoint Transcoding and Group Value Communication
//!
//! The knx-values crate implements the value layer of a KNX home and
//! building automation stack: datapoint type (DPT) transcoders that map
//! logical values to their exact wire payloads, remote values that bind
//! a codec to group addresses, and stateless helpers for one-shot group
//! communication.
//!
//! ## Features
//!
//! - Transcode 2-byte signed datapoint values (DPT 8.x) with subtype
//!   resolution scaling and range validation
//! - Resolve transcoders by value-type string or (main, sub) number
//!   pair from an immutable registry
//! - Bind codecs to group addresses with last-known-value tracking and
//!   update callbacks
//! - Send group writes, responses and reads through a non-blocking
//!   transport contract, and await read responses with a bounded
//!   timeout
//!
//! ## Usage
//!
//! ```rust
//! use knx_values::{default_table, Payload};
//!
//! let table = default_table();
//! let percent = table.resolve("percentV16")?;
//! let payload = percent.to_knx(42.5)?;
//! assert_eq!(payload, Payload::Array(vec![0x10, 0x9A]));
//! assert_eq!(percent.from_knx(&payload)?, 42.5);
//! # Ok::<(), knx_values::KnxValueError>(())
//! ```

pub mod address;
pub mod constants;
pub mod dpt;
pub mod error;
pub mod group_communication;
pub mod logging;
pub mod payload;
pub mod remote_value;
pub mod telegram;
pub mod transport;

pub use crate::error::KnxValueError;
pub use crate::logging::{init_logger, init_logger_with_filter};

// Core value types
pub use address::GroupAddress;
pub use dpt::{default_table, DptLookup, DptTranscoder, TranscoderTable};
pub use payload::Payload;
pub use telegram::{Apci, Telegram};

// Remote values
pub use remote_value::{
    RemoteValue, RemoteValueDpt, RemoteValueRaw, RemoteValueScaling, SyncState, ValueCodec,
};

// Group communication and transport contracts
pub use group_communication::{
    group_value_read, group_value_response, group_value_write, read_group_value, ReadValue,
    TelegramValue,
};
pub use transport::{GroupValueReader, TelegramQueue, TelegramSender, ValueReader};
