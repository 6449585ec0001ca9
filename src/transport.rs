//! Collaborator contracts toward the bus transport.
//!
//! The core never touches the wire itself. Outbound telegrams go
//! through [`TelegramSender::enqueue`], which is non-blocking and never
//! fails from the caller's point of view — backpressure and drop policy
//! belong to the transport. Reading is a request/response round trip
//! behind [`ValueReader`], the one suspension point in this crate.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::{mpsc, Mutex};

use crate::address::GroupAddress;
use crate::telegram::{Apci, Telegram};

/// Non-blocking handoff of outbound telegrams to the transport.
pub trait TelegramSender: Send + Sync {
    /// Enqueue a telegram. Must not block and must not fail on queue
    /// depth.
    fn enqueue(&self, telegram: Telegram);
}

/// [`TelegramSender`] over an unbounded tokio channel.
///
/// An unbounded sender never blocks. A closed receiver means the
/// transport has shut down; the telegram is logged and dropped.
pub struct TelegramQueue {
    tx: mpsc::UnboundedSender<Telegram>,
}

impl TelegramQueue {
    /// The queue plus the receiving end the transport drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Telegram>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (TelegramQueue { tx }, rx)
    }
}

impl TelegramSender for TelegramQueue {
    fn enqueue(&self, telegram: Telegram) {
        if let Err(dropped) = self.tx.send(telegram) {
            warn!("telegram queue closed, dropping {}", dropped.0);
        }
    }
}

/// One read round trip: request a value, await the answer or time out.
#[async_trait]
pub trait ValueReader: Send + Sync {
    /// Issue a GroupValueRead for `address` and wait for a matching
    /// write or response telegram. `None` when no answer arrives within
    /// the reader's timeout.
    async fn read(&self, address: GroupAddress) -> Option<Telegram>;
}

/// [`ValueReader`] over a [`TelegramSender`] and an inbound telegram
/// stream.
///
/// The read request is fire-and-forget; cancelling the wait simply
/// discards the eventual late response.
pub struct GroupValueReader<S: TelegramSender> {
    sender: S,
    inbound: Mutex<mpsc::UnboundedReceiver<Telegram>>,
    timeout: Duration,
}

impl<S: TelegramSender> GroupValueReader<S> {
    pub fn new(
        sender: S,
        inbound: mpsc::UnboundedReceiver<Telegram>,
        timeout: Duration,
    ) -> Self {
        GroupValueReader {
            sender,
            inbound: Mutex::new(inbound),
            timeout,
        }
    }
}

#[async_trait]
impl<S: TelegramSender> ValueReader for GroupValueReader<S> {
    async fn read(&self, address: GroupAddress) -> Option<Telegram> {
        self.sender
            .enqueue(Telegram::new(address, Apci::GroupValueRead));
        let mut inbound = self.inbound.lock().await;
        let matching = async {
            while let Some(telegram) = inbound.recv().await {
                if telegram.destination_address != address {
                    continue;
                }
                match telegram.payload {
                    Apci::GroupValueWrite(_) | Apci::GroupValueResponse(_) => {
                        return Some(telegram)
                    }
                    Apci::GroupValueRead => continue,
                }
            }
            None
        };
        match tokio::time::timeout(self.timeout, matching).await {
            Ok(found) => found,
            Err(_) => {
                debug!("no response reading {address} within {:?}", self.timeout);
                None
            }
        }
    }
}
