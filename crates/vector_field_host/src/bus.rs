//! Channels between a session and its host.
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use tracing::debug;

use crate::error::{Error, Result};
use crate::protocol::{HostMessage, PluginMessage};

/// Outbound side of the host boundary.
pub trait HostLink {
    fn post(&mut self, message: PluginMessage) -> Result<()>;
}

/// Collects posted messages in memory.
impl HostLink for Vec<PluginMessage> {
    #[inline]
    fn post(&mut self, message: PluginMessage) -> Result<()> {
        self.push(message);
        Ok(())
    }
}

impl<L: HostLink + ?Sized> HostLink for &mut L {
    #[inline]
    fn post(&mut self, message: PluginMessage) -> Result<()> {
        (**self).post(message)
    }
}

/// Unbounded channel pairs for both directions of the host boundary.
pub struct HostBus {
    pub inbound_tx: Sender<HostMessage>,
    pub inbound_rx: Receiver<HostMessage>,
    pub outbound_tx: Sender<PluginMessage>,
    pub outbound_rx: Receiver<PluginMessage>,
}

impl Default for HostBus {
    fn default() -> Self {
        let (inbound_tx, inbound_rx) = crossbeam_channel::unbounded();
        let (outbound_tx, outbound_rx) = crossbeam_channel::unbounded();
        Self {
            inbound_tx,
            inbound_rx,
            outbound_tx,
            outbound_rx,
        }
    }
}

impl HostBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link posting into the outbound channel.
    pub fn link(&self) -> ChannelLink {
        ChannelLink {
            tx: self.outbound_tx.clone(),
        }
    }

    /// Handle the host side uses to deliver notifications.
    pub fn host_sender(&self) -> Sender<HostMessage> {
        self.inbound_tx.clone()
    }

    /// Everything posted to the host so far.
    pub fn drain_outbound(&self) -> Vec<PluginMessage> {
        self.outbound_rx.try_iter().collect()
    }

    /// Next pending host notification, if any.
    pub fn try_next_inbound(&self) -> Result<Option<HostMessage>> {
        match self.inbound_rx.try_recv() {
            Ok(message) => Ok(Some(message)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(Error::HostDisconnected),
        }
    }
}

/// [`HostLink`] forwarding to a [`HostBus`] outbound channel.
#[derive(Clone)]
pub struct ChannelLink {
    pub tx: Sender<PluginMessage>,
}

impl HostLink for ChannelLink {
    fn post(&mut self, message: PluginMessage) -> Result<()> {
        debug!("Posting {} to host.", message.kind());
        self.tx.send(message).map_err(|_| Error::HostDisconnected)
    }
}
