//! In-memory CAN channel whose transmit side feeds its own receive FIFO.
//!
//! Reproduces the self-test wiring of the gateway: frames produced by the test
//! generator come back through the receive path and are decoded like bus traffic.
//! A full FIFO answers `Busy`, like a controller whose transmit buffer is occupied.
//! Backed by an [`embassy_sync::channel::Channel`] with a no-op mutex, so it is
//! meant for a single execution context.
use embassy_sync::{
    blocking_mutex::raw::NoopRawMutex,
    channel::{Channel, TrySendError},
};

use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::can_channel::{RxChannel, TxChannel, TxStatus};

/// Loopback bus with a FIFO of `N` frames.
pub struct LoopbackBus<const N: usize> {
    fifo: Channel<NoopRawMutex, CanFrame, N>,
}

impl<const N: usize> LoopbackBus<N> {
    pub const fn new() -> Self {
        Self {
            fifo: Channel::new(),
        }
    }

    /// Queue a frame as if another node had sent it. Hands the frame back when full.
    pub fn inject(&self, frame: CanFrame) -> Result<(), CanFrame> {
        self.fifo.try_send(frame).map_err(|TrySendError::Full(frame)| frame)
    }

    /// Number of queued frames.
    pub fn len(&self) -> usize {
        self.fifo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fifo.is_empty()
    }

    /// Drop every queued frame.
    pub fn clear(&self) {
        self.fifo.clear();
    }
}

impl<const N: usize> Default for LoopbackBus<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RxChannel for &LoopbackBus<N> {
    fn fill_level(&self) -> usize {
        self.fifo.len()
    }

    fn pop(&mut self) -> Option<CanFrame> {
        self.fifo.try_receive().ok()
    }
}

impl<const N: usize> TxChannel for &LoopbackBus<N> {
    fn try_send(&mut self, frame: &CanFrame) -> TxStatus {
        match self.fifo.try_send(frame.clone()) {
            Ok(()) => TxStatus::Sent,
            Err(TrySendError::Full(_)) => TxStatus::Busy,
        }
    }
}
