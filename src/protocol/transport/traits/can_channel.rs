//! Minimal abstraction over the CAN controller's receive FIFO and transmit buffer.
//! The queues are owned by the hardware collaborator; the gateway only calls
//! these operations and assumes no atomicity across consecutive calls.
use crate::protocol::transport::can_frame::CanFrame;

/// Outcome of a single, non-blocking transmit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxStatus {
    /// The frame was accepted by the controller.
    Sent,
    /// The transmit buffer is occupied; the frame was not taken.
    Busy,
}

/// Receive side: a FIFO the gateway drains once per cycle.
pub trait RxChannel {
    /// Number of frames currently queued.
    fn fill_level(&self) -> usize;
    /// Pop the oldest queued frame, `None` when the FIFO is empty.
    fn pop(&mut self) -> Option<CanFrame>;
}

/// Transmit side: a single non-blocking submission attempt.
pub trait TxChannel {
    /// Try to hand `frame` to the controller without waiting.
    fn try_send(&mut self, frame: &CanFrame) -> TxStatus;
}

impl<R: RxChannel + ?Sized> RxChannel for &mut R {
    fn fill_level(&self) -> usize {
        (**self).fill_level()
    }

    fn pop(&mut self) -> Option<CanFrame> {
        (**self).pop()
    }
}

impl<T: TxChannel + ?Sized> TxChannel for &mut T {
    fn try_send(&mut self, frame: &CanFrame) -> TxStatus {
        (**self).try_send(frame)
    }
}
