//! In-memory representation of a classic CAN data frame with a standard identifier.
use embedded_can::{Frame, Id, StandardId};

use crate::error::FrameError;
use crate::infra::codec::bits::PAYLOAD_LEN;
use crate::protocol::transport::can_id::expect_standard;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Raw frame as read from, or written to, the CAN channel.
/// Built fresh for every receive pop and every transmit; never retained.
pub struct CanFrame {
    /// 11-bit standard identifier.
    pub id: StandardId,
    /// Payload buffer. Classic CAN frames always provide eight bytes.
    pub data: [u8; PAYLOAD_LEN],
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
}

impl CanFrame {
    /// Full-length frame (DLC 8), the only shape the gateway transmits.
    pub const fn new(id: StandardId, data: [u8; PAYLOAD_LEN]) -> Self {
        Self {
            id,
            data,
            len: PAYLOAD_LEN,
        }
    }

    /// Frame from a shorter payload; missing bytes read as zero.
    pub fn from_slice(id: StandardId, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > PAYLOAD_LEN {
            return Err(FrameError::PayloadTooLong {
                asked: payload.len(),
            });
        }
        let mut data = [0u8; PAYLOAD_LEN];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id,
            data,
            len: payload.len(),
        })
    }

    /// Copy any `embedded_can` frame (e.g. from a HAL driver) into a gateway frame.
    pub fn from_frame<F: Frame>(frame: &F) -> Result<Self, FrameError> {
        let id = expect_standard(frame.id())?;
        Self::from_slice(id, frame.data())
    }

    /// Immutable view over the valid bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

impl Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        let id = expect_standard(id.into()).ok()?;
        Self::from_slice(id, data).ok()
    }

    /// Remote frames are not part of the gateway's traffic.
    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        false
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        Id::Standard(self.id)
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}
