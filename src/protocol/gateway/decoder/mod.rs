//! Receive path: resolve a frame's descriptor, extract the raw field, scale it
//! and classify it against the signal's warning threshold.
//!
//! Pure functions; printing is left to the caller.
use crate::core::{DecodedSample, SignalDescriptor};
use crate::infra::codec::bits::PAYLOAD_LEN;
use crate::protocol::signals::SignalTable;
use crate::protocol::transport::can_frame::CanFrame;

/// Decode a received frame.
///
/// Returns `None` when the identifier has no descriptor: such frames are ignored,
/// which is not an error.
pub fn decode(table: &SignalTable, frame: &CanFrame) -> Option<DecodedSample> {
    let descriptor = table.lookup(frame.id)?;
    Some(decode_payload(descriptor, &frame.data))
}

/// Decode a payload with a known descriptor.
pub fn decode_payload(
    descriptor: &'static SignalDescriptor,
    payload: &[u8; PAYLOAD_LEN],
) -> DecodedSample {
    let raw = descriptor.field.read(payload);
    let physical = descriptor.to_physical(raw);

    DecodedSample {
        frame_id: descriptor.frame_id,
        raw,
        physical,
        is_warning: descriptor.is_warning(physical),
        descriptor,
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
