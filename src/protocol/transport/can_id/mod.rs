//! Creation and validation of the 11-bit standard identifiers carried by the
//! gateway's frames. Extended (29-bit) identifiers are not supported.
use embedded_can::{Id, StandardId};

use crate::error::FrameError;

/// Build a standard identifier in a `const` context.
///
/// Intended for identifier constants: an out-of-range value fails at compile time.
pub const fn standard_id(raw: u16) -> StandardId {
    match StandardId::new(raw) {
        Some(id) => id,
        None => panic!("standard CAN identifiers are 11 bits wide"),
    }
}

/// Validate a raw identifier coming from a driver or a test harness.
pub fn parse_standard_id(raw: u32) -> Result<StandardId, FrameError> {
    u16::try_from(raw)
        .ok()
        .and_then(StandardId::new)
        .ok_or(FrameError::InvalidIdentifier { id: raw })
}

/// Narrow a generic [`Id`] to a standard identifier.
pub fn expect_standard(id: Id) -> Result<StandardId, FrameError> {
    match id {
        Id::Standard(id) => Ok(id),
        Id::Extended(id) => Err(FrameError::InvalidIdentifier { id: id.as_raw() }),
    }
}
