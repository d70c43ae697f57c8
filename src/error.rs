//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (bitfield bounds, descriptor
//! validation, frame construction, transmission, gateway configuration).
//!
//! An unknown frame identifier is deliberately absent from this module: the
//! decoder reports it as `None`, which is a normal "ignore" outcome.
use embedded_can::StandardId;
use thiserror_no_std::Error;

//==================================================================================BITFIELD_ERROR
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised by the LSB0 bitfield codec.
pub enum BitFieldError {
    /// The requested field does not fit in the buffer, or its length is not in `1..=32`.
    /// Checked before any bit is touched.
    #[error(
        "Bitfield out of range -> start: {start_bit}, length: {bit_length}, available: {available}"
    )]
    OutOfRange {
        start_bit: usize,
        bit_length: u8,
        available: usize,
    },
}

//==================================================================================DESCRIPTOR_ERROR
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while validating a signal descriptor table.
pub enum DescriptorError {
    /// Signal names must be 1 to `MAX_SIGNAL_NAME_LEN` bytes long.
    #[error("Invalid name for signal {name:?}")]
    InvalidName { name: &'static str },
    /// Scale divisor must be finite and strictly positive.
    #[error("Invalid scale for signal {name}")]
    InvalidScale { name: &'static str },
    /// Two descriptors claim the same frame identifier.
    #[error("Duplicate frame identifier {id:#05X}")]
    DuplicateIdentifier { id: u16 },
}

//==================================================================================FRAME_ERROR
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors encountered while building a standard CAN frame.
pub enum FrameError {
    /// Identifier does not fit in 11 bits.
    #[error("Invalid standard identifier: {id:#X}")]
    InvalidIdentifier { id: u32 },
    /// Classic CAN payloads carry at most eight bytes.
    #[error("Payload too long -> asked: {asked}, max: 8")]
    PayloadTooLong { asked: usize },
}

//==================================================================================TRANSMIT_ERROR
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors encountered while handing a frame to the transmit channel.
pub enum TransmitError {
    /// The channel stayed busy for the whole retry budget. Recoverable: the
    /// caller skips this send and carries on.
    #[error("Channel saturated after {attempts} attempts")]
    ChannelSaturated { attempts: u32 },
}

//==================================================================================GATEWAY_ERROR
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while assembling a gateway context.
pub enum GatewayConfigError {
    /// A test signal refers to an identifier missing from the signal table.
    #[error("No descriptor for test signal {id:#05X}")]
    UnknownTestSignal { id: u16 },
    /// The fixed-capacity test signal list is full.
    #[error("Cannot register more than {max} test signals")]
    TooManyTestSignals { max: usize },
    /// The generate phase cadence must be at least one cycle.
    #[error("Transmit interval must be at least one cycle")]
    ZeroTxInterval,
}

impl GatewayConfigError {
    pub(crate) fn unknown(id: StandardId) -> Self {
        Self::UnknownTestSignal { id: id.as_raw() }
    }
}
