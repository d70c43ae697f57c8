//! Payload codecs. Only the LSB0 bitfield codec is needed by the gateway.
pub mod bits;
