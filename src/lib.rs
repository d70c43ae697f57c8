//! `can-signal-gateway` library: decode fixed-layout signals out of classic CAN
//! frames, classify them against per-signal warning thresholds, and synthesize
//! self-test frames with the same layouts, in a `no_std` environment.
//! The crate exposes the bit codec infrastructure, the signal descriptor model,
//! the collaborator traits, and the cooperative gateway loop.
#![no_std]
//==================================================================================
/// Signal descriptor contract shared by the decode and encode paths.
pub mod core;
/// Error taxonomy: bitfield bounds, descriptor validation, frame construction,
/// transmission and gateway configuration.
pub mod error;
/// LSB0 bitfield codec over fixed-size payloads.
pub mod infra;
/// Signal table, CAN transport contracts and the gateway core.
pub mod protocol;
//==================================================================================

pub use crate::core::{DecodedSample, SignalDescriptor, WarnComparison};
pub use crate::protocol::gateway::config::{GatewayConfig, ReportMode};
pub use crate::protocol::gateway::poll_loop::{Gateway, GatewayStats};
pub use crate::protocol::signals::SignalTable;
