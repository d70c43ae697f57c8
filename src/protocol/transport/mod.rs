//! Transport layer of the gateway: standard CAN frames and identifiers, the
//! collaborator traits, the bounded transmit contract and an in-memory loopback.
//!
//! ## Timing constants
//!
//! The poll loop cadence defaults to the values the gateway firmware runs with.

pub mod can_frame;
pub mod can_id;
pub mod loopback;
pub mod traits;
pub mod transmit;

/// Idle delay between two poll cycles (ms). The loop's only suspension point.
pub const DEFAULT_CYCLE_PERIOD_MS: u32 = 10;

/// The test generator runs on every N-th poll cycle.
///
/// With [`DEFAULT_CYCLE_PERIOD_MS`] this gives one burst of test frames roughly
/// every 100 ms.
pub const DEFAULT_TX_EVERY_CYCLES: u32 = 10;

/// Nominal CAN bitrate of the bus (bit/s). Reported in the start-up banner only;
/// bit timing belongs to the hardware collaborator.
pub const DEFAULT_CAN_BITRATE: u32 = 500_000;
