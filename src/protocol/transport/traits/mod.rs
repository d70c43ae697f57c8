//! Collaborator contracts used by the gateway core (CAN channels, clock, text output).
pub mod can_channel;
pub mod gateway_clock;
pub mod line_sink;
