//! Gateway protocol components: the signal table, the CAN transport contracts,
//! and the gateway core (decoder, encoder, reporting, poll loop).
pub mod gateway;
pub mod signals;
pub mod transport;
