//! Gateway core: receive-path decoding, self-test frame generation, report
//! lines and the cooperative poll loop tying them to the collaborators.
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod poll_loop;
pub mod report;
