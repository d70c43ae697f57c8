//! Self-test transmit path: encode swept physical values into the same layouts
//! the decoder reads, so the receive path can be exercised end-to-end without
//! external stimulus. A deployed gateway disables it through its configuration.
use embedded_can::StandardId;

use crate::core::SignalDescriptor;
use crate::infra::codec::bits::PAYLOAD_LEN;
use crate::protocol::signals::{CURRENT_ID, TEMPERATURE_ID, VOLTAGE_ID};
use crate::protocol::transport::can_frame::CanFrame;

/// Bounded, wrapping generator of test values for one signal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepState {
    pub current: f32,
    pub step: f32,
    pub min: f32,
    pub max: f32,
}

impl SweepState {
    pub const fn new(start: f32, step: f32, min: f32, max: f32) -> Self {
        Self {
            current: start,
            step,
            min,
            max,
        }
    }

    /// `current += step`, wrapping back to `min` once it passes `max`.
    pub fn advance(&mut self) {
        self.current += self.step;
        if self.current > self.max {
            self.current = self.min;
        }
    }
}

/// Voltage sweep: 12.00 V to 14.00 V by 0.02 V.
pub const VOLTAGE_SWEEP: SweepState = SweepState::new(12.0, 0.02, 12.0, 14.0);
/// Current sweep: 8.0 A to 12.0 A by 0.1 A (crosses the 10 A warning).
pub const CURRENT_SWEEP: SweepState = SweepState::new(8.0, 0.1, 8.0, 12.0);
/// Temperature sweep: 25.0 C to 35.0 C by 0.1 C.
pub const TEMPERATURE_SWEEP: SweepState = SweepState::new(25.0, 0.1, 25.0, 35.0);

/// A signal under test: which identifier to synthesize and its generator state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestSignal {
    pub frame_id: StandardId,
    pub sweep: SweepState,
}

impl TestSignal {
    pub const fn new(frame_id: StandardId, sweep: SweepState) -> Self {
        Self { frame_id, sweep }
    }
}

/// The gateway's test signals in transmit order: voltage, current, temperature.
pub const STANDARD_TEST_SIGNALS: [TestSignal; 3] = [
    TestSignal::new(VOLTAGE_ID, VOLTAGE_SWEEP),
    TestSignal::new(CURRENT_ID, CURRENT_SWEEP),
    TestSignal::new(TEMPERATURE_ID, TEMPERATURE_SWEEP),
];

/// Encode the sweep's current value into a fresh frame, then advance the sweep.
///
/// The raw value is `physical * scale` rounded half up (see
/// [`SignalDescriptor::to_raw`]); plain truncation would lose one LSB whenever the
/// accumulated sweep value sits just below a raw step. Raw values wider than the
/// field are truncated by the bit codec.
pub fn encode_next(descriptor: &SignalDescriptor, sweep: &mut SweepState) -> CanFrame {
    let mut data = [0u8; PAYLOAD_LEN];
    let raw = descriptor.to_raw(sweep.current);
    descriptor.field.write(&mut data, raw);
    sweep.advance();
    CanFrame::new(descriptor.frame_id, data)
}
