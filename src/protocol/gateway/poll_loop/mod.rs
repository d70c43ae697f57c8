//! Gateway context and cooperative poll loop.
//!
//! [`Gateway`] owns everything the loop touches: the receive and transmit
//! channels, the clock, the line sink, the signal table, the test generators and
//! the cycle counter. Nothing lives in process-wide state.
//!
//! Each cycle runs two phases:
//!
//! * **drain**: decode every frame queued at entry and report it;
//! * **generate**: every `tx_every_cycles` ticks, encode and transmit one frame
//!   per test signal, in registration order.
//!
//! The cycle then suspends for `cycle_period_ms`. No single frame can stop the
//! loop: unknown identifiers are reported as ignored and a saturated channel only
//! skips that frame for the current burst.
use embedded_can::StandardId;
use heapless::Vec;

use crate::core::DecodedSample;
use crate::error::{GatewayConfigError, TransmitError};
use crate::protocol::gateway::config::{GatewayConfig, ReportMode};
use crate::protocol::gateway::decoder::decode;
use crate::protocol::gateway::encoder::{
    encode_next, SweepState, TestSignal, STANDARD_TEST_SIGNALS,
};
use crate::protocol::gateway::report;
use crate::protocol::signals::SignalTable;
use crate::protocol::transport::traits::{
    can_channel::{RxChannel, TxChannel},
    gateway_clock::GatewayClock,
    line_sink::LineSink,
};
use crate::protocol::transport::transmit::transmit;

/// Capacity of the test signal list.
pub const MAX_TEST_SIGNALS: usize = 8;

/// Running counters, for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GatewayStats {
    /// Frames popped from the receive channel.
    pub frames_received: u32,
    /// Frames that matched a descriptor.
    pub samples_decoded: u32,
    /// Frames without descriptor.
    pub frames_ignored: u32,
    /// Decoded samples that crossed their threshold.
    pub warnings: u32,
    /// Test frames accepted by the transmit channel.
    pub frames_sent: u32,
    /// Test frames dropped after the retry budget ran out.
    pub sends_skipped: u32,
}

/// Gateway context: collaborators plus the loop's own state.
pub struct Gateway<R, T, C, L> {
    rx: R,
    tx: T,
    clock: C,
    sink: L,
    table: SignalTable,
    config: GatewayConfig,
    test_signals: Vec<TestSignal, MAX_TEST_SIGNALS>,
    tick: u32,
    stats: GatewayStats,
}

impl<R, T, C, L> Gateway<R, T, C, L>
where
    R: RxChannel,
    T: TxChannel,
    C: GatewayClock,
    L: LineSink,
{
    /// Build a gateway without test signals.
    pub fn new(
        rx: R,
        tx: T,
        clock: C,
        sink: L,
        table: SignalTable,
        config: GatewayConfig,
    ) -> Result<Self, GatewayConfigError> {
        config.validate()?;
        Ok(Self {
            rx,
            tx,
            clock,
            sink,
            table,
            config,
            test_signals: Vec::new(),
            tick: 0,
            stats: GatewayStats::default(),
        })
    }

    /// Standard signal table with the voltage, current and temperature generators.
    pub fn with_standard_signals(
        rx: R,
        tx: T,
        clock: C,
        sink: L,
        config: GatewayConfig,
    ) -> Result<Self, GatewayConfigError> {
        let mut gateway = Self::new(rx, tx, clock, sink, SignalTable::standard(), config)?;
        for signal in STANDARD_TEST_SIGNALS {
            gateway.add_test_signal(signal.frame_id, signal.sweep)?;
        }
        Ok(gateway)
    }

    /// Register a generator. The identifier must be present in the signal table.
    pub fn add_test_signal(
        &mut self,
        frame_id: StandardId,
        sweep: SweepState,
    ) -> Result<(), GatewayConfigError> {
        if self.table.lookup(frame_id).is_none() {
            return Err(GatewayConfigError::unknown(frame_id));
        }
        self.test_signals
            .push(TestSignal::new(frame_id, sweep))
            .map_err(|_| GatewayConfigError::TooManyTestSignals {
                max: MAX_TEST_SIGNALS,
            })
    }

    /// Emit the start-up banner. The identifier list wraps over several lines
    /// when the table is too large for one.
    pub fn announce(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "Gateway ready, {} signals, test TX {}",
            self.table.len(),
            self.config.test_tx
        );
        self.sink.emit_line(&report::ready_line(self.config.can_bitrate));
        let sink = &mut self.sink;
        report::listening_lines(&self.table, |line| sink.emit_line(line));
    }

    /// Drain phase: decode the frames queued at entry. Returns how many were popped.
    ///
    /// Frames arriving while draining wait for the next cycle.
    pub fn drain(&mut self) -> usize {
        let pending = self.rx.fill_level();
        let mut handled = 0;

        while handled < pending {
            let Some(frame) = self.rx.pop() else {
                break;
            };
            handled += 1;
            self.stats.frames_received = self.stats.frames_received.saturating_add(1);

            match decode(&self.table, &frame) {
                Some(sample) => self.on_sample(&sample),
                None => self.on_ignored(frame.id),
            }
        }
        handled
    }

    /// Generate phase: one test frame per signal, in order. Returns how many were sent.
    pub fn generate(&mut self) -> usize {
        let mut sent = 0;

        for index in 0..self.test_signals.len() {
            let frame = {
                let signal = &mut self.test_signals[index];
                match self.table.lookup(signal.frame_id) {
                    Some(descriptor) => encode_next(descriptor, &mut signal.sweep),
                    None => continue,
                }
            };

            match transmit(&mut self.tx, &frame, &self.config.retry, &self.clock) {
                Ok(_) => {
                    sent += 1;
                    self.stats.frames_sent = self.stats.frames_sent.saturating_add(1);
                }
                Err(TransmitError::ChannelSaturated { attempts }) => {
                    self.stats.sends_skipped = self.stats.sends_skipped.saturating_add(1);
                    self.sink.emit_line(&report::skipped_line(frame.id, attempts));
                }
            }
        }
        sent
    }

    /// One cycle without the trailing delay: drain, tick, and generate on cadence.
    pub fn poll_cycle(&mut self) {
        self.drain();
        self.tick = self.tick.wrapping_add(1);
        if self.config.test_tx && self.tick % self.config.tx_every_cycles == 0 {
            #[cfg(feature = "defmt")]
            defmt::debug!("Tick {}: sending test frames", self.tick);
            self.generate();
        }
    }

    /// One full cycle, ending with the cooperative delay.
    pub async fn run_cycle(&mut self) {
        self.poll_cycle();
        self.clock.delay_ms(self.config.cycle_period_ms).await;
    }

    /// Run a bounded number of cycles.
    pub async fn run_cycles(&mut self, cycles: u32) {
        for _ in 0..cycles {
            self.run_cycle().await;
        }
    }

    /// Run forever.
    pub async fn run(&mut self) {
        loop {
            self.run_cycle().await;
        }
    }

    fn on_sample(&mut self, sample: &DecodedSample) {
        self.stats.samples_decoded = self.stats.samples_decoded.saturating_add(1);
        if sample.is_warning {
            self.stats.warnings = self.stats.warnings.saturating_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "{=str} warning: {} {=str} {} (raw={})",
                sample.descriptor.name,
                sample.physical,
                sample.descriptor.warn_comparison.symbol(),
                sample.descriptor.warn_threshold,
                sample.raw
            );
        }
        if self.config.report == ReportMode::Log {
            self.sink.emit_line(&report::sample_line(sample));
        }
    }

    fn on_ignored(&mut self, frame_id: StandardId) {
        self.stats.frames_ignored = self.stats.frames_ignored.saturating_add(1);
        #[cfg(feature = "defmt")]
        defmt::trace!("Ignoring frame {=u16:#X}", frame_id.as_raw());
        if self.config.report == ReportMode::Log {
            self.sink.emit_line(&report::ignored_line(frame_id));
        }
    }
}

impl<R, T, C, L> Gateway<R, T, C, L> {
    pub fn stats(&self) -> &GatewayStats {
        &self.stats
    }

    /// Number of completed poll cycles.
    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn table(&self) -> &SignalTable {
        &self.table
    }

    /// Registered generators, with their current sweep state.
    pub fn test_signals(&self) -> &[TestSignal] {
        &self.test_signals
    }

    pub fn sink(&self) -> &L {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut L {
        &mut self.sink
    }

    /// Give the collaborators back.
    pub fn release(self) -> (R, T, C, L) {
        (self.rx, self.tx, self.clock, self.sink)
    }
}
