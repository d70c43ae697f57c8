//! Gateway configuration: loop cadence, self-test generator switch, report mode
//! and transmit retry bounds. Defaults reproduce the firmware's behavior.
use crate::error::GatewayConfigError;
use crate::protocol::transport::transmit::RetryPolicy;
use crate::protocol::transport::{
    DEFAULT_CAN_BITRATE, DEFAULT_CYCLE_PERIOD_MS, DEFAULT_TX_EVERY_CYCLES,
};

/// What happens to decoded samples and ignored identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportMode {
    /// Every sample and ignored frame produces a report line.
    Log,
    /// Frames are decoded and counted, nothing is printed.
    Discard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Idle delay between poll cycles (ms).
    pub cycle_period_ms: u32,
    /// The test generator runs when `tick % tx_every_cycles == 0`. Must be > 0.
    pub tx_every_cycles: u32,
    /// Enables the self-test transmit path.
    pub test_tx: bool,
    pub report: ReportMode,
    /// Bounds for each test frame submission.
    pub retry: RetryPolicy,
    /// Nominal bitrate, shown in the banner.
    pub can_bitrate: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            cycle_period_ms: DEFAULT_CYCLE_PERIOD_MS,
            tx_every_cycles: DEFAULT_TX_EVERY_CYCLES,
            test_tx: true,
            report: ReportMode::Log,
            retry: RetryPolicy::default(),
            can_bitrate: DEFAULT_CAN_BITRATE,
        }
    }
}

impl GatewayConfig {
    /// Start from the defaults.
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder {
            config: Self::default(),
        }
    }

    pub fn validate(&self) -> Result<(), GatewayConfigError> {
        if self.tx_every_cycles == 0 {
            return Err(GatewayConfigError::ZeroTxInterval);
        }
        Ok(())
    }
}

/// Fluent builder over [`GatewayConfig`].
#[derive(Debug)]
pub struct GatewayConfigBuilder {
    config: GatewayConfig,
}

impl GatewayConfigBuilder {
    pub fn with_cycle_period_ms(mut self, millis: u32) -> Self {
        self.config.cycle_period_ms = millis;
        self
    }

    pub fn with_tx_every_cycles(mut self, cycles: u32) -> Self {
        self.config.tx_every_cycles = cycles;
        self
    }

    /// Turn the self-test generator on or off.
    pub fn with_test_tx(mut self, enabled: bool) -> Self {
        self.config.test_tx = enabled;
        self
    }

    pub fn with_report(mut self, report: ReportMode) -> Self {
        self.config.report = report;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    pub fn with_can_bitrate(mut self, bitrate: u32) -> Self {
        self.config.can_bitrate = bitrate;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<GatewayConfig, GatewayConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
