//! Host demo: the gateway in self-test mode over an in-memory loopback bus.
//!
//! Test frames are synthesized every tenth cycle, looped back into the receive
//! path and printed as report lines. Run with
//! `cargo run --example loopback_gateway`.
use can_signal_gateway::{
    protocol::transport::{
        loopback::LoopbackBus,
        traits::{gateway_clock::GatewayClock, line_sink::LineSink},
    },
    Gateway, GatewayConfig,
};
use embassy_time::Instant;
use static_cell::StaticCell;

static BUS: StaticCell<LoopbackBus<16>> = StaticCell::new();

/// Wall clock backed by tokio timers.
struct TokioClock {
    origin: std::time::Instant,
}

impl GatewayClock for TokioClock {
    fn now(&self) -> Instant {
        Instant::from_micros(self.origin.elapsed().as_micros() as u64)
    }

    async fn delay_ms(&mut self, millis: u32) {
        tokio::time::sleep(std::time::Duration::from_millis(millis as u64)).await;
    }
}

/// Prints each report line on stdout.
struct StdoutSink;

impl LineSink for StdoutSink {
    fn emit_line(&mut self, line: &str) {
        println!("{line}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bus: &'static LoopbackBus<16> = BUS.init(LoopbackBus::new());
    let clock = TokioClock {
        origin: std::time::Instant::now(),
    };

    let mut gateway =
        Gateway::with_standard_signals(bus, bus, clock, StdoutSink, GatewayConfig::default())
            .map_err(|e| format!("invalid gateway configuration: {e}"))?;

    gateway.announce();
    // Five seconds of traffic: 50 bursts of three frames.
    gateway.run_cycles(501).await;

    let stats = gateway.stats();
    println!(
        "received={} decoded={} ignored={} warnings={} sent={} skipped={}",
        stats.frames_received,
        stats.samples_decoded,
        stats.frames_ignored,
        stats.warnings,
        stats.frames_sent,
        stats.sends_skipped
    );
    Ok(())
}
