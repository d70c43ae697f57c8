//! Gateway scenarios against a simulated CAN channel: a host node injects
//! frames, the gateway decodes and reports them, and test frames flow back.
mod helpers;

use can_signal_gateway::{
    infra::codec::bits::read_field,
    protocol::{
        gateway::{
            decoder::decode,
            encoder::{encode_next, SweepState},
        },
        signals::{CURRENT, VOLTAGE},
        transport::{can_frame::CanFrame, can_id::standard_id, transmit::RetryPolicy},
    },
    Gateway, GatewayConfig, ReportMode, SignalTable,
};
use helpers::{MockCanChannel, MockClock, RecordingSink};
use std::sync::atomic::Ordering;
use tokio::time::Duration;

fn listening_gateway(
    dut: MockCanChannel,
    dut_tx: MockCanChannel,
) -> Gateway<MockCanChannel, MockCanChannel, MockClock, RecordingSink> {
    let config = GatewayConfig::builder().with_test_tx(false).build().unwrap();
    Gateway::with_standard_signals(dut, dut_tx, MockClock::default(), RecordingSink::default(), config)
        .unwrap()
}

#[tokio::test]
async fn test_encode_decode_end_to_end() {
    // Host encodes with the shared layouts, the gateway decodes what arrives.
    let (dut_rx, host) = MockCanChannel::create_pair();
    let (dut_tx, _sink_host) = MockCanChannel::create_pair();
    let mut gateway = listening_gateway(dut_rx, dut_tx);

    let mut voltage = SweepState::new(12.0, 0.02, 12.0, 14.0);
    let volt_frame = encode_next(&VOLTAGE, &mut voltage);
    assert_eq!(read_field(&volt_frame.data, 6, 12).unwrap(), 1200);

    let mut current = SweepState::new(10.0, 0.1, 8.0, 12.0);
    let curr_frame = encode_next(&CURRENT, &mut current);
    assert_eq!(read_field(&curr_frame.data, 16, 8).unwrap(), 100);

    host.inject(volt_frame);
    host.inject(curr_frame);
    host.inject(CanFrame::new(standard_id(0x111), [0xEE; 8]));

    gateway.run_cycles(1).await;

    assert_eq!(
        gateway.sink().lines,
        [
            "RX 0x400  VOLT=12.00 V  (raw=1200)",
            "RX 0x500  CURR=10.0 A  (raw=100)  WARNING",
            "RX 0x111  [ignored]",
        ]
    );
    let stats = gateway.stats();
    assert_eq!(stats.samples_decoded, 2);
    assert_eq!(stats.warnings, 1);
    assert_eq!(stats.frames_ignored, 1);
}

#[tokio::test]
async fn test_test_frames_reach_the_bus() {
    // Default cadence: the first burst leaves on the tenth cycle, after 90 ms of idling.
    let (dut_rx, _rx_host) = MockCanChannel::create_pair();
    let (dut_tx, mut bus) = MockCanChannel::create_pair();
    let clock = MockClock::default();
    let mut gateway = Gateway::with_standard_signals(
        dut_rx,
        dut_tx,
        clock.clone(),
        RecordingSink::default(),
        GatewayConfig::default(),
    )
    .unwrap();

    gateway.run_cycles(9).await;
    assert!(bus.collect().is_empty());

    gateway.run_cycles(1).await;
    assert_eq!(clock.elapsed_ms(), 100);

    let frames = bus.collect();
    let ids: Vec<u16> = frames.iter().map(|frame| frame.id.as_raw()).collect();
    assert_eq!(ids, [0x400, 0x500, 0x600]);

    let table = SignalTable::standard();
    let physical: Vec<f32> = frames
        .iter()
        .map(|frame| decode(&table, frame).unwrap().physical)
        .collect();
    assert_eq!(physical, [12.0, 8.0, 25.0]);
}

#[tokio::test]
async fn test_transient_busy_is_retried() {
    // A few busy answers are absorbed by the retry budget.
    let (dut_rx, _rx_host) = MockCanChannel::create_pair();
    let (dut_tx, mut bus) = MockCanChannel::create_pair();
    let busy = dut_tx.busy_handle();
    let config = GatewayConfig::builder().with_tx_every_cycles(1).build().unwrap();
    let mut gateway = Gateway::with_standard_signals(
        dut_rx,
        dut_tx,
        MockClock::default(),
        RecordingSink::default(),
        config,
    )
    .unwrap();

    busy.store(5, Ordering::SeqCst);
    gateway.run_cycles(1).await;

    assert_eq!(bus.collect().len(), 3);
    assert_eq!(gateway.stats().frames_sent, 3);
    assert_eq!(gateway.stats().sends_skipped, 0);
}

#[tokio::test]
async fn test_saturated_bus_keeps_loop_alive() {
    // Sustained contention: every frame is skipped, the loop keeps cycling and draining.
    let (dut_rx, host) = MockCanChannel::create_pair();
    let (dut_tx, mut bus) = MockCanChannel::create_pair();
    let busy = dut_tx.busy_handle();
    let config = GatewayConfig::builder()
        .with_tx_every_cycles(1)
        .with_retry(RetryPolicy::attempts(50))
        .build()
        .unwrap();
    let mut gateway = Gateway::with_standard_signals(
        dut_rx,
        dut_tx,
        MockClock::default(),
        RecordingSink::default(),
        config,
    )
    .unwrap();

    busy.store(u32::MAX, Ordering::SeqCst);
    gateway.run_cycles(2).await;

    assert!(bus.collect().is_empty());
    assert_eq!(gateway.stats().sends_skipped, 6);
    assert_eq!(
        gateway.sink().lines_starting_with("TX 0x600"),
        [
            "TX 0x600  [skipped: channel saturated after 50 attempts]",
            "TX 0x600  [skipped: channel saturated after 50 attempts]",
        ]
    );

    host.inject(CanFrame::new(standard_id(0x222), [0; 8]));
    gateway.run_cycles(1).await;
    assert_eq!(gateway.tick(), 3);
    assert_eq!(gateway.stats().frames_ignored, 1);
}

#[tokio::test]
async fn test_discard_mode_counts_silently() {
    let (dut_rx, host) = MockCanChannel::create_pair();
    let (dut_tx, _bus) = MockCanChannel::create_pair();
    let config = GatewayConfig::builder()
        .with_test_tx(false)
        .with_report(ReportMode::Discard)
        .build()
        .unwrap();
    let mut gateway = Gateway::with_standard_signals(
        dut_rx,
        dut_tx,
        MockClock::default(),
        RecordingSink::default(),
        config,
    )
    .unwrap();

    let mut voltage = SweepState::new(15.0, 0.0, 12.0, 16.0);
    host.inject(encode_next(&VOLTAGE, &mut voltage));
    gateway.run_cycles(1).await;

    assert!(gateway.sink().lines.is_empty());
    assert_eq!(gateway.stats().warnings, 1);
}

#[tokio::test]
async fn test_run_forever_until_cancelled() {
    // `run` never returns on its own; dropping the future is the only way out.
    let (dut_rx, _rx_host) = MockCanChannel::create_pair();
    let (dut_tx, _bus) = MockCanChannel::create_pair();
    let mut gateway = Gateway::with_standard_signals(
        dut_rx,
        dut_tx,
        MockClock::default(),
        RecordingSink::default(),
        GatewayConfig::default(),
    )
    .unwrap();

    let outcome = tokio::time::timeout(Duration::from_millis(20), gateway.run()).await;
    assert!(outcome.is_err());
    assert!(gateway.tick() > 0);
}
