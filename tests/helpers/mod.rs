/// Test doubles simulating the gateway's collaborators during integration tests.
use can_signal_gateway::protocol::transport::{
    can_frame::CanFrame,
    traits::{
        can_channel::{RxChannel, TxChannel, TxStatus},
        gateway_clock::GatewayClock,
        line_sink::LineSink,
    },
};
use embassy_time::Instant;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

#[allow(dead_code)]
/// In-memory CAN channel: what one side transmits, the other side receives.
pub struct MockCanChannel {
    tx: mpsc::UnboundedSender<CanFrame>,
    rx: mpsc::UnboundedReceiver<CanFrame>,
    /// Number of upcoming `try_send` calls answered with `Busy`.
    busy_for: Arc<AtomicU32>,
}

#[allow(dead_code)]
impl MockCanChannel {
    /// Construct a pair of interconnected channels (DUT ↔ host).
    pub fn create_pair() -> (Self, Self) {
        let (dut_tx, host_rx) = mpsc::unbounded_channel();
        let (host_tx, dut_rx) = mpsc::unbounded_channel();

        let dut = Self {
            tx: dut_tx,
            rx: dut_rx,
            busy_for: Arc::new(AtomicU32::new(0)),
        };
        let host = Self {
            tx: host_tx,
            rx: host_rx,
            busy_for: Arc::new(AtomicU32::new(0)),
        };
        (dut, host)
    }

    /// Handle controlling how many submissions are refused as `Busy`.
    pub fn busy_handle(&self) -> Arc<AtomicU32> {
        self.busy_for.clone()
    }

    /// Host side: put a frame on the wire.
    pub fn inject(&self, frame: CanFrame) {
        self.tx.send(frame).expect("peer channel dropped");
    }

    /// Host side: collect everything received so far.
    pub fn collect(&mut self) -> Vec<CanFrame> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.rx.try_recv() {
            frames.push(frame);
        }
        frames
    }
}

impl RxChannel for MockCanChannel {
    fn fill_level(&self) -> usize {
        self.rx.len()
    }

    fn pop(&mut self) -> Option<CanFrame> {
        self.rx.try_recv().ok()
    }
}

impl TxChannel for MockCanChannel {
    fn try_send(&mut self, frame: &CanFrame) -> TxStatus {
        let busy = self
            .busy_for
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if busy {
            return TxStatus::Busy;
        }
        match self.tx.send(frame.clone()) {
            Ok(()) => TxStatus::Sent,
            Err(_) => TxStatus::Busy,
        }
    }
}

#[allow(dead_code)]
#[derive(Clone, Default)]
/// Virtual clock: delays advance virtual time and yield to the tokio scheduler.
pub struct MockClock {
    now_ms: Arc<AtomicU64>,
}

#[allow(dead_code)]
impl MockClock {
    /// Virtual milliseconds elapsed so far.
    pub fn elapsed_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

impl GatewayClock for MockClock {
    fn now(&self) -> Instant {
        Instant::from_millis(self.now_ms.load(Ordering::SeqCst))
    }

    async fn delay_ms(&mut self, millis: u32) {
        self.now_ms.fetch_add(millis as u64, Ordering::SeqCst);
        tokio::task::yield_now().await;
    }
}

#[allow(dead_code)]
#[derive(Default)]
/// Line sink keeping every emitted line.
pub struct RecordingSink {
    pub lines: Vec<String>,
}

#[allow(dead_code)]
impl RecordingSink {
    /// Lines starting with `prefix`.
    pub fn lines_starting_with(&self, prefix: &str) -> Vec<&str> {
        self.lines
            .iter()
            .map(String::as_str)
            .filter(|line| line.starts_with(prefix))
            .collect()
    }
}

impl LineSink for RecordingSink {
    fn emit_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}
