//! Text rendering of gateway events for the [`LineSink`] collaborator.
//!
//! Lines are built on the stack in a [`heapless::String`]; a line that would
//! exceed [`REPORT_LINE_CAPACITY`] is cut short rather than failing.
//!
//! [`LineSink`]: crate::protocol::transport::traits::line_sink::LineSink
use core::fmt::Write;

use embedded_can::StandardId;
use heapless::String;

use crate::core::DecodedSample;
use crate::protocol::signals::SignalTable;

/// Maximum length of one report line, in bytes.
pub const REPORT_LINE_CAPACITY: usize = 96;

/// One rendered report line.
pub type ReportLine = String<REPORT_LINE_CAPACITY>;

/// `RX 0x400  VOLT=12.00 V  (raw=1200)`, suffixed with `  WARNING` when the
/// sample crossed its threshold.
pub fn sample_line(sample: &DecodedSample) -> ReportLine {
    let descriptor = sample.descriptor;
    let mut line = ReportLine::new();
    let _ = write!(
        line,
        "RX {:#05X}  {}={:.*} {}  (raw={})",
        sample.frame_id.as_raw(),
        descriptor.name,
        descriptor.precision as usize,
        sample.physical,
        descriptor.unit,
        sample.raw
    );
    if sample.is_warning {
        let _ = line.push_str("  WARNING");
    }
    line
}

/// `RX 0x111  [ignored]` for identifiers without descriptor.
pub fn ignored_line(frame_id: StandardId) -> ReportLine {
    let mut line = ReportLine::new();
    let _ = write!(line, "RX {:#05X}  [ignored]", frame_id.as_raw());
    line
}

/// `TX 0x400  [skipped: channel saturated after 1000 attempts]`.
pub fn skipped_line(frame_id: StandardId, attempts: u32) -> ReportLine {
    let mut line = ReportLine::new();
    let _ = write!(
        line,
        "TX {:#05X}  [skipped: channel saturated after {} attempts]",
        frame_id.as_raw(),
        attempts
    );
    line
}

/// First banner line: `CAN gateway ready. CAN=500000`.
pub fn ready_line(can_bitrate: u32) -> ReportLine {
    let mut line = ReportLine::new();
    let _ = write!(line, "CAN gateway ready. CAN={}", can_bitrate);
    line
}

const LISTENING_PREFIX: &str = "Listening IDs:";

/// Banner identifier list: `Listening IDs: 0x400 (VOLT), 0x500 (CURR), 0x600 (TEMP)`.
///
/// Entries never straddle two lines: when the next one would overflow
/// [`REPORT_LINE_CAPACITY`], the current line is handed to `emit` and a new
/// `Listening IDs:` line is started. Names are bounded by
/// [`MAX_SIGNAL_NAME_LEN`](crate::core::MAX_SIGNAL_NAME_LEN), so an entry always fits.
pub fn listening_lines(table: &SignalTable, mut emit: impl FnMut(&str)) {
    let mut line = ReportLine::new();
    let _ = line.push_str(LISTENING_PREFIX);
    let mut entries_on_line = 0usize;

    for descriptor in table.iter() {
        let mut entry = ReportLine::new();
        let _ = write!(
            entry,
            "{:#05X} ({})",
            descriptor.frame_id.as_raw(),
            descriptor.name
        );

        if entries_on_line > 0 && line.len() + 2 + entry.len() > REPORT_LINE_CAPACITY {
            emit(&line);
            line.clear();
            let _ = line.push_str(LISTENING_PREFIX);
            entries_on_line = 0;
        }

        let separator = if entries_on_line == 0 { " " } else { ", " };
        let _ = line.push_str(separator);
        let _ = line.push_str(&entry);
        entries_on_line += 1;
    }
    emit(&line);
}
