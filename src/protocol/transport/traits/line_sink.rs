//! Text output collaborator (typically a UART). Receives one report line at a
//! time, without terminator; the sink appends whatever line ending it needs.

pub trait LineSink {
    /// Emit one complete line of text.
    fn emit_line(&mut self, line: &str);
}

impl<L: LineSink + ?Sized> LineSink for &mut L {
    fn emit_line(&mut self, line: &str) {
        (**self).emit_line(line)
    }
}
