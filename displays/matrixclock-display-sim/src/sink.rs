//! Terminal stand-in for the LED matrix

use std::io::Write;

use matrixclock_display::{Frame, MatrixSink, HEIGHT};
use tracing::error;

/// Draws each frame as a grid of `#` (lit) and `.` (dark)
pub struct TerminalSink<W> {
    out: W,
    ansi: bool,
    drawn: u64,
}

impl<W: Write> TerminalSink<W> {
    /// With `ansi`, every frame after the first overwrites the previous
    /// one; otherwise frames are printed one below the other.
    pub fn new(out: W, ansi: bool) -> Self {
        Self {
            out,
            ansi,
            drawn: 0,
        }
    }

    pub fn frames_drawn(&self) -> u64 {
        self.drawn
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, frame: &Frame) -> std::io::Result<()> {
        if self.ansi {
            if self.drawn > 0 {
                write!(self.out, "\x1b[{}A", HEIGHT)?;
            }
            writeln!(self.out, "{frame}")?;
        } else {
            writeln!(self.out, "{frame}\n")?;
        }
        self.out.flush()
    }
}

impl<W: Write> MatrixSink for TerminalSink<W> {
    fn show(&mut self, frame: &Frame) {
        // The matrix has no way to report failure; a broken terminal is logged
        if let Err(e) = self.draw(frame) {
            error!(error = %e, "failed to draw frame");
            return;
        }
        self.drawn += 1;
    }
}
