//! Matrix hardware boundary
//!
//! The driver side of the display processor. Writes are synchronous and
//! treated as always succeeding; a broken matrix is outside what the clock
//! can recover from.

use crate::frame::Frame;

/// Something that can show a frame
pub trait MatrixSink {
    /// Replace everything on the matrix with `frame`
    fn show(&mut self, frame: &Frame);
}

impl<S: MatrixSink + ?Sized> MatrixSink for &mut S {
    fn show(&mut self, frame: &Frame) {
        (**self).show(frame)
    }
}
