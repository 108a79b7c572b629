//! Command dispatch on the display processor
//!
//! Translates received commands into frames. The sink write is the only
//! side effect; a rejected command produces no write at all.

use matrixclock_protocol::DisplayCommand;

use crate::backend::MatrixSink;
use crate::renderer;

/// Why a command produced no frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// A time field was outside its valid range
    OutOfRange,
}

/// Stateless command to frame translator
pub struct Dispatcher<S> {
    sink: S,
}

impl<S: MatrixSink> Dispatcher<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Apply one command
    ///
    /// `UpdateTime` with any field out of range is rejected and leaves the
    /// matrix untouched. Callers on the receive path drop the error.
    pub fn handle(&mut self, command: DisplayCommand) -> Result<(), CommandError> {
        let frame = match command {
            DisplayCommand::UpdateTime {
                hour,
                minute,
                second,
            } => {
                let hour = u8::try_from(hour).map_err(|_| CommandError::OutOfRange)?;
                let minute = u8::try_from(minute).map_err(|_| CommandError::OutOfRange)?;
                let second = u8::try_from(second).map_err(|_| CommandError::OutOfRange)?;
                if second > 59 {
                    return Err(CommandError::OutOfRange);
                }
                renderer::render(hour, minute, second % 2 == 0)?
            }
            DisplayCommand::ClearMatrix => renderer::clear(),
        };

        self.sink.show(&frame);
        Ok(())
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;
    use crate::renderer::SEPARATOR;

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<Frame>,
    }

    impl MatrixSink for RecordingSink {
        fn show(&mut self, frame: &Frame) {
            self.frames.push(*frame);
        }
    }

    fn update(hour: i8, minute: i8, second: i8) -> DisplayCommand {
        DisplayCommand::UpdateTime {
            hour,
            minute,
            second,
        }
    }

    #[test]
    fn test_out_of_range_never_writes() {
        let mut dispatcher = Dispatcher::new(RecordingSink::default());

        for command in [
            update(24, 0, 0),
            update(-1, 0, 0),
            update(0, 60, 0),
            update(0, -1, 0),
            update(0, 0, 60),
            update(0, 0, -1),
            update(i8::MAX, i8::MAX, i8::MAX),
        ] {
            assert_eq!(dispatcher.handle(command), Err(CommandError::OutOfRange));
        }

        assert!(dispatcher.sink().frames.is_empty());
    }

    #[test]
    fn test_update_renders_with_even_second_blink() {
        let mut dispatcher = Dispatcher::new(RecordingSink::default());

        dispatcher.handle(update(14, 32, 10)).unwrap();
        dispatcher.handle(update(14, 32, 11)).unwrap();

        let frames = &dispatcher.sink().frames;
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], renderer::render(14, 32, true).unwrap());
        assert_eq!(frames[1], renderer::render(14, 32, false).unwrap());
        for (x, y) in SEPARATOR {
            assert!(frames[0].get(x, y));
            assert!(!frames[1].get(x, y));
        }
    }

    #[test]
    fn test_clear_always_writes_blank() {
        let mut dispatcher = Dispatcher::new(RecordingSink::default());

        dispatcher.handle(DisplayCommand::ClearMatrix).unwrap();
        dispatcher.handle(DisplayCommand::ClearMatrix).unwrap();

        let sink = dispatcher.into_sink();
        assert_eq!(sink.frames.len(), 2);
        assert!(sink.frames.iter().all(Frame::is_blank));
    }

    #[test]
    fn test_rejected_update_keeps_previous_frame() {
        let mut sink = RecordingSink::default();
        {
            let mut dispatcher = Dispatcher::new(&mut sink);
            dispatcher.handle(update(9, 5, 0)).unwrap();
            let _ = dispatcher.handle(update(9, 60, 0));
        }
        assert_eq!(sink.frames.len(), 1);
        assert_eq!(sink.frames[0], renderer::render(9, 5, true).unwrap());
    }
}
