//! Outbound command channel to the display processor

use matrixclock_protocol::DisplayCommand;

/// Delivery failure on the command channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    /// The link is down or the receiving end has gone away
    Unavailable,
    /// The outbound queue is saturated; the command was dropped
    Full,
}

/// One-way, fire-and-forget link to the display
///
/// `send` must not block waiting on the display. There is no reply; a
/// failed send is reported and the next tick sends fresh state anyway.
pub trait CommandChannel {
    fn send(&mut self, command: DisplayCommand) -> Result<(), ChannelError>;
}

impl<C: CommandChannel + ?Sized> CommandChannel for &mut C {
    fn send(&mut self, command: DisplayCommand) -> Result<(), ChannelError> {
        (**self).send(command)
    }
}
