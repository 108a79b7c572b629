//! Events that trigger run state transitions

/// Requests to change the run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Show the time on the matrix
    Start,
    /// Blank the matrix and stop updating it
    Stop,
}

impl Event {
    /// Event that moves the machine to the given run flag
    pub fn for_running(running: bool) -> Self {
        if running {
            Event::Start
        } else {
            Event::Stop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_running() {
        assert_eq!(Event::for_running(true), Event::Start);
        assert_eq!(Event::for_running(false), Event::Stop);
    }
}
