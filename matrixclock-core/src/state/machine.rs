//! Run/sleep state machine and matrix latch

use super::events::Event;

/// Whether the clock is driving the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// Every tick sends the current time
    #[default]
    Running,
    /// The matrix is blanked once, then left alone
    Sleeping,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// Process an event and return the next state
    ///
    /// Both transitions are idempotent.
    pub fn transition(self, event: Event) -> Self {
        match event {
            Event::Start => RunState::Running,
            Event::Stop => RunState::Sleeping,
        }
    }
}

impl From<bool> for RunState {
    fn from(running: bool) -> Self {
        if running {
            RunState::Running
        } else {
            RunState::Sleeping
        }
    }
}

/// What the last emitted command left on the matrix
///
/// Starts as `Lit`: at boot the matrix content is unknown, so a clock that
/// starts asleep still clears it once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixState {
    #[default]
    Lit,
    Blank,
}

/// Command a tick should emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Emission {
    UpdateTime,
    ClearMatrix,
    Nothing,
}

impl MatrixState {
    /// Decide one tick's emission and the latch value after it
    ///
    /// A sleeping clock clears a lit matrix exactly once, then stays quiet
    /// until it runs again.
    pub fn step(self, run: RunState) -> (Emission, MatrixState) {
        match (run, self) {
            (RunState::Running, _) => (Emission::UpdateTime, MatrixState::Lit),
            (RunState::Sleeping, MatrixState::Lit) => (Emission::ClearMatrix, MatrixState::Blank),
            (RunState::Sleeping, MatrixState::Blank) => (Emission::Nothing, MatrixState::Blank),
        }
    }
}
