use serde::{Deserialize, Serialize};
use std::fmt;

/// What a philosopher is doing right now.
///
/// The cycle is strictly `Thinking -> WaitingFirst -> WaitingSecond -> Eating ->
/// Thinking`. No state is ever skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhilosopherState {
    #[default]
    Thinking,
    /// Blocked on the first fork in policy order. Holds nothing.
    WaitingFirst,
    /// Holds the first fork, blocked on the second.
    WaitingSecond,
    /// Holds both forks.
    Eating,
}

impl PhilosopherState {
    /// The only state this one may transition to.
    pub fn next(self) -> Self {
        match self {
            PhilosopherState::Thinking => PhilosopherState::WaitingFirst,
            PhilosopherState::WaitingFirst => PhilosopherState::WaitingSecond,
            PhilosopherState::WaitingSecond => PhilosopherState::Eating,
            PhilosopherState::Eating => PhilosopherState::Thinking,
        }
    }

    /// Number of forks held while in this state.
    pub fn forks_held(self) -> usize {
        match self {
            PhilosopherState::Thinking | PhilosopherState::WaitingFirst => 0,
            PhilosopherState::WaitingSecond => 1,
            PhilosopherState::Eating => 2,
        }
    }
}

impl fmt::Display for PhilosopherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhilosopherState::Thinking => "thinking",
            PhilosopherState::WaitingFirst => "waiting_first",
            PhilosopherState::WaitingSecond => "waiting_second",
            PhilosopherState::Eating => "eating",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_returns_to_thinking_after_four_steps() {
        let mut state = PhilosopherState::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(state);
            state = state.next();
        }
        assert_eq!(state, PhilosopherState::Thinking);
        assert_eq!(
            seen,
            vec![
                PhilosopherState::Thinking,
                PhilosopherState::WaitingFirst,
                PhilosopherState::WaitingSecond,
                PhilosopherState::Eating,
            ]
        );
    }

    #[test]
    fn test_forks_held_per_state() {
        assert_eq!(PhilosopherState::WaitingFirst.forks_held(), 0);
        assert_eq!(PhilosopherState::WaitingSecond.forks_held(), 1);
        assert_eq!(PhilosopherState::Eating.forks_held(), 2);
        assert_eq!(PhilosopherState::Eating.to_string(), "eating");
    }
}
