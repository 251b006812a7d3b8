//! Readiness lifecycle of the analysis engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the process is in bringing up its analysis engine.
///
/// ```text
/// not_started → initializing → ready
/// ```
///
/// `Ready` is terminal. `Initializing` has no outgoing edge other than
/// `Ready`: a failed setup leaves the process initializing for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessState {
    NotStarted,
    Initializing,
    Ready,
}

impl ReadinessState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::NotStarted => &[Self::Initializing],
            Self::Initializing => &[Self::Ready],
            Self::Ready => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
        }
    }
}

impl fmt::Display for ReadinessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
