//! Run lifecycle status.

use std::fmt;

/// Lifecycle of a single simulation run.
///
/// ```text
/// Initialized ──step──▶ Running ──t >= t_end──▶ Completed
///                          │
///                          └──instability──▶ Failed
/// ```
///
/// `Completed` and `Failed` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// Initial state built; no step requested yet.
    Initialized,
    /// At least one step has been taken and `t < t_end`.
    Running,
    /// Simulated time reached `t_end`.
    Completed,
    /// A step detected a numerical instability or exhausted its budget.
    Failed,
}

impl RunStatus {
    /// Whether no further steps are accepted.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized => write!(f, "initialized"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
