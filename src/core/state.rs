use crate::input::history::History;
use crate::process::{Pid, PidRing};

/// Everything that survives from one loop iteration to the next.
#[derive(Debug, Clone)]
pub struct ShellState {
    pub history: History,
    pub pids: PidRing,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellState {
    pub fn new() -> Self {
        Self {
            history: History::new(),
            pids: PidRing::for_current_process(),
        }
    }

    /// State seeded with a fixed shell pid.
    pub fn with_pid(own_pid: Pid) -> Self {
        Self {
            history: History::new(),
            pids: PidRing::new(own_pid),
        }
    }
}
