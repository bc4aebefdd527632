use log::debug;

use crate::ring::Ring;

pub type Pid = libc::pid_t;

/// Identifiers retained, the shell's own pid included.
pub const PID_CAPACITY: usize = 15;

/// Bounded log of launched child pids, seeded with the shell's own pid.
#[derive(Debug, Clone)]
pub struct PidRing {
    pids: Ring<Pid>,
}

impl PidRing {
    pub fn new(own_pid: Pid) -> Self {
        let mut pids = Ring::new(PID_CAPACITY);
        pids.push(own_pid);
        Self { pids }
    }

    /// Seeded with the pid of the running process.
    pub fn for_current_process() -> Self {
        Self::new(std::process::id() as Pid)
    }

    pub fn record(&mut self, pid: Pid) {
        if let Some(evicted) = self.pids.push(pid) {
            debug!("pid ring full, evicted {}", evicted);
        }
    }

    /// `(display_index, pid)` pairs, most recent first with display index 0.
    pub fn list(&self) -> impl Iterator<Item = (usize, Pid)> + '_ {
        self.pids.iter().rev().copied().enumerate()
    }

    pub fn latest(&self) -> Option<Pid> {
        self.pids.last().copied()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.pids.len()
    }
}
