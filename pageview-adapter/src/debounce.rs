/// Coalesces a burst of events into one trailing action.
///
/// The debouncer owns a single scheduled deadline on the caller's clock (`now_ms`). Scheduling
/// again replaces the pending deadline, so at most one invocation is ever pending. The owner
/// polls it from its tick and runs the action when [`Self::poll`] returns `true`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Debouncer {
    delay_ms: u64,
    deadline_ms: Option<u64>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline_ms: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Schedules the action `delay_ms` after `now_ms`, canceling any pending one.
    ///
    /// Returns `true` if a pending action was replaced.
    pub fn schedule(&mut self, now_ms: u64) -> bool {
        self.deadline_ms
            .replace(now_ms.saturating_add(self.delay_ms))
            .is_some()
    }

    /// Returns `true` if an action was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline_ms.take().is_some()
    }

    /// Returns `true` exactly once per schedule, at the first poll on or after the deadline.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}
