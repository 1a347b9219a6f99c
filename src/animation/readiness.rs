/// Bounded wait for an element's embedded behavior.
///
/// A gated operation checks readiness once immediately and then once per retry timer. Each
/// failed check while attempts remain schedules another retry; a failed check with no attempts
/// left is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// Still waiting; `attempts_left` retries may follow.
    Pending {
        /// Retries still allowed after the current check.
        attempts_left: u32,
    },
    /// Behavior available; the gated operation may run.
    Ready,
    /// Retries exhausted.
    Failed,
}

impl Readiness {
    /// Fresh gate allowing `max_attempts` retries.
    pub fn new(max_attempts: u32) -> Self {
        Self::Pending {
            attempts_left: max_attempts,
        }
    }

    /// Fold one readiness check into the state. Terminal states are sticky.
    pub fn observe(self, ready: bool) -> Self {
        match self {
            Self::Pending { attempts_left } => {
                if ready {
                    Self::Ready
                } else if attempts_left == 0 {
                    Self::Failed
                } else {
                    Self::Pending {
                        attempts_left: attempts_left - 1,
                    }
                }
            }
            terminal => terminal,
        }
    }

    /// Return `true` for `Ready` and `Failed`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending { .. })
    }
}
