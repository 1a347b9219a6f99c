pub(crate) mod behavior;
pub(crate) mod declarative;
pub(crate) mod ease;
pub(crate) mod flow;
pub(crate) mod gauge;
pub(crate) mod readiness;
pub(crate) mod registry;
pub(crate) mod scheduler;
pub(crate) mod session;
pub(crate) mod switch;
pub(crate) mod value;

use crate::foundation::core::ElementId;
use session::{Concern, SessionId};

/// Work item queued on the engine scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Task {
    /// Next frame of a running sweep.
    Frame {
        element: ElementId,
        concern: Concern,
        session: SessionId,
    },
    /// Settle pause between repetitions elapsed.
    Settle {
        element: ElementId,
        concern: Concern,
        session: SessionId,
    },
    /// Readiness retry.
    Retry {
        element: ElementId,
        concern: Concern,
        session: SessionId,
    },
    /// Embedded behavior activation for one mount generation.
    Activate { element: ElementId, generation: u64 },
}
