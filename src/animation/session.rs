use std::collections::HashMap;

use crate::{
    animation::{
        behavior::{Animatable, NullBehavior},
        ease::TimingCurve,
        gauge::{LiquidGauge, ProgressBar},
        readiness::Readiness,
        scheduler::TaskHandle,
    },
    foundation::core::{ElementId, SwitchState},
    style::options::{InitCallback, IterationCount},
    svg::document::SvgDocument,
};

/// Independent value-driven concerns of one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Concern {
    /// Liquid fill / drain.
    Liquid,
    /// Progress slide.
    Progress,
}

impl Concern {
    /// Both concerns, in cancellation order.
    pub const ALL: [Concern; 2] = [Concern::Liquid, Concern::Progress];
}

/// Identity of one value session; compared at the top of every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub(crate) u64);

/// Direction of a value sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SweepShape {
    /// 0 -> target.
    Rise,
    /// target -> 0.
    Fall,
}

/// Everything a gated value operation needs once the behavior is ready.
#[derive(Clone)]
pub(crate) struct ValueRequest {
    pub(crate) shape: SweepShape,
    pub(crate) target: Option<f64>,
    pub(crate) animated: bool,
    pub(crate) duration_ms: f64,
    pub(crate) iterations: IterationCount,
    pub(crate) on_init: Option<InitCallback>,
}

impl std::fmt::Debug for ValueRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueRequest")
            .field("shape", &self.shape)
            .field("target", &self.target)
            .field("animated", &self.animated)
            .field("duration_ms", &self.duration_ms)
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

/// Where pushed values land when the behavior does not take them.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Sink {
    Liquid(Option<LiquidGauge>),
    Progress(ProgressBar),
}

/// A running sweep loop.
#[derive(Clone, Debug)]
pub(crate) struct Sweep {
    pub(crate) from: f64,
    pub(crate) to: f64,
    pub(crate) duration_ms: f64,
    pub(crate) iterations: IterationCount,
    pub(crate) sink: Sink,
    pub(crate) started_ms: Option<f64>,
    pub(crate) completed: u32,
}

#[derive(Debug)]
pub(crate) enum Phase {
    Gated {
        readiness: Readiness,
        request: ValueRequest,
    },
    Running(Sweep),
}

/// The single outstanding session of one concern.
#[derive(Debug)]
pub(crate) struct ConcernSlot {
    pub(crate) session: SessionId,
    pub(crate) handle: Option<TaskHandle>,
    pub(crate) phase: Phase,
}

/// Embedded behavior lifecycle of one element.
pub(crate) enum BehaviorSlot {
    /// Asset declares no behavior; the null object stands in.
    Absent,
    /// Declared; activation timer pending.
    Activating { name: String },
    /// Declared but no factory produced an object.
    Unresolved { name: String },
    /// Active behavior object.
    Ready(Box<dyn Animatable>),
}

impl std::fmt::Debug for BehaviorSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Activating { name } => f.debug_struct("Activating").field("name", name).finish(),
            Self::Unresolved { name } => f.debug_struct("Unresolved").field("name", name).finish(),
            Self::Ready(_) => f.write_str("Ready(..)"),
        }
    }
}

impl BehaviorSlot {
    pub(crate) fn is_ready(&self) -> bool {
        matches!(self, Self::Absent | Self::Ready(_))
    }
}

/// Persistent switch record; survives re-render.
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchConfig {
    /// Current state.
    pub state: SwitchState,
    /// Transition duration in milliseconds.
    pub transition_ms: f64,
    /// Transition timing function.
    pub curve: TimingCurve,
    /// Color used while on.
    pub on_color: String,
    /// Color used while off.
    pub off_color: String,
}

/// Runtime state of one mounted element.
#[derive(Debug)]
pub(crate) struct ElementRuntime {
    pub(crate) liquid: Option<ConcernSlot>,
    pub(crate) progress: Option<ConcernSlot>,
    pub(crate) behavior: BehaviorSlot,
    pub(crate) variable: String,
    pub(crate) activation: Option<TaskHandle>,
    pub(crate) generation: u64,
    pub(crate) switch: Option<SwitchConfig>,
    null: NullBehavior,
}

impl ElementRuntime {
    pub(crate) fn new() -> Self {
        Self {
            liquid: None,
            progress: None,
            behavior: BehaviorSlot::Absent,
            variable: crate::animation::behavior::DEFAULT_VARIABLE.to_owned(),
            activation: None,
            generation: 0,
            switch: None,
            null: NullBehavior,
        }
    }

    pub(crate) fn slot_mut(&mut self, concern: Concern) -> &mut Option<ConcernSlot> {
        match concern {
            Concern::Liquid => &mut self.liquid,
            Concern::Progress => &mut self.progress,
        }
    }

    /// Slot of `concern` if it still belongs to `session`.
    pub(crate) fn live_slot(&mut self, concern: Concern, session: SessionId) -> Option<&mut ConcernSlot> {
        self.slot_mut(concern)
            .as_mut()
            .filter(|s| s.session == session)
    }

    /// Active behavior, or the null object.
    pub(crate) fn behavior_mut(&mut self) -> &mut dyn Animatable {
        match &mut self.behavior {
            BehaviorSlot::Ready(b) => b.as_mut(),
            _ => &mut self.null,
        }
    }

    /// Push through the uniform setter using the declared variable name.
    pub(crate) fn set_variable(&mut self, doc: &mut SvgDocument, value: f64) -> bool {
        let b: &mut dyn Animatable = match &mut self.behavior {
            BehaviorSlot::Ready(b) => b.as_mut(),
            _ => &mut self.null,
        };
        b.set_variable(doc, &self.variable, value)
    }

    pub(crate) fn behavior(&self) -> &dyn Animatable {
        match &self.behavior {
            BehaviorSlot::Ready(b) => b.as_ref(),
            _ => &self.null,
        }
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.liquid.is_some() || self.progress.is_some()
    }
}

/// Element id -> runtime record, owned by the engine.
#[derive(Debug, Default)]
pub(crate) struct Runtime {
    elements: HashMap<ElementId, ElementRuntime>,
    next_session: u64,
}

impl Runtime {
    pub(crate) fn new_session(&mut self) -> SessionId {
        self.next_session += 1;
        SessionId(self.next_session)
    }

    pub(crate) fn insert(&mut self, id: ElementId) -> &mut ElementRuntime {
        self.elements.entry(id).or_insert_with(ElementRuntime::new)
    }

    pub(crate) fn get(&self, id: ElementId) -> Option<&ElementRuntime> {
        self.elements.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementRuntime> {
        self.elements.get_mut(&id)
    }

    pub(crate) fn remove(&mut self, id: ElementId) -> Option<ElementRuntime> {
        self.elements.remove(&id)
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(ElementId) -> bool) -> usize {
        let before = self.elements.len();
        self.elements.retain(|id, _| keep(*id));
        before - self.elements.len()
    }
}
