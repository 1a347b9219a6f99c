//! Value-driven sessions: liquid fill/drain and progress slide.
//!
//! Every operation goes through the same path: cancel whatever both concerns of the element
//! have outstanding, wait (bounded) for the embedded behavior, resolve the target, then either
//! set it once or run the sweep loop one frame at a time.

use crate::{
    animation::{
        Task,
        gauge::{LiquidGauge, ProgressBar},
        readiness::Readiness,
        scheduler::Scheduler,
        session::{
            BehaviorSlot, Concern, ConcernSlot, ElementRuntime, Phase, SessionId, Sink, Sweep, SweepShape,
            ValueRequest,
        },
    },
    foundation::{core::ElementId, math::lerp},
    render::config::EngineOpts,
    style::options::IterationCount,
    svg::document::SvgDocument,
};

/// Borrowed view of everything a session step touches.
pub(crate) struct SessionCtx<'a> {
    pub(crate) element: ElementId,
    pub(crate) doc: &'a mut SvgDocument,
    pub(crate) rt: &'a mut ElementRuntime,
    pub(crate) scheduler: &'a mut Scheduler<Task>,
    pub(crate) opts: &'a EngineOpts,
}

/// Drop the outstanding session of `concern`. Safe to call when nothing runs.
pub(crate) fn cancel(
    rt: &mut ElementRuntime,
    scheduler: &mut Scheduler<Task>,
    concern: Concern,
) -> bool {
    let Some(slot) = rt.slot_mut(concern).take() else {
        return false;
    };
    if let Some(h) = slot.handle {
        scheduler.cancel(h);
    }
    true
}

/// Cancel both concerns.
pub(crate) fn cancel_all(rt: &mut ElementRuntime, scheduler: &mut Scheduler<Task>) {
    for concern in Concern::ALL {
        cancel(rt, scheduler, concern);
    }
}

/// Start a value operation as `session`, superseding anything outstanding on the element.
pub(crate) fn start(
    ctx: &mut SessionCtx<'_>,
    concern: Concern,
    session: SessionId,
    request: ValueRequest,
) {
    cancel_all(ctx.rt, ctx.scheduler);
    tracing::debug!(
        element = %ctx.element,
        ?concern,
        session = session.0,
        animated = request.animated,
        "value session requested"
    );
    *ctx.rt.slot_mut(concern) = Some(ConcernSlot {
        session,
        handle: None,
        phase: Phase::Gated {
            readiness: Readiness::new(ctx.opts.readiness_retries),
            request,
        },
    });
    check_gate(ctx, concern, session);
}

/// Retry timer fired.
pub(crate) fn on_retry(ctx: &mut SessionCtx<'_>, concern: Concern, session: SessionId) {
    check_gate(ctx, concern, session);
}

fn check_gate(ctx: &mut SessionCtx<'_>, concern: Concern, session: SessionId) {
    let ready = ctx.rt.behavior.is_ready();
    let Some(slot) = ctx.rt.live_slot(concern, session) else {
        return;
    };
    slot.handle = None;
    let Phase::Gated { readiness, .. } = &mut slot.phase else {
        return;
    };

    let state = readiness.observe(ready);
    *readiness = state;
    match state {
        Readiness::Ready => open(ctx, concern, session),
        Readiness::Pending { attempts_left } => {
            tracing::debug!(
                element = %ctx.element,
                ?concern,
                attempts_left,
                "embedded behavior not ready, retrying"
            );
            slot.handle = Some(ctx.scheduler.set_timeout(
                ctx.opts.retry_delay_ms,
                Task::Retry {
                    element: ctx.element,
                    concern,
                    session,
                },
            ));
        }
        Readiness::Failed => {
            *ctx.rt.slot_mut(concern) = None;
            tracing::error!(
                element = %ctx.element,
                ?concern,
                retries = ctx.opts.readiness_retries,
                "embedded behavior never became ready, animation abandoned"
            );
        }
    }
}

/// Gate passed: resolve sink and target, then run.
fn open(ctx: &mut SessionCtx<'_>, concern: Concern, session: SessionId) {
    let Some(slot) = ctx.rt.live_slot(concern, session) else {
        return;
    };
    let Phase::Gated { request, .. } = &slot.phase else {
        return;
    };
    let request = request.clone();

    let sink = match concern {
        Concern::Liquid => {
            let gauge = LiquidGauge::locate(ctx.doc);
            if gauge.is_none() && !matches!(ctx.rt.behavior, BehaviorSlot::Ready(_)) {
                *ctx.rt.slot_mut(concern) = None;
                tracing::warn!(
                    element = %ctx.element,
                    "liquid animation needs a behavior or a rect 'liquid' part; nothing to animate"
                );
                return;
            }
            Sink::Liquid(gauge)
        }
        Concern::Progress => match ProgressBar::locate(ctx.doc) {
            Some(bar) => Sink::Progress(bar),
            None => {
                *ctx.rt.slot_mut(concern) = None;
                tracing::warn!(
                    element = %ctx.element,
                    "progress animation needs 'track' and rect 'fill' parts; nothing to animate"
                );
                return;
            }
        },
    };

    let target = match request.target {
        Some(v) => v.clamp(0.0, 100.0),
        None => {
            let v = ctx
                .rt
                .behavior()
                .default_value(ctx.doc)
                .unwrap_or(ctx.opts.default_value)
                .clamp(0.0, 100.0);
            if let Some(cb) = &request.on_init {
                cb(v);
            }
            v
        }
    };

    if !request.animated {
        push(ctx.doc, ctx.rt, sink, target);
        *ctx.rt.slot_mut(concern) = None;
        tracing::debug!(element = %ctx.element, ?concern, target, "static value applied");
        return;
    }

    let (from, to) = match request.shape {
        SweepShape::Rise => (0.0, target),
        SweepShape::Fall => (target, 0.0),
    };
    let handle = ctx.scheduler.request_frame(Task::Frame {
        element: ctx.element,
        concern,
        session,
    });
    if let Some(slot) = ctx.rt.live_slot(concern, session) {
        slot.handle = Some(handle);
        slot.phase = Phase::Running(Sweep {
            from,
            to,
            duration_ms: request.duration_ms.max(1.0),
            iterations: request.iterations,
            sink,
            started_ms: None,
            completed: 0,
        });
    }
}

enum Next {
    Frame,
    Settle,
    Finish,
}

/// One frame of a running sweep.
pub(crate) fn on_frame(ctx: &mut SessionCtx<'_>, concern: Concern, session: SessionId) {
    let now = ctx.scheduler.now_ms();
    let ease = ctx.opts.value_ease;

    // Stale frames of superseded sessions stop here.
    let Some(slot) = ctx.rt.live_slot(concern, session) else {
        return;
    };
    slot.handle = None;
    let Phase::Running(sweep) = &mut slot.phase else {
        return;
    };

    let (value, next) = match sweep.started_ms {
        None => {
            sweep.started_ms = Some(now);
            (sweep.from, Next::Frame)
        }
        Some(start) => {
            let t = ((now - start) / sweep.duration_ms).clamp(0.0, 1.0);
            let value = lerp(sweep.from, sweep.to, ease.apply(t));
            if t < 1.0 {
                (value, Next::Frame)
            } else {
                sweep.completed += 1;
                let done = match sweep.iterations {
                    IterationCount::Finite(n) => sweep.completed >= n.max(1),
                    IterationCount::Infinite => false,
                };
                (value, if done { Next::Finish } else { Next::Settle })
            }
        }
    };
    let sink = sweep.sink;

    push(ctx.doc, ctx.rt, sink, value);

    match next {
        Next::Frame => {
            let h = ctx.scheduler.request_frame(Task::Frame {
                element: ctx.element,
                concern,
                session,
            });
            if let Some(slot) = ctx.rt.live_slot(concern, session) {
                slot.handle = Some(h);
            }
        }
        Next::Settle => {
            let h = ctx.scheduler.set_timeout(
                ctx.opts.settle_delay_ms,
                Task::Settle {
                    element: ctx.element,
                    concern,
                    session,
                },
            );
            if let Some(slot) = ctx.rt.live_slot(concern, session) {
                slot.handle = Some(h);
            }
        }
        Next::Finish => {
            *ctx.rt.slot_mut(concern) = None;
            tracing::debug!(element = %ctx.element, ?concern, session = session.0, "value session complete");
        }
    }
}

/// Settle pause elapsed: begin the next repetition from its start value.
pub(crate) fn on_settle(ctx: &mut SessionCtx<'_>, concern: Concern, session: SessionId) {
    let Some(slot) = ctx.rt.live_slot(concern, session) else {
        return;
    };
    let Phase::Running(sweep) = &mut slot.phase else {
        return;
    };
    sweep.started_ms = None;
    slot.handle = Some(ctx.scheduler.request_frame(Task::Frame {
        element: ctx.element,
        concern,
        session,
    }));
}

/// Deliver a value: uniform setter first, then the concern updater, then part geometry.
fn push(doc: &mut SvgDocument, rt: &mut ElementRuntime, sink: Sink, value: f64) {
    match sink {
        Sink::Liquid(gauge) => {
            if rt.set_variable(doc, value) || rt.behavior_mut().update_liquid(doc, value) {
                return;
            }
            if let Some(g) = gauge {
                g.set_level(doc, value);
            }
        }
        Sink::Progress(bar) => {
            if !rt.behavior_mut().update_progress(doc, value) {
                bar.set_percent(doc, value);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
