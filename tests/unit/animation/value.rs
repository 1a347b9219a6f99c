use super::*;

use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::{behavior::Animatable, session::BehaviorSlot};

const TANK: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><rect id="liquid" x="0" y="0" width="100" height="100"/></svg>"#;

struct Harness {
    doc: SvgDocument,
    rt: ElementRuntime,
    scheduler: Scheduler<Task>,
    opts: EngineOpts,
    element: ElementId,
}

impl Harness {
    fn new(svg: &str) -> Self {
        Self {
            doc: SvgDocument::parse(svg).unwrap(),
            rt: ElementRuntime::new(),
            scheduler: Scheduler::new(),
            opts: EngineOpts::default(),
            element: ElementId(1),
        }
    }

    fn ctx(&mut self) -> SessionCtx<'_> {
        SessionCtx {
            element: self.element,
            doc: &mut self.doc,
            rt: &mut self.rt,
            scheduler: &mut self.scheduler,
            opts: &self.opts,
        }
    }

    fn tick(&mut self, now: f64) {
        for task in self.scheduler.advance(now) {
            let mut ctx = SessionCtx {
                element: self.element,
                doc: &mut self.doc,
                rt: &mut self.rt,
                scheduler: &mut self.scheduler,
                opts: &self.opts,
            };
            match task {
                Task::Frame {
                    concern, session, ..
                } => on_frame(&mut ctx, concern, session),
                Task::Settle {
                    concern, session, ..
                } => on_settle(&mut ctx, concern, session),
                Task::Retry {
                    concern, session, ..
                } => on_retry(&mut ctx, concern, session),
                Task::Activate { .. } => {}
            }
        }
    }

    fn liquid_height(&self) -> f64 {
        let n = self.doc.find_by_id("liquid").unwrap();
        self.doc.number_attr(n, "height").unwrap()
    }
}

fn request(target: Option<f64>, animated: bool, iterations: IterationCount) -> ValueRequest {
    ValueRequest {
        shape: SweepShape::Rise,
        target,
        animated,
        duration_ms: 1000.0,
        iterations,
        on_init: None,
    }
}

struct Recorder(Rc<RefCell<Vec<f64>>>);

impl Animatable for Recorder {
    fn set_variable(&mut self, _doc: &mut SvgDocument, name: &str, value: f64) -> bool {
        if name != "level" {
            return false;
        }
        self.0.borrow_mut().push(value);
        true
    }
}

#[test]
fn static_mode_sets_target_without_frames() {
    let mut h = Harness::new(TANK);
    let s = SessionId(1);
    start(&mut h.ctx(), Concern::Liquid, s, request(Some(40.0), false, IterationCount::Finite(1)));
    assert_eq!(h.liquid_height(), 40.0);
    assert_eq!(h.scheduler.frames_requested(), 0);
    assert!(!h.rt.is_animating());
}

#[test]
fn sweep_reaches_target_and_clears_slot() {
    let mut h = Harness::new(TANK);
    start(
        &mut h.ctx(),
        Concern::Liquid,
        SessionId(1),
        request(Some(80.0), true, IterationCount::Finite(1)),
    );
    h.tick(0.0);
    assert_eq!(h.liquid_height(), 0.0);
    h.tick(500.0);
    assert_eq!(h.liquid_height(), 40.0);
    h.tick(1000.0);
    assert_eq!(h.liquid_height(), 80.0);
    assert!(!h.rt.is_animating());
    assert!(h.scheduler.is_idle());
}

#[test]
fn finite_iterations_run_exactly_n_sweeps() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut h = Harness::new(TANK);
    h.rt.behavior = BehaviorSlot::Ready(Box::new(Recorder(Rc::clone(&log))));
    start(
        &mut h.ctx(),
        Concern::Liquid,
        SessionId(1),
        request(Some(50.0), true, IterationCount::Finite(3)),
    );
    let mut now = 0.0;
    while !h.scheduler.is_idle() && now < 60_000.0 {
        h.tick(now);
        now += 100.0;
    }
    let log = log.borrow();
    assert_eq!(log.iter().filter(|v| **v == 50.0).count(), 3);
    assert_eq!(log.iter().filter(|v| **v == 0.0).count(), 3);
    assert!(!h.rt.is_animating());
}

#[test]
fn infinite_iterations_continue_until_cancelled() {
    let mut h = Harness::new(TANK);
    start(
        &mut h.ctx(),
        Concern::Liquid,
        SessionId(1),
        request(Some(50.0), true, IterationCount::Infinite),
    );
    let mut now = 0.0;
    while now < 20_000.0 {
        h.tick(now);
        now += 100.0;
    }
    assert!(h.rt.is_animating());
    assert!(cancel(&mut h.rt, &mut h.scheduler, Concern::Liquid));
    assert!(!cancel(&mut h.rt, &mut h.scheduler, Concern::Liquid));
    assert!(h.scheduler.is_idle());
}

#[test]
fn stale_frames_are_ignored() {
    let mut h = Harness::new(TANK);
    start(
        &mut h.ctx(),
        Concern::Liquid,
        SessionId(1),
        request(Some(90.0), true, IterationCount::Finite(1)),
    );
    h.tick(0.0);
    h.tick(300.0);
    // A frame of session 1 delivered after session 2 took over must not write.
    start(
        &mut h.ctx(),
        Concern::Liquid,
        SessionId(2),
        request(Some(10.0), false, IterationCount::Finite(1)),
    );
    assert_eq!(h.liquid_height(), 10.0);
    on_frame(&mut h.ctx(), Concern::Liquid, SessionId(1));
    assert_eq!(h.liquid_height(), 10.0);
    assert_eq!(h.scheduler.pending_frames(), 0);
}

#[test]
fn later_sessions_scale_against_the_authored_level() {
    let mut h = Harness::new(TANK);
    start(
        &mut h.ctx(),
        Concern::Liquid,
        SessionId(1),
        request(Some(20.0), false, IterationCount::Finite(1)),
    );
    assert_eq!(h.liquid_height(), 20.0);
    start(
        &mut h.ctx(),
        Concern::Liquid,
        SessionId(2),
        request(Some(50.0), false, IterationCount::Finite(1)),
    );
    assert_eq!(h.liquid_height(), 50.0);
    start(
        &mut h.ctx(),
        Concern::Liquid,
        SessionId(3),
        request(Some(100.0), false, IterationCount::Finite(1)),
    );
    assert_eq!(h.liquid_height(), 100.0);
}

#[test]
fn unready_behavior_retries_then_fails() {
    let mut h = Harness::new(TANK);
    h.rt.behavior = BehaviorSlot::Unresolved {
        name: "missing".to_owned(),
    };
    start(
        &mut h.ctx(),
        Concern::Liquid,
        SessionId(1),
        request(Some(70.0), false, IterationCount::Finite(1)),
    );
    for i in 1..=3 {
        assert!(h.rt.is_animating());
        h.tick(100.0 * f64::from(i));
    }
    assert!(!h.rt.is_animating());
    assert_eq!(h.scheduler.timers_scheduled(), 3);
    assert_eq!(h.liquid_height(), 100.0);
}

#[test]
fn init_callback_fires_once_with_sentinel() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut h = Harness::new(TANK);
    let mut req = request(None, false, IterationCount::Finite(1));
    req.on_init = Some(Rc::new(move |v: f64| sink.borrow_mut().push(v)));
    start(&mut h.ctx(), Concern::Liquid, SessionId(1), req);
    assert_eq!(*seen.borrow(), vec![30.0]);
    assert_eq!(h.liquid_height(), 30.0);
}

#[test]
fn missing_parts_are_a_no_op() {
    let mut h = Harness::new(r#"<svg xmlns="http://www.w3.org/2000/svg"><circle r="4"/></svg>"#);
    let before = h.doc.to_svg_string();
    start(
        &mut h.ctx(),
        Concern::Progress,
        SessionId(1),
        request(Some(50.0), true, IterationCount::Finite(1)),
    );
    start(
        &mut h.ctx(),
        Concern::Liquid,
        SessionId(2),
        request(Some(50.0), true, IterationCount::Finite(1)),
    );
    assert_eq!(h.doc.to_svg_string(), before);
    assert!(!h.rt.is_animating());
    assert_eq!(h.scheduler.frames_requested(), 0);
}
