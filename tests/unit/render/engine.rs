use super::*;

use std::{cell::RefCell, rc::Rc};

use crate::assets::store::MemorySource;

const TANK: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><rect id="liquid" x="0" y="0" width="100" height="100"/></svg>"##;

const SCRIPTED_TANK: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
<script data-behavior="liquid-level" data-default="55"></script>
<rect id="liquid" x="0" y="0" width="100" height="100"/>
</svg>"##;

const MYSTERY_TANK: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
<script data-behavior="not-registered"></script>
<rect id="liquid" x="0" y="0" width="100" height="100"/>
</svg>"##;

const SWITCH: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 60 30">
<rect id="switch-track" x="0" y="0" width="60" height="30" rx="15" stroke="#999" fill="none"/>
<circle id="switch-indicator" cx="15" cy="15" r="12" fill="#fff"/>
</svg>"##;

const ICON: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M2 2h20v20H2z"/></svg>"##;

fn engine() -> Engine {
    Engine::new(
        MemorySource::new()
            .with("tank.svg", TANK)
            .with("scripted.svg", SCRIPTED_TANK)
            .with("mystery.svg", MYSTERY_TANK)
            .with("switch.svg", SWITCH)
            .with("icon.svg", ICON)
            .with("broken.svg", "<svg><g></svg>"),
    )
}

fn liquid(kind: AnimationKind, target: Option<f64>, animated: bool) -> RenderOptions {
    RenderOptions {
        animation: Some(kind),
        target_value: target,
        animated: Some(animated),
        animation_duration: Some("1000ms".to_owned()),
        ..RenderOptions::default()
    }
}

fn liquid_height(engine: &Engine, el: ElementId) -> f64 {
    let doc = engine.document(el).unwrap();
    let n = doc.find_by_id("liquid").unwrap();
    doc.number_attr(n, "height").unwrap()
}

#[test]
fn static_fill_applies_target_without_frames() {
    let mut e = engine();
    let el = e.render("a", "tank.svg", liquid(AnimationKind::LiquidFill, Some(40.0), false));
    assert_eq!(liquid_height(&e, el), 40.0);
    assert_eq!(e.stats().frames_requested, 0);
    assert!(!e.is_animating(el));
}

#[test]
fn animated_fill_sweeps_to_target() {
    let mut e = engine();
    let el = e.render("a", "tank.svg", liquid(AnimationKind::LiquidFill, Some(80.0), true));
    assert!(e.is_animating(el));
    e.tick(0.0);
    assert_eq!(liquid_height(&e, el), 0.0);
    e.tick(1000.0);
    assert_eq!(liquid_height(&e, el), 80.0);
    assert!(!e.is_animating(el));
    assert_eq!(e.stats().pending_frames, 0);
}

#[test]
fn drain_starts_at_target_and_ends_empty() {
    let mut e = engine();
    let el = e.render("a", "tank.svg", liquid(AnimationKind::LiquidDrain, Some(60.0), true));
    e.tick(0.0);
    assert_eq!(liquid_height(&e, el), 60.0);
    e.tick(1000.0);
    assert_eq!(liquid_height(&e, el), 0.0);
}

#[test]
fn re_render_supersedes_running_session() {
    let mut e = engine();
    let el = e.render("a", "tank.svg", liquid(AnimationKind::LiquidFill, Some(80.0), true));
    e.tick(0.0);
    e.re_render(el, liquid(AnimationKind::LiquidFill, Some(20.0), false));
    assert_eq!(liquid_height(&e, el), 20.0);
    e.tick(500.0);
    e.tick(1000.0);
    assert_eq!(liquid_height(&e, el), 20.0);
    assert_eq!(e.element_in(&ContainerId::new("a")), Some(el));
}

#[test]
fn declared_behavior_gates_until_activated() {
    let mut e = engine();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let opts = liquid(AnimationKind::LiquidFill, None, false)
        .with_on_init(move |v: f64| sink.borrow_mut().push(v));
    let el = e.render("a", "scripted.svg", opts);
    assert!(!e.behavior_ready(el));
    assert!(e.is_animating(el));
    assert_eq!(liquid_height(&e, el), 100.0);

    e.tick(16.0);
    assert!(e.behavior_ready(el));
    e.tick(100.0);
    assert_eq!(liquid_height(&e, el), 55.0);
    assert_eq!(*seen.borrow(), vec![55.0]);
    assert!(!e.is_animating(el));
}

#[test]
fn unresolved_behavior_abandons_after_retries() {
    let mut e = engine();
    let el = e.render("a", "mystery.svg", liquid(AnimationKind::LiquidFill, Some(50.0), false));
    for t in [16.0, 100.0, 200.0] {
        e.tick(t);
        assert!(e.is_animating(el));
    }
    e.tick(300.0);
    assert!(!e.is_animating(el));
    assert!(!e.behavior_ready(el));
    assert_eq!(liquid_height(&e, el), 100.0);
    assert_eq!(e.stats().pending_timers, 0);
}

struct Recorder(Rc<RefCell<Vec<f64>>>);

impl Animatable for Recorder {
    fn set_variable(&mut self, _doc: &mut SvgDocument, name: &str, value: f64) -> bool {
        if name != DEFAULT_VARIABLE {
            return false;
        }
        self.0.borrow_mut().push(value);
        true
    }
}

#[test]
fn attached_behavior_receives_values_and_survives_re_render() {
    let mut e = engine();
    let el = e.render("a", "tank.svg", RenderOptions::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    assert!(e.attach_behavior(el, Box::new(Recorder(Rc::clone(&seen)))));

    e.re_render(el, liquid(AnimationKind::LiquidFill, Some(70.0), false));
    assert_eq!(*seen.borrow(), vec![70.0]);
    // The behavior handled the value, so the geometry was not touched.
    assert_eq!(liquid_height(&e, el), 100.0);
}

#[test]
fn container_holds_one_element() {
    let mut e = engine();
    let first = e.render("slot", "tank.svg", liquid(AnimationKind::LiquidFill, Some(80.0), true));
    let second = e.render("slot", "icon.svg", RenderOptions::default());
    assert_ne!(first, second);
    assert!(e.document(first).is_none());
    assert_eq!(e.element_in(&ContainerId::new("slot")), Some(second));
    assert_eq!(e.stats().mounted, 1);
    // The replaced element's frame must not run.
    assert_eq!(e.stats().pending_frames, 0);
    assert_eq!(e.tick(0.0), 0);
}

#[test]
fn unreadable_assets_mount_the_placeholder() {
    let mut e = engine();
    let missing = e.render("a", "nope.svg", RenderOptions::default());
    let broken = e.render("b", "broken.svg", RenderOptions::default());
    for el in [missing, broken] {
        let doc = e.document(el).unwrap();
        assert_eq!(doc.attr(doc.root(), "data-placeholder"), Some("true"));
    }
}

#[test]
fn switch_state_changes_reuse_the_record() {
    let mut e = engine();
    let opts = RenderOptions {
        animation: Some(AnimationKind::SwitchToggle),
        switch_state: Some(SwitchState::On),
        ..RenderOptions::default()
    };
    let el = e.render("a", "switch.svg", opts);
    let ind = |e: &Engine| {
        let doc = e.document(el).unwrap();
        let n = doc.find_by_id("switch-indicator").unwrap();
        doc.attr(n, "transform").map(str::to_owned)
    };
    assert_eq!(ind(&e).as_deref(), Some("translate(30,0)"));

    assert!(e.set_switch_state(el, SwitchState::Off, None, Some("#222222")));
    assert_eq!(ind(&e).as_deref(), Some("translate(0,0)"));
    let cfg = e.switch_config(el).unwrap();
    assert_eq!(cfg.state, SwitchState::Off);
    assert_eq!(cfg.off_color, "#222222");
    assert_eq!(cfg.transition_ms, 300.0);
}

#[test]
fn effects_export_with_embedded_stylesheet() {
    let mut e = engine();
    let opts = RenderOptions {
        animation: Some(AnimationKind::Rotate),
        ..RenderOptions::default()
    };
    let el = e.render("a", "icon.svg", opts);
    let out = e.to_svg_string(el).unwrap();
    assert!(out.contains("@keyframes sfx-rotate"));
    assert!(out.contains("animation: sfx-rotate"));
    // Export does not touch the live document.
    assert_eq!(e.document(el).unwrap().to_svg_string().matches("<style").count(), 0);
}

#[test]
fn sweep_drops_orphaned_filters() {
    let mut e = engine();
    let opts = RenderOptions {
        blur: Some(2.0),
        ..RenderOptions::default()
    };
    let el = e.render("a", "icon.svg", opts);
    let doc = e.document_mut(el).unwrap();
    let root = doc.root();
    assert!(doc.remove_attr(root, "filter").is_some());

    let report = e.sweep();
    assert_eq!(report.defs_removed, 1);
    assert_eq!(report.runtime_removed, 0);
    assert!(!e.to_svg_string(el).unwrap().contains("<filter"));
}

#[test]
fn unmount_cancels_outstanding_work() {
    let mut e = engine();
    let el = e.render("a", "scripted.svg", liquid(AnimationKind::LiquidFill, Some(50.0), true));
    assert!(e.stats().pending_timers > 0);
    assert!(e.unmount(el));
    assert!(!e.unmount(el));
    assert_eq!(e.stats().pending_timers, 0);
    assert_eq!(e.tick(1000.0), 0);
}

#[test]
fn invalid_opts_are_rejected() {
    let opts = EngineOpts {
        retry_delay_ms: -1.0,
        ..EngineOpts::default()
    };
    assert!(Engine::with_opts(MemorySource::new(), opts).is_err());
}
