use super::*;

const SWITCH: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 60 30">
<rect id="switch-track" x="0" y="0" width="60" height="30" rx="15" stroke="#999" fill="none"/>
<circle id="switch-indicator" cx="15" cy="15" r="12" fill="#fff"/>
</svg>"##;

fn config(state: SwitchState) -> SwitchConfig {
    SwitchConfig {
        state,
        transition_ms: 300.0,
        curve: TimingCurve::Ease,
        on_color: DEFAULT_ON_COLOR.to_owned(),
        off_color: DEFAULT_OFF_COLOR.to_owned(),
    }
}

#[test]
fn on_moves_indicator_to_far_end() {
    let mut doc = SvgDocument::parse(SWITCH).unwrap();
    assert!(apply_switch(&mut doc, &config(SwitchState::On)));
    let ind = doc.find_part(INDICATOR_PART).unwrap();
    // 60 - 24 - 2 * 3
    assert_eq!(doc.attr(ind, "transform"), Some("translate(30,0)"));
    assert_eq!(doc.style(ind, "fill").as_deref(), Some(DEFAULT_ON_COLOR));
    assert_eq!(
        doc.style(ind, "transition").as_deref(),
        Some("transform 300ms ease, fill 300ms ease")
    );
    let track = doc.find_part(TRACK_PART).unwrap();
    assert_eq!(doc.style(track, "stroke").as_deref(), Some(DEFAULT_ON_COLOR));
}

#[test]
fn off_returns_indicator_to_rest() {
    let mut doc = SvgDocument::parse(SWITCH).unwrap();
    apply_switch(&mut doc, &config(SwitchState::On));
    apply_switch(&mut doc, &config(SwitchState::Off));
    let ind = doc.find_part(INDICATOR_PART).unwrap();
    assert_eq!(doc.attr(ind, "transform"), Some("translate(0,0)"));
    assert_eq!(doc.style(ind, "fill").as_deref(), Some(DEFAULT_OFF_COLOR));
    assert_eq!(doc.attr(doc.root(), "data-sfx-switch"), Some("off"));
}

#[test]
fn missing_parts_leave_document_alone() {
    let src = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect id="track" width="10" height="5"/></svg>"#;
    let mut doc = SvgDocument::parse(src).unwrap();
    let before = doc.to_svg_string();
    assert!(!apply_switch(&mut doc, &config(SwitchState::On)));
    assert_eq!(doc.to_svg_string(), before);
}

#[test]
fn options_seed_the_record() {
    let opts = RenderOptions {
        switch_state: Some(SwitchState::On),
        animation_duration: Some("0.5s".to_owned()),
        timing_function: Some("ease-in-out".to_owned()),
        ..RenderOptions::default()
    };
    let cfg = SwitchConfig::from_options(&opts, 300.0);
    assert_eq!(cfg.state, SwitchState::On);
    assert_eq!(cfg.transition_ms, 500.0);
    assert_eq!(cfg.curve, TimingCurve::EaseInOut);

    let cfg = SwitchConfig::from_options(&RenderOptions::default(), 300.0);
    assert_eq!(cfg.state, SwitchState::Off);
    assert_eq!(cfg.transition_ms, 300.0);
    assert_eq!(cfg.on_color, DEFAULT_ON_COLOR);
}

#[test]
fn refresh_takes_new_state_and_timing_but_keeps_colors() {
    let mut cfg = config(SwitchState::Off);
    cfg.on_color = "#00aa00".to_owned();
    cfg.refresh(&RenderOptions {
        switch_state: Some(SwitchState::On),
        animation_duration: Some("0.9s".to_owned()),
        timing_function: Some("linear".to_owned()),
        ..RenderOptions::default()
    });
    assert_eq!(cfg.state, SwitchState::On);
    assert_eq!(cfg.transition_ms, 900.0);
    assert_eq!(cfg.curve, TimingCurve::Linear);
    assert_eq!(cfg.on_color, "#00aa00");

    cfg.refresh(&RenderOptions::default());
    assert_eq!(cfg.state, SwitchState::On);
    assert_eq!(cfg.transition_ms, 900.0);
}
