use super::*;

fn parse(body: &str) -> SvgDocument {
    SvgDocument::parse(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">{body}</svg>"#
    ))
    .unwrap()
}

#[test]
fn liquid_level_keeps_bottom_edge() {
    let mut doc = parse(r#"<rect id="tank-liquid" x="10" y="20" width="30" height="60"/>"#);
    let gauge = LiquidGauge::locate(&doc).unwrap();
    gauge.set_level(&mut doc, 50.0);
    let n = doc.find_part(LIQUID_PART).unwrap();
    assert_eq!(doc.attr(n, "height"), Some("30"));
    assert_eq!(doc.attr(n, "y"), Some("50"));

    gauge.set_level(&mut doc, 0.0);
    assert_eq!(doc.attr(n, "y"), Some("80"));
    gauge.set_level(&mut doc, 150.0);
    assert_eq!(doc.attr(n, "height"), Some("60"));
}

#[test]
fn relocated_liquid_keeps_authored_full_level() {
    let mut doc = parse(r#"<rect id="tank-liquid" x="10" y="20" width="30" height="60"/>"#);
    LiquidGauge::locate(&doc).unwrap().set_level(&mut doc, 10.0);
    let n = doc.find_part(LIQUID_PART).unwrap();
    assert_eq!(doc.attr(n, "height"), Some("6"));

    let again = LiquidGauge::locate(&doc).unwrap();
    again.set_level(&mut doc, 50.0);
    assert_eq!(doc.attr(n, "height"), Some("30"));
    assert_eq!(doc.attr(n, "y"), Some("50"));
    assert_eq!(doc.attr(n, FULL_HEIGHT_ATTR), Some("60"));
    assert_eq!(doc.attr(n, FULL_Y_ATTR), Some("20"));
}

#[test]
fn liquid_requires_a_rect() {
    let doc = parse(r#"<path data-part="liquid" d="M0 0 L10 10"/>"#);
    assert!(LiquidGauge::locate(&doc).is_none());
}

#[test]
fn horizontal_progress_and_label() {
    let mut doc = parse(
        r#"<rect data-part="track" x="5" y="40" width="90" height="20"/>
           <rect data-part="fill" x="5" y="40" width="0" height="20"/>
           <text data-part="label">0%</text>"#,
    );
    let bar = ProgressBar::locate(&doc).unwrap();
    assert!(bar.is_horizontal());
    bar.set_percent(&mut doc, 42.4);
    let fill = doc.find_part(FILL_PART).unwrap();
    let label = doc.find_part(LABEL_PART).unwrap();
    assert_eq!(doc.attr(fill, "width"), Some("38.16"));
    assert_eq!(doc.attr(fill, "x"), Some("5"));
    assert_eq!(doc.text(label), "42%");
}

#[test]
fn vertical_progress_grows_upwards() {
    let mut doc = parse(
        r#"<rect id="bar-track" x="40" y="0" width="20" height="100"/>
           <rect id="bar-fill" x="40" y="100" width="20" height="0"/>"#,
    );
    let bar = ProgressBar::locate(&doc).unwrap();
    assert!(!bar.is_horizontal());
    bar.set_percent(&mut doc, 25.0);
    let fill = doc.find_part(FILL_PART).unwrap();
    assert_eq!(doc.attr(fill, "height"), Some("25"));
    assert_eq!(doc.attr(fill, "y"), Some("75"));
}

#[test]
fn progress_needs_track_and_fill() {
    let doc = parse(r#"<rect data-part="fill" width="1" height="1"/>"#);
    assert!(ProgressBar::locate(&doc).is_none());
}
