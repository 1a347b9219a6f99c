use super::*;

use crate::{
    classify::classify,
    style::options::{AnimationKind, DropShadow, GradientSpec, GradientType},
};

const ICON: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
<path id="plain" d="M0 0H10V10Z"/>
<path id="brand" d="M12 0H22V10Z" fill="#ff5722"/>
<circle id="hollow" cx="12" cy="18" r="3" fill="none" stroke="black"/>
</svg>"##;

fn styled(src: &str, opts: &RenderOptions) -> (SvgDocument, StyleReport) {
    let classification = classify(src, None);
    let mut doc = SvgDocument::parse(src).unwrap();
    let report = apply(&mut doc, &classification, opts);
    (doc, report)
}

fn node(doc: &SvgDocument, id: &str) -> NodeId {
    doc.find_by_id(id).unwrap()
}

fn themed(fill: &str) -> RenderOptions {
    RenderOptions {
        fill_color: Some(fill.to_owned()),
        ..RenderOptions::default()
    }
}

#[test]
fn theming_respects_authored_colors() {
    let (doc, report) = styled(ICON, &themed("#2196f3"));
    assert_eq!(doc.attr(node(&doc, "plain"), "fill"), Some("#2196f3"));
    assert_eq!(
        doc.attr(node(&doc, "plain"), THEMED_FILL_ATTR),
        Some("#2196f3")
    );
    assert_eq!(doc.attr(node(&doc, "brand"), "fill"), Some("#ff5722"));
    assert_eq!(doc.attr(node(&doc, "hollow"), "fill"), Some("none"));
    assert_eq!(report.themed, 1);
}

#[test]
fn forced_theme_overrides_specific_colors_but_not_none() {
    let opts = RenderOptions {
        force_color: true,
        ..themed("#2196f3")
    };
    let (doc, _) = styled(ICON, &opts);
    let brand = node(&doc, "brand");
    assert_eq!(doc.style(brand, "fill").as_deref(), Some("#2196f3 !important"));
    assert_eq!(doc.attr(brand, FORCED_ATTR), Some("true"));
    assert_eq!(doc.paint(node(&doc, "hollow"), "fill").as_deref(), Some("none"));
}

#[test]
fn unset_stroke_needs_a_width() {
    let opts = RenderOptions {
        stroke_color: Some("red".to_owned()),
        ..RenderOptions::default()
    };
    let (doc, _) = styled(ICON, &opts);
    assert_eq!(doc.attr(node(&doc, "plain"), "stroke"), None);
    assert_eq!(doc.attr(node(&doc, "hollow"), "stroke"), Some("red"));

    let opts = RenderOptions {
        stroke_width: Some(2.0),
        ..opts
    };
    let (doc, _) = styled(ICON, &opts);
    assert_eq!(doc.attr(node(&doc, "plain"), "stroke"), Some("red"));
    assert_eq!(doc.attr(doc.root(), "stroke-width"), Some("2"));
}

#[test]
fn ancestor_none_blocks_theming() {
    let src = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor"><path id="p" d="M0 0L5 5"/></svg>"#;
    let opts = RenderOptions {
        stroke_color: Some("teal".to_owned()),
        ..themed("orange")
    };
    let (doc, _) = styled(src, &opts);
    let p = node(&doc, "p");
    assert_eq!(doc.attr(p, "fill"), None);
    assert_eq!(doc.attr(p, "stroke"), Some("teal"));
}

#[test]
fn interactive_only_strips_forced_rules() {
    let src = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
<script>void 0</script>
<rect id="r" width="4" height="4" fill="blue" data-sfx-forced="true" style="fill: red !important; opacity: 0.5"/>
</svg>"#;
    let (doc, report) = styled(src, &themed("green"));
    let r = node(&doc, "r");
    assert_eq!(doc.attr(r, "style"), Some("opacity: 0.5"));
    assert_eq!(doc.attr(r, "fill"), Some("blue"));
    assert_eq!(doc.attr(r, FORCED_ATTR), None);
    assert_eq!(report.themed, 0);
}

#[test]
fn transformed_asset_gets_padded_view_box() {
    let src = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><g transform="translate(5,5)"><rect width="10" height="10"/></g></svg>"#;
    let (doc, report) = styled(src, &themed("red"));
    assert_eq!(report.forced_view_box.as_deref(), Some("4 4 12 12"));
    assert_eq!(doc.attr(doc.root(), "viewBox"), Some("4 4 12 12"));
    // Transformed assets keep their paint.
    assert_eq!(report.themed, 0);
}

#[test]
fn metadata_heavy_assets_lose_vendor_markup() {
    let src = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape" xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd" viewBox="0 0 10 10">
<sodipodi:namedview id="nv" inkscape:zoom="2"/>
<metadata id="meta"/>
<g id="layer" inkscape:label="Layer 1" inkscape:groupmode="layer"><rect width="5" height="5"/></g>
</svg>"#;
    let (doc, _) = styled(src, &RenderOptions::default());
    let svg = doc.to_svg_string();
    assert!(!svg.contains("sodipodi"));
    assert!(!svg.contains("inkscape"));
    assert!(!svg.contains("<metadata"));
    assert!(doc.find_by_id("layer").is_some());
}

#[test]
fn filters_live_in_one_owned_defs_across_reapplication() {
    let classification = classify(ICON, None);
    let mut doc = SvgDocument::parse(ICON).unwrap();
    let opts = RenderOptions {
        drop_shadow: Some(DropShadow::default()),
        blur: Some(1.0),
        ..RenderOptions::default()
    };
    apply(&mut doc, &classification, &opts);
    let report = apply(&mut doc, &classification, &opts);
    assert_eq!(report.owned_removed, 1);

    let svg = doc.to_svg_string();
    assert_eq!(svg.matches("<defs").count(), 1);
    assert_eq!(svg.matches("<filter").count(), 1);
    let id = report.filter_id.unwrap();
    assert_eq!(
        doc.attr(doc.root(), "filter").map(str::to_owned),
        Some(format!("url(#{id})"))
    );
}

#[test]
fn gradient_becomes_theme_fill() {
    let opts = RenderOptions {
        gradient: Some(GradientSpec {
            kind: GradientType::Linear,
            from: "#fff".to_owned(),
            to: "#000".to_owned(),
            direction: Default::default(),
        }),
        ..RenderOptions::default()
    };
    let (doc, report) = styled(ICON, &opts);
    let id = report.gradient_id.unwrap();
    assert_eq!(
        doc.attr(node(&doc, "plain"), "fill").map(str::to_owned),
        Some(format!("url(#{id})"))
    );
    assert_eq!(doc.attr(node(&doc, "brand"), "fill"), Some("#ff5722"));
}

#[test]
fn pipe_flow_core_geometry_is_left_alone() {
    let src = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 20">
<rect id="pipe-track" width="100" height="20"/>
<path id="core" d="M0 10H100" stroke="#000" stroke-dasharray="5 5"/>
</svg>"##;
    let opts = RenderOptions {
        animation: Some(AnimationKind::PipeFlow),
        stroke_color: Some("red".to_owned()),
        stroke_width: Some(3.0),
        drop_shadow: Some(DropShadow::default()),
        ..RenderOptions::default()
    };
    let (doc, report) = styled(src, &opts);
    let core = node(&doc, "core");
    assert_eq!(doc.attr(core, "stroke"), Some("#000"));
    assert_eq!(doc.attr(core, "stroke-width"), None);
    assert_eq!(report.filter_id, None);
    let root = doc.root();
    assert_eq!(doc.attr(root, "filter"), None);
    assert_eq!(doc.attr(root, "stroke-width"), None);

    let track = node(&doc, "pipe-track");
    assert_eq!(doc.attr(track, "stroke"), Some("red"));
    assert_eq!(doc.attr(track, "stroke-width"), Some("3"));
}

#[test]
fn dimensions_and_opacity_land_on_root() {
    let opts = RenderOptions {
        width: Some(48.0),
        height: Some(32.0),
        opacity: Some(1.7),
        ..RenderOptions::default()
    };
    let (doc, _) = styled(ICON, &opts);
    let root = doc.root();
    assert_eq!(doc.attr(root, "width"), Some("48"));
    assert_eq!(doc.attr(root, "height"), Some("32"));
    assert_eq!(doc.attr(root, "opacity"), Some("1"));
}
