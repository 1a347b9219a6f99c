use super::*;

const TANK: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 100 100">
  <!-- body -->
  <rect id="tank-body" x="10" y="10" width="80" height="80" fill="#cccccc"/>
  <rect data-part="liquid" x="15" y="15" width="70" height="70" style="fill: #2196f3"/>
  <use xlink:href="#tank-body"/>
  <text id="tank-label">42 &amp; up</text>
</svg>"##;

#[test]
fn parse_rejects_non_svg_root() {
    let err = SvgDocument::parse("<html/>").unwrap_err();
    assert!(err.to_string().contains("<svg>"));
    assert!(SvgDocument::parse("<svg").is_err());
}

#[test]
fn parse_preserves_prefixed_attributes_and_text() {
    let doc = SvgDocument::parse(TANK).unwrap();
    let out = doc.to_svg_string();
    assert!(out.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));
    assert!(out.contains(r##"xlink:href="#tank-body""##));
    assert!(out.contains("42 &amp; up"));
    assert!(!out.contains("<!--"));

    // Output must parse again to an equivalent tree.
    let again = SvgDocument::parse(&out).unwrap();
    assert_eq!(again.elements().len(), doc.elements().len());
}

#[test]
fn origin_indices_follow_source_preorder() {
    let doc = SvgDocument::parse(TANK).unwrap();
    let origins: Vec<_> = doc
        .elements()
        .into_iter()
        .map(|n| doc.origin(n).unwrap())
        .collect();
    assert_eq!(origins, vec![0, 1, 2, 3, 4]);

    let mut doc = doc;
    let created = doc.create_element("g");
    doc.append_child(doc.root(), created);
    assert_eq!(doc.origin(created), None);
}

#[test]
fn style_edits_keep_other_declarations() {
    let mut doc = SvgDocument::parse(TANK).unwrap();
    let liquid = doc.find_part("liquid").unwrap();
    assert_eq!(doc.paint(liquid, "fill").as_deref(), Some("#2196f3"));

    doc.set_style(liquid, "opacity", "0.5");
    doc.set_style(liquid, "fill", "red");
    assert_eq!(doc.attr(liquid, "style"), Some("fill: red; opacity: 0.5"));

    doc.remove_style(liquid, "fill");
    doc.remove_style(liquid, "opacity");
    assert_eq!(doc.attr(liquid, "style"), None);
}

#[test]
fn paint_prefers_style_over_attribute_and_strips_important() {
    let mut doc = SvgDocument::parse(TANK).unwrap();
    let body = doc.find_by_id("tank-body").unwrap();
    assert_eq!(doc.paint(body, "fill").as_deref(), Some("#cccccc"));
    doc.set_style(body, "fill", "#123456 !important");
    assert_eq!(doc.paint(body, "fill").as_deref(), Some("#123456"));
}

#[test]
fn find_part_matches_data_part_then_id_suffix() {
    let doc = SvgDocument::parse(TANK).unwrap();
    let label = doc.find_part("label").unwrap();
    assert_eq!(doc.attr(label, "id"), Some("tank-label"));
    assert!(doc.find_part("indicator").is_none());
}

#[test]
fn fragments_copy_between_documents() {
    let src = SvgDocument::parse(TANK).unwrap();
    let label = src.find_by_id("tank-label").unwrap();
    let frag = src.extract(label);

    let mut dst = SvgDocument::parse(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();
    let copied = dst.insert_fragment(dst.root(), &frag);
    assert_eq!(dst.text(copied), "42 & up");
    assert_eq!(dst.extract(copied), frag);
}

#[test]
fn detach_removes_from_traversal() {
    let mut doc = SvgDocument::parse(TANK).unwrap();
    let body = doc.find_by_id("tank-body").unwrap();
    doc.detach(body);
    assert!(doc.find_by_id("tank-body").is_none());
    assert!(!doc.is_within(body, doc.root()));
}

#[test]
fn set_text_replaces_children() {
    let mut doc = SvgDocument::parse(TANK).unwrap();
    let label = doc.find_part("label").unwrap();
    doc.set_text(label, "75%");
    assert_eq!(doc.text(label), "75%");
    assert!(doc.to_svg_string().contains(">75%</text>"));
}

#[test]
fn find_by_origin_skips_detached_nodes() {
    let mut doc = SvgDocument::parse(TANK).unwrap();
    let label = doc.find_by_origin(4).unwrap();
    assert_eq!(doc.attr(label, "id"), Some("tank-label"));
    doc.detach(label);
    assert_eq!(doc.find_by_origin(4), None);
}
