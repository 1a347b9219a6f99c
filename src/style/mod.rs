//! Style application and the attributes the engine leaves on elements it touched.

pub(crate) mod apply;
pub(crate) mod defs;
pub(crate) mod options;

/// Marks `<defs>` containers (and their entries) created by the engine.
pub(crate) const OWNED_ATTR: &str = "data-sfx-owned";
/// Theme fill written by the applicator.
pub(crate) const THEMED_FILL_ATTR: &str = "data-sfx-themed-fill";
/// Theme stroke written by the applicator.
pub(crate) const THEMED_STROKE_ATTR: &str = "data-sfx-themed-stroke";
/// Space-separated paint properties the caller set by hand; theming skips them.
pub(crate) const OVERRIDE_ATTR: &str = "data-sfx-override";
/// Element carries `!important` theme paint.
pub(crate) const FORCED_ATTR: &str = "data-sfx-forced";
/// Space-separated paint properties owned by a running animation (switch colors).
pub(crate) const RUNTIME_ATTR: &str = "data-sfx-runtime";

/// Prefix shared by every engine marker attribute.
pub(crate) const MARKER_PREFIX: &str = "data-sfx-";

/// Paint properties the applicator themes and re-render preserves.
pub(crate) const PAINT_PROPS: [&str; 2] = ["fill", "stroke"];

pub(crate) fn themed_attr(prop: &str) -> &'static str {
    if prop == "stroke" {
        THEMED_STROKE_ATTR
    } else {
        THEMED_FILL_ATTR
    }
}

/// Return `true` when the space-separated list attribute `attr` on `node` contains `prop`.
pub(crate) fn list_attr_contains(
    doc: &crate::svg::document::SvgDocument,
    node: crate::svg::document::NodeId,
    attr: &str,
    prop: &str,
) -> bool {
    doc.attr(node, attr)
        .is_some_and(|v| v.split_whitespace().any(|p| p == prop))
}

/// Add `prop` to the space-separated list attribute `attr` on `node`.
pub(crate) fn list_attr_insert(
    doc: &mut crate::svg::document::SvgDocument,
    node: crate::svg::document::NodeId,
    attr: &str,
    prop: &str,
) {
    if list_attr_contains(doc, node, attr, prop) {
        return;
    }
    let next = match doc.attr(node, attr) {
        Some(v) if !v.trim().is_empty() => format!("{} {prop}", v.trim()),
        _ => prop.to_owned(),
    };
    doc.set_attr(node, attr, next);
}
