//! Category-driven style application.
//!
//! The applicator never recolors paint the author chose on purpose. A shape is themed only when
//! its effective paint (own value, else the nearest ancestor's) is generic or the caller forces
//! the theme, and explicit `none` is never painted over. The check runs on every render because
//! re-render rebuilds the element from pristine content.

use crate::{
    animation::{
        gauge::{LABEL_PART, TRACK_PART},
        switch::INDICATOR_PART,
    },
    assets::color::{is_generic_color, normalize_color},
    classify::{Category, Classification},
    foundation::math::fmt_number,
    style::{
        FORCED_ATTR, OVERRIDE_ATTR, PAINT_PROPS, THEMED_FILL_ATTR, THEMED_STROKE_ATTR,
        defs::{add_filter, add_gradient, owned_defs, remove_owned},
        list_attr_contains,
        options::RenderOptions,
        themed_attr,
    },
    svg::{
        bounds::{NON_RENDERED, content_bounds, padded},
        document::{NodeId, SvgDocument},
        style_attr::split_important,
    },
};

/// Elements that carry paint of their own.
const PAINT_BEARING: &[&str] = &[
    "rect", "circle", "ellipse", "line", "polyline", "polygon", "path", "text", "tspan",
];

/// Attribute prefixes written by authoring tools.
const VENDOR_PREFIXES: &[&str] = &["sodipodi", "inkscape", "sketch", "serif", "figma", "i", "x"];

/// Fraction of the content size added around a synthesized viewBox.
const VIEW_BOX_PADDING: f64 = 0.1;

/// What one [`apply`] call changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct StyleReport {
    pub(crate) themed: usize,
    pub(crate) forced_view_box: Option<String>,
    pub(crate) filter_id: Option<String>,
    pub(crate) gradient_id: Option<String>,
    pub(crate) owned_removed: usize,
}

/// Apply `opts` to `doc` following the classification's recommendations.
pub(crate) fn apply(
    doc: &mut SvgDocument,
    classification: &Classification,
    opts: &RenderOptions,
) -> StyleReport {
    let mut report = StyleReport {
        owned_removed: remove_owned(doc),
        ..StyleReport::default()
    };
    apply_dimensions(doc, opts);

    if classification.category == Category::Interactive {
        strip_forced(doc);
        return report;
    }

    let rec = &classification.recommendations;
    if rec.clean_attributes {
        clean_vendor_metadata(doc);
    }
    if rec.force_view_box {
        report.forced_view_box = force_view_box(doc);
    }
    apply_opacity(doc, opts);

    let restricted = opts.restricts_root_treatment();
    let theming = rec.apply_theme_color || opts.force_color;
    let needs_defs =
        (!restricted && (opts.drop_shadow.is_some() || opts.blur.is_some_and(|b| b > 0.0)))
            || (theming && opts.gradient.is_some());
    let defs = needs_defs.then(|| owned_defs(doc));

    if let Some(defs) = defs
        && !restricted
    {
        report.filter_id = add_filter(doc, defs, opts.drop_shadow.as_ref(), opts.blur);
        if let Some(id) = &report.filter_id {
            let root = doc.root();
            doc.set_attr(root, "filter", format!("url(#{id})"));
        }
    }

    if theming {
        let fill = match (defs, &opts.gradient) {
            (Some(defs), Some(spec)) => {
                let id = add_gradient(doc, defs, spec);
                let url = format!("url(#{id})");
                report.gradient_id = Some(id);
                Some(url)
            }
            _ => opts.fill_color.clone(),
        };
        let targets = theme_targets(doc, restricted);
        report.themed = theme_paint(
            doc,
            &targets,
            fill.as_deref(),
            opts.stroke_color.as_deref(),
            opts,
        );
        apply_stroke_geometry(doc, &targets, restricted, opts);
    }

    if let Some(defs) = defs
        && doc.children(defs).is_empty()
    {
        doc.detach(defs);
    }
    report
}

fn apply_dimensions(doc: &mut SvgDocument, opts: &RenderOptions) {
    let root = doc.root();
    if let Some(w) = opts.width.filter(|w| w.is_finite() && *w > 0.0) {
        doc.set_attr(root, "width", fmt_number(w));
    }
    if let Some(h) = opts.height.filter(|h| h.is_finite() && *h > 0.0) {
        doc.set_attr(root, "height", fmt_number(h));
    }
}

fn apply_opacity(doc: &mut SvgDocument, opts: &RenderOptions) {
    let root = doc.root();
    for (key, value) in [
        ("opacity", opts.opacity),
        ("fill-opacity", opts.fill_opacity),
        ("stroke-opacity", opts.stroke_opacity),
    ] {
        if let Some(v) = value.filter(|v| v.is_finite()) {
            doc.set_attr(root, key, fmt_number(v.clamp(0.0, 1.0)));
        }
    }
}

/// Remove `!important` theme paint left by a previous forced render.
fn strip_forced(doc: &mut SvgDocument) {
    for n in doc.elements() {
        if doc.attr(n, FORCED_ATTR).is_none() {
            continue;
        }
        doc.remove_style_where(n, |p, v| {
            PAINT_PROPS.contains(&p) && split_important(v).1
        });
        doc.remove_attr(n, FORCED_ATTR);
        doc.remove_attr(n, THEMED_FILL_ATTR);
        doc.remove_attr(n, THEMED_STROKE_ATTR);
    }
}

fn is_vendor_name(name: &str) -> bool {
    name.split_once(':')
        .is_some_and(|(prefix, _)| VENDOR_PREFIXES.contains(&prefix))
}

/// Drop authoring-tool elements and attributes.
fn clean_vendor_metadata(doc: &mut SvgDocument) {
    let mut removed = 0usize;
    for n in doc.elements() {
        let name = doc.name(n).unwrap_or_default();
        if n != doc.root() && (name == "metadata" || is_vendor_name(name)) {
            doc.detach(n);
            removed += 1;
            continue;
        }
        let before = doc.attrs(n).len();
        doc.retain_attrs(n, |k, _| match k.strip_prefix("xmlns:") {
            Some(prefix) => !VENDOR_PREFIXES.contains(&prefix),
            None => !is_vendor_name(k),
        });
        removed += before - doc.attrs(n).len();
    }
    tracing::debug!(removed, "vendor metadata cleaned");
}

/// Synthesize a padded viewBox from content bounds when none is present.
fn force_view_box(doc: &mut SvgDocument) -> Option<String> {
    let root = doc.root();
    if doc.attr(root, "viewBox").is_some_and(|v| !v.trim().is_empty()) {
        return None;
    }
    let Some(bounds) = content_bounds(doc) else {
        tracing::warn!("viewBox requested but the asset has no measurable content");
        return None;
    };
    let b = padded(bounds, VIEW_BOX_PADDING);
    let value = format!(
        "{} {} {} {}",
        fmt_number(b.x0),
        fmt_number(b.y0),
        fmt_number(b.width()),
        fmt_number(b.height())
    );
    doc.set_attr(root, "viewBox", value.as_str());
    Some(value)
}

/// Paint-bearing shapes outside non-rendered containers.
///
/// Restricted kinds only expose their declared `track`/`label` parts.
fn theme_targets(doc: &SvgDocument, restricted: bool) -> Vec<NodeId> {
    let scopes: Vec<NodeId> = if restricted {
        [TRACK_PART, LABEL_PART]
            .iter()
            .filter_map(|role| doc.find_part(role))
            .collect()
    } else {
        vec![doc.root()]
    };
    let indicator = doc.find_part(INDICATOR_PART);
    doc.elements()
        .into_iter()
        .filter(|&n| {
            doc.local_name(n)
                .is_some_and(|name| PAINT_BEARING.contains(&name))
        })
        .filter(|&n| scopes.iter().any(|&s| doc.is_within(n, s)))
        .filter(|&n| !in_non_rendered(doc, n))
        .filter(|&n| Some(n) != indicator)
        .collect()
}

fn in_non_rendered(doc: &SvgDocument, node: NodeId) -> bool {
    let mut cur = doc.parent(node);
    while let Some(n) = cur {
        if doc
            .local_name(n)
            .is_some_and(|name| NON_RENDERED.contains(&name))
        {
            return true;
        }
        cur = doc.parent(n);
    }
    false
}

/// Own paint, else the nearest ancestor's.
pub(crate) fn effective_paint(doc: &SvgDocument, node: NodeId, prop: &str) -> Option<String> {
    let mut cur = Some(node);
    while let Some(n) = cur {
        if let Some(v) = doc.paint(n, prop) {
            return Some(v);
        }
        cur = doc.parent(n);
    }
    None
}

fn theme_paint(
    doc: &mut SvgDocument,
    targets: &[NodeId],
    fill: Option<&str>,
    stroke: Option<&str>,
    opts: &RenderOptions,
) -> usize {
    let mut themed = 0;
    for &n in targets {
        for prop in PAINT_PROPS {
            let value = if prop == "fill" { fill } else { stroke };
            let Some(value) = value else {
                continue;
            };
            if list_attr_contains(doc, n, OVERRIDE_ATTR, prop) {
                continue;
            }
            let current = effective_paint(doc, n, prop);
            if current
                .as_deref()
                .is_some_and(|c| normalize_color(c) == "none")
            {
                continue;
            }
            // An unset stroke stays unset unless the caller also gave a width.
            if prop == "stroke" && current.is_none() && opts.stroke_width.is_none() {
                continue;
            }
            let generic = current.as_deref().is_none_or(is_generic_color);
            if !generic && !opts.force_color {
                continue;
            }
            write_paint(doc, n, prop, value, opts.force_color);
            themed += 1;
        }
    }
    themed
}

fn write_paint(doc: &mut SvgDocument, node: NodeId, prop: &str, value: &str, force: bool) {
    if force {
        doc.set_style(node, prop, format!("{value} !important"));
        doc.set_attr(node, FORCED_ATTR, "true");
    } else if doc.style(node, prop).is_some() {
        doc.set_style(node, prop, value);
    } else {
        doc.set_attr(node, prop, value);
    }
    doc.set_attr(node, themed_attr(prop), value);
}

/// Stroke width, dash pattern, caps and joins.
///
/// Unrestricted kinds carry them on the root; restricted kinds only on the themed parts.
fn apply_stroke_geometry(
    doc: &mut SvgDocument,
    targets: &[NodeId],
    restricted: bool,
    opts: &RenderOptions,
) {
    let mut decls: Vec<(&str, String)> = Vec::new();
    if let Some(w) = opts.stroke_width.filter(|w| w.is_finite() && *w >= 0.0) {
        decls.push(("stroke-width", fmt_number(w)));
    }
    if !restricted && let Some(d) = &opts.stroke_dasharray {
        decls.push(("stroke-dasharray", d.clone()));
    }
    if let Some(c) = &opts.stroke_linecap {
        decls.push(("stroke-linecap", c.clone()));
    }
    if let Some(j) = &opts.stroke_linejoin {
        decls.push(("stroke-linejoin", j.clone()));
    }
    if decls.is_empty() {
        return;
    }
    let nodes: Vec<NodeId> = if restricted {
        targets.to_vec()
    } else {
        vec![doc.root()]
    };
    for n in nodes {
        for (key, value) in &decls {
            doc.set_attr(n, key, value.as_str());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/apply.rs"]
mod tests;
