//! Engine-owned `<defs>`: filters and gradient paint servers.

use crate::{
    foundation::{ids::def_id, math::fmt_number},
    style::{
        OWNED_ATTR,
        options::{DropShadow, GradientDirection, GradientSpec, GradientType},
    },
    svg::document::{NodeId, SvgDocument},
};

/// Detach every engine-owned node. Returns how many were removed.
pub(crate) fn remove_owned(doc: &mut SvgDocument) -> usize {
    let owned: Vec<NodeId> = doc
        .elements()
        .into_iter()
        .filter(|&n| doc.attr(n, OWNED_ATTR).is_some())
        .collect();
    let root = doc.root();
    let mut removed = 0;
    for n in owned {
        // Nested owned nodes go away with their container.
        if doc.parent(n).is_some() && doc.is_within(n, root) {
            doc.detach(n);
            removed += 1;
        }
    }
    if doc
        .attr(root, "filter")
        .is_some_and(|f| f.trim_start().starts_with("url(#sfx-"))
    {
        doc.remove_attr(root, "filter");
    }
    removed
}

/// Create a fresh owned `<defs>` as the first child of the root.
pub(crate) fn owned_defs(doc: &mut SvgDocument) -> NodeId {
    let defs = doc.create_element("defs");
    doc.set_attr(defs, OWNED_ATTR, "true");
    let root = doc.root();
    doc.prepend_child(root, defs);
    defs
}

/// Build one filter chaining an optional blur and an optional drop shadow. Returns its id.
pub(crate) fn add_filter(
    doc: &mut SvgDocument,
    defs: NodeId,
    shadow: Option<&DropShadow>,
    blur: Option<f64>,
) -> Option<String> {
    let blur = blur.filter(|b| b.is_finite() && *b > 0.0);
    if shadow.is_none() && blur.is_none() {
        return None;
    }
    let id = def_id(if shadow.is_some() { "shadow" } else { "blur" });
    let filter = doc.create_element("filter");
    doc.set_attr(filter, "id", id.as_str());
    doc.set_attr(filter, OWNED_ATTR, "true");
    doc.set_attr(filter, "x", "-50%");
    doc.set_attr(filter, "y", "-50%");
    doc.set_attr(filter, "width", "200%");
    doc.set_attr(filter, "height", "200%");
    doc.append_child(defs, filter);

    if let Some(std_dev) = blur {
        let fe = doc.create_element("feGaussianBlur");
        doc.set_attr(fe, "in", "SourceGraphic");
        doc.set_attr(fe, "stdDeviation", fmt_number(std_dev));
        doc.set_attr(fe, "result", "sfx-blurred");
        doc.append_child(filter, fe);
    }
    if let Some(s) = shadow {
        let fe = doc.create_element("feDropShadow");
        if blur.is_some() {
            doc.set_attr(fe, "in", "sfx-blurred");
        }
        doc.set_attr(fe, "dx", fmt_number(s.dx));
        doc.set_attr(fe, "dy", fmt_number(s.dy));
        doc.set_attr(fe, "stdDeviation", fmt_number(s.blur.max(0.0)));
        doc.set_attr(fe, "flood-color", s.color.as_str());
        doc.append_child(filter, fe);
    }
    Some(id)
}

/// Build a two-stop gradient. Returns its id.
pub(crate) fn add_gradient(doc: &mut SvgDocument, defs: NodeId, spec: &GradientSpec) -> String {
    let id = def_id("gradient");
    let grad = match spec.kind {
        GradientType::Linear => {
            let g = doc.create_element("linearGradient");
            let (x2, y2) = match spec.direction {
                GradientDirection::Horizontal => ("100%", "0%"),
                GradientDirection::Vertical => ("0%", "100%"),
                GradientDirection::Diagonal => ("100%", "100%"),
            };
            doc.set_attr(g, "x1", "0%");
            doc.set_attr(g, "y1", "0%");
            doc.set_attr(g, "x2", x2);
            doc.set_attr(g, "y2", y2);
            g
        }
        GradientType::Radial => {
            let g = doc.create_element("radialGradient");
            doc.set_attr(g, "cx", "50%");
            doc.set_attr(g, "cy", "50%");
            doc.set_attr(g, "r", "50%");
            g
        }
    };
    doc.set_attr(grad, "id", id.as_str());
    doc.set_attr(grad, OWNED_ATTR, "true");
    doc.append_child(defs, grad);
    for (offset, color) in [("0%", &spec.from), ("100%", &spec.to)] {
        let stop = doc.create_element("stop");
        doc.set_attr(stop, "offset", offset);
        doc.set_attr(stop, "stop-color", color.as_str());
        doc.append_child(grad, stop);
    }
    id
}
