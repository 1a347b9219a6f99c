//! Looping CSS effects attached to the element root.

use crate::{
    animation::registry::{PAUSE_ON_HOVER_CLASS, StyleRegistry},
    foundation::math::fmt_number,
    style::options::{IterationCount, RenderOptions},
    svg::document::SvgDocument,
};

/// Attach the named effect (`rotate`, `pulse`, ...) to the root.
///
/// Duration comes from the explicit duration or speed preset, iterations default to infinite and
/// the curve defaults to `ease`. The effect sheets are installed on first use; installing again
/// is a no-op.
pub(crate) fn apply_effect(
    doc: &mut SvgDocument,
    registry: &mut StyleRegistry,
    effect: &str,
    opts: &RenderOptions,
) {
    registry.ensure_builtins();
    let root = doc.root();
    let iterations = opts.iteration_count.unwrap_or(IterationCount::Infinite);
    let value = format!(
        "sfx-{effect} {}ms {} {}ms {}",
        fmt_number(opts.duration_ms()),
        opts.timing_curve(),
        fmt_number(opts.delay_ms()),
        iterations.css()
    );
    doc.set_style(root, "animation", value);
    doc.set_style(root, "transform-origin", "center");
    doc.set_style(root, "transform-box", "fill-box");
    if opts.pause_on_hover {
        add_class(doc, PAUSE_ON_HOVER_CLASS);
    }
    tracing::debug!(effect, "declarative effect attached");
}

fn add_class(doc: &mut SvgDocument, class: &str) {
    let root = doc.root();
    let current = doc.attr(root, "class").unwrap_or_default();
    if current.split_whitespace().any(|c| c == class) {
        return;
    }
    let next = if current.trim().is_empty() {
        class.to_owned()
    } else {
        format!("{} {class}", current.trim())
    };
    doc.set_attr(root, "class", next);
}
