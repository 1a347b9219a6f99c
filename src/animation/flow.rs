//! Pipe flow: a dash-offset loop on sub-elements that already carry a dash pattern.

use crate::{
    animation::registry::StyleRegistry,
    foundation::math::{fmt_number, parse_number},
    style::options::{FlowDirection, RenderOptions},
    svg::document::{NodeId, SvgDocument},
};

/// Dash pattern used when the caller gives none.
pub const DEFAULT_DASH: &str = "10,5";

/// Apply flow to every dashed sub-element. Returns the number of elements animated.
///
/// Solid segments are never touched; with no dashed element at all nothing is written.
pub(crate) fn apply_flow(
    doc: &mut SvgDocument,
    registry: &mut StyleRegistry,
    opts: &RenderOptions,
) -> usize {
    let targets = dashed_elements(doc);
    if targets.is_empty() {
        tracing::warn!("pipe-flow requested but the asset has no dashed sub-elements; nothing to animate");
        return 0;
    }
    registry.ensure_builtins();

    let dash = opts
        .stroke_dasharray
        .as_deref()
        .filter(|d| dash_period(d).is_some())
        .unwrap_or(DEFAULT_DASH);
    let period = dash_period(dash).unwrap_or(15.0);
    let direction = match opts.flow_direction.unwrap_or_default() {
        FlowDirection::Forward => "forward",
        FlowDirection::Backward => "backward",
        FlowDirection::Bidirectional => "bidirectional",
    };
    let animation = format!(
        "sfx-flow-{direction} {}ms linear infinite",
        fmt_number(opts.duration_ms())
    );

    for &node in &targets {
        if doc.style(node, "stroke-dasharray").is_some() {
            doc.set_style(node, "stroke-dasharray", dash);
        } else {
            doc.set_attr(node, "stroke-dasharray", dash);
        }
        doc.set_style(node, "--sfx-dash-period", format!("{}px", fmt_number(period)));
        doc.set_style(node, "animation", animation.clone());
    }
    tracing::debug!(count = targets.len(), direction, "pipe flow attached");
    targets.len()
}

/// Elements carrying their own non-`none` dash pattern.
pub(crate) fn dashed_elements(doc: &SvgDocument) -> Vec<NodeId> {
    doc.elements()
        .into_iter()
        .filter(|&n| {
            doc.style(n, "stroke-dasharray")
                .or_else(|| doc.attr(n, "stroke-dasharray").map(str::to_owned))
                .is_some_and(|d| {
                    let d = d.trim();
                    !d.is_empty() && !d.eq_ignore_ascii_case("none")
                })
        })
        .collect()
}

/// Length of one full dash cycle. Odd-length lists repeat to an even count.
pub(crate) fn dash_period(dash: &str) -> Option<f64> {
    let values: Vec<f64> = dash
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_number)
        .collect::<Option<_>>()?;
    if values.iter().any(|v| *v < 0.0) {
        return None;
    }
    let sum: f64 = values.iter().sum();
    if sum <= 0.0 {
        return None;
    }
    Some(if values.len() % 2 == 1 { sum * 2.0 } else { sum })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/flow.rs"]
mod tests;
