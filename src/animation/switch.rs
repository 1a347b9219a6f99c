//! Two-state switch: indicator travel and on/off colors with a CSS transition.

use crate::{
    animation::{ease::TimingCurve, gauge::TRACK_PART, session::SwitchConfig},
    foundation::{core::SwitchState, math::fmt_number},
    style::{RUNTIME_ATTR, list_attr_insert, options::RenderOptions},
    svg::{bounds::shape_bounds, document::SvgDocument},
};

/// Part role of the moving knob.
pub const INDICATOR_PART: &str = "indicator";
/// Indicator and track color while on.
pub const DEFAULT_ON_COLOR: &str = "#4CAF50";
/// Indicator and track color while off.
pub const DEFAULT_OFF_COLOR: &str = "#cccccc";

fn requested_transition_ms(opts: &RenderOptions) -> Option<f64> {
    opts.animation_duration
        .as_deref()
        .and_then(crate::style::options::parse_time_ms)
        .filter(|ms| *ms >= 0.0)
}

fn requested_curve(opts: &RenderOptions) -> Option<TimingCurve> {
    opts.timing_function.as_deref().and_then(TimingCurve::parse)
}

impl SwitchConfig {
    /// Initial record for a freshly mounted switch.
    pub(crate) fn from_options(opts: &RenderOptions, default_transition_ms: f64) -> Self {
        Self {
            state: opts.switch_state.unwrap_or_default(),
            transition_ms: requested_transition_ms(opts).unwrap_or(default_transition_ms),
            curve: requested_curve(opts).unwrap_or_default(),
            on_color: DEFAULT_ON_COLOR.to_owned(),
            off_color: DEFAULT_OFF_COLOR.to_owned(),
        }
    }

    /// Fold re-applied options into an existing record. Colors are kept.
    pub(crate) fn refresh(&mut self, opts: &RenderOptions) {
        if let Some(state) = opts.switch_state {
            self.state = state;
        }
        if let Some(ms) = requested_transition_ms(opts) {
            self.transition_ms = ms;
        }
        if let Some(curve) = requested_curve(opts) {
            self.curve = curve;
        }
    }

    fn color(&self) -> &str {
        match self.state {
            SwitchState::On => &self.on_color,
            SwitchState::Off => &self.off_color,
        }
    }
}

/// Write the configured state into the document.
///
/// Returns `false` (and writes nothing) when the indicator or track part is missing.
pub(crate) fn apply_switch(doc: &mut SvgDocument, cfg: &SwitchConfig) -> bool {
    let (Some(indicator), Some(track)) = (doc.find_part(INDICATOR_PART), doc.find_part(TRACK_PART))
    else {
        tracing::warn!("switch needs 'indicator' and 'track' parts; state not applied");
        return false;
    };
    let (Some(ind), Some(tr)) = (shape_bounds(doc, indicator), shape_bounds(doc, track)) else {
        tracing::warn!("switch parts have no measurable geometry; state not applied");
        return false;
    };

    // Travel leaves the same inset at the far end as at rest.
    let inset = ind.x0 - tr.x0;
    let travel = (tr.width() - ind.width() - 2.0 * inset).max(0.0);
    let x = if cfg.state.is_on() { travel } else { 0.0 };

    let ms = fmt_number(cfg.transition_ms);
    let curve = cfg.curve;
    doc.set_attr(indicator, "transform", format!("translate({},0)", fmt_number(x)));
    doc.set_style(
        indicator,
        "transition",
        format!("transform {ms}ms {curve}, fill {ms}ms {curve}"),
    );
    doc.set_style(indicator, "fill", cfg.color());
    doc.set_style(track, "transition", format!("stroke {ms}ms {curve}"));
    doc.set_style(track, "stroke", cfg.color());
    list_attr_insert(doc, indicator, RUNTIME_ATTR, "fill");
    list_attr_insert(doc, track, RUNTIME_ATTR, "stroke");
    doc.set_attr(doc.root(), "data-sfx-switch", if cfg.state.is_on() { "on" } else { "off" });
    true
}

#[cfg(test)]
#[path = "../../tests/unit/animation/switch.rs"]
mod tests;
