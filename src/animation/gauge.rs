//! Part geometry driven directly by value sessions.

use kurbo::Rect;

use crate::{
    foundation::math::fmt_number,
    svg::{
        bounds::shape_bounds,
        document::{NodeId, SvgDocument},
    },
};

/// Part role of the liquid body inside a tank symbol.
pub const LIQUID_PART: &str = "liquid";
/// Part role of a progress bar's fixed track.
pub const TRACK_PART: &str = "track";
/// Part role of a progress bar's moving fill.
pub const FILL_PART: &str = "fill";
/// Part role of the optional percentage label.
pub const LABEL_PART: &str = "label";

/// Authored `y` of the liquid body, stamped before its first resize.
pub(crate) const FULL_Y_ATTR: &str = "data-sfx-full-y";
/// Authored `height` of the liquid body, stamped before its first resize.
pub(crate) const FULL_HEIGHT_ATTR: &str = "data-sfx-full-height";

/// Rect-shaped liquid body whose authored geometry is the 100% level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiquidGauge {
    node: NodeId,
    full_y: f64,
    full_height: f64,
}

impl LiquidGauge {
    /// Locate the liquid part and capture its full-level geometry.
    pub fn locate(doc: &SvgDocument) -> Option<Self> {
        Self::from_node(doc, doc.find_part(LIQUID_PART)?)
    }

    /// Capture full-level geometry from a specific rect.
    ///
    /// A rect resized by an earlier session reports the geometry stamped on it then, not its
    /// current size.
    pub fn from_node(doc: &SvgDocument, node: NodeId) -> Option<Self> {
        if doc.local_name(node) != Some("rect") {
            return None;
        }
        let full_height = doc
            .number_attr(node, FULL_HEIGHT_ATTR)
            .or_else(|| doc.number_attr(node, "height"))?;
        let full_y = doc
            .number_attr(node, FULL_Y_ATTR)
            .or_else(|| doc.number_attr(node, "y"))
            .unwrap_or(0.0);
        Some(Self {
            node,
            full_y,
            full_height,
        })
    }

    /// Set the level (0-100): the body keeps its bottom edge and shrinks from the top.
    pub fn set_level(&self, doc: &mut SvgDocument, level: f64) {
        if doc.attr(self.node, FULL_HEIGHT_ATTR).is_none() {
            doc.set_attr(self.node, FULL_HEIGHT_ATTR, fmt_number(self.full_height));
            doc.set_attr(self.node, FULL_Y_ATTR, fmt_number(self.full_y));
        }
        let h = self.full_height * level.clamp(0.0, 100.0) / 100.0;
        doc.set_attr(self.node, "height", fmt_number(h));
        doc.set_attr(self.node, "y", fmt_number(self.full_y + self.full_height - h));
    }
}

/// Track / fill / label triple of a progress symbol.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressBar {
    fill: NodeId,
    label: Option<NodeId>,
    track: Rect,
}

impl ProgressBar {
    /// Locate the parts. The fill must be a rect; the track may be any basic shape.
    pub fn locate(doc: &SvgDocument) -> Option<Self> {
        let track = shape_bounds(doc, doc.find_part(TRACK_PART)?)?;
        let fill = doc.find_part(FILL_PART)?;
        if doc.local_name(fill) != Some("rect") {
            return None;
        }
        Some(Self {
            fill,
            label: doc.find_part(LABEL_PART),
            track,
        })
    }

    /// Bars at least as wide as they are tall fill left to right; others fill bottom to top.
    pub fn is_horizontal(&self) -> bool {
        self.track.width() >= self.track.height()
    }

    /// Resize the fill against the track and update the label.
    pub fn set_percent(&self, doc: &mut SvgDocument, pct: f64) {
        let pct = pct.clamp(0.0, 100.0);
        let t = self.track;
        if self.is_horizontal() {
            doc.set_attr(self.fill, "x", fmt_number(t.x0));
            doc.set_attr(self.fill, "width", fmt_number(t.width() * pct / 100.0));
        } else {
            let h = t.height() * pct / 100.0;
            doc.set_attr(self.fill, "y", fmt_number(t.y1 - h));
            doc.set_attr(self.fill, "height", fmt_number(h));
        }
        if let Some(label) = self.label {
            doc.set_text(label, format!("{}%", pct.round()));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/gauge.rs"]
mod tests;
