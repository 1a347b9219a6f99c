use std::collections::BTreeSet;

use crate::{
    assets::color::{color_key, is_color_literal, is_generic_color},
    foundation::math::parse_number,
    svg::style_attr,
};

use super::{ColorInfo, ViewBoxInfo};

/// Square icon grid sizes a viewBox must match (at origin) to count as standard.
pub const STANDARD_VIEW_BOX_SIZES: &[f64] = &[
    16.0, 20.0, 24.0, 32.0, 48.0, 64.0, 100.0, 128.0, 256.0, 512.0, 1024.0,
];

const COLOR_PROPS: &[&str] = &[
    "fill",
    "stroke",
    "stop-color",
    "color",
    "flood-color",
    "lighting-color",
];

/// Parsed view of the asset used by the secondary analyses.
pub(crate) struct Parsed<'a> {
    doc: Option<roxmltree::Document<'a>>,
}

impl<'a> Parsed<'a> {
    pub(crate) fn new(content: &'a str) -> Self {
        let opts = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        Self {
            doc: roxmltree::Document::parse_with_options(content, opts).ok(),
        }
    }

    pub(crate) fn view_box(&self) -> ViewBoxInfo {
        let value = self
            .doc
            .as_ref()
            .and_then(|d| d.root_element().attribute("viewBox"))
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());
        let is_standard_size = value.as_deref().is_some_and(is_standard_view_box);
        ViewBoxInfo {
            present: value.is_some(),
            value,
            is_standard_size,
        }
    }

    pub(crate) fn colors(&self) -> ColorInfo {
        let mut distinct = BTreeSet::new();
        let mut fixed = false;
        let mut visit = |value: &str| {
            if is_color_literal(value) {
                distinct.insert(color_key(value));
                if !is_generic_color(value) {
                    fixed = true;
                }
            }
        };

        if let Some(doc) = &self.doc {
            for node in doc.descendants().filter(|n| n.is_element()) {
                for prop in COLOR_PROPS {
                    if let Some(v) = node.attribute(*prop) {
                        visit(v);
                    }
                }
                if let Some(style) = node.attribute("style") {
                    for (p, v) in style_attr::parse_declarations(style) {
                        if COLOR_PROPS.contains(&p.as_str()) {
                            visit(style_attr::split_important(&v).0);
                        }
                    }
                }
                if node.tag_name().name() == "style" {
                    for (p, v) in stylesheet_declarations(&element_text(node)) {
                        if COLOR_PROPS.contains(&p.as_str()) {
                            visit(style_attr::split_important(&v).0);
                        }
                    }
                }
            }
        }

        let multi_color = distinct.len() >= 2;
        ColorInfo {
            multi_color,
            fixed_colors: fixed,
            should_preserve: fixed || multi_color,
            distinct_colors: distinct.len(),
        }
    }

    /// Inline `style` attributes or `<style>` sheets that author paint properties.
    pub(crate) fn has_authored_styles(&self) -> bool {
        let Some(doc) = &self.doc else {
            return false;
        };
        let paints = |decls: Vec<(String, String)>| {
            decls
                .iter()
                .any(|(p, _)| matches!(p.as_str(), "fill" | "stroke" | "stop-color"))
        };
        doc.descendants().filter(|n| n.is_element()).any(|n| {
            n.attribute("style")
                .is_some_and(|s| paints(style_attr::parse_declarations(s)))
                || (n.tag_name().name() == "style"
                    && paints(stylesheet_declarations(&element_text(n))))
        })
    }
}

fn element_text(node: roxmltree::Node<'_, '_>) -> String {
    node.children().filter_map(|c| c.text()).collect()
}

/// Declarations from every rule body of a stylesheet; selectors are ignored.
fn stylesheet_declarations(css: &str) -> Vec<(String, String)> {
    css.split('{')
        .skip(1)
        .filter_map(|chunk| chunk.split_once('}').map(|(body, _)| body))
        .flat_map(style_attr::parse_declarations)
        .collect()
}

fn is_standard_view_box(value: &str) -> bool {
    let parts: Vec<f64> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .filter_map(parse_number)
        .collect();
    let [x, y, w, h] = parts[..] else {
        return false;
    };
    x == 0.0 && y == 0.0 && w == h && STANDARD_VIEW_BOX_SIZES.contains(&w)
}
