//! Caller-authored paint overrides that must survive a re-render.
//!
//! An override is a fill or stroke on a source element that differs from the pristine asset and
//! was not written by the theming step. Elements are matched across rebuilds by their source
//! position, so the snapshot stays valid even though node ids change.

use crate::{
    style::{
        MARKER_PREFIX, OVERRIDE_ATTR, PAINT_PROPS, RUNTIME_ATTR, list_attr_contains,
        list_attr_insert, themed_attr,
    },
    svg::{
        document::{Fragment, FragmentChild, SvgDocument},
        style_attr::split_important,
    },
};

/// One preserved paint value.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PaintOverride {
    pub(crate) origin: u32,
    pub(crate) prop: &'static str,
    pub(crate) value: String,
    pub(crate) in_style: bool,
}

/// Everything carried from the old document into the rebuilt one.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct OverrideSnapshot {
    pub(crate) paints: Vec<PaintOverride>,
    /// Paint servers referenced by overrides that the pristine asset does not define.
    pub(crate) carried: Vec<Fragment>,
}

impl OverrideSnapshot {
    pub(crate) fn is_empty(&self) -> bool {
        self.paints.is_empty() && self.carried.is_empty()
    }
}

/// Compare `current` against `pristine` and collect caller overrides.
pub(crate) fn snapshot(current: &SvgDocument, pristine: &SvgDocument) -> OverrideSnapshot {
    let mut out = OverrideSnapshot::default();
    for n in current.elements() {
        let Some(origin) = current.origin(n) else {
            continue;
        };
        let source = pristine.find_by_origin(origin);
        for prop in PAINT_PROPS {
            if list_attr_contains(current, n, RUNTIME_ATTR, prop) {
                continue;
            }
            let Some(value) = current.paint(n, prop) else {
                continue;
            };
            let marked = list_attr_contains(current, n, OVERRIDE_ATTR, prop);
            let original = source.and_then(|s| pristine.paint(s, prop));
            let themed = current.attr(n, themed_attr(prop));
            let changed =
                original.as_deref() != Some(value.as_str()) && themed != Some(value.as_str());
            if !marked && !changed {
                continue;
            }
            let in_style = current
                .style(n, prop)
                .is_some_and(|v| !split_important(&v).1);
            if let Some(id) = paint_server_id(&value)
                && pristine.find_by_id(id).is_none()
                && !out.carried.iter().any(|f| fragment_id(f) == Some(id))
                && let Some(server) = current.find_by_id(id)
            {
                out.carried.push(current.extract(server));
            }
            out.paints.push(PaintOverride {
                origin,
                prop,
                value,
                in_style,
            });
        }
    }
    out
}

/// Re-apply a snapshot onto a rebuilt document.
///
/// Restored props are recorded in the override marker so theming leaves them alone. Carried
/// paint servers land in a fresh `<defs>` with engine markers stripped.
pub(crate) fn restore(doc: &mut SvgDocument, snap: &OverrideSnapshot) -> usize {
    if !snap.carried.is_empty() {
        let defs = doc.create_element("defs");
        let root = doc.root();
        doc.prepend_child(root, defs);
        for fragment in &snap.carried {
            doc.insert_fragment(defs, &strip_markers(fragment));
        }
    }

    let mut restored = 0;
    for o in &snap.paints {
        let Some(n) = doc.find_by_origin(o.origin) else {
            continue;
        };
        if o.in_style {
            doc.set_style(n, o.prop, o.value.as_str());
        } else {
            doc.remove_style(n, o.prop);
            doc.set_attr(n, o.prop, o.value.as_str());
        }
        list_attr_insert(doc, n, OVERRIDE_ATTR, o.prop);
        restored += 1;
    }
    restored
}

fn paint_server_id(value: &str) -> Option<&str> {
    value
        .trim()
        .strip_prefix("url(")?
        .strip_suffix(')')?
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .strip_prefix('#')
}

fn fragment_id(f: &Fragment) -> Option<&str> {
    f.attrs
        .iter()
        .find(|(k, _)| k == "id")
        .map(|(_, v)| v.as_str())
}

fn strip_markers(f: &Fragment) -> Fragment {
    Fragment {
        name: f.name.clone(),
        attrs: f
            .attrs
            .iter()
            .filter(|(k, _)| !k.starts_with(MARKER_PREFIX))
            .cloned()
            .collect(),
        children: f
            .children
            .iter()
            .map(|c| match c {
                FragmentChild::Element(e) => FragmentChild::Element(strip_markers(e)),
                FragmentChild::Text(t) => FragmentChild::Text(t.clone()),
            })
            .collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/overrides.rs"]
mod tests;
