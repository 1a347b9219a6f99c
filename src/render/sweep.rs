//! Garbage collection of engine leftovers inside a mounted document.

use std::collections::HashSet;

use crate::{
    style::OWNED_ATTR,
    svg::document::{NodeId, SvgDocument},
};

/// Ids referenced through `url(#id)` or `href="#id"` anywhere in the document.
fn referenced_ids(doc: &SvgDocument) -> HashSet<String> {
    let mut out = HashSet::new();
    for n in doc.elements() {
        for (key, value) in doc.attrs(n) {
            if (key == "href" || key.ends_with(":href"))
                && let Some(id) = value.trim().strip_prefix('#')
            {
                out.insert(id.to_owned());
            }
            let mut rest = value.as_str();
            while let Some(start) = rest.find("url(") {
                rest = &rest[start + 4..];
                let end = rest.find(')').unwrap_or(rest.len());
                let inner = rest[..end].trim().trim_matches(|c| c == '"' || c == '\'');
                if let Some(id) = inner.strip_prefix('#') {
                    out.insert(id.to_owned());
                }
                rest = &rest[end..];
            }
        }
    }
    out
}

/// Remove engine-owned definitions nothing points at, then owned `<defs>` left empty.
pub(crate) fn sweep_defs(doc: &mut SvgDocument) -> usize {
    let referenced = referenced_ids(doc);
    let owned_defs: Vec<NodeId> = doc
        .elements()
        .into_iter()
        .filter(|&n| doc.local_name(n) == Some("defs") && doc.attr(n, OWNED_ATTR).is_some())
        .collect();
    let mut removed = 0;
    for defs in owned_defs {
        let entries: Vec<NodeId> = doc.element_children(defs).collect();
        for e in entries {
            let live = doc.attr(e, "id").is_some_and(|id| referenced.contains(id));
            if !live {
                doc.detach(e);
                removed += 1;
            }
        }
        if doc.element_children(defs).next().is_none() {
            doc.detach(defs);
        }
    }
    removed
}

/// Remove `<g>` elements with no element content. Nested empty groups go in one pass.
pub(crate) fn sweep_groups(doc: &mut SvgDocument) -> usize {
    let root = doc.root();
    let mut removed = 0;
    for n in doc.elements().into_iter().rev() {
        if n == root || doc.local_name(n) != Some("g") {
            continue;
        }
        if doc.element_children(n).next().is_none() {
            doc.detach(n);
            removed += 1;
        }
    }
    removed
}
