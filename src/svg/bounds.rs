use kurbo::{BezPath, Point, Rect, Shape as _};

use crate::svg::document::{NodeId, SvgDocument};

/// Elements whose subtrees never contribute to rendered content bounds.
pub(crate) const NON_RENDERED: &[&str] = &[
    "defs",
    "metadata",
    "title",
    "desc",
    "style",
    "script",
    "clipPath",
    "mask",
    "pattern",
    "symbol",
    "linearGradient",
    "radialGradient",
    "filter",
    "namedview",
];

/// Bounds of all rendered content in user units.
///
/// `usvg` resolves transforms, `<use>` references and stroke-less geometry exactly; when it
/// cannot build a tree (or the tree is empty) the untransformed shape union is used instead.
pub(crate) fn content_bounds(doc: &SvgDocument) -> Option<Rect> {
    usvg_bounds(doc).or_else(|| union_shape_bounds(doc, doc.root()))
}

fn usvg_bounds(doc: &SvgDocument) -> Option<Rect> {
    let tree = usvg::Tree::from_str(&doc.to_svg_string(), &usvg::Options::default()).ok()?;
    if !tree.root().has_children() {
        return None;
    }
    let b = tree.root().abs_bounding_box();
    let rect = Rect::new(
        f64::from(b.x()),
        f64::from(b.y()),
        f64::from(b.x() + b.width()),
        f64::from(b.y() + b.height()),
    );
    (rect.width() > 0.0 || rect.height() > 0.0).then_some(rect)
}

/// Union of the local (untransformed) bounds of every shape under `root`.
pub(crate) fn union_shape_bounds(doc: &SvgDocument, root: NodeId) -> Option<Rect> {
    let mut acc: Option<Rect> = None;
    let mut skip: Vec<NodeId> = Vec::new();
    for n in doc.descendants(root) {
        if skip.iter().any(|&s| doc.is_within(n, s)) {
            continue;
        }
        if doc
            .local_name(n)
            .is_some_and(|name| NON_RENDERED.contains(&name))
        {
            skip.push(n);
            continue;
        }
        if let Some(b) = shape_bounds(doc, n) {
            acc = Some(acc.map_or(b, |a| a.union(b)));
        }
    }
    acc
}

/// Local bounds of a single basic shape or path.
pub(crate) fn shape_bounds(doc: &SvgDocument, id: NodeId) -> Option<Rect> {
    let num = |k: &str| doc.number_attr(id, k).unwrap_or(0.0);
    match doc.local_name(id)? {
        "rect" | "image" | "foreignObject" => {
            let (x, y) = (num("x"), num("y"));
            Some(Rect::new(x, y, x + num("width"), y + num("height")))
        }
        "circle" => {
            let (cx, cy, r) = (num("cx"), num("cy"), num("r"));
            Some(Rect::new(cx - r, cy - r, cx + r, cy + r))
        }
        "ellipse" => {
            let (cx, cy, rx, ry) = (num("cx"), num("cy"), num("rx"), num("ry"));
            Some(Rect::new(cx - rx, cy - ry, cx + rx, cy + ry))
        }
        "line" => Some(Rect::from_points(
            (num("x1"), num("y1")),
            (num("x2"), num("y2")),
        )),
        "path" => {
            let d = doc.attr(id, "d")?;
            let path = BezPath::from_svg(d).ok()?;
            if path.elements().is_empty() {
                return None;
            }
            Some(path.bounding_box())
        }
        "polyline" | "polygon" => points_bounds(doc.attr(id, "points")?),
        _ => None,
    }
}

fn points_bounds(points: &str) -> Option<Rect> {
    let nums: Vec<f64> = points
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect();
    let mut pairs = nums.chunks_exact(2);
    let first = pairs.next()?;
    let mut rect = Rect::from_points((first[0], first[1]), (first[0], first[1]));
    for p in pairs {
        rect = rect.union_pt(Point::new(p[0], p[1]));
    }
    Some(rect)
}

/// Grow `rect` by `frac` of its size on every side.
pub(crate) fn padded(rect: Rect, frac: f64) -> Rect {
    let dx = rect.width() * frac;
    let dy = rect.height() * frac;
    Rect::new(rect.x0 - dx, rect.y0 - dy, rect.x1 + dx, rect.y1 + dy)
}

#[cfg(test)]
#[path = "../../tests/unit/svg/bounds.rs"]
mod tests;
