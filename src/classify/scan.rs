//! Textual marker scans over lowercased asset content.
//!
//! These run on raw text rather than a parsed tree so that malformed assets still classify.

const VENDOR_MARKERS: &[&str] = &[
    "sodipodi:",
    "xmlns:sodipodi",
    "inkscape:",
    "xmlns:inkscape",
    "sketch:",
    "xmlns:sketch",
    "adobe:ns",
    "ns.adobe.com",
    "illustrator",
    "xmlns:i=",
    "xmlns:x=\"adobe",
    "serif:",
    "xmlns:serif",
    "figma",
];

const GRADIENT_MARKERS: &[&str] = &["<lineargradient", "<radialgradient", "<meshgradient"];

pub(crate) fn has_script(lower: &str) -> bool {
    lower.contains("<script") || lower.contains("javascript:") || has_inline_handler(lower)
}

/// `on<name>=` attribute preceded by whitespace, e.g. ` onclick="..."`.
fn has_inline_handler(lower: &str) -> bool {
    let bytes = lower.as_bytes();
    let mut from = 0;
    while let Some(pos) = lower[from..].find("on") {
        let at = from + pos;
        from = at + 2;
        if at == 0 || !bytes[at - 1].is_ascii_whitespace() {
            continue;
        }
        let mut i = at + 2;
        let name_start = i;
        while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
            i += 1;
        }
        if i == name_start {
            continue;
        }
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) == Some(&b'=') {
            return true;
        }
    }
    false
}

pub(crate) fn has_vendor_metadata(lower: &str) -> bool {
    VENDOR_MARKERS.iter().any(|m| lower.contains(m))
}

/// A plain `transform=` attribute. `gradientTransform` / `patternTransform` do not count.
pub(crate) fn has_transforms(lower: &str) -> bool {
    let bytes = lower.as_bytes();
    lower
        .match_indices("transform")
        .any(|(at, _)| {
            let preceded = at > 0 && bytes[at - 1].is_ascii_whitespace();
            let mut i = at + "transform".len();
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            preceded && bytes.get(i) == Some(&b'=')
        })
}

pub(crate) fn has_animation_primitives(lower: &str) -> bool {
    if lower.contains("<animate") || lower.contains("@keyframes") {
        return true;
    }
    if lower.contains("animation:") || lower.contains("animation-name") {
        return true;
    }
    let bytes = lower.as_bytes();
    lower.match_indices("<set").any(|(at, m)| {
        matches!(
            bytes.get(at + m.len()),
            Some(b' ' | b'\t' | b'\n' | b'\r' | b'/' | b'>')
        )
    })
}

pub(crate) fn has_gradients(lower: &str) -> bool {
    GRADIENT_MARKERS.iter().any(|m| lower.contains(m))
}
