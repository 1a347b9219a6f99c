/// Paint values treated as "generic": safe for automatic theming.
///
/// This is a fixed table. Changing it changes which existing assets get re-colored, so additions
/// must be deliberate. Entries are compared after [`normalize_color`].
pub const GENERIC_COLORS: &[&str] = &[
    "none",
    "currentcolor",
    "transparent",
    "inherit",
    "black",
    "white",
    "gray",
    "grey",
    "#000",
    "#000000",
    "#fff",
    "#ffffff",
    "#333",
    "#333333",
    "#666",
    "#666666",
    "#808080",
    "#999",
    "#999999",
    "#ccc",
    "#cccccc",
    "rgb(0,0,0)",
    "rgb(255,255,255)",
];

const NAMED_COLORS: &[&str] = &[
    "aqua", "black", "blue", "brown", "cyan", "darkblue", "darkgray", "darkgreen", "darkgrey",
    "darkred", "fuchsia", "gold", "gray", "green", "grey", "indigo", "lightblue", "lightgray",
    "lightgreen", "lightgrey", "lime", "magenta", "maroon", "navy", "olive", "orange", "pink",
    "purple", "red", "silver", "skyblue", "steelblue", "teal", "violet", "white", "yellow",
];

/// Lowercase a paint value and strip all whitespace.
pub fn normalize_color(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Return `true` when `value` is unset-equivalent or in the [`GENERIC_COLORS`] table.
pub fn is_generic_color(value: &str) -> bool {
    let v = normalize_color(value);
    v.is_empty() || GENERIC_COLORS.contains(&v.as_str())
}

/// Return `true` when `value` is a concrete color literal (hex, functional, or named).
///
/// Paint-server references (`url(#...)`), `none`, `currentColor` and inheritance keywords are not
/// literals.
pub fn is_color_literal(value: &str) -> bool {
    let v = normalize_color(value);
    if v.starts_with('#') {
        return parse_hex(&v).is_some();
    }
    if ["rgb(", "rgba(", "hsl(", "hsla("]
        .iter()
        .any(|p| v.starts_with(p))
    {
        return v.ends_with(')');
    }
    NAMED_COLORS.contains(&v.as_str())
}

/// Canonical key for counting distinct colors: hex forms collapse to `#rrggbbaa`.
pub fn color_key(value: &str) -> String {
    let v = normalize_color(value);
    match parse_hex(&v) {
        Some([r, g, b, a]) => format!("#{r:02x}{g:02x}{b:02x}{a:02x}"),
        None => v,
    }
}

/// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` into RGBA8.
pub fn parse_hex(s: &str) -> Option<[u8; 4]> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    fn hex_byte(pair: &str) -> Option<u8> {
        u8::from_str_radix(pair, 16).ok()
    }
    fn nibble(c: &str) -> Option<u8> {
        hex_byte(c).map(|v| v * 17)
    }

    match s.len() {
        3 | 4 => {
            let r = nibble(&s[0..1])?;
            let g = nibble(&s[1..2])?;
            let b = nibble(&s[2..3])?;
            let a = if s.len() == 4 { nibble(&s[3..4])? } else { 255 };
            Some([r, g, b, a])
        }
        6 | 8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = if s.len() == 8 {
                hex_byte(&s[6..8])?
            } else {
                255
            };
            Some([r, g, b, a])
        }
        _ => None,
    }
}
