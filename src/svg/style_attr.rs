//! Inline `style="..."` declaration helpers.

/// Split a `style` attribute into `(property, value)` pairs.
///
/// Property names are lowercased; values keep their original case (colors, urls) but are trimmed.
/// Empty and malformed declarations are dropped.
pub(crate) fn parse_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim().to_ascii_lowercase();
            let value = value.trim();
            if prop.is_empty() || value.is_empty() {
                return None;
            }
            Some((prop, value.to_owned()))
        })
        .collect()
}

/// Serialize declarations back into `style` attribute text.
pub(crate) fn serialize_declarations(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(p, v)| format!("{p}: {v}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Strip a trailing `!important` marker, returning the bare value and whether it was present.
pub(crate) fn split_important(value: &str) -> (&str, bool) {
    let trimmed = value.trim_end();
    match trimmed
        .to_ascii_lowercase()
        .rfind("!important")
        .filter(|&i| i + "!important".len() == trimmed.len())
    {
        Some(i) => (trimmed[..i].trim_end(), true),
        None => (trimmed, false),
    }
}
