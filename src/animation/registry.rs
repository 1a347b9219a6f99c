/// Stylesheet with the nine looping effects, installed at engine construction.
pub const EFFECTS_SHEET: &str = "sfx-effects";
/// Stylesheet with the three dash-offset flow effects.
pub const FLOW_SHEET: &str = "sfx-flow";
/// Stylesheet pausing effects on hover.
pub const HOVER_SHEET: &str = "sfx-hover";

/// Class toggling the pause-on-hover rule.
pub const PAUSE_ON_HOVER_CLASS: &str = "sfx-pause-on-hover";

const EFFECTS_CSS: &str = "\
@keyframes sfx-rotate { from { transform: rotate(0deg); } to { transform: rotate(360deg); } }
@keyframes sfx-pulse { 0%, 100% { transform: scale(1); opacity: 1; } 50% { transform: scale(1.1); opacity: 0.7; } }
@keyframes sfx-blink { 0%, 100% { opacity: 1; } 50% { opacity: 0; } }
@keyframes sfx-bounce { 0%, 100% { transform: translateY(0); } 50% { transform: translateY(-10%); } }
@keyframes sfx-shake { 0%, 100% { transform: translateX(0); } 25% { transform: translateX(-5%); } 75% { transform: translateX(5%); } }
@keyframes sfx-scale { 0%, 100% { transform: scale(1); } 50% { transform: scale(1.2); } }
@keyframes sfx-translateX { 0%, 100% { transform: translateX(0); } 50% { transform: translateX(10%); } }
@keyframes sfx-translateY { 0%, 100% { transform: translateY(0); } 50% { transform: translateY(10%); } }
@keyframes sfx-fade { 0%, 100% { opacity: 1; } 50% { opacity: 0.3; } }
";

const FLOW_CSS: &str = "\
@keyframes sfx-flow-forward { from { stroke-dashoffset: 0; } to { stroke-dashoffset: calc(-1 * var(--sfx-dash-period)); } }
@keyframes sfx-flow-backward { from { stroke-dashoffset: 0; } to { stroke-dashoffset: var(--sfx-dash-period); } }
@keyframes sfx-flow-bidirectional { 0%, 100% { stroke-dashoffset: 0; } 50% { stroke-dashoffset: calc(-1 * var(--sfx-dash-period)); } }
";

const HOVER_CSS: &str = ".sfx-pause-on-hover:hover, .sfx-pause-on-hover:hover * { animation-play-state: paused; }\n";

/// Engine-owned registry of named stylesheets.
///
/// Every entry is inserted at most once; [`StyleRegistry::ensure`] on an existing name is a
/// no-op. Export embeds the concatenated sheets in registration order.
#[derive(Clone, Debug, Default)]
pub struct StyleRegistry {
    sheets: Vec<(String, String)>,
}

impl StyleRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in effect, flow and hover sheets.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.ensure_builtins();
        reg
    }

    /// Install the built-in sheets that are not present yet.
    pub fn ensure_builtins(&mut self) {
        self.ensure(EFFECTS_SHEET, EFFECTS_CSS);
        self.ensure(FLOW_SHEET, FLOW_CSS);
        self.ensure(HOVER_SHEET, HOVER_CSS);
    }

    /// Register `css` under `name` unless the name is already present.
    ///
    /// Returns `true` when the sheet was inserted.
    pub fn ensure(&mut self, name: &str, css: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.sheets.push((name.to_owned(), css.to_owned()));
        true
    }

    /// Return `true` when `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.sheets.iter().any(|(n, _)| n == name)
    }

    /// CSS registered under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, css)| css.as_str())
    }

    /// Number of registered sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Return `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// All sheets concatenated in registration order.
    pub fn stylesheet(&self) -> String {
        self.sheets.iter().map(|(_, css)| css.as_str()).collect()
    }
}
