use std::collections::HashMap;

use crate::{
    animation::gauge::LiquidGauge,
    svg::document::{NodeId, SvgDocument},
};

/// Variable name used when an asset's behavior script does not declare one.
pub const DEFAULT_VARIABLE: &str = "level";

/// Name of the built-in tank behavior.
pub const LIQUID_LEVEL_BEHAVIOR: &str = "liquid-level";

/// Embedded behavior of an asset: the object its script exposes once activated.
///
/// Every method reports whether it handled the request so the engine can fall back to part
/// geometry. Only the uniform setter is required.
pub trait Animatable {
    /// Set a named variable. Returns `false` for unknown names.
    fn set_variable(&mut self, doc: &mut SvgDocument, name: &str, value: f64) -> bool;

    /// Update the liquid level (0-100).
    fn update_liquid(&mut self, _doc: &mut SvgDocument, _level: f64) -> bool {
        false
    }

    /// Update a progress percentage (0-100).
    fn update_progress(&mut self, _doc: &mut SvgDocument, _pct: f64) -> bool {
        false
    }

    /// Value the asset shows when nobody asks for a specific one.
    fn default_value(&self, _doc: &SvgDocument) -> Option<f64> {
        None
    }
}

/// Behavior of assets that expose none. Handles nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBehavior;

impl Animatable for NullBehavior {
    fn set_variable(&mut self, _doc: &mut SvgDocument, _name: &str, _value: f64) -> bool {
        false
    }
}

/// Built-in `liquid-level` behavior: a single variable mapped onto the liquid part.
///
/// Script attributes: `data-variable` (default `level`) and `data-default` (initial level).
#[derive(Clone, Debug)]
pub struct LevelBehavior {
    variable: String,
    default: Option<f64>,
    gauge: LiquidGauge,
}

impl LevelBehavior {
    /// Build from the declaring `<script>` element. `None` when the asset has no liquid rect.
    pub fn from_script(doc: &SvgDocument, script: NodeId) -> Option<Self> {
        Some(Self {
            variable: doc
                .attr(script, "data-variable")
                .unwrap_or(DEFAULT_VARIABLE)
                .to_owned(),
            default: doc.number_attr(script, "data-default"),
            gauge: LiquidGauge::locate(doc)?,
        })
    }
}

impl Animatable for LevelBehavior {
    fn set_variable(&mut self, doc: &mut SvgDocument, name: &str, value: f64) -> bool {
        if name != self.variable {
            return false;
        }
        self.gauge.set_level(doc, value);
        true
    }

    fn update_liquid(&mut self, doc: &mut SvgDocument, level: f64) -> bool {
        self.gauge.set_level(doc, level);
        true
    }

    fn default_value(&self, _doc: &SvgDocument) -> Option<f64> {
        self.default
    }
}

/// Constructor for a named behavior. Receives the document and its declaring `<script>`.
pub type BehaviorFactory = Box<dyn Fn(&SvgDocument, NodeId) -> Option<Box<dyn Animatable>>>;

/// Named behavior factories, resolved from `<script data-behavior="...">`.
pub struct BehaviorRegistry {
    factories: HashMap<String, BehaviorFactory>,
}

impl std::fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("BehaviorRegistry")
            .field("names", &names)
            .finish()
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl BehaviorRegistry {
    /// Registry with no factories.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with the built-in `liquid-level` behavior.
    pub fn with_builtins() -> Self {
        let mut reg = Self::empty();
        reg.register(LIQUID_LEVEL_BEHAVIOR, |doc, script| {
            LevelBehavior::from_script(doc, script).map(|b| Box::new(b) as Box<dyn Animatable>)
        });
        reg
    }

    /// Register (or replace) a factory.
    pub fn register(
        &mut self,
        name: &str,
        factory: impl Fn(&SvgDocument, NodeId) -> Option<Box<dyn Animatable>> + 'static,
    ) {
        self.factories.insert(name.to_owned(), Box::new(factory));
    }

    /// Return `true` when `name` has a factory.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Instantiate `name` for `doc`.
    pub fn create(
        &self,
        name: &str,
        doc: &SvgDocument,
        script: NodeId,
    ) -> Option<Box<dyn Animatable>> {
        (self.factories.get(name)?)(doc, script)
    }
}

/// Behavior declaration found in an asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BehaviorDecl {
    /// Factory name.
    pub name: String,
    /// Variable pushed through [`Animatable::set_variable`].
    pub variable: String,
    /// Declaring `<script>` element.
    pub script: NodeId,
}

/// First `<script data-behavior>` in the document. Plain scripts declare nothing.
pub fn find_declaration(doc: &SvgDocument) -> Option<BehaviorDecl> {
    doc.elements().into_iter().find_map(|n| {
        if doc.local_name(n) != Some("script") {
            return None;
        }
        let name = doc.attr(n, "data-behavior")?.trim();
        if name.is_empty() {
            return None;
        }
        Some(BehaviorDecl {
            name: name.to_owned(),
            variable: doc
                .attr(n, "data-variable")
                .unwrap_or(DEFAULT_VARIABLE)
                .to_owned(),
            script: n,
        })
    })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/behavior.rs"]
mod tests;
