pub use kurbo::{Point, Rect};

/// Stable identity of a mounted element.
///
/// Identities are allocated by the [`crate::Engine`] and survive
/// [`crate::Engine::re_render`], so runtime state keyed by them outlives a single render call.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub(crate) u64);

impl ElementId {
    /// Access raw 64-bit identifier.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "el#{}", self.0)
    }
}

/// Caller-chosen key of the slot an element is mounted into.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ContainerId(pub String);

impl ContainerId {
    /// Build a container key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Access the key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContainerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Binary state of a switch symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    /// Indicator at the far end, "on" colors.
    On,
    /// Indicator at rest, "off" colors.
    #[default]
    Off,
}

impl SwitchState {
    /// Return `true` for [`SwitchState::On`].
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
