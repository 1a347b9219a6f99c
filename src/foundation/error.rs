/// Convenience result type used across symbolfx.
pub type SymbolFxResult<T> = Result<T, SymbolFxError>;

/// Top-level error taxonomy for fallible engine internals.
///
/// The public render/animate surface of [`crate::Engine`] never returns these; failures there
/// are logged and absorbed so the host editor stays interactive. They surface from the lower
/// level building blocks (document parsing, asset sources, option parsing, rasterization).
#[derive(thiserror::Error, Debug)]
pub enum SymbolFxError {
    /// Invalid caller-provided data (paths, options, geometry).
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed SVG markup.
    #[error("parse error: {0}")]
    Parse(String),

    /// Asset could not be located or read.
    #[error("asset error: {0}")]
    Asset(String),

    /// Animation preconditions that could not be met.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SymbolFxError {
    /// Build a [`SymbolFxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SymbolFxError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`SymbolFxError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`SymbolFxError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`SymbolFxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SymbolFxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
