pub(crate) mod config;
pub(crate) mod engine;
pub(crate) mod overrides;
pub(crate) mod sweep;
