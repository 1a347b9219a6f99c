//! symbolfx classifies and animates SVG symbols for industrial dashboards.
//!
//! Assets are loaded through an [`AssetSource`], inspected by [`classify`], styled according to
//! [`RenderOptions`] and animated by an [`Engine`] that runs on virtual time:
//!
//! - Mount an asset into a container with [`Engine::render`]
//! - Drive frames and timers with [`Engine::tick`]
//! - Export the live document with [`Engine::to_svg_string`] or [`Engine::rasterize`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod animation;
pub(crate) mod classify;
pub(crate) mod render;
pub(crate) mod style;
pub(crate) mod svg;

pub use crate::foundation::core::{ContainerId, ElementId, Point, Rect, SwitchState};
pub use crate::foundation::error::{SymbolFxError, SymbolFxResult};

pub use crate::animation::behavior::{
    Animatable, BehaviorDecl, BehaviorFactory, BehaviorRegistry, DEFAULT_VARIABLE,
    LIQUID_LEVEL_BEHAVIOR, LevelBehavior, NullBehavior, find_declaration,
};
pub use crate::animation::ease::{Ease, TimingCurve};
pub use crate::animation::flow::DEFAULT_DASH;
pub use crate::animation::gauge::{FILL_PART, LABEL_PART, LIQUID_PART, TRACK_PART};
pub use crate::animation::readiness::Readiness;
pub use crate::animation::registry::{
    EFFECTS_SHEET, FLOW_SHEET, HOVER_SHEET, PAUSE_ON_HOVER_CLASS, StyleRegistry,
};
pub use crate::animation::scheduler::{Scheduler, TaskHandle};
pub use crate::animation::session::{Concern, SwitchConfig};
pub use crate::animation::switch::{DEFAULT_OFF_COLOR, DEFAULT_ON_COLOR, INDICATOR_PART};
pub use crate::assets::color::{GENERIC_COLORS, is_generic_color, normalize_color};
pub use crate::assets::store::{
    Asset, AssetCache, AssetId, AssetSource, DirSource, MemorySource, PLACEHOLDER_SVG,
};
pub use crate::classify::{
    Category, Classification, ColorInfo, Recommendations, ViewBoxInfo, classify, recommend,
};
pub use crate::render::config::EngineOpts;
pub use crate::render::engine::{Engine, EngineStats, SweepReport};
pub use crate::style::options::{
    AnimationKind, AnimationSpeed, DropShadow, FlowDirection, GradientDirection, GradientSpec,
    GradientType, InitCallback, IterationCount, RenderOptions, parse_time_ms,
};
pub use crate::svg::document::{Fragment, FragmentChild, NodeId, SvgDocument};
pub use crate::svg::raster::Preview;
