use std::rc::Rc;

use crate::{
    animation::ease::TimingCurve,
    foundation::core::SwitchState,
    foundation::error::SymbolFxResult,
};

/// One-shot callback receiving the asset's built-in default value.
pub type InitCallback = Rc<dyn Fn(f64)>;

/// Caller-supplied render configuration.
///
/// Deserializes from camelCase JSON. Every field is optional and unknown keys are ignored.
#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Root `width` attribute.
    pub width: Option<f64>,
    /// Root `height` attribute.
    pub height: Option<f64>,

    /// Theme fill color.
    pub fill_color: Option<String>,
    /// Theme stroke color.
    pub stroke_color: Option<String>,
    /// Stroke width in user units.
    pub stroke_width: Option<f64>,
    /// Whole-element opacity.
    pub opacity: Option<f64>,
    /// Dash pattern; also the pattern used by pipe flow.
    pub stroke_dasharray: Option<String>,
    /// `stroke-linecap`.
    pub stroke_linecap: Option<String>,
    /// `stroke-linejoin`.
    pub stroke_linejoin: Option<String>,
    /// `fill-opacity`.
    pub fill_opacity: Option<f64>,
    /// `stroke-opacity`.
    pub stroke_opacity: Option<f64>,
    /// Paint theme colors over authored ones, with `!important`.
    pub force_color: bool,

    /// Drop shadow filter.
    pub drop_shadow: Option<DropShadow>,
    /// Gaussian blur standard deviation.
    pub blur: Option<f64>,
    /// Two-stop gradient used as the theme fill.
    pub gradient: Option<GradientSpec>,

    /// Effect or value-driven animation to attach.
    pub animation: Option<AnimationKind>,
    /// Speed preset; ignored when `animation_duration` is given.
    pub animation_speed: Option<AnimationSpeed>,
    /// Explicit duration (`"1.5s"`, `"800ms"`, bare numbers are seconds).
    pub animation_duration: Option<String>,
    /// Number of repetitions.
    pub iteration_count: Option<IterationCount>,
    /// CSS timing function for effects and switch transitions.
    pub timing_function: Option<String>,
    /// Effect start delay (`"0.5s"`).
    pub animation_delay: Option<String>,
    /// Pause declarative effects while hovered.
    pub pause_on_hover: bool,
    /// Pipe flow direction.
    pub flow_direction: Option<FlowDirection>,
    /// Target value 0-100 for value-driven kinds.
    pub target_value: Option<f64>,
    /// `false` sets value-driven targets once with no frame loop.
    pub animated: Option<bool>,
    /// Initial switch state.
    pub switch_state: Option<SwitchState>,

    /// Fired once with the resolved default when `target_value` is absent.
    #[serde(skip)]
    pub on_init: Option<InitCallback>,
}

impl std::fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderOptions")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fill_color", &self.fill_color)
            .field("stroke_color", &self.stroke_color)
            .field("stroke_width", &self.stroke_width)
            .field("force_color", &self.force_color)
            .field("animation", &self.animation)
            .field("target_value", &self.target_value)
            .field("animated", &self.animated)
            .field("on_init", &self.on_init.as_ref().map(|_| "<callback>"))
            .finish_non_exhaustive()
    }
}

impl RenderOptions {
    /// Parse options from JSON.
    pub fn from_json(text: &str) -> SymbolFxResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Attach the one-shot init callback.
    pub fn with_on_init(mut self, f: impl Fn(f64) + 'static) -> Self {
        self.on_init = Some(Rc::new(f));
        self
    }

    /// `false` only when the caller explicitly disabled animation.
    pub fn is_animated(&self) -> bool {
        self.animated.unwrap_or(true)
    }

    /// Effective duration: explicit duration if it parses, else the speed preset.
    pub fn duration_ms(&self) -> f64 {
        self.requested_duration_ms()
            .unwrap_or_else(|| AnimationSpeed::default().duration_ms())
    }

    /// Duration the caller asked for through either field, if any.
    pub fn requested_duration_ms(&self) -> Option<f64> {
        self.animation_duration
            .as_deref()
            .and_then(parse_time_ms)
            .filter(|ms| *ms > 0.0)
            .or_else(|| self.animation_speed.map(AnimationSpeed::duration_ms))
    }

    /// Effect delay in milliseconds.
    pub fn delay_ms(&self) -> f64 {
        self.animation_delay
            .as_deref()
            .and_then(parse_time_ms)
            .unwrap_or(0.0)
            .max(0.0)
    }

    /// Timing curve, `ease` when absent or unrecognized.
    pub fn timing_curve(&self) -> TimingCurve {
        self.timing_function
            .as_deref()
            .and_then(TimingCurve::parse)
            .unwrap_or_default()
    }

    /// Kinds whose core geometry must not receive root-level filter or stroke treatment.
    pub(crate) fn restricts_root_treatment(&self) -> bool {
        matches!(
            self.animation,
            Some(AnimationKind::PipeFlow | AnimationKind::ProgressSlide)
        )
    }
}

/// Parse a CSS-like time value into milliseconds.
pub fn parse_time_ms(s: &str) -> Option<f64> {
    let s = s.trim().to_ascii_lowercase();
    let (num, scale) = if let Some(n) = s.strip_suffix("ms") {
        (n, 1.0)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1000.0)
    } else {
        (s.as_str(), 1000.0)
    };
    let v: f64 = num.trim().parse().ok()?;
    v.is_finite().then_some(v * scale)
}

/// Animation selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AnimationKind {
    /// Continuous rotation.
    #[serde(rename = "rotate")]
    Rotate,
    /// Scale pulse.
    #[serde(rename = "pulse")]
    Pulse,
    /// Opacity blink.
    #[serde(rename = "blink")]
    Blink,
    /// Vertical bounce.
    #[serde(rename = "bounce")]
    Bounce,
    /// Horizontal shake.
    #[serde(rename = "shake")]
    Shake,
    /// Grow and shrink.
    #[serde(rename = "scale")]
    Scale,
    /// Horizontal sway.
    #[serde(rename = "translateX")]
    TranslateX,
    /// Vertical sway.
    #[serde(rename = "translateY")]
    TranslateY,
    /// Fade in and out.
    #[serde(rename = "fade")]
    Fade,
    /// Liquid level rising from empty to the target.
    #[serde(rename = "liquid-fill")]
    LiquidFill,
    /// Liquid level falling from the target to empty.
    #[serde(rename = "liquid-drain")]
    LiquidDrain,
    /// Progress bar fill sliding to the target.
    #[serde(rename = "progress-slide")]
    ProgressSlide,
    /// Dash-offset flow along dashed pipe segments.
    #[serde(rename = "pipe-flow")]
    PipeFlow,
    /// Two-state switch.
    #[serde(rename = "switch-toggle")]
    SwitchToggle,
    /// Explicitly no animation.
    #[serde(rename = "none")]
    None,
    /// Unrecognized kind; ignored.
    #[serde(other)]
    Unknown,
}

impl AnimationKind {
    /// Looping CSS effect, if this kind is one.
    pub fn effect_name(self) -> Option<&'static str> {
        Some(match self {
            Self::Rotate => "rotate",
            Self::Pulse => "pulse",
            Self::Blink => "blink",
            Self::Bounce => "bounce",
            Self::Shake => "shake",
            Self::Scale => "scale",
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::Fade => "fade",
            _ => return None,
        })
    }

    /// Kinds driven by an interpolated 0-100 value.
    pub fn is_value_driven(self) -> bool {
        matches!(
            self,
            Self::LiquidFill | Self::LiquidDrain | Self::ProgressSlide
        )
    }
}

/// Speed preset for effects and value sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    /// 4 s.
    Slow,
    /// 2 s.
    #[default]
    Normal,
    /// 1 s.
    Fast,
}

impl<'de> serde::Deserialize<'de> for AnimationSpeed {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "slow" => Self::Slow,
            "fast" => Self::Fast,
            _ => Self::Normal,
        })
    }
}

impl AnimationSpeed {
    /// Duration of one cycle.
    pub fn duration_ms(self) -> f64 {
        match self {
            Self::Slow => 4000.0,
            Self::Normal => 2000.0,
            Self::Fast => 1000.0,
        }
    }
}

/// Repetition count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterationCount {
    /// Run this many times (at least once).
    Finite(u32),
    /// Run until cancelled.
    Infinite,
}

impl IterationCount {
    /// CSS `animation-iteration-count` value.
    pub fn css(self) -> String {
        match self {
            Self::Finite(n) => n.max(1).to_string(),
            Self::Infinite => "infinite".to_owned(),
        }
    }
}

impl serde::Serialize for IterationCount {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Finite(n) => s.serialize_u32(*n),
            Self::Infinite => s.serialize_str("infinite"),
        }
    }
}

impl<'de> serde::Deserialize<'de> for IterationCount {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(f64),
            Text(String),
        }
        let finite = |v: f64| -> Result<Self, D::Error> {
            if !v.is_finite() || v < 0.0 {
                return Err(serde::de::Error::custom(format!(
                    "iteration count must be a non-negative number, got {v}"
                )));
            }
            Ok(Self::Finite((v.round() as u32).max(1)))
        };
        match Raw::deserialize(d)? {
            Raw::Num(v) => finite(v),
            Raw::Text(t) => match t.trim().to_ascii_lowercase().as_str() {
                "infinite" | "forever" => Ok(Self::Infinite),
                other => other
                    .parse::<f64>()
                    .map_err(|_| serde::de::Error::custom(format!("bad iteration count '{t}'")))
                    .and_then(finite),
            },
        }
    }
}

/// Pipe flow direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    /// Dashes travel along the path direction.
    #[default]
    Forward,
    /// Dashes travel against the path direction.
    Backward,
    /// Dashes oscillate.
    Bidirectional,
}

/// Drop shadow parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DropShadow {
    /// Shadow color.
    pub color: String,
    /// Horizontal offset.
    pub dx: f64,
    /// Vertical offset.
    pub dy: f64,
    /// Blur standard deviation.
    pub blur: f64,
}

impl Default for DropShadow {
    fn default() -> Self {
        Self {
            color: "rgba(0,0,0,0.5)".to_owned(),
            dx: 2.0,
            dy: 2.0,
            blur: 2.0,
        }
    }
}

/// Gradient paint server kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    /// `<linearGradient>`.
    #[default]
    Linear,
    /// `<radialGradient>`.
    Radial,
}

/// Linear gradient axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
}

impl<'de> serde::Deserialize<'de> for GradientDirection {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "vertical" => Self::Vertical,
            "diagonal" => Self::Diagonal,
            _ => Self::Horizontal,
        })
    }
}

/// Two-stop gradient definition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientSpec {
    /// Paint server kind.
    #[serde(rename = "type", default)]
    pub kind: GradientType,
    /// Start stop color.
    pub from: String,
    /// End stop color.
    pub to: String,
    /// Axis for linear gradients.
    #[serde(default)]
    pub direction: GradientDirection,
}

#[cfg(test)]
#[path = "../../tests/unit/style/options.rs"]
mod tests;
