/// Easing applied to value-driven sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    /// Constant rate.
    Linear,
    /// Symmetric quadratic in-out.
    InOutQuad,
    /// Symmetric cubic in-out.
    #[default]
    InOutCubic,
}

impl Ease {
    /// Map a linear fraction to the eased fraction. Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// CSS timing function attached to declarative effects and switch transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TimingCurve {
    /// `ease`
    #[default]
    Ease,
    /// `linear`
    Linear,
    /// `ease-in`
    EaseIn,
    /// `ease-out`
    EaseOut,
    /// `ease-in-out`
    EaseInOut,
    /// `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier([f64; 4]),
    /// `steps(n)`
    Steps(u32),
}

impl TimingCurve {
    /// Parse a CSS timing function. Returns `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Some(match s.as_str() {
            "ease" => Self::Ease,
            "linear" => Self::Linear,
            "ease-in" => Self::EaseIn,
            "ease-out" => Self::EaseOut,
            "ease-in-out" => Self::EaseInOut,
            _ => {
                if let Some(args) = call_args(&s, "cubic-bezier") {
                    let v: Vec<f64> = args
                        .split(',')
                        .map(|a| a.trim().parse::<f64>())
                        .collect::<Result<_, _>>()
                        .ok()?;
                    let [x1, y1, x2, y2] = v[..] else {
                        return None;
                    };
                    if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                        return None;
                    }
                    Self::CubicBezier([x1, y1, x2, y2])
                } else if let Some(args) = call_args(&s, "steps") {
                    let n: u32 = args.split(',').next()?.trim().parse().ok()?;
                    (n > 0).then_some(Self::Steps(n))?
                } else {
                    return None;
                }
            }
        })
    }
}

impl std::fmt::Display for TimingCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ease => f.write_str("ease"),
            Self::Linear => f.write_str("linear"),
            Self::EaseIn => f.write_str("ease-in"),
            Self::EaseOut => f.write_str("ease-out"),
            Self::EaseInOut => f.write_str("ease-in-out"),
            Self::CubicBezier([a, b, c, d]) => write!(f, "cubic-bezier({a}, {b}, {c}, {d})"),
            Self::Steps(n) => write!(f, "steps({n})"),
        }
    }
}

fn call_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}
