use crate::{
    animation::ease::Ease,
    foundation::error::{SymbolFxError, SymbolFxResult},
};

/// Engine-wide timing and fallback configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    /// Pause between repetitions of a value sweep.
    pub settle_delay_ms: f64,
    /// Delay between readiness checks.
    pub retry_delay_ms: f64,
    /// Readiness retries after the first failed check.
    pub readiness_retries: u32,
    /// Target used when neither the caller nor the behavior supplies one.
    pub default_value: f64,
    /// Time an embedded behavior needs to activate after mounting.
    pub activation_delay_ms: f64,
    /// Sweep duration when the caller gives neither speed nor duration.
    pub value_duration_ms: f64,
    /// Easing of value sweeps.
    pub value_ease: Ease,
    /// Switch transition when the caller gives no duration.
    pub switch_transition_ms: f64,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            settle_delay_ms: 500.0,
            retry_delay_ms: 100.0,
            readiness_retries: 3,
            default_value: 30.0,
            activation_delay_ms: 16.0,
            value_duration_ms: 2000.0,
            value_ease: Ease::InOutCubic,
            switch_transition_ms: 300.0,
        }
    }
}

impl EngineOpts {
    /// Reject non-finite or negative delays and out-of-range defaults.
    pub fn validate(&self) -> SymbolFxResult<()> {
        for (name, v) in [
            ("settle_delay_ms", self.settle_delay_ms),
            ("retry_delay_ms", self.retry_delay_ms),
            ("activation_delay_ms", self.activation_delay_ms),
            ("switch_transition_ms", self.switch_transition_ms),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(SymbolFxError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.value_duration_ms.is_finite() || self.value_duration_ms <= 0.0 {
            return Err(SymbolFxError::validation(
                "value_duration_ms must be finite and > 0",
            ));
        }
        if !(0.0..=100.0).contains(&self.default_value) {
            return Err(SymbolFxError::validation(
                "default_value must be within 0..=100",
            ));
        }
        Ok(())
    }
}
