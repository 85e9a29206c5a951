//! Constraint strengths.
//!
//! A strength is a plain `f64` on the scale engines understand. Soft
//! strengths are built from three weighted levels (strong, medium, weak),
//! each clamped to `[0, 1000]`, so any number of weaker violations never
//! outweighs one stronger one. [`REQUIRED`] is the top of the scale and
//! marks a constraint the engine must never relax.

use std::str::FromStr;

use crate::expr::error::ConstraintError;

pub const REQUIRED: f64 = 1_001_001_000.0;
pub const STRONG: f64 = 1_000_000.0;
pub const MEDIUM: f64 = 1_000.0;
pub const WEAK: f64 = 1.0;

const LEVEL_MAX: f64 = 1000.0;

/// Combine strong, medium and weak components under a common weight.
///
/// A NaN level saturates to the level maximum, so the result is always finite.
pub fn create(strong: f64, medium: f64, weak: f64, weight: f64) -> f64 {
    // f64::min ignores NaN, unlike clamp
    let level = |value: f64| (value * weight).min(LEVEL_MAX).max(0.0);
    level(strong) * 1_000_000.0 + level(medium) * 1_000.0 + level(weak)
}

/// Named strength presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Weak,
    Medium,
    Strong,
    Required,
}

impl Preset {
    pub fn value(self) -> f64 {
        match self {
            Preset::Weak => WEAK,
            Preset::Medium => MEDIUM,
            Preset::Strong => STRONG,
            Preset::Required => REQUIRED,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Weak => "weak",
            Preset::Medium => "medium",
            Preset::Strong => "strong",
            Preset::Required => "required",
        }
    }
}

impl FromStr for Preset {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weak" => Ok(Preset::Weak),
            "medium" => Ok(Preset::Medium),
            "strong" => Ok(Preset::Strong),
            "required" => Ok(Preset::Required),
            other => Err(ConstraintError::InvalidStrength {
                value: other.to_string(),
            }),
        }
    }
}

/// A strength as supplied by a caller, before resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrengthSpec {
    Numeric(f64),
    Named(Preset),
}

impl StrengthSpec {
    /// Resolve to the numeric strength.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStrength` for NaN or infinite numbers.
    pub fn resolve(self) -> Result<f64, ConstraintError> {
        match self {
            StrengthSpec::Numeric(value) if value.is_finite() => Ok(value),
            StrengthSpec::Numeric(value) => Err(ConstraintError::InvalidStrength {
                value: value.to_string(),
            }),
            StrengthSpec::Named(preset) => Ok(preset.value()),
        }
    }

    /// Resolve an optional spec, defaulting to [`REQUIRED`].
    pub fn resolve_or_required(spec: Option<StrengthSpec>) -> Result<f64, ConstraintError> {
        spec.map_or(Ok(REQUIRED), StrengthSpec::resolve)
    }
}

impl Default for StrengthSpec {
    fn default() -> Self {
        StrengthSpec::Named(Preset::Required)
    }
}

impl From<f64> for StrengthSpec {
    fn from(value: f64) -> Self {
        StrengthSpec::Numeric(value)
    }
}

impl From<Preset> for StrengthSpec {
    fn from(preset: Preset) -> Self {
        StrengthSpec::Named(preset)
    }
}

impl FromStr for StrengthSpec {
    type Err = ConstraintError;

    /// Parses a preset name. Numbers are not accepted in text form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Preset>().map(StrengthSpec::Named)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_create() {
        assert_eq!(create(0.0, 0.0, 1.0, 1.0), WEAK);
        assert_eq!(create(0.0, 1.0, 0.0, 1.0), MEDIUM);
        assert_eq!(create(1.0, 0.0, 0.0, 1.0), STRONG);
        assert_eq!(create(1000.0, 1000.0, 1000.0, 1.0), REQUIRED);
    }

    #[test]
    fn create_clamps_each_level() {
        assert_eq!(create(5000.0, 0.0, 0.0, 1.0), 1000.0 * STRONG);
        assert_eq!(create(-3.0, 2.0, 0.0, 1.0), 2.0 * MEDIUM);
        assert_eq!(create(1.0, 1.0, 1.0, 2.0), 2.0 * STRONG + 2.0 * MEDIUM + 2.0);
    }

    #[test]
    fn create_saturates_nan_levels() {
        assert_eq!(create(f64::NAN, 0.0, 0.0, 1.0), 1000.0 * STRONG);
        assert_eq!(create(0.0, 0.0, 1.0, f64::NAN), REQUIRED);
        let spec = StrengthSpec::Numeric(create(0.0, f64::NAN, 0.0, 1.0));
        assert_eq!(spec.resolve(), Ok(1000.0 * MEDIUM));
    }

    #[test]
    fn required_is_the_maximum() {
        assert!(REQUIRED > create(999.0, 1000.0, 1000.0, 1.0));
        assert_eq!(create(1e9, 1e9, 1e9, 1.0), REQUIRED);
    }

    #[test]
    fn preset_names() {
        for preset in [Preset::Weak, Preset::Medium, Preset::Strong, Preset::Required] {
            assert_eq!(preset.as_str().parse::<Preset>(), Ok(preset));
        }
        assert!("Strong".parse::<Preset>().is_err());
    }

    #[test]
    fn resolve_numeric_and_named() {
        assert_eq!(StrengthSpec::Numeric(42.5).resolve(), Ok(42.5));
        assert_eq!(StrengthSpec::Named(Preset::Medium).resolve(), Ok(MEDIUM));
    }

    #[test]
    fn resolve_rejects_non_finite() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = StrengthSpec::Numeric(value).resolve().unwrap_err();
            assert_eq!(err.code(), "STRENGTH_INVALID");
        }
    }

    #[test]
    fn missing_spec_defaults_to_required() {
        assert_eq!(StrengthSpec::resolve_or_required(None), Ok(REQUIRED));
        assert_eq!(StrengthSpec::default().resolve(), Ok(REQUIRED));
    }

    #[test]
    fn unknown_name_is_invalid_strength() {
        let err = "loud".parse::<StrengthSpec>().unwrap_err();
        assert_eq!(
            err,
            ConstraintError::InvalidStrength {
                value: "loud".to_string()
            }
        );
    }
}
