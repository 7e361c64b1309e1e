//! Tuning for the heading and position controllers.
//!
//! Defaults reproduce the constants the controllers were tuned with on the
//! competition robot. Angles are in degrees, distances in meters and
//! velocities are wheel ratios.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MotionError;

/// Heading controller tuning.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTuning {
    /// Heading error under which a rotation is complete (deg).
    pub accuracy_deg: f64,
    /// Heading error under which the fine-approach slowdown applies (deg).
    pub velocity_reduction_threshold_deg: f64,
    /// Multiplier applied to the velocity inside the reduction threshold.
    pub fine_approach_factor: f64,
    /// Heading error at which the ramp reaches `max_velocity` (deg).
    pub full_speed_error_deg: f64,
    /// Upper bound applied after shaping.
    pub max_velocity_cap: f64,
    /// Lower bound applied after shaping.
    pub min_velocity_cap: f64,
    /// Ramp output at `full_speed_error_deg`.
    pub max_velocity: f64,
    /// Ramp output at `accuracy_deg`.
    pub min_velocity: f64,
}

impl Default for RotationTuning {
    fn default() -> Self {
        RotationTuning {
            accuracy_deg: 2.0,
            velocity_reduction_threshold_deg: 10.0,
            fine_approach_factor: 0.5,
            full_speed_error_deg: 90.0,
            max_velocity_cap: 1.0,
            min_velocity_cap: 0.2,
            max_velocity: 1.0,
            min_velocity: 0.2,
        }
    }
}

impl RotationTuning {
    /// Checks the tuning can only produce finite ratios in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `Err(MotionError::InvalidRotationTuning)` naming the first offending field.
    // Written as negated comparisons so NaN fails them.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), MotionError> {
        if !(self.accuracy_deg > 0.0) {
            return Err(MotionError::InvalidRotationTuning("accuracy_deg must be positive"));
        }
        if !(self.velocity_reduction_threshold_deg >= 0.0) {
            return Err(MotionError::InvalidRotationTuning(
                "velocity_reduction_threshold_deg must be non-negative",
            ));
        }
        if !(self.fine_approach_factor > 0.0 && self.fine_approach_factor <= 1.0) {
            return Err(MotionError::InvalidRotationTuning(
                "fine_approach_factor must be in (0, 1]",
            ));
        }
        if !(self.full_speed_error_deg > self.accuracy_deg) {
            return Err(MotionError::InvalidRotationTuning(
                "full_speed_error_deg must exceed accuracy_deg",
            ));
        }
        if !caps_are_valid(self.min_velocity_cap, self.max_velocity_cap) {
            return Err(MotionError::InvalidRotationTuning(
                "velocity caps must satisfy 0 <= min <= max <= 1",
            ));
        }
        if !(self.min_velocity <= self.max_velocity) {
            return Err(MotionError::InvalidRotationTuning(
                "min_velocity must not exceed max_velocity",
            ));
        }
        Ok(())
    }
}

/// Position controller tuning.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslationTuning {
    /// Distance under which a move is complete (m).
    pub error_margin: f64,
    /// Distance at which the straight-line velocity starts ramping down (m).
    pub deceleration_start: f64,
    /// Upper bound applied after shaping.
    pub max_velocity_cap: f64,
    /// Lower bound applied after shaping.
    pub min_velocity_cap: f64,
    /// Ramp output at `deceleration_start`.
    pub max_velocity: f64,
    /// Ramp output at zero distance.
    pub min_velocity: f64,
}

impl Default for TranslationTuning {
    fn default() -> Self {
        TranslationTuning {
            error_margin: 0.01,
            deceleration_start: 0.5 * 0.12,
            max_velocity_cap: 1.0,
            min_velocity_cap: 0.8,
            max_velocity: 1.0,
            min_velocity: 0.1,
        }
    }
}

impl TranslationTuning {
    /// Checks the tuning can only produce finite ratios in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `Err(MotionError::InvalidTranslationTuning)` naming the first offending field.
    // Written as negated comparisons so NaN fails them.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), MotionError> {
        if !(self.error_margin > 0.0) {
            return Err(MotionError::InvalidTranslationTuning("error_margin must be positive"));
        }
        if !(self.deceleration_start > 0.0) {
            return Err(MotionError::InvalidTranslationTuning(
                "deceleration_start must be positive",
            ));
        }
        if !caps_are_valid(self.min_velocity_cap, self.max_velocity_cap) {
            return Err(MotionError::InvalidTranslationTuning(
                "velocity caps must satisfy 0 <= min <= max <= 1",
            ));
        }
        if !(self.min_velocity <= self.max_velocity) {
            return Err(MotionError::InvalidTranslationTuning(
                "min_velocity must not exceed max_velocity",
            ));
        }
        Ok(())
    }
}

/// Tuning for the whole drive base.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionConfig {
    /// Used by both heading controllers.
    pub rotation: RotationTuning,
    /// Used by the position controller.
    pub translation: TranslationTuning,
}

impl MotionConfig {
    /// Validates both tunings.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`RotationTuning::validate`] or
    /// [`TranslationTuning::validate`].
    pub fn validate(&self) -> Result<(), MotionError> {
        self.rotation.validate()?;
        self.translation.validate()
    }
}

fn caps_are_valid(min_cap: f64, max_cap: f64) -> bool {
    min_cap >= 0.0 && min_cap <= max_cap && max_cap <= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(MotionConfig::default().validate(), Ok(()));
        let translation = TranslationTuning::default();
        assert!((translation.deceleration_start - 0.06).abs() < 1e-12);
        assert_eq!(RotationTuning::default().accuracy_deg, 2.0);
    }

    #[test]
    fn test_rejects_zero_accuracy() {
        let mut config = MotionConfig::default();
        config.rotation.accuracy_deg = 0.0;
        assert_eq!(
            config.validate(),
            Err(MotionError::InvalidRotationTuning("accuracy_deg must be positive"))
        );
    }

    #[test]
    fn test_rejects_nan_tolerance() {
        let mut config = MotionConfig::default();
        config.translation.error_margin = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(MotionError::InvalidTranslationTuning(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_caps() {
        let mut config = MotionConfig::default();
        config.translation.min_velocity_cap = 1.0;
        config.translation.max_velocity_cap = 0.5;
        assert!(matches!(
            config.validate(),
            Err(MotionError::InvalidTranslationTuning(_))
        ));

        let mut config = MotionConfig::default();
        config.rotation.max_velocity_cap = 1.5;
        assert!(matches!(
            config.validate(),
            Err(MotionError::InvalidRotationTuning(_))
        ));
    }

    #[test]
    fn test_rejects_empty_ramp_domain() {
        let mut config = MotionConfig::default();
        config.rotation.full_speed_error_deg = 2.0;
        assert!(config.validate().is_err());

        let mut config = MotionConfig::default();
        config.translation.deceleration_start = 0.0;
        assert!(config.validate().is_err());
    }
}
