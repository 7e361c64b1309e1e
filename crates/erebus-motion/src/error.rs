//! Error types for the motion-control crate.

use thiserror::Error;

/// Errors raised while building the motion controllers.
///
/// The controllers themselves never fail once built: every control tick is a
/// bounded numeric step on already-sensed pose data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    /// The heading controller tuning cannot produce a bounded velocity.
    #[error("invalid rotation tuning: {0}")]
    InvalidRotationTuning(&'static str),
    /// The position controller tuning cannot produce a bounded velocity.
    #[error("invalid translation tuning: {0}")]
    InvalidTranslationTuning(&'static str),
}
