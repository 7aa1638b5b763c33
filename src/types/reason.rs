//! Reason codes for stabilizer events and indicator outcomes

use serde::{Deserialize, Serialize};

/// Reason codes attached to each cycle output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R001: Density
    // =========================================================================
    /// Density at or above THRESHOLD
    R001_THRESHOLD_MET,
    /// Density below THRESHOLD
    R001_THRESHOLD_NOT_MET,

    // =========================================================================
    // R002: Health
    // =========================================================================
    /// Health at or below the ceiling
    R002_HEALTH_STABLE,
    /// Health above the ceiling
    R002_HEALTH_UNSTABLE,

    // =========================================================================
    // R003: Envelope
    // =========================================================================
    /// Stabilized vector needed no bounding
    R003_WITHIN_ENVELOPE,
    /// At least one element hit the general clip
    R003_ENVELOPE_CLIPPED,
    /// Fire element clamped to its safety interval
    R003_FIRE_CLAMPED,

    // =========================================================================
    // R004: Divergence
    // =========================================================================
    /// Magnitude left the envelope, state reset to baseline
    R004_DIVERGENCE_RESET,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R001_THRESHOLD_MET => "R001_THRESHOLD_MET",
            Self::R001_THRESHOLD_NOT_MET => "R001_THRESHOLD_NOT_MET",
            Self::R002_HEALTH_STABLE => "R002_HEALTH_STABLE",
            Self::R002_HEALTH_UNSTABLE => "R002_HEALTH_UNSTABLE",
            Self::R003_WITHIN_ENVELOPE => "R003_WITHIN_ENVELOPE",
            Self::R003_ENVELOPE_CLIPPED => "R003_ENVELOPE_CLIPPED",
            Self::R003_FIRE_CLAMPED => "R003_FIRE_CLAMPED",
            Self::R004_DIVERGENCE_RESET => "R004_DIVERGENCE_RESET",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R001_THRESHOLD_MET => "Density threshold met",
            Self::R001_THRESHOLD_NOT_MET => "Density below threshold",
            Self::R002_HEALTH_STABLE => "Health within ceiling",
            Self::R002_HEALTH_UNSTABLE => "Health above ceiling",
            Self::R003_WITHIN_ENVELOPE => "Within safe envelope",
            Self::R003_ENVELOPE_CLIPPED => "Clipped to safe envelope",
            Self::R003_FIRE_CLAMPED => "Fire element clamped",
            Self::R004_DIVERGENCE_RESET => "Divergence, reset to baseline",
        }
    }

    /// Did an operator change the vector?
    pub fn is_intervention(&self) -> bool {
        matches!(
            self,
            Self::R003_ENVELOPE_CLIPPED | Self::R003_FIRE_CLAMPED | Self::R004_DIVERGENCE_RESET
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
