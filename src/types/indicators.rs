//! Derived scalar indicators

use serde::{Deserialize, Serialize};

/// Whether density reached the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DensityStatus {
    ThresholdMet,
    ThresholdNotMet,
}

impl DensityStatus {
    pub fn is_met(&self) -> bool {
        matches!(self, DensityStatus::ThresholdMet)
    }
}

impl std::fmt::Display for DensityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DensityStatus::ThresholdMet => "threshold met",
            DensityStatus::ThresholdNotMet => "threshold not met",
        };
        write!(f, "{}", name)
    }
}

/// Health against the configured ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    /// At or below the ceiling
    Stable,
    /// Above the ceiling
    Unstable,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HealthStatus::Stable => "stable",
            HealthStatus::Unstable => "unstable",
        };
        write!(f, "{}", name)
    }
}

/// Density and health for one state vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    /// Bounded density indicator
    pub density: f64,
    /// Quadratic-form health (lower is more stable)
    pub health: f64,
    pub density_status: DensityStatus,
    pub health_status: HealthStatus,
}

impl Indicators {
    pub fn threshold_met(&self) -> bool {
        self.density_status.is_met()
    }
}
