//! Indicator Calculator
//!
//! density = H + (phase / phase_scale) × (T − H + pad)
//! health  = a·x² + b·y² + c·xy over two configured axes
//!           (weights default to 0.4, 0.3, 0.3)

use crate::types::{DensityStatus, HealthStatus, IndicatorConfig, Indicators, StateVector};

/// Computes density and health from a state vector
#[derive(Debug, Clone, Default)]
pub struct IndicatorCalculator {
    config: IndicatorConfig,
}

impl IndicatorCalculator {
    pub fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    fn density_span(&self) -> f64 {
        self.config.threshold - self.config.harmony_ridge + self.config.density_pad
    }

    pub fn density(&self, phase: f64) -> f64 {
        self.config.harmony_ridge + (phase / self.config.phase_scale) * self.density_span()
    }

    pub fn density_status(&self, density: f64) -> DensityStatus {
        if density >= self.config.threshold {
            DensityStatus::ThresholdMet
        } else {
            DensityStatus::ThresholdNotMet
        }
    }

    /// Phase at which density reaches the threshold exactly
    pub fn threshold_phase(&self) -> f64 {
        (self.config.threshold - self.config.harmony_ridge) * self.config.phase_scale
            / self.density_span()
    }

    /// Raw quadratic form, no scaling
    pub fn health(&self, x: f64, y: f64) -> f64 {
        let c = &self.config;
        c.health_weight_xx * x * x + c.health_weight_yy * y * y + c.health_weight_xy * x * y
    }

    /// Health over the configured axes of `state`, each divided by `health_scale`
    pub fn health_for(&self, state: &StateVector) -> f64 {
        let axes = self.config.health_axes;
        let x = state.component(axes.x) / self.config.health_scale;
        let y = state.component(axes.y) / self.config.health_scale;
        self.health(x, y)
    }

    pub fn health_status(&self, health: f64) -> HealthStatus {
        if health > self.config.health_ceiling {
            HealthStatus::Unstable
        } else {
            HealthStatus::Stable
        }
    }

    pub fn compute(&self, state: &StateVector) -> Indicators {
        let density = self.density(state.phase);
        let health = self.health_for(state);
        Indicators {
            density,
            health,
            density_status: self.density_status(density),
            health_status: self.health_status(health),
        }
    }

    /// The y value on the harmony ridge for a given x
    pub fn project_to_ridge(&self, x: f64) -> f64 {
        x * self.config.ridge_ratio
    }

    pub fn on_ridge(&self, x: f64, y: f64, tolerance: f64) -> bool {
        (y - self.project_to_ridge(x)).abs() <= tolerance
    }
}

// =============================================================================
// TESTS
// =============================================================================
