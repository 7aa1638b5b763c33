//! Trajectory Projector: two-mode exponential projection
//!
//! scalar: c1·e^(λ1·t)·v1 + c2·e^(λ2·t)·v2
//! plane:  c1·e^(λ1·t)·e1 + c2·e^(λ2·t)·e2 with eigenvectors e1, e2

use crate::types::{
    ModeCoefficients, MonitorError, MonitorResult, PlanePoint, TrajectoryConfig, TrajectoryPoint,
};

#[derive(Debug, Clone, Default)]
pub struct TrajectoryProjector {
    config: TrajectoryConfig,
}

impl TrajectoryProjector {
    pub fn new(config: TrajectoryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrajectoryConfig {
        &self.config
    }

    fn modes(&self, t: f64) -> (f64, f64) {
        ((self.config.lambda_1 * t).exp(), (self.config.lambda_2 * t).exp())
    }

    /// Scalar projection at offset `t`. Any real `t`; fails only when the
    /// result is not finite.
    pub fn project(&self, t: f64, k: ModeCoefficients) -> MonitorResult<TrajectoryPoint> {
        let (m1, m2) = self.modes(t);
        let value = k.c1 * m1 * k.v1 + k.c2 * m2 * k.v2;
        if !value.is_finite() {
            return Err(MonitorError::NonFiniteProjection { t });
        }
        Ok(TrajectoryPoint { t, value })
    }

    /// Projection onto the (x, y) plane along the configured eigenvectors
    pub fn project_plane(&self, t: f64, c1: f64, c2: f64) -> MonitorResult<PlanePoint> {
        let (m1, m2) = self.modes(t);
        let [e1x, e1y] = self.config.eigenvector_1;
        let [e2x, e2y] = self.config.eigenvector_2;
        let x = c1 * m1 * e1x + c2 * m2 * e2x;
        let y = c1 * m1 * e1y + c2 * m2 * e2y;
        if !(x.is_finite() && y.is_finite()) {
            return Err(MonitorError::NonFiniteProjection { t });
        }
        Ok(PlanePoint { t, x, y })
    }

    /// `steps` evenly spaced plane points on `[0, t_max)`
    pub fn sample(
        &self,
        t_max: f64,
        steps: usize,
        c1: f64,
        c2: f64,
    ) -> MonitorResult<Vec<PlanePoint>> {
        if steps == 0 {
            return Ok(Vec::new());
        }
        let dt = t_max / steps as f64;
        (0..steps)
            .map(|i| self.project_plane(i as f64 * dt, c1, c2))
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
