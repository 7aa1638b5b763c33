//! Trajectory projection results

use serde::{Deserialize, Serialize};

/// Scalar projection at time offset `t`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub t: f64,
    pub value: f64,
}

/// Two-axis projection along the plane eigenvectors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanePoint {
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

/// Mode coefficients for the scalar form `c1·e^(λ1·t)·v1 + c2·e^(λ2·t)·v2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeCoefficients {
    pub c1: f64,
    pub v1: f64,
    pub c2: f64,
    pub v2: f64,
}

impl ModeCoefficients {
    pub fn new(c1: f64, v1: f64, c2: f64, v2: f64) -> Self {
        Self { c1, v1, c2, v2 }
    }

    /// Both modes with unit weight
    pub fn unit() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

impl Default for ModeCoefficients {
    fn default() -> Self {
        Self::unit()
    }
}
