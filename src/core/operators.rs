//! Stabilization operators on the unit-scale orientation vector
//!
//! Vector order: [Air, Water, Fire, Earth]
//!
//! Pipeline per cycle:
//!   rotate → modulate + clip → fire clamp → divergence check → hard reset
//!
//! Each operator is a pure function. `Stabilizer` chains them and records
//! which ones changed the vector.

use tracing::{debug, warn};

use crate::types::{MonitorError, MonitorResult, ReasonCode, StabilizerConfig};

/// Position of the Fire element
pub const FIRE_INDEX: usize = 2;

/// Rotation never grows the magnitude by more than this factor
pub const ROTATION_NORM_BOUND: f64 = 1.0 + 1e-12;

/// Euclidean norm
pub fn magnitude(v: &[f64; 4]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Rotation/stability: rotate the Air/Earth plane by `theta` radians.
/// Water and Fire pass through. Norm preserving up to rounding.
pub fn rotate(v: [f64; 4], theta: f64) -> [f64; 4] {
    let (s, c) = theta.sin_cos();
    [c * v[0] - s * v[3], v[1], v[2], s * v[0] + c * v[3]]
}

/// Clip a scalar into `[lower, upper]`. NaN maps to `lower`.
pub fn clip(value: f64, lower: f64, upper: f64) -> f64 {
    value.max(lower).min(upper)
}

/// Element-wise `clip`
pub fn clip_vector(v: [f64; 4], lower: f64, upper: f64) -> [f64; 4] {
    v.map(|x| clip(x, lower, upper))
}

/// Blend toward the baseline: `(1 - weight)·v + weight·baseline`
pub fn modulate(v: [f64; 4], baseline: &[f64; 4], weight: f64) -> [f64; 4] {
    let mut out = v;
    for (o, b) in out.iter_mut().zip(baseline) {
        *o = *o * (1.0 - weight) + b * weight;
    }
    out
}

/// Safety clamp of the Fire element into `[lower, ceiling]`.
/// Other elements pass through.
pub fn clamp_fire(v: [f64; 4], lower: f64, ceiling: f64) -> [f64; 4] {
    let mut out = v;
    out[FIRE_INDEX] = clip(v[FIRE_INDEX], lower, ceiling);
    out
}

/// Check the magnitude against the entropy envelope
/// `[collapse_floor, divergence_ceiling]`. Returns the magnitude when inside.
pub fn detect_divergence(v: &[f64; 4], config: &StabilizerConfig) -> MonitorResult<f64> {
    let m = magnitude(v);
    if !m.is_finite() || m > config.divergence_ceiling || m < config.collapse_floor {
        return Err(MonitorError::DivergenceDetected { magnitude: m });
    }
    Ok(m)
}

/// Hard reset: the baseline when `diverged`, the input otherwise
pub fn hard_reset(v: [f64; 4], diverged: bool, baseline: &[f64; 4]) -> [f64; 4] {
    if diverged {
        *baseline
    } else {
        v
    }
}

/// Result of one stabilizer pass
#[derive(Debug, Clone, PartialEq)]
pub struct Stabilized {
    pub vector: [f64; 4],
    /// Intervention codes, or `R003_WITHIN_ENVELOPE` when none fired
    pub reasons: Vec<ReasonCode>,
}

impl Stabilized {
    pub fn was_reset(&self) -> bool {
        self.reasons.contains(&ReasonCode::R004_DIVERGENCE_RESET)
    }
}

/// Chains the four operators with one configuration
#[derive(Debug, Clone, Default)]
pub struct Stabilizer {
    config: StabilizerConfig,
}

impl Stabilizer {
    pub fn new(config: StabilizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StabilizerConfig {
        &self.config
    }

    /// Run the full pipeline on one orientation vector
    pub fn stabilize(&self, input: [f64; 4]) -> Stabilized {
        let cfg = &self.config;
        let mut reasons = Vec::new();

        let rotated = rotate(input, cfg.rotation_theta);
        let modulated = modulate(rotated, &cfg.baseline, cfg.modulation_weight);

        let clipped = clip_vector(modulated, cfg.clip_lower, cfg.clip_upper);
        if clipped != modulated {
            debug!(?modulated, ?clipped, "envelope clip");
            reasons.push(ReasonCode::R003_ENVELOPE_CLIPPED);
        }

        let safe = clamp_fire(clipped, cfg.clip_lower, cfg.fire_ceiling);
        if safe != clipped {
            debug!(
                fire = clipped[FIRE_INDEX],
                ceiling = cfg.fire_ceiling,
                "fire clamp"
            );
            reasons.push(ReasonCode::R003_FIRE_CLAMPED);
        }

        let diverged = match detect_divergence(&safe, cfg) {
            Ok(_) => false,
            Err(err) => {
                warn!(%err, "resetting to baseline");
                reasons.push(ReasonCode::R004_DIVERGENCE_RESET);
                true
            }
        };
        let vector = hard_reset(safe, diverged, &cfg.baseline);

        if reasons.is_empty() {
            reasons.push(ReasonCode::R003_WITHIN_ENVELOPE);
        }
        Stabilized { vector, reasons }
    }
}

// =============================================================================
// TESTS
// =============================================================================
