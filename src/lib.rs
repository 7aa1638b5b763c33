//! Ridgeline: deterministic state monitor
//!
//! Signals → Aggregator → Stabilizer → Indicators, plus a one-time
//! Ed25519 attestation seal and a two-mode trajectory projector.

pub mod core;
pub mod types;

// =============================================================================
// AGGREGATOR [C]
// =============================================================================

/// Constant offset of the ontology axis
pub const ONTOLOGY_BIAS: f64 = 85.0;

/// Share of the signal average added to ontology
pub const ONTOLOGY_SCALE: f64 = 0.15;

/// Low-pass factor applied to the signal average for the temporal axis
pub const TEMPORAL_SCALE: f64 = 0.95;

// =============================================================================
// INDICATORS [C]
// =============================================================================

/// Density floor (5/3 rounded to 4 places)
pub const HARMONY_RIDGE: f64 = 1.6667;

/// Density at or above this value means "threshold met"
pub const THRESHOLD: f64 = 1.7333;

/// Extra span added on top of (THRESHOLD - HARMONY_RIDGE)
pub const DENSITY_PAD: f64 = 0.1;

/// Phase is read on a 0-100 scale
pub const PHASE_SCALE: f64 = 100.0;

/// Exact ridge ratio y = 5/3 x
pub const RIDGE_RATIO: f64 = 5.0 / 3.0;

/// Health above this is flagged unstable
pub const HEALTH_CEILING: f64 = 0.5;

/// Default health weights: 0.4x² + 0.3y² + 0.3xy
pub const HEALTH_WEIGHT_XX: f64 = 0.4;
pub const HEALTH_WEIGHT_YY: f64 = 0.3;
pub const HEALTH_WEIGHT_XY: f64 = 0.3;

// =============================================================================
// STABILIZER [C]
// =============================================================================

/// Rotation angle on the Air/Earth plane (radians)
pub const ROTATION_THETA: f64 = 0.05;

/// Blend toward the baseline before clipping
pub const MODULATION_WEIGHT: f64 = 0.2;

/// General clip envelope
pub const CLIP_LOWER: f64 = -10.0;
pub const CLIP_UPPER: f64 = 10.0;

/// Upper limit for the Fire component (index 2)
pub const FIRE_CEILING: f64 = 0.75;

/// Magnitude below this is an entropy collapse
pub const COLLAPSE_FLOOR: f64 = 0.001;

/// Magnitude above this is a divergence
pub const DIVERGENCE_CEILING: f64 = 10.0;

/// Canonical baseline the hard reset returns to
pub const BASELINE: [f64; 4] = [1.0, 0.0, 0.0, 0.0];

// =============================================================================
// TRAJECTORY [C]
// =============================================================================

/// Fast-growth eigenvalue
pub const LAMBDA_1: f64 = 1.016;

/// Slow eigenvalue
pub const LAMBDA_2: f64 = 0.384;

/// Plane eigenvectors (normalized to 3 places)
pub const EIGENVECTOR_1: [f64; 2] = [0.707, 0.707];
pub const EIGENVECTOR_2: [f64; 2] = [0.707, -0.707];

// =============================================================================
// SEAL
// =============================================================================

/// Default attestation message
pub const ATTESTATION_MESSAGE: &str = "CHICKA_CHICKA_ORANGE";

/// Signature algorithm name reported alongside seals
pub const SEAL_ALGORITHM: &str = "Ed25519";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
