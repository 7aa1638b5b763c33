//! Integration tests for Slice 2 - stabilization operators
//!
//! Tests the operator contracts and the stabilizer inside a cycle

use ridgeline::core::operators::{
    clamp_fire, clip, clip_vector, detect_divergence, hard_reset, magnitude, rotate,
    ROTATION_NORM_BOUND,
};
use ridgeline::core::{Monitor, Stabilizer};
use ridgeline::types::{HealthStatus, MonitorConfig, ReasonCode, StabilizerConfig};
use ridgeline::{BASELINE, CLIP_LOWER, CLIP_UPPER, FIRE_CEILING};

fn sweep() -> Vec<f64> {
    let mut values: Vec<f64> = (-60..=60).map(|i| i as f64 * 0.25).collect();
    values.extend([f64::MAX, f64::MIN, f64::INFINITY, f64::NEG_INFINITY, 1e-300]);
    values
}

/// clip(clip(x)) == clip(x) and stays inside the bounds
#[test]
fn test_clip_idempotent_over_sweep() {
    for x in sweep() {
        let once = clip(x, CLIP_LOWER, CLIP_UPPER);
        assert_eq!(clip(once, CLIP_LOWER, CLIP_UPPER), once);
        assert!((CLIP_LOWER..=CLIP_UPPER).contains(&once));
    }
}

/// Fire clamp is idempotent and narrower than the general clip
#[test]
fn test_fire_clamp_idempotent_over_sweep() {
    for x in sweep() {
        let v = clip_vector([x; 4], CLIP_LOWER, CLIP_UPPER);
        let once = clamp_fire(v, CLIP_LOWER, FIRE_CEILING);
        assert_eq!(clamp_fire(once, CLIP_LOWER, FIRE_CEILING), once);
        assert!(once[2] <= FIRE_CEILING);
    }
}

/// Hard reset returns the baseline exactly, whatever the input
#[test]
fn test_hard_reset_exact() {
    for x in sweep() {
        assert_eq!(hard_reset([x, -x, x, x], true, &BASELINE), BASELINE);
    }
}

/// Repeated rotation never grows the vector beyond the bound
#[test]
fn test_rotation_bounded_over_many_steps() {
    let mut v = [0.85, 0.015, 0.014, 0.29];
    let start = magnitude(&v);
    for _ in 0..10_000 {
        let next = rotate(v, 0.05);
        assert!(magnitude(&next) <= magnitude(&v) * ROTATION_NORM_BOUND + f64::EPSILON);
        v = next;
    }
    assert!((magnitude(&v) - start).abs() < 1e-9);
}

/// Entropy envelope: collapse and blow-up are both divergence
#[test]
fn test_divergence_envelope() {
    let cfg = StabilizerConfig::default();
    assert!(detect_divergence(&[0.0; 4], &cfg).is_err());
    assert!(detect_divergence(&[9.0, 9.0, 0.0, 0.0], &cfg).is_err());
    let m = detect_divergence(&[0.6, 0.0, 0.0, 0.8], &cfg).unwrap();
    assert!((m - 1.0).abs() < 1e-12);
}

/// Stabilizer output always stays inside the envelope
#[test]
fn test_stabilizer_output_in_envelope() {
    let stab = Stabilizer::default();
    for x in sweep() {
        let out = stab.stabilize([x, x * 0.5, x, -x]);
        let m = magnitude(&out.vector);
        assert!(m.is_finite());
        assert!(m <= 10.0, "magnitude {m} for {x}");
        assert!(out.vector[2] <= FIRE_CEILING);
    }
}

/// Huge signals reset the cycle; state and indicators follow the baseline
#[test]
fn test_monitor_reset_publishes_baseline() {
    let mut monitor = Monitor::default();
    for signals in [[5000.0; 3], [1e6, 1e6, 1e6], [-1e6, 2e6, 1e5]] {
        let output = monitor.step(0, signals).unwrap();

        assert!(output.reasons.contains(&ReasonCode::R004_DIVERGENCE_RESET));
        assert_eq!(output.orientation, BASELINE);
        assert_eq!(output.state.to_array(), BASELINE.map(|v| v * 100.0));
        let d = output.indicators.density;
        assert!((1.6667..=1.9667).contains(&d), "density {d} after reset");
        assert_eq!(output.indicators.health_status, HealthStatus::Stable);
    }
}

/// A tighter fire ceiling is honoured through the config
#[test]
fn test_custom_fire_ceiling_through_config() {
    let mut config = MonitorConfig::default();
    config.stabilizer.fire_ceiling = 0.01;
    let mut monitor = Monitor::new(config).unwrap();

    let output = monitor.step(0, [5.0, 5.0, 5.0]).unwrap();
    assert_eq!(output.orientation[2], 0.01);
    assert!(output.reasons.contains(&ReasonCode::R003_FIRE_CLAMPED));
}
