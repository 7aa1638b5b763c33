//! Monitor configuration
//!
//! Every numeric constant the components use lives here. Components take
//! their section by value at construction and never read globals.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{Axis, MonitorError, MonitorResult};
use crate::{
    ATTESTATION_MESSAGE, BASELINE, CLIP_LOWER, CLIP_UPPER, COLLAPSE_FLOOR, DENSITY_PAD,
    DIVERGENCE_CEILING, EIGENVECTOR_1, EIGENVECTOR_2, FIRE_CEILING, HARMONY_RIDGE,
    HEALTH_CEILING, HEALTH_WEIGHT_XX, HEALTH_WEIGHT_XY, HEALTH_WEIGHT_YY, LAMBDA_1, LAMBDA_2, MODULATION_WEIGHT, ONTOLOGY_BIAS, ONTOLOGY_SCALE,
    PHASE_SCALE, RIDGE_RATIO, ROTATION_THETA, TEMPORAL_SCALE, THRESHOLD,
};

/// Linear aggregation coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    pub ontology_bias: f64,
    pub ontology_scale: f64,
    pub temporal_scale: f64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            ontology_bias: ONTOLOGY_BIAS,
            ontology_scale: ONTOLOGY_SCALE,
            temporal_scale: TEMPORAL_SCALE,
        }
    }
}

/// Which state axes feed the health form as (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthAxes {
    /// love / service
    pub x: Axis,
    /// truth / alignment
    pub y: Axis,
}

impl Default for HealthAxes {
    fn default() -> Self {
        Self {
            x: Axis::Relational,
            y: Axis::Temporal,
        }
    }
}

/// Density and health parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub harmony_ridge: f64,
    pub threshold: f64,
    pub density_pad: f64,
    pub phase_scale: f64,
    pub health_axes: HealthAxes,
    /// Axis values are divided by this before entering the health form
    pub health_scale: f64,
    /// Weights of x², y² and xy in the health form
    pub health_weight_xx: f64,
    pub health_weight_yy: f64,
    pub health_weight_xy: f64,
    pub health_ceiling: f64,
    pub ridge_ratio: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            harmony_ridge: HARMONY_RIDGE,
            threshold: THRESHOLD,
            density_pad: DENSITY_PAD,
            phase_scale: PHASE_SCALE,
            health_axes: HealthAxes::default(),
            health_scale: PHASE_SCALE,
            health_weight_xx: HEALTH_WEIGHT_XX,
            health_weight_yy: HEALTH_WEIGHT_YY,
            health_weight_xy: HEALTH_WEIGHT_XY,
            health_ceiling: HEALTH_CEILING,
            ridge_ratio: RIDGE_RATIO,
        }
    }
}

/// Stabilization operator parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    /// State axes are divided by this to get the unit-scale orientation
    pub orientation_scale: f64,
    pub rotation_theta: f64,
    pub modulation_weight: f64,
    pub clip_lower: f64,
    pub clip_upper: f64,
    pub fire_ceiling: f64,
    pub collapse_floor: f64,
    pub divergence_ceiling: f64,
    pub baseline: [f64; 4],
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            orientation_scale: PHASE_SCALE,
            rotation_theta: ROTATION_THETA,
            modulation_weight: MODULATION_WEIGHT,
            clip_lower: CLIP_LOWER,
            clip_upper: CLIP_UPPER,
            fire_ceiling: FIRE_CEILING,
            collapse_floor: COLLAPSE_FLOOR,
            divergence_ceiling: DIVERGENCE_CEILING,
            baseline: BASELINE,
        }
    }
}

/// Eigen-path parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    pub lambda_1: f64,
    pub lambda_2: f64,
    pub eigenvector_1: [f64; 2],
    pub eigenvector_2: [f64; 2],
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            lambda_1: LAMBDA_1,
            lambda_2: LAMBDA_2,
            eigenvector_1: EIGENVECTOR_1,
            eigenvector_2: EIGENVECTOR_2,
        }
    }
}

/// Seal parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SealConfig {
    pub message: String,
}

impl Default for SealConfig {
    fn default() -> Self {
        Self {
            message: ATTESTATION_MESSAGE.to_string(),
        }
    }
}

/// Full monitor configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub aggregator: AggregatorConfig,
    pub indicators: IndicatorConfig,
    pub stabilizer: StabilizerConfig,
    pub trajectory: TrajectoryConfig,
    pub seal: SealConfig,
}

fn require_finite(name: &str, value: f64) -> MonitorResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MonitorError::Config(format!("{name} must be finite, got {value}")))
    }
}

fn require_positive(name: &str, value: f64) -> MonitorResult<()> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(MonitorError::Config(format!("{name} must be > 0, got {value}")))
    }
}

impl MonitorConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> MonitorResult<()> {
        let a = &self.aggregator;
        require_finite("aggregator.ontology_bias", a.ontology_bias)?;
        require_finite("aggregator.ontology_scale", a.ontology_scale)?;
        require_finite("aggregator.temporal_scale", a.temporal_scale)?;

        let i = &self.indicators;
        require_finite("indicators.harmony_ridge", i.harmony_ridge)?;
        require_finite("indicators.threshold", i.threshold)?;
        require_finite("indicators.density_pad", i.density_pad)?;
        require_positive("indicators.phase_scale", i.phase_scale)?;
        require_positive("indicators.health_scale", i.health_scale)?;
        require_finite("indicators.health_weight_xx", i.health_weight_xx)?;
        require_finite("indicators.health_weight_yy", i.health_weight_yy)?;
        require_finite("indicators.health_weight_xy", i.health_weight_xy)?;
        require_finite("indicators.health_ceiling", i.health_ceiling)?;
        require_finite("indicators.ridge_ratio", i.ridge_ratio)?;
        if i.threshold <= i.harmony_ridge {
            return Err(MonitorError::Config(format!(
                "indicators.threshold must exceed harmony_ridge, got {} <= {}",
                i.threshold, i.harmony_ridge
            )));
        }
        if i.threshold - i.harmony_ridge + i.density_pad <= 0.0 {
            return Err(MonitorError::Config(
                "indicators: threshold - harmony_ridge + density_pad must be > 0".to_string(),
            ));
        }
        if i.health_axes.x == i.health_axes.y {
            return Err(MonitorError::Config(format!(
                "indicators.health_axes must name two different axes, got {} twice",
                i.health_axes.x
            )));
        }

        let s = &self.stabilizer;
        require_positive("stabilizer.orientation_scale", s.orientation_scale)?;
        require_finite("stabilizer.rotation_theta", s.rotation_theta)?;
        require_finite("stabilizer.clip_lower", s.clip_lower)?;
        require_finite("stabilizer.clip_upper", s.clip_upper)?;
        require_finite("stabilizer.fire_ceiling", s.fire_ceiling)?;
        require_positive("stabilizer.collapse_floor", s.collapse_floor)?;
        require_positive("stabilizer.divergence_ceiling", s.divergence_ceiling)?;
        if !(0.0..=1.0).contains(&s.modulation_weight) {
            return Err(MonitorError::Config(format!(
                "stabilizer.modulation_weight must be in [0, 1], got {}",
                s.modulation_weight
            )));
        }
        if s.clip_lower >= s.clip_upper {
            return Err(MonitorError::Config(format!(
                "stabilizer.clip_lower must be < clip_upper, got {} >= {}",
                s.clip_lower, s.clip_upper
            )));
        }
        if !(s.clip_lower < s.fire_ceiling && s.fire_ceiling < s.clip_upper) {
            return Err(MonitorError::Config(format!(
                "stabilizer.fire_ceiling must lie strictly inside the clip envelope, got {}",
                s.fire_ceiling
            )));
        }
        if s.collapse_floor >= s.divergence_ceiling {
            return Err(MonitorError::Config(
                "stabilizer.collapse_floor must be < divergence_ceiling".to_string(),
            ));
        }
        if s.baseline.iter().any(|v| !v.is_finite()) {
            return Err(MonitorError::Config(
                "stabilizer.baseline must be finite".to_string(),
            ));
        }

        let t = &self.trajectory;
        require_finite("trajectory.lambda_1", t.lambda_1)?;
        require_finite("trajectory.lambda_2", t.lambda_2)?;

        if self.seal.message.is_empty() {
            return Err(MonitorError::Config("seal.message must not be empty".to_string()));
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> MonitorResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MonitorError::Config(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML string.
    pub fn from_toml(text: &str) -> MonitorResult<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| MonitorError::Config(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` is read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> MonitorResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MonitorError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_valid() {
        assert!(MonitorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = MonitorConfig::from_toml(
            r#"
            [indicators]
            health_ceiling = 0.8

            [indicators.health_axes]
            x = "ontology"
            y = "phase"
            "#,
        )
        .unwrap();

        assert_eq!(config.indicators.health_ceiling, 0.8);
        assert_eq!(config.indicators.health_axes.x, Axis::Ontology);
        assert_eq!(config.indicators.threshold, THRESHOLD);
        assert_eq!(config.aggregator, AggregatorConfig::default());
    }

    #[test]
    fn test_partial_health_axes_keeps_other_default() {
        let config = MonitorConfig::from_toml(
            r#"
            [indicators.health_axes]
            x = "ontology"
            "#,
        )
        .unwrap();
        assert_eq!(config.indicators.health_axes.x, Axis::Ontology);
        assert_eq!(config.indicators.health_axes.y, Axis::Temporal);

        let config =
            MonitorConfig::from_json(r#"{"indicators": {"health_axes": {"y": "phase"}}}"#).unwrap();
        assert_eq!(config.indicators.health_axes.x, Axis::Relational);
        assert_eq!(config.indicators.health_axes.y, Axis::Phase);
    }

    #[test]
    fn test_health_weights_from_toml() {
        let config = MonitorConfig::from_toml(
            r#"
            [indicators]
            health_weight_xx = 1.0
            health_weight_xy = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(config.indicators.health_weight_xx, 1.0);
        assert_eq!(config.indicators.health_weight_yy, HEALTH_WEIGHT_YY);
        assert_eq!(config.indicators.health_weight_xy, 0.0);
    }

    #[test]
    fn test_non_finite_health_weight_rejected() {
        let mut config = MonitorConfig::default();
        config.indicators.health_weight_yy = f64::NAN;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("health_weight_yy"));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = MonitorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored = MonitorConfig::from_json(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_fire_ceiling_outside_clip_rejected() {
        let mut config = MonitorConfig::default();
        config.stabilizer.fire_ceiling = 12.0;
        assert!(matches!(config.validate(), Err(MonitorError::Config(_))));
    }

    #[test]
    fn test_threshold_below_ridge_rejected() {
        let mut config = MonitorConfig::default();
        config.indicators.threshold = 1.5;
        assert!(matches!(config.validate(), Err(MonitorError::Config(_))));
    }

    #[test]
    fn test_same_health_axes_rejected() {
        let mut config = MonitorConfig::default();
        config.indicators.health_axes = HealthAxes {
            x: Axis::Phase,
            y: Axis::Phase,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_garbage_toml_is_config_error() {
        let err = MonitorConfig::from_toml("[[[ nope").unwrap_err();
        assert!(matches!(err, MonitorError::Config(_)));
    }
}
