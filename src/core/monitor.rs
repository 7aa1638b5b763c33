//! Monitor: one cycle of Signals → Aggregator → Stabilizer → Indicators
//!
//! Every cycle is computed from that cycle's three samples alone. The
//! monitor only remembers the last output and a counter for display.

use tracing::debug;

use crate::core::{
    Aggregator, IndicatorCalculator, SignalSet, Stabilizer, TrajectoryProjector,
};
use crate::types::{
    CycleOutput, DensityStatus, HealthStatus, ModeCoefficients, MonitorConfig, MonitorResult,
    ReasonCode, SignalSample, StateVector, TrajectoryPoint,
};

/// Per-cycle pipeline, owned by the caller
#[derive(Debug)]
pub struct Monitor {
    config: MonitorConfig,
    aggregator: Aggregator,
    stabilizer: Stabilizer,
    calculator: IndicatorCalculator,
    projector: TrajectoryProjector,
    last_output: Option<CycleOutput>,
    cycle_count: u64,
    next_cycle: u64,
}

impl Default for Monitor {
    fn default() -> Self {
        Self::build(MonitorConfig::default())
    }
}

impl Monitor {
    /// Validate `config` and wire every component from it
    pub fn new(config: MonitorConfig) -> MonitorResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: MonitorConfig) -> Self {
        Self {
            aggregator: Aggregator::new(config.aggregator),
            stabilizer: Stabilizer::new(config.stabilizer),
            calculator: IndicatorCalculator::new(config.indicators),
            projector: TrajectoryProjector::new(config.trajectory),
            config,
            last_output: None,
            cycle_count: 0,
            next_cycle: 0,
        }
    }

    /// Run one cycle from a `(g, c, m)` triple
    pub fn step(&mut self, cycle: u64, signals: [f64; 3]) -> MonitorResult<CycleOutput> {
        self.step_samples(&SignalSample::triple(cycle, signals))
    }

    /// Run one cycle from tagged samples
    pub fn step_samples(&mut self, samples: &[SignalSample; 3]) -> MonitorResult<CycleOutput> {
        let cycle = samples[0].cycle;
        let state = self.aggregator.aggregate_samples(samples)?;
        let output = self.evaluate(cycle, state);

        debug!(
            cycle,
            density = output.indicators.density,
            health = output.indicators.health,
            reasons = ?output.reasons,
            "cycle complete"
        );

        self.cycle_count += 1;
        self.next_cycle = cycle.saturating_add(1);
        self.last_output = Some(output.clone());
        Ok(output)
    }

    /// Sample a source set for `cycle` and run it
    pub fn step_set(&mut self, set: &mut SignalSet, cycle: u64) -> MonitorResult<CycleOutput> {
        let samples = set.sample(cycle);
        self.step_samples(&samples)
    }

    /// Run the cycle after the last one seen (0 on a fresh monitor)
    pub fn next(&mut self, signals: [f64; 3]) -> MonitorResult<CycleOutput> {
        self.step(self.next_cycle, signals)
    }

    /// On a reset cycle the published state is the baseline scaled back up,
    /// and indicators are derived from it.
    fn evaluate(&self, cycle: u64, raw: StateVector) -> CycleOutput {
        let scale = self.config.stabilizer.orientation_scale;
        let stabilized = self.stabilizer.stabilize(raw.orientation(scale));

        let state = if stabilized.was_reset() {
            debug!(cycle, ?raw, "publishing baseline state after reset");
            StateVector::from(self.config.stabilizer.baseline.map(|v| v * scale))
        } else {
            raw
        };
        let indicators = self.calculator.compute(&state);

        let mut reasons = Vec::with_capacity(2 + stabilized.reasons.len());
        reasons.push(match indicators.density_status {
            DensityStatus::ThresholdMet => ReasonCode::R001_THRESHOLD_MET,
            DensityStatus::ThresholdNotMet => ReasonCode::R001_THRESHOLD_NOT_MET,
        });
        reasons.push(match indicators.health_status {
            HealthStatus::Stable => ReasonCode::R002_HEALTH_STABLE,
            HealthStatus::Unstable => ReasonCode::R002_HEALTH_UNSTABLE,
        });
        reasons.extend(stabilized.reasons);

        CycleOutput::new(cycle, state, stabilized.vector, indicators, reasons)
    }

    /// Project the trajectory with this monitor's eigenvalues
    pub fn project(&self, t: f64, coefficients: ModeCoefficients) -> MonitorResult<TrajectoryPoint> {
        self.projector.project(t, coefficients)
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn calculator(&self) -> &IndicatorCalculator {
        &self.calculator
    }

    pub fn projector(&self) -> &TrajectoryProjector {
        &self.projector
    }

    pub fn last_output(&self) -> Option<&CycleOutput> {
        self.last_output.as_ref()
    }

    /// Number of successful cycles
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Forget history, keep configuration
    pub fn reset(&mut self) {
        *self = Self::build(self.config.clone());
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GrowthSource;
    use crate::types::MonitorError;

    #[test]
    fn test_documented_example_cycle() {
        let mut monitor = Monitor::default();
        let output = monitor.step(1, [1.5, 1.2, 1.8]).unwrap();

        assert!((output.state.ontology - 85.225).abs() < 1e-9);
        assert!((output.state.phase - 29.383_333).abs() < 1e-6);
        assert!(!output.indicators.threshold_met());
        assert_eq!(output.reasons[0], ReasonCode::R001_THRESHOLD_NOT_MET);
        assert_eq!(output.reasons[1], ReasonCode::R002_HEALTH_STABLE);
        assert!(!output.was_reset());
    }

    #[test]
    fn test_same_input_same_output() {
        let mut monitor = Monitor::default();
        let first = monitor.step(1, [3.0, 4.0, 5.0]).unwrap();
        monitor.step(2, [90.0, 90.0, 90.0]).unwrap();
        let again = monitor.step(1, [3.0, 4.0, 5.0]).unwrap();

        assert_eq!(first.state, again.state);
        assert_eq!(first.orientation, again.orientation);
        assert_eq!(first.reasons, again.reasons);
    }

    #[test]
    fn test_invalid_signal_leaves_history() {
        let mut monitor = Monitor::default();
        monitor.step(0, [1.0, 1.0, 1.0]).unwrap();
        let err = monitor.step(1, [1.0, f64::NAN, 1.0]).unwrap_err();

        assert!(matches!(err, MonitorError::InvalidSignal { .. }));
        assert_eq!(monitor.cycle_count(), 1);
        assert_eq!(monitor.last_output().unwrap().cycle, 0);
    }

    #[test]
    fn test_next_auto_increments() {
        let mut monitor = Monitor::default();
        assert_eq!(monitor.next([1.0; 3]).unwrap().cycle, 0);
        assert_eq!(monitor.next([1.0; 3]).unwrap().cycle, 1);
        monitor.step(10, [1.0; 3]).unwrap();
        assert_eq!(monitor.next([1.0; 3]).unwrap().cycle, 11);
    }

    #[test]
    fn test_large_signals_reset_to_baseline() {
        let mut monitor = Monitor::default();
        let output = monitor.step(0, [5000.0, 5000.0, 5000.0]).unwrap();
        assert!(output.was_reset());
        assert_eq!(output.orientation, [1.0, 0.0, 0.0, 0.0]);

        // Published state and indicators follow the reset, not the raw input
        assert_eq!(output.state, StateVector::new(100.0, 0.0, 0.0, 0.0));
        assert!((1.6667..=1.9667).contains(&output.indicators.density));
        assert_eq!(output.indicators.health_status, HealthStatus::Stable);
        assert_eq!(output.reasons[1], ReasonCode::R002_HEALTH_STABLE);
    }

    #[test]
    fn test_no_reset_publishes_raw_state() {
        let mut monitor = Monitor::default();
        let raw = Aggregator::default().aggregate(2.0, 3.0, 4.0).unwrap();
        let output = monitor.step(0, [2.0, 3.0, 4.0]).unwrap();
        assert!(!output.was_reset());
        assert_eq!(output.state, raw);
    }

    #[test]
    fn test_step_set_with_growth() {
        let mut monitor = Monitor::default();
        let mut set = SignalSet::new(
            GrowthSource::new(1.0, 0.1),
            GrowthSource::new(1.0, 0.1),
            GrowthSource::new(1.0, 0.1),
        );
        let early = monitor.step_set(&mut set, 0).unwrap();
        let late = monitor.step_set(&mut set, 20).unwrap();
        assert!(late.indicators.density > early.indicators.density);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = MonitorConfig::default();
        config.stabilizer.clip_lower = 20.0;
        assert!(matches!(Monitor::new(config), Err(MonitorError::Config(_))));
    }

    #[test]
    fn test_reset_keeps_config() {
        let mut config = MonitorConfig::default();
        config.indicators.health_ceiling = 0.01;
        let mut monitor = Monitor::new(config.clone()).unwrap();
        monitor.next([1.0; 3]).unwrap();
        monitor.reset();
        assert_eq!(monitor.cycle_count(), 0);
        assert!(monitor.last_output().is_none());
        assert_eq!(monitor.config(), &config);
    }
}
