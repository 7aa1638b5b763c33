//! State Aggregator: three signals → four-axis state vector
//!
//! - avg        = (g + c + m) / 3
//! - ontology   = bias + avg × ontology_scale
//! - relational = avg
//! - temporal   = avg × temporal_scale
//! - phase      = (ontology + relational + temporal) / 3

use crate::types::{
    AggregatorConfig, MonitorError, MonitorResult, SignalSample, SourceId, StateVector,
};

/// Stateless aggregator over the linear formulas above
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Aggregate one `(g, c, m)` triple. Non-finite input is rejected.
    pub fn aggregate(&self, g: f64, c: f64, m: f64) -> MonitorResult<StateVector> {
        for (source_id, value) in SourceId::ALL.into_iter().zip([g, c, m]) {
            if !value.is_finite() {
                return Err(MonitorError::invalid(
                    source_id,
                    format!("non-finite value {value}"),
                ));
            }
        }

        let avg = (g + c + m) / 3.0;
        let ontology = self.config.ontology_bias + avg * self.config.ontology_scale;
        let relational = avg;
        let temporal = avg * self.config.temporal_scale;
        let phase = (ontology + relational + temporal) / 3.0;

        let state = StateVector::new(ontology, relational, temporal, phase);

        // Finite inputs can still overflow near f64::MAX
        if !state.is_finite() {
            return Err(MonitorError::invalid(
                dominant_source([g, c, m]),
                format!("aggregate of ({g}, {c}, {m}) overflows the state vector"),
            ));
        }
        Ok(state)
    }

    /// Aggregate the three samples of one cycle.
    ///
    /// The samples must come from A, B and C exactly once and share a cycle
    /// index; order does not matter.
    pub fn aggregate_samples(&self, samples: &[SignalSample; 3]) -> MonitorResult<StateVector> {
        let cycle = samples[0].cycle;
        let mut values: [Option<f64>; 3] = [None; 3];

        for sample in samples {
            if sample.cycle != cycle {
                return Err(MonitorError::invalid(
                    sample.source_id,
                    format!("cycle {} does not match cycle {}", sample.cycle, cycle),
                ));
            }
            let slot = &mut values[sample.source_id.index()];
            if slot.is_some() {
                return Err(MonitorError::invalid(
                    sample.source_id,
                    "duplicate sample for source in one cycle",
                ));
            }
            *slot = Some(sample.value);
        }

        // Three samples, no duplicates: every slot is filled
        match values {
            [Some(g), Some(c), Some(m)] => self.aggregate(g, c, m),
            _ => Err(MonitorError::invalid(SourceId::A, "incomplete sample set")),
        }
    }
}

/// Source with the largest magnitude; ties go to the earlier source
fn dominant_source(values: [f64; 3]) -> SourceId {
    let mut best = SourceId::A;
    for source_id in SourceId::ALL {
        if values[source_id.index()].abs() > values[best.index()].abs() {
            best = source_id;
        }
    }
    best
}

// =============================================================================
// TESTS
// =============================================================================
