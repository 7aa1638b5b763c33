//! Output structures for terminal display and the dashboard feed

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::{HealthStatus, Indicators, ReasonCode, StateVector};

/// Output of one monitor cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Caller-supplied cycle index
    pub cycle: u64,
    /// Aggregated state vector
    pub state: StateVector,
    /// Stabilized unit-scale vector [Air, Water, Fire, Earth]
    pub orientation: [f64; 4],
    /// Density and health
    pub indicators: Indicators,
    /// Indicator outcomes followed by stabilizer events
    pub reasons: Vec<ReasonCode>,
}

impl CycleOutput {
    pub fn new(
        cycle: u64,
        state: StateVector,
        orientation: [f64; 4],
        indicators: Indicators,
        reasons: Vec<ReasonCode>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            cycle,
            state,
            orientation,
            indicators,
            reasons,
        }
    }

    /// Was the state reset to baseline this cycle?
    pub fn was_reset(&self) -> bool {
        self.reasons.contains(&ReasonCode::R004_DIVERGENCE_RESET)
    }

    fn reason_codes(&self) -> String {
        self.reasons
            .iter()
            .map(|r| r.code())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let line = format!(
            "#{} phase={:.3} | density={:.4} ({}) | health={:.4} ({})",
            self.cycle,
            self.state.phase,
            self.indicators.density,
            self.indicators.density_status,
            self.indicators.health,
            self.indicators.health_status,
        );

        let line = if self.indicators.health_status == HealthStatus::Unstable {
            line.red()
        } else if self.indicators.threshold_met() {
            line.green()
        } else {
            line.yellow()
        };

        if self.was_reset() {
            format!("{} {}", line, "[RESET]".red().bold())
        } else {
            line.to_string()
        }
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "cycle={} | ontology={:.4} | relational={:.4} | temporal={:.4} | phase={:.4} | density={:.4} | health={:.6} | reasons={}",
            self.cycle,
            self.state.ontology,
            self.state.relational,
            self.state.temporal,
            self.state.phase,
            self.indicators.density,
            self.indicators.health,
            self.reason_codes(),
        )
    }
}
