//! Core types for Ridgeline

mod config;
mod error;
mod indicators;
mod output;
mod reason;
mod seal;
mod signals;
mod state;
mod trajectory;

pub use config::{
    AggregatorConfig, HealthAxes, IndicatorConfig, MonitorConfig, SealConfig, StabilizerConfig,
    TrajectoryConfig,
};
pub use error::{MonitorError, MonitorResult};
pub use indicators::{DensityStatus, HealthStatus, Indicators};
pub use output::CycleOutput;
pub use reason::ReasonCode;
pub use seal::{AttestationSeal, KeyRetention, SealState};
pub use signals::{SignalSample, SourceId};
pub use state::{Axis, StateVector};
pub use trajectory::{ModeCoefficients, PlanePoint, TrajectoryPoint};
