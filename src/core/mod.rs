//! Core modules for Ridgeline

pub mod aggregator;
pub mod api;
pub mod indicators;
pub mod monitor;
pub mod operators;
pub mod seal;
pub mod signal_parser;
pub mod sources;
pub mod trajectory;

pub use aggregator::Aggregator;
pub use api::{create_router, run_server};
pub use indicators::IndicatorCalculator;
pub use monitor::Monitor;
pub use operators::{Stabilized, Stabilizer};
pub use seal::{
    decode_public_key, initialize, verify, verify_attestation, verify_encoded, Sealed, Unsealed,
};
pub use signal_parser::SignalParser;
pub use sources::{FixedSource, GrowthSource, SeriesSource, SignalSet, SignalSource};
pub use trajectory::TrajectoryProjector;
