//! Error taxonomy for the monitor

use thiserror::Error;

use crate::types::SourceId;

/// Root error type for every fallible monitor operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MonitorError {
    /// Non-finite or out-of-domain aggregator input. Not recoverable locally.
    #[error("invalid signal from source {source_id}: {detail}")]
    InvalidSignal { source_id: SourceId, detail: String },

    /// Signature did not verify against the given key and message.
    #[error("attestation tampered or forged")]
    TamperedOrForged,

    /// Stabilized magnitude left the safe envelope. The stabilizer recovers
    /// from this with a hard reset; it only escapes as an error from
    /// `detect_divergence`.
    #[error("divergence detected: magnitude {magnitude}")]
    DivergenceDetected { magnitude: f64 },

    /// Trajectory projection overflowed to a non-finite value.
    #[error("non-finite projection at t={t}")]
    NonFiniteProjection { t: f64 },

    /// Public key text was neither hex nor an SPKI PEM block.
    #[error("malformed public_key: {0}")]
    MalformedKey(String),

    /// A text line did not hold three signal values.
    #[error("unparsable signal line: {0}")]
    MalformedLine(String),

    /// Invalid or unparsable configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl MonitorError {
    pub(crate) fn invalid(source_id: SourceId, detail: impl Into<String>) -> Self {
        Self::InvalidSignal {
            source_id,
            detail: detail.into(),
        }
    }
}

pub type MonitorResult<T> = Result<T, MonitorError>;
