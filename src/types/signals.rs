//! Signal samples emitted by the source set

use serde::{Deserialize, Serialize};

/// One of the three signal emitters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceId {
    A,
    B,
    C,
}

impl SourceId {
    /// All sources in aggregation order (g, c, m)
    pub const ALL: [SourceId; 3] = [SourceId::A, SourceId::B, SourceId::C];

    /// Position of this source in a `[f64; 3]` signal triple
    pub fn index(&self) -> usize {
        match self {
            SourceId::A => 0,
            SourceId::B => 1,
            SourceId::C => 2,
        }
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceId::A => "A",
            SourceId::B => "B",
            SourceId::C => "C",
        };
        write!(f, "{}", name)
    }
}

/// A single cycle-indexed value from one source. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSample {
    pub source_id: SourceId,
    pub cycle: u64,
    pub value: f64,
}

impl SignalSample {
    pub fn new(source_id: SourceId, cycle: u64, value: f64) -> Self {
        Self { source_id, cycle, value }
    }

    /// Build the three samples of one cycle from a `(g, c, m)` triple
    pub fn triple(cycle: u64, values: [f64; 3]) -> [SignalSample; 3] {
        [
            Self::new(SourceId::A, cycle, values[0]),
            Self::new(SourceId::B, cycle, values[1]),
            Self::new(SourceId::C, cycle, values[2]),
        ]
    }
}
