//! Four-axis state vector

use serde::{Deserialize, Serialize};

/// Named axes of the state vector, in vector order.
///
/// The stabilizer reads the same positions as elements:
/// ontology = Air, relational = Water, temporal = Fire, phase = Earth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Ontology,
    Relational,
    Temporal,
    Phase,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Ontology, Axis::Relational, Axis::Temporal, Axis::Phase];

    /// Position in `[f64; 4]` form
    pub fn index(&self) -> usize {
        match self {
            Axis::Ontology => 0,
            Axis::Relational => 1,
            Axis::Temporal => 2,
            Axis::Phase => 3,
        }
    }

    /// Element name used by the stabilizer
    pub fn element(&self) -> &'static str {
        match self {
            Axis::Ontology => "Air",
            Axis::Relational => "Water",
            Axis::Temporal => "Fire",
            Axis::Phase => "Earth",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Axis::Ontology => "ontology",
            Axis::Relational => "relational",
            Axis::Temporal => "temporal",
            Axis::Phase => "phase",
        };
        write!(f, "{}", name)
    }
}

/// State vector for one cycle. Replaced every cycle, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub ontology: f64,
    pub relational: f64,
    pub temporal: f64,
    pub phase: f64,
}

impl StateVector {
    pub fn new(ontology: f64, relational: f64, temporal: f64, phase: f64) -> Self {
        Self { ontology, relational, temporal, phase }
    }

    /// Read one axis
    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Ontology => self.ontology,
            Axis::Relational => self.relational,
            Axis::Temporal => self.temporal,
            Axis::Phase => self.phase,
        }
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.ontology, self.relational, self.temporal, self.phase]
    }

    /// Unit-scaled copy for the stabilizer (each axis divided by `scale`)
    pub fn orientation(&self, scale: f64) -> [f64; 4] {
        self.to_array().map(|v| v / scale)
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

impl From<[f64; 4]> for StateVector {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}
