//! Signal Source Set: three independent cycle-indexed emitters

use crate::types::{SignalSample, SourceId};

/// A scalar emitter producing one value per cycle
pub trait SignalSource: Send {
    /// Value for the given cycle
    fn value_at(&mut self, cycle: u64) -> f64;
}

/// Emits the same value every cycle
#[derive(Debug, Clone, Copy)]
pub struct FixedSource(pub f64);

impl SignalSource for FixedSource {
    fn value_at(&mut self, _cycle: u64) -> f64 {
        self.0
    }
}

/// Compounding growth: `initial × (1 + rate)^cycle`
#[derive(Debug, Clone, Copy)]
pub struct GrowthSource {
    pub initial: f64,
    pub rate: f64,
}

impl GrowthSource {
    pub fn new(initial: f64, rate: f64) -> Self {
        Self { initial, rate }
    }
}

impl SignalSource for GrowthSource {
    fn value_at(&mut self, cycle: u64) -> f64 {
        let exponent = i32::try_from(cycle).unwrap_or(i32::MAX);
        self.initial * (1.0 + self.rate).powi(exponent)
    }
}

/// Replays a recorded series; cycles past the end repeat the last value
#[derive(Debug, Clone)]
pub struct SeriesSource {
    values: Vec<f64>,
}

impl SeriesSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl SignalSource for SeriesSource {
    fn value_at(&mut self, cycle: u64) -> f64 {
        let idx = usize::try_from(cycle).unwrap_or(usize::MAX);
        self.values
            .get(idx)
            .or_else(|| self.values.last())
            .copied()
            .unwrap_or(0.0)
    }
}

/// The fixed set of three sources A, B, C
pub struct SignalSet {
    sources: [Box<dyn SignalSource>; 3],
}

impl SignalSet {
    pub fn new(
        a: impl SignalSource + 'static,
        b: impl SignalSource + 'static,
        c: impl SignalSource + 'static,
    ) -> Self {
        Self {
            sources: [Box::new(a), Box::new(b), Box::new(c)],
        }
    }

    /// Three constant sources
    pub fn fixed(values: [f64; 3]) -> Self {
        Self::new(
            FixedSource(values[0]),
            FixedSource(values[1]),
            FixedSource(values[2]),
        )
    }

    /// Sample every source once for `cycle`
    pub fn sample(&mut self, cycle: u64) -> [SignalSample; 3] {
        let mut out = [SignalSample::new(SourceId::A, cycle, 0.0); 3];
        for (slot, (source_id, source)) in out
            .iter_mut()
            .zip(SourceId::ALL.into_iter().zip(self.sources.iter_mut()))
        {
            *slot = SignalSample::new(source_id, cycle, source.value_at(cycle));
        }
        out
    }
}

impl std::fmt::Debug for SignalSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalSet").finish_non_exhaustive()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_set_tags_sources() {
        let mut set = SignalSet::fixed([1.5, 1.2, 1.8]);
        let samples = set.sample(7);

        assert_eq!(samples[0], SignalSample::new(SourceId::A, 7, 1.5));
        assert_eq!(samples[1], SignalSample::new(SourceId::B, 7, 1.2));
        assert_eq!(samples[2], SignalSample::new(SourceId::C, 7, 1.8));
    }

    #[test]
    fn test_growth_source_compounds() {
        let mut src = GrowthSource::new(2.0, 0.5);
        assert_eq!(src.value_at(0), 2.0);
        assert_eq!(src.value_at(1), 3.0);
        assert_eq!(src.value_at(2), 4.5);
    }

    #[test]
    fn test_series_repeats_last() {
        let mut src = SeriesSource::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(src.value_at(1), 2.0);
        assert_eq!(src.value_at(10), 3.0);
        assert_eq!(SeriesSource::new(Vec::new()).value_at(0), 0.0);
    }
}
