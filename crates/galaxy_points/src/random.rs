//! Uniform random draws consumed by the generator.
//!
//! The generator only ever asks for values in `[0, 1)`, so anything that can
//! produce those can drive it: a real `rand` generator in the app, a fixed
//! list of values in tests.
use rand::Rng;

pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f32;
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
pub struct RngSource<R>(pub R);

impl RngSource<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f32 {
        self.0.random::<f32>()
    }
}

/// Cycles through a fixed list of draws, starting over when exhausted.
#[derive(Clone, Debug)]
pub struct FixedSequence {
    values: Vec<f32>,
    cursor: usize,
}

impl FixedSequence {
    /// Panics if `values` is empty.
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "FixedSequence needs at least one value");
        Self { values, cursor: 0 }
    }
}

impl RandomSource for FixedSequence {
    fn next_unit(&mut self) -> f32 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn fixed_sequence_wraps_around() {
        let mut seq = FixedSequence::new([0.1, 0.2]);
        let draws: Vec<f32> = (0..5).map(|_| seq.next_unit()).collect();
        assert_eq!(draws, vec![0.1, 0.2, 0.1, 0.2, 0.1]);
    }

    #[test]
    fn rng_source_stays_in_unit_interval() {
        let mut source = RngSource(StdRng::seed_from_u64(7));
        for _ in 0..10_000 {
            let value = source.next_unit();
            assert!((0.0..1.0).contains(&value));
        }
    }
}
