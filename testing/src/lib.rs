//! Scripted random distributions for deterministic tests.

#![warn(
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::cell::Cell;

use rand::distributions::Distribution;

/// This distribution ignores the random number generator and produces the given values in order,
/// starting over once all of them were returned.
///
/// This is meant for testing, e.g., to script exact interarrival and service times that can be
/// followed by hand.
///
/// # Examples
///
/// ```
/// # use rand::distributions::Distribution;
/// # use rand::rngs::mock::StepRng;
/// # use testing::SequenceDistribution;
/// let dist = SequenceDistribution::new(vec![1.0, 2.5]);
/// let mut rng = StepRng::new(0, 1);
/// let values: Vec<f64> = (0..3).map(|_| dist.sample(&mut rng)).collect();
/// assert_eq!(values, vec![1.0, 2.5, 1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceDistribution<T> {
    values: Vec<T>,
    next: Cell<usize>,
}

impl<T> SequenceDistribution<T> {
    /// Constructs a new distribution cycling through `values`.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: Vec<T>) -> Self {
        assert!(!values.is_empty(), "sequence must not be empty");
        Self {
            values,
            next: Cell::new(0),
        }
    }

    /// Number of values sampled so far.
    pub fn sampled(&self) -> usize {
        self.next.get()
    }
}

impl<T: Copy> Distribution<T> for SequenceDistribution<T> {
    fn sample<R: rand::Rng + ?Sized>(&self, _: &mut R) -> T {
        let idx = self.next.get();
        self.next.set(idx + 1);
        self.values[idx % self.values.len()]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_cycles_through_values() {
        let dist = SequenceDistribution::new(vec![3_u32, 1, 2]);
        let mut rng = StepRng::new(0, 1);
        let values: Vec<u32> = (0..7).map(|_| dist.sample(&mut rng)).collect();
        assert_eq!(values, vec![3, 1, 2, 3, 1, 2, 3]);
        assert_eq!(dist.sampled(), 7);
    }

    #[test]
    #[should_panic]
    fn test_empty_sequence() {
        let _ = SequenceDistribution::<f64>::new(Vec::new());
    }
}
