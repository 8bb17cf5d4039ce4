use rand::distributions::Distribution;
use rand::Rng;
use rand_distr::Exp1;

use crate::DistributionFamily;

/// Source of random durations, such as interarrival and service times.
///
/// Samples are expected to be strictly positive; the scheduler rejects any that are not.
pub trait Sampler {
    /// Draws a duration from a distribution with the given `mean`.
    fn sample(&mut self, mean: f64) -> f64;
}

/// Samples durations from one of the supported [`DistributionFamily`] types.
pub struct DistributionSampler<R: Rng> {
    rng: R,
    family: DistributionFamily,
}

impl<R: Rng> DistributionSampler<R> {
    /// Constructs a new sampler drawing from `family` using `rng`.
    pub fn new(rng: R, family: DistributionFamily) -> Self {
        Self { rng, family }
    }
}

impl<R: Rng> Sampler for DistributionSampler<R> {
    fn sample(&mut self, mean: f64) -> f64 {
        match self.family {
            DistributionFamily::Exponential => {
                let unit: f64 = self.rng.sample(Exp1);
                unit * mean
            }
            DistributionFamily::Deterministic => mean,
        }
    }
}

/// Samples from a fixed distribution `D`, disregarding the requested mean.
pub struct FixedSampler<D, R> {
    dist: D,
    rng: R,
}

impl<D, R> FixedSampler<D, R>
where
    D: Distribution<f64>,
    R: Rng,
{
    /// Constructs a sampler that always draws from `dist`.
    pub fn new(dist: D, rng: R) -> Self {
        Self { dist, rng }
    }
}

impl<D, R> Sampler for FixedSampler<D, R>
where
    D: Distribution<f64>,
    R: Rng,
{
    fn sample(&mut self, _: f64) -> f64 {
        self.dist.sample(&mut self.rng)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use float_cmp::approx_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_deterministic_returns_mean() {
        let mut sampler = DistributionSampler::new(
            ChaCha8Rng::seed_from_u64(0),
            DistributionFamily::Deterministic,
        );
        assert_eq!(sampler.sample(4.0), 4.0);
        assert_eq!(sampler.sample(0.5), 0.5);
    }

    #[test]
    fn test_exponential_mean_and_support() {
        let mut sampler = DistributionSampler::new(
            ChaCha8Rng::seed_from_u64(17),
            DistributionFamily::Exponential,
        );
        let n = 100_000;
        let samples: Vec<f64> = (0..n).map(|_| sampler.sample(4.0)).collect();
        assert!(samples.iter().all(|&s| s >= 0.0 && s.is_finite()));
        #[allow(clippy::cast_precision_loss)]
        let mean = samples.iter().sum::<f64>() / n as f64;
        assert!(approx_eq!(f64, mean, 4.0, epsilon = 0.1), "mean = {}", mean);
    }

    #[test]
    fn test_same_seed_same_samples() {
        let draw = |seed| {
            let mut sampler = DistributionSampler::new(
                ChaCha8Rng::seed_from_u64(seed),
                DistributionFamily::Exponential,
            );
            (0..10).map(|_| sampler.sample(2.0)).collect::<Vec<_>>()
        };
        assert_eq!(draw(2), draw(2));
        assert_ne!(draw(2), draw(3));
    }

    #[test]
    fn test_fixed_sampler_ignores_mean() {
        let mut sampler = FixedSampler::new(
            testing::SequenceDistribution::new(vec![1.5, 0.25]),
            rand::rngs::mock::StepRng::new(0, 1),
        );
        assert_eq!(sampler.sample(100.0), 1.5);
        assert_eq!(sampler.sample(100.0), 0.25);
        assert_eq!(sampler.sample(0.0), 1.5);
    }
}
