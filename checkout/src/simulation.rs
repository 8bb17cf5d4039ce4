use eyre::eyre;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sim_engine::{Key, Simulation};

use crate::{
    ArrivalEvent, ArrivalGenerator, Checkout, DistributionSampler, RunResult, Sampler,
    ShortestQueueDispatch, SimulationConfig,
};

/// A single run of the checkout simulation, ready to be driven step by step.
///
/// The interarrival and service times are drawn from a single sampler, in the order the
/// simulation requests them. Given the same seed and configuration, two runs produce identical
/// observations.
pub struct CheckoutSimulation {
    sim: Simulation,
    observations: Key<RunResult>,
}

impl CheckoutSimulation {
    /// Builds a simulation sampling times from the distribution family in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`](crate::ConfigError) if the configuration is invalid.
    pub fn new(config: &SimulationConfig) -> eyre::Result<Self> {
        config.validate()?;
        let seed = config.random_seed.unwrap_or_else(|| {
            let seed = rand::thread_rng().next_u64();
            log::info!("Random seed: {}", seed);
            seed
        });
        let sampler =
            DistributionSampler::new(ChaCha8Rng::seed_from_u64(seed), config.distribution);
        Self::with_sampler(config, sampler)
    }

    /// Builds a simulation drawing all times from `sampler`, disregarding the distribution and
    /// seed in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`](crate::ConfigError) if the configuration is invalid.
    pub fn with_sampler<S: Sampler + 'static>(
        config: &SimulationConfig,
        sampler: S,
    ) -> eyre::Result<Self> {
        config.validate()?;
        let mut sim = Simulation::default();
        let sampler: Box<dyn Sampler> = Box::new(sampler);
        let sampler = sim.state.insert(sampler);
        let observations = sim.state.insert(RunResult::default());
        let checkout = sim.add_component(Checkout::new(
            config.num_lanes,
            config.activation_threshold,
            config.service_mean,
            ShortestQueueDispatch,
            sampler,
            observations,
        ));
        let generator = sim.add_component(ArrivalGenerator::new(
            config.interarrival_mean,
            config.horizon,
            sampler,
            checkout,
        ));
        sim.schedule(0.0, generator, ArrivalEvent::Open)?;
        Ok(Self { sim, observations })
    }

    /// Processes the next event. Returns `false` once there are no events left.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid scheduling request or illegal state transition.
    pub fn step(&mut self) -> eyre::Result<bool> {
        self.sim.step()
    }

    /// Current simulation time.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.sim.time()
    }

    /// Observations recorded so far.
    #[must_use]
    pub fn observations(&self) -> Option<&RunResult> {
        self.sim.state.get(self.observations)
    }

    /// Runs until all customers admitted before the horizon have left, and returns all
    /// observations.
    ///
    /// # Errors
    ///
    /// See [`Self::step`].
    pub fn finish(mut self) -> eyre::Result<RunResult> {
        let end = self.sim.run()?;
        log::info!("Last customer left at {:.2}", end);
        self.sim
            .state
            .remove(self.observations)
            .ok_or_else(|| eyre!("observations not found in state"))
    }
}

/// Runs a complete simulation for `config`.
///
/// # Errors
///
/// Fails if the configuration is invalid, or if the simulation hits an invalid scheduling
/// request (e.g., a non-positive service time).
pub fn run(config: &SimulationConfig) -> eyre::Result<RunResult> {
    CheckoutSimulation::new(config)?.finish()
}
