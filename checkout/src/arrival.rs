use eyre::eyre;
use sim_engine::{Component, ComponentId, Key, Scheduler, State};

use crate::{CheckoutEvent, CustomerId, Sampler};

/// Arrival generator events.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    /// The store opens; the time until the first arrival is sampled.
    Open,
    /// A new customer arrives. The generator sends the customer to the checkout and samples the
    /// time until the next arrival.
    Arrival,
}

/// Generates customers at random intervals until the horizon. See [`Event`].
///
/// Customers whose arrival would fall at or after the horizon are never generated. After that,
/// the generator schedules nothing more.
pub struct ArrivalGenerator {
    interarrival_mean: f64,
    horizon: f64,
    counter: usize,
    sampler: Key<Box<dyn Sampler>>,
    checkout: ComponentId<CheckoutEvent>,
}

impl Component for ArrivalGenerator {
    type Event = Event;

    fn process_event(
        &mut self,
        self_id: ComponentId<Self::Event>,
        event: &Self::Event,
        scheduler: &mut Scheduler,
        state: &mut State,
    ) -> eyre::Result<()> {
        match event {
            Event::Open => {
                log::info!("Store opens at {:.2}", scheduler.time());
            }
            Event::Arrival => {
                self.counter += 1;
                let customer = CustomerId::from(self.counter);
                scheduler.schedule_immediately(self.checkout, CheckoutEvent::Arrival(customer))?;
            }
        }
        self.schedule_next(self_id, scheduler, state)
    }
}

impl ArrivalGenerator {
    /// Creates a generator sending customers to `checkout`, with interarrival times drawn from
    /// the sampler stored in the state under `sampler`.
    #[must_use]
    pub fn new(
        interarrival_mean: f64,
        horizon: f64,
        sampler: Key<Box<dyn Sampler>>,
        checkout: ComponentId<CheckoutEvent>,
    ) -> Self {
        Self {
            interarrival_mean,
            horizon,
            counter: 0,
            sampler,
            checkout,
        }
    }

    fn schedule_next(
        &self,
        self_id: ComponentId<Event>,
        scheduler: &mut Scheduler,
        state: &mut State,
    ) -> eyre::Result<()> {
        let interval = state
            .get_mut(self.sampler)
            .ok_or_else(|| eyre!("sampler not found in state"))?
            .sample(self.interarrival_mean);
        let now = scheduler.time();
        if interval.is_finite() && now + interval >= self.horizon {
            log::info!(
                "Doors close at {:.2} after admitting {} customers",
                now,
                self.counter
            );
            return Ok(());
        }
        scheduler.schedule_timeout(interval, self_id, Event::Arrival)?;
        Ok(())
    }
}
