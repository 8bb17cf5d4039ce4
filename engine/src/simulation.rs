use std::fmt;

use crate::{Component, ComponentId, Components, Error, Scheduler, State};

/// The main simulation object: the explicitly passed context holding the clock, the pending
/// events, shared state, and all components.
#[derive(Default)]
pub struct Simulation {
    /// Current state of the simulation meant to be mutated by the components.
    pub state: State,
    /// Schedules events and maintains the clock.
    pub scheduler: Scheduler,
    components: Components,
}

impl Simulation {
    /// Registers a new component and returns its ID.
    #[must_use]
    pub fn add_component<E, C>(&mut self, component: C) -> ComponentId<E>
    where
        E: fmt::Debug + 'static,
        C: Component<Event = E> + 'static,
    {
        self.components.add_component(component)
    }

    /// Schedules `event` for `component` after `delay` from the current time.
    ///
    /// # Errors
    ///
    /// See [`Scheduler::schedule`].
    pub fn schedule<E: 'static>(
        &mut self,
        delay: f64,
        component: ComponentId<E>,
        event: E,
    ) -> Result<(), Error> {
        self.scheduler.schedule(delay, component, event)
    }

    /// Current simulation time.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.scheduler.time()
    }

    /// Processes the next event. Returns `false` if there were no events left.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the scheduler or the component handling the event.
    pub fn step(&mut self) -> eyre::Result<bool> {
        if let Some(entry) = self.scheduler.pop()? {
            log::trace!(
                "[{:.4}] Dispatching event to component {}",
                entry.time(),
                entry.component_idx()
            );
            self.components
                .process_event_entry(&entry, &mut self.scheduler, &mut self.state)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Runs until there are no events left, and returns the final time.
    ///
    /// # Errors
    ///
    /// See [`Self::step`].
    pub fn run(&mut self) -> eyre::Result<f64> {
        while self.step()? {}
        Ok(self.time())
    }

    /// Processes events as long as the earliest pending one occurs no later than `horizon`.
    /// Later events stay in the queue. Returns the time of the last processed event.
    ///
    /// # Errors
    ///
    /// See [`Self::step`].
    pub fn run_until(&mut self, horizon: f64) -> eyre::Result<f64> {
        while let Some(time) = self.scheduler.peek_time() {
            if time > horizon {
                break;
            }
            self.step()?;
        }
        Ok(self.time())
    }
}
