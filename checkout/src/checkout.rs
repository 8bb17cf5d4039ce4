use eyre::eyre;
use sim_engine::{Component, ComponentId, Key, Scheduler, State};

use crate::{
    CapacityController, CustomerArena, CustomerId, CustomerState, Dispatch, Grant, LaneId, LanePool,
    ObservationSink, Sampler, TransitionError,
};

/// Checkout events.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    /// A new customer has just entered the store.
    Arrival(CustomerId),
    /// A customer suspended earlier continues: either the cashier became available to a waiting
    /// customer, or the service of a customer has finished.
    Resume(CustomerId),
}

/// The checkout area of the store: the lanes, the policy of opening them, and the customers
/// going through them.
///
/// Every customer follows the same steps. At arrival, the next lane may open, the average lane
/// load is sampled, and the customer is routed to a lane. If the cashier is free, service starts
/// right away; otherwise, the customer waits with no event pending until the previous customer
/// leaves. Service lasts for a sampled duration, after which the customer leaves and the next
/// one in the lane is resumed at the same instant.
pub struct Checkout<O> {
    lanes: LanePool,
    capacity: CapacityController,
    dispatcher: Box<dyn Dispatch>,
    customers: CustomerArena,
    service_mean: f64,
    sampler: Key<Box<dyn Sampler>>,
    observations: Key<O>,
}

impl<O> Component for Checkout<O>
where
    O: ObservationSink + 'static,
{
    type Event = Event;

    fn process_event(
        &mut self,
        self_id: ComponentId<Self::Event>,
        event: &Self::Event,
        scheduler: &mut Scheduler,
        state: &mut State,
    ) -> eyre::Result<()> {
        match *event {
            Event::Arrival(customer) => self.arrive(self_id, customer, scheduler, state),
            Event::Resume(customer) => self.resume(self_id, customer, scheduler, state),
        }
    }
}

impl<O> Checkout<O>
where
    O: ObservationSink + 'static,
{
    /// Constructs a checkout with `num_lanes` lanes, of which only the first one is open.
    /// A lane opens when the load of the last open lane reaches `activation_threshold`.
    ///
    /// Service times are drawn from the sampler stored in the state under `sampler`, and all
    /// observations are sent to the sink stored under `observations`.
    pub fn new<D: Dispatch + 'static>(
        num_lanes: usize,
        activation_threshold: usize,
        service_mean: f64,
        dispatcher: D,
        sampler: Key<Box<dyn Sampler>>,
        observations: Key<O>,
    ) -> Self {
        Self {
            lanes: LanePool::new(num_lanes),
            capacity: CapacityController::new(num_lanes, activation_threshold),
            dispatcher: Box::new(dispatcher),
            customers: CustomerArena::default(),
            service_mean,
            sampler,
            observations,
        }
    }

    fn observations<'s>(&self, state: &'s mut State) -> eyre::Result<&'s mut O> {
        state
            .get_mut(self.observations)
            .ok_or_else(|| eyre!("observation sink not found in state"))
    }

    fn sample_service_time(&self, state: &mut State) -> eyre::Result<f64> {
        let sampler = state
            .get_mut(self.sampler)
            .ok_or_else(|| eyre!("sampler not found in state"))?;
        Ok(sampler.sample(self.service_mean))
    }

    fn arrive(
        &mut self,
        self_id: ComponentId<Event>,
        customer: CustomerId,
        scheduler: &mut Scheduler,
        state: &mut State,
    ) -> eyre::Result<()> {
        let now = scheduler.time();
        self.customers.admit(customer, now)?;
        log::debug!("Customer {} arrives at {:.2} minutes.", customer, now);

        if let Some(lane) = self.capacity.update(&self.lanes) {
            log::info!("Lane {} opens at time {:.2}", lane.number(), now);
            self.observations(state)?.record_lane_opened(lane, now);
        }
        let average_length = self.lanes.average_load(self.capacity.active_lanes());
        self.observations(state)?
            .record_queue_sample(now, average_length);

        let lane = self.dispatcher.dispatch(&self.lanes, &self.capacity);
        log::debug!(
            "Customer {} joins lane {} with {} people in queue.",
            customer,
            lane.number(),
            self.lanes.load(lane)
        );
        self.customers.get_mut(customer)?.route(lane)?;
        match self.lanes.request(lane, customer)? {
            Grant::Immediate => self.start_service(self_id, customer, scheduler, state),
            Grant::Queued { .. } => {
                self.customers.get_mut(customer)?.wait()?;
                Ok(())
            }
        }
    }

    fn resume(
        &mut self,
        self_id: ComponentId<Event>,
        customer: CustomerId,
        scheduler: &mut Scheduler,
        state: &mut State,
    ) -> eyre::Result<()> {
        let current = self
            .customers
            .get(customer)
            .ok_or(TransitionError::UnknownCustomer(customer))?
            .state();
        match current {
            CustomerState::Waiting => self.start_service(self_id, customer, scheduler, state),
            CustomerState::InService => self.finish_service(self_id, customer, scheduler, state),
            other => Err(TransitionError::UnexpectedResume {
                customer,
                state: other,
            }
            .into()),
        }
    }

    fn start_service(
        &mut self,
        self_id: ComponentId<Event>,
        customer: CustomerId,
        scheduler: &mut Scheduler,
        state: &mut State,
    ) -> eyre::Result<()> {
        let now = scheduler.time();
        let service_time = self.sample_service_time(state)?;
        let visit = self.customers.get_mut(customer)?;
        let wait_time = visit.start_service(now, service_time)?;
        log::debug!(
            "Customer {} waited for {:.2} minutes at lane {}.",
            customer,
            wait_time,
            visit.lane().map_or(0, LaneId::number)
        );
        self.observations(state)?.record_wait(wait_time);
        scheduler.schedule_timeout(service_time, self_id, Event::Resume(customer))?;
        Ok(())
    }

    fn finish_service(
        &mut self,
        self_id: ComponentId<Event>,
        customer: CustomerId,
        scheduler: &mut Scheduler,
        state: &mut State,
    ) -> eyre::Result<()> {
        let now = scheduler.time();
        let record = self.customers.depart(customer, now)?;
        log::debug!(
            "Customer {} checked out at lane {} in {:.2} minutes.",
            customer,
            record.lane.number(),
            record.service_time
        );
        let next = self.lanes.release(record.lane, customer)?;
        let observations = self.observations(state)?;
        observations.record_service(record.service_time);
        observations.record_departure(record);
        if let Some(next) = next {
            scheduler.schedule_immediately(self_id, Event::Resume(next))?;
        }
        Ok(())
    }
}
