use std::fmt;

use crate::{CustomerId, CustomerRecord, LaneId, TransitionError};

/// Stage of a customer's visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerState {
    /// Just entered the store.
    Arrived,
    /// Picked a lane but has not yet requested the cashier.
    Routed,
    /// Waiting in the lane's queue.
    Waiting,
    /// Being served by the cashier.
    InService,
    /// Left the store.
    Departed,
}

impl fmt::Display for CustomerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Arrived => "arrived",
            Self::Routed => "routed",
            Self::Waiting => "waiting",
            Self::InService => "in service",
            Self::Departed => "departed",
        };
        f.write_str(name)
    }
}

/// A customer and everything known about its visit so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    id: CustomerId,
    arrival_time: f64,
    lane: Option<LaneId>,
    wait_time: Option<f64>,
    service_time: Option<f64>,
    state: CustomerState,
}

impl Customer {
    fn new(id: CustomerId, arrival_time: f64) -> Self {
        Self {
            id,
            arrival_time,
            lane: None,
            wait_time: None,
            service_time: None,
            state: CustomerState::Arrived,
        }
    }

    /// Customer ID.
    #[must_use]
    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// Time of entering the store.
    #[must_use]
    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    /// Selected lane, once routed.
    #[must_use]
    pub fn lane(&self) -> Option<LaneId> {
        self.lane
    }

    /// Time spent waiting for the cashier, once served.
    #[must_use]
    pub fn wait_time(&self) -> Option<f64> {
        self.wait_time
    }

    /// Service duration, once served.
    #[must_use]
    pub fn service_time(&self) -> Option<f64> {
        self.service_time
    }

    /// Current stage of the visit.
    #[must_use]
    pub fn state(&self) -> CustomerState {
        self.state
    }

    fn transition(
        &mut self,
        from: &[CustomerState],
        to: CustomerState,
    ) -> Result<(), TransitionError> {
        if from.contains(&self.state) {
            self.state = to;
            Ok(())
        } else {
            Err(TransitionError::Illegal {
                customer: self.id,
                from: self.state,
                to,
            })
        }
    }

    /// Assigns the customer to `lane`.
    ///
    /// # Errors
    ///
    /// Fails unless the customer has just arrived.
    pub fn route(&mut self, lane: LaneId) -> Result<(), TransitionError> {
        self.transition(&[CustomerState::Arrived], CustomerState::Routed)?;
        self.lane = Some(lane);
        Ok(())
    }

    /// Puts the routed customer in the lane's queue.
    ///
    /// # Errors
    ///
    /// Fails unless the customer is routed.
    pub fn wait(&mut self) -> Result<(), TransitionError> {
        self.transition(&[CustomerState::Routed], CustomerState::Waiting)
    }

    /// Starts serving the customer at time `now` for `service_time`, and returns the time the
    /// customer waited.
    ///
    /// # Errors
    ///
    /// Fails unless the customer is routed or waiting.
    pub fn start_service(&mut self, now: f64, service_time: f64) -> Result<f64, TransitionError> {
        self.transition(
            &[CustomerState::Routed, CustomerState::Waiting],
            CustomerState::InService,
        )?;
        let wait_time = now - self.arrival_time;
        self.wait_time = Some(wait_time);
        self.service_time = Some(service_time);
        Ok(wait_time)
    }

    /// Finishes the visit at time `now`, returning the summary of the visit.
    ///
    /// # Errors
    ///
    /// Fails unless the customer is in service.
    pub fn depart(&mut self, now: f64) -> Result<CustomerRecord, TransitionError> {
        let illegal = TransitionError::Illegal {
            customer: self.id,
            from: self.state,
            to: CustomerState::Departed,
        };
        let (lane, wait_time, service_time) = match (self.lane, self.wait_time, self.service_time) {
            (Some(lane), Some(wait), Some(service)) => (lane, wait, service),
            _ => return Err(illegal),
        };
        self.transition(&[CustomerState::InService], CustomerState::Departed)?;
        Ok(CustomerRecord {
            id: self.id,
            lane,
            arrival_time: self.arrival_time,
            wait_time,
            service_time,
            departure_time: now,
        })
    }
}

/// Storage of all customers admitted during a run, indexed by their IDs.
///
/// Customers are never removed; once departed, a record is closed and no longer changes.
#[derive(Debug, Default, Clone)]
pub struct CustomerArena {
    customers: Vec<Customer>,
    in_store: usize,
}

impl CustomerArena {
    fn index(id: CustomerId) -> Option<usize> {
        usize::from(id).checked_sub(1)
    }

    /// The ID the next admitted customer must have.
    #[must_use]
    pub fn next_id(&self) -> CustomerId {
        CustomerId::from(self.customers.len() + 1)
    }

    /// Admits a new customer arriving at `arrival_time`.
    ///
    /// # Errors
    ///
    /// Customers must be admitted in order of their IDs, starting from 1.
    pub fn admit(
        &mut self,
        id: CustomerId,
        arrival_time: f64,
    ) -> Result<&mut Customer, TransitionError> {
        let expected = self.next_id();
        if id != expected {
            return Err(TransitionError::OutOfOrder { expected, got: id });
        }
        self.customers.push(Customer::new(id, arrival_time));
        self.in_store += 1;
        let idx = self.customers.len() - 1;
        Ok(&mut self.customers[idx])
    }

    /// Returns the customer with the given ID.
    #[must_use]
    pub fn get(&self, id: CustomerId) -> Option<&Customer> {
        Self::index(id).and_then(|idx| self.customers.get(idx))
    }

    /// Returns the customer with the given ID.
    ///
    /// # Errors
    ///
    /// Fails if the customer was never admitted.
    pub fn get_mut(&mut self, id: CustomerId) -> Result<&mut Customer, TransitionError> {
        Self::index(id)
            .and_then(move |idx| self.customers.get_mut(idx))
            .ok_or(TransitionError::UnknownCustomer(id))
    }

    /// Closes the visit of the given customer.
    ///
    /// # Errors
    ///
    /// See [`Customer::depart`].
    pub fn depart(&mut self, id: CustomerId, now: f64) -> Result<CustomerRecord, TransitionError> {
        let record = self.get_mut(id)?.depart(now)?;
        self.in_store -= 1;
        Ok(record)
    }

    /// Number of customers admitted so far.
    #[must_use]
    pub fn admitted(&self) -> usize {
        self.customers.len()
    }

    /// Number of customers that have not departed yet.
    #[must_use]
    pub fn in_store(&self) -> usize {
        self.in_store
    }
}
