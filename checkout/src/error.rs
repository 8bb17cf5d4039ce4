use crate::{CustomerId, CustomerState, LaneId};

/// Invalid simulation configuration, detected before anything is scheduled.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// There must be at least one checkout lane.
    #[error("number of lanes must be at least 1")]
    NoLanes,
    /// Lane activation threshold must be at least 1.
    #[error("activation threshold must be at least 1")]
    ZeroThreshold,
    /// Mean time between arrivals must be a positive number.
    #[error("mean interarrival time must be positive and finite, got {0}")]
    InterarrivalMean(f64),
    /// Mean service time must be a positive number.
    #[error("mean service time must be positive and finite, got {0}")]
    ServiceMean(f64),
    /// Simulation horizon must be a positive number.
    #[error("horizon must be positive and finite, got {0}")]
    Horizon(f64),
}

/// Misuse of a checkout lane.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LaneError {
    /// Lane index outside of the pool.
    #[error("lane {lane} does not exist; there are {num_lanes} lanes")]
    OutOfRange {
        /// Requested lane.
        lane: LaneId,
        /// Number of lanes in the pool.
        num_lanes: usize,
    },
    /// A customer tried to release a lane it is not being served at.
    #[error("customer {customer} does not hold lane {lane}")]
    NotHolder {
        /// Released lane.
        lane: LaneId,
        /// Customer trying to release the lane.
        customer: CustomerId,
    },
    /// A customer requested a lane it already occupies or waits for.
    #[error("customer {customer} is already at lane {lane}")]
    AlreadyPresent {
        /// Requested lane.
        lane: LaneId,
        /// Requesting customer.
        customer: CustomerId,
    },
}

/// Illegal step of the customer lifecycle.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The customer is not in a state from which the requested step is possible.
    #[error("customer {customer} cannot go from {from} to {to}")]
    Illegal {
        /// Customer.
        customer: CustomerId,
        /// Current state.
        from: CustomerState,
        /// Requested state.
        to: CustomerState,
    },
    /// A customer was resumed in a state in which it does not expect to be.
    #[error("customer {customer} cannot be resumed while {state}")]
    UnexpectedResume {
        /// Customer.
        customer: CustomerId,
        /// Current state.
        state: CustomerState,
    },
    /// No customer with this ID was ever admitted.
    #[error("unknown customer {0}")]
    UnknownCustomer(CustomerId),
    /// Customers must be admitted in the order of their IDs.
    #[error("customer {got} admitted out of order; expected {expected}")]
    OutOfOrder {
        /// ID that was expected next.
        expected: CustomerId,
        /// ID that was admitted.
        got: CustomerId,
    },
}
