//! Checkout lane simulation.
//!
//! Customers arrive at a store at random intervals, join the least loaded of the open checkout
//! lanes, wait for the cashier, get served, and leave. The store starts with a single open lane
//! and opens the next one whenever the last opened lane gets congested.
//!
//! The entry point is [`run`], which executes one simulation for a given [`SimulationConfig`] and
//! returns all observations in a [`RunResult`]. Use [`CheckoutSimulation`] to drive the run step
//! by step.

#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::default_trait_access,
    clippy::inline_always
)]

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

mod arrival;
pub use arrival::{ArrivalGenerator, Event as ArrivalEvent};

mod capacity;
pub use capacity::CapacityController;

mod checkout;
pub use checkout::{Checkout, Event as CheckoutEvent};

mod config;
pub use config::{DistributionFamily, SimulationConfig};

mod customer;
pub use customer::{Customer, CustomerArena, CustomerState};

pub mod dispatch;
pub use dispatch::{Dispatch, ShortestQueueDispatch};

mod error;
pub use error::{ConfigError, LaneError, TransitionError};

pub mod export;

mod lane;
pub use lane::{Grant, Lane, LanePool};

mod observation;
pub use observation::{CustomerRecord, LaneOpened, ObservationSink, QueueSample, RunResult};

pub mod report;

mod sampler;
pub use sampler::{DistributionSampler, FixedSampler, Sampler};

mod simulation;
pub use simulation::{run, CheckoutSimulation};

/// Checkout lane ID: a zero-based index into the lane pool.
#[derive(
    From,
    Into,
    Debug,
    PartialEq,
    PartialOrd,
    Eq,
    Ord,
    Serialize,
    Deserialize,
    Copy,
    Clone,
    Hash,
    Display,
)]
pub struct LaneId(usize);

impl LaneId {
    /// One-based lane number, as shown to people.
    #[must_use]
    pub fn number(self) -> usize {
        self.0 + 1
    }
}

/// Customer ID, assigned in the order of arrival starting from 1.
#[derive(
    From,
    Into,
    Debug,
    PartialEq,
    PartialOrd,
    Eq,
    Ord,
    Serialize,
    Deserialize,
    Copy,
    Clone,
    Hash,
    Display,
)]
pub struct CustomerId(usize);
