#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::default_trait_access)]

//! This is a general purpose discrete-event simulation engine that provides the mechanisms such
//! as: clock, scheduler, component registry, and shared state.
//!
//! Time is measured in simulated units represented as `f64`. The engine never looks at the wall
//! clock.

use std::cell::Cell;
use std::rc::Rc;

/// Simulation clock.
pub type Clock = Rc<Cell<f64>>;

pub use component::{Component, ComponentId, Components};
pub use error::Error;
pub use scheduler::{ClockRef, EventEntry, EventEntryTyped, Scheduler};
pub use simulation::Simulation;
pub use state::{Key, State};

mod component;
mod error;
mod scheduler;
mod simulation;
mod state;
