//! Policies selecting the lane a newly arrived customer joins.

use crate::{CapacityController, LaneId, LanePool};

mod shortest_queue;
pub use shortest_queue::ShortestQueueDispatch;

/// Implementors are dispatch policies that select a lane for an arriving customer.
pub trait Dispatch {
    /// Selects one of the open lanes.
    ///
    /// There is always at least one open lane, so a lane is always returned.
    fn dispatch(&self, lanes: &LanePool, capacity: &CapacityController) -> LaneId;
}
