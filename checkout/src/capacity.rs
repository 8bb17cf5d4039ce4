use crate::{LaneId, LanePool};

/// Decides how many lanes are open.
///
/// Lanes open strictly in order. Lane `k` opens when lane `k - 1`, the last open one, has a load
/// of at least `threshold`. Open lanes are never closed.
#[derive(Debug, Clone)]
pub struct CapacityController {
    active: usize,
    threshold: usize,
    num_lanes: usize,
}

impl CapacityController {
    /// Constructs a controller for `num_lanes` lanes with only the first one open.
    #[must_use]
    pub fn new(num_lanes: usize, threshold: usize) -> Self {
        Self {
            active: num_lanes.min(1),
            threshold,
            num_lanes,
        }
    }

    /// Number of open lanes.
    #[must_use]
    pub fn active_lanes(&self) -> usize {
        self.active
    }

    /// Iterates over IDs of the open lanes.
    pub fn active_lane_ids(&self) -> impl Iterator<Item = LaneId> {
        (0..self.active).map(LaneId::from)
    }

    /// Re-evaluates the lane loads and opens the next lane if the last open one is congested.
    /// Returns the ID of the newly opened lane.
    pub fn update(&mut self, lanes: &LanePool) -> Option<LaneId> {
        if self.active == 0 || self.active >= self.num_lanes {
            return None;
        }
        let last = LaneId::from(self.active - 1);
        if lanes.load(last) >= self.threshold {
            self.active += 1;
            Some(LaneId::from(self.active - 1))
        } else {
            None
        }
    }
}
