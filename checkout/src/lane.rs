use std::collections::VecDeque;

use crate::{CustomerId, LaneError, LaneId};

/// Outcome of requesting a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// The cashier was free and the customer is now being served.
    Immediate,
    /// The customer joined the queue behind `ahead` other customers (including the one being
    /// served).
    Queued {
        /// Number of customers ahead in the lane.
        ahead: usize,
    },
}

/// A single-server checkout lane with an unbounded FIFO queue.
#[derive(Debug, Default, Clone)]
pub struct Lane {
    holder: Option<CustomerId>,
    queue: VecDeque<CustomerId>,
}

impl Lane {
    /// Number of customers at the lane: the one being served, if any, plus the ones waiting.
    #[must_use]
    pub fn load(&self) -> usize {
        usize::from(self.holder.is_some()) + self.queue.len()
    }

    /// Checks if the cashier is serving a customer.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.holder.is_some()
    }

    /// The customer currently being served.
    #[must_use]
    pub fn holder(&self) -> Option<CustomerId> {
        self.holder
    }

    /// Number of customers waiting for the cashier.
    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    fn contains(&self, customer: CustomerId) -> bool {
        self.holder == Some(customer) || self.queue.contains(&customer)
    }
}

/// All checkout lanes of the store, allocated once for the entire run.
#[derive(Debug, Clone)]
pub struct LanePool {
    lanes: Vec<Lane>,
}

impl LanePool {
    /// Constructs a pool of `num_lanes` idle lanes.
    #[must_use]
    pub fn new(num_lanes: usize) -> Self {
        Self {
            lanes: vec![Lane::default(); num_lanes],
        }
    }

    /// Total number of lanes, including the ones that are not open.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Checks if the pool has no lanes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Returns the lane with the given ID, if it exists.
    #[must_use]
    pub fn lane(&self, lane: LaneId) -> Option<&Lane> {
        self.lanes.get(usize::from(lane))
    }

    fn lane_mut(&mut self, lane: LaneId) -> Result<&mut Lane, LaneError> {
        let num_lanes = self.lanes.len();
        self.lanes
            .get_mut(usize::from(lane))
            .ok_or(LaneError::OutOfRange { lane, num_lanes })
    }

    /// Load of the given lane, or 0 if it does not exist.
    #[must_use]
    pub fn load(&self, lane: LaneId) -> usize {
        self.lane(lane).map_or(0, Lane::load)
    }

    /// Sum of loads of the first `active` lanes.
    #[must_use]
    pub fn total_load(&self, active: usize) -> usize {
        self.lanes.iter().take(active).map(Lane::load).sum()
    }

    /// Average load of the first `active` lanes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_load(&self, active: usize) -> f64 {
        let active = active.min(self.lanes.len());
        if active == 0 {
            0.0
        } else {
            self.total_load(active) as f64 / active as f64
        }
    }

    /// Requests the cashier of `lane` for `customer`. If the cashier is busy, the customer joins
    /// the end of the queue.
    ///
    /// # Errors
    ///
    /// Fails if the lane does not exist or the customer is already there.
    pub fn request(&mut self, lane: LaneId, customer: CustomerId) -> Result<Grant, LaneError> {
        let target = self.lane_mut(lane)?;
        if target.contains(customer) {
            return Err(LaneError::AlreadyPresent { lane, customer });
        }
        if target.holder.is_none() {
            target.holder = Some(customer);
            Ok(Grant::Immediate)
        } else {
            let ahead = target.load();
            target.queue.push_back(customer);
            Ok(Grant::Queued { ahead })
        }
    }

    /// Frees the cashier of `lane` held by `customer`. The first waiting customer, if any,
    /// is served right away and returned.
    ///
    /// # Errors
    ///
    /// Fails if the lane does not exist or `customer` is not the one being served.
    pub fn release(
        &mut self,
        lane: LaneId,
        customer: CustomerId,
    ) -> Result<Option<CustomerId>, LaneError> {
        let target = self.lane_mut(lane)?;
        if target.holder != Some(customer) {
            return Err(LaneError::NotHolder { lane, customer });
        }
        target.holder = target.queue.pop_front();
        Ok(target.holder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use float_cmp::approx_eq;

    fn c(id: usize) -> CustomerId {
        CustomerId::from(id)
    }

    fn l(id: usize) -> LaneId {
        LaneId::from(id)
    }

    #[test]
    fn test_request_and_release_in_fifo_order() -> Result<(), LaneError> {
        let mut lanes = LanePool::new(2);
        assert_eq!(lanes.request(l(0), c(1))?, Grant::Immediate);
        assert_eq!(lanes.request(l(0), c(2))?, Grant::Queued { ahead: 1 });
        assert_eq!(lanes.request(l(0), c(3))?, Grant::Queued { ahead: 2 });
        assert_eq!(lanes.load(l(0)), 3);
        assert_eq!(lanes.load(l(1)), 0);

        assert_eq!(lanes.release(l(0), c(1))?, Some(c(2)));
        assert_eq!(lanes.lane(l(0)).unwrap().holder(), Some(c(2)));
        assert_eq!(lanes.load(l(0)), 2);
        assert_eq!(lanes.release(l(0), c(2))?, Some(c(3)));
        assert_eq!(lanes.release(l(0), c(3))?, None);
        assert!(!lanes.lane(l(0)).unwrap().is_busy());
        assert_eq!(lanes.load(l(0)), 0);
        Ok(())
    }

    #[test]
    fn test_lanes_are_independent() -> Result<(), LaneError> {
        let mut lanes = LanePool::new(3);
        assert_eq!(lanes.request(l(0), c(1))?, Grant::Immediate);
        assert_eq!(lanes.request(l(2), c(2))?, Grant::Immediate);
        assert_eq!(lanes.request(l(2), c(3))?, Grant::Queued { ahead: 1 });
        assert_eq!(lanes.lane(l(2)).unwrap().queue_len(), 1);
        assert_eq!(lanes.total_load(3), 3);
        assert_eq!(lanes.total_load(1), 1);
        assert!(approx_eq!(f64, lanes.average_load(3), 1.0, ulps = 2));
        assert!(approx_eq!(f64, lanes.average_load(2), 0.5, ulps = 2));
        Ok(())
    }

    #[test]
    fn test_release_by_other_customer_fails() -> Result<(), LaneError> {
        let mut lanes = LanePool::new(1);
        lanes.request(l(0), c(1))?;
        lanes.request(l(0), c(2))?;
        assert_eq!(
            lanes.release(l(0), c(2)),
            Err(LaneError::NotHolder {
                lane: l(0),
                customer: c(2)
            })
        );
        assert_eq!(lanes.lane(l(0)).unwrap().holder(), Some(c(1)));
        Ok(())
    }

    #[test]
    fn test_release_idle_lane_fails() {
        let mut lanes = LanePool::new(1);
        assert!(lanes.release(l(0), c(1)).is_err());
    }

    #[test]
    fn test_out_of_range() {
        let mut lanes = LanePool::new(2);
        assert_eq!(
            lanes.request(l(2), c(1)),
            Err(LaneError::OutOfRange {
                lane: l(2),
                num_lanes: 2
            })
        );
        assert_eq!(lanes.load(l(5)), 0);
    }

    #[test]
    fn test_double_request_fails() -> Result<(), LaneError> {
        let mut lanes = LanePool::new(1);
        lanes.request(l(0), c(1))?;
        lanes.request(l(0), c(2))?;
        assert!(lanes.request(l(0), c(1)).is_err());
        assert!(lanes.request(l(0), c(2)).is_err());
        assert_eq!(lanes.load(l(0)), 2);
        Ok(())
    }

    #[test]
    fn test_average_of_no_lanes() {
        let lanes = LanePool::new(2);
        assert_eq!(lanes.average_load(0), 0.0);
    }
}
