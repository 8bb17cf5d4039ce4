use super::{CapacityController, Dispatch, LaneId, LanePool};

/// Always selects the open lane with the fewest customers, counting the one being served.
/// Ties go to the lane with the lowest index.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortestQueueDispatch;

impl Dispatch for ShortestQueueDispatch {
    fn dispatch(&self, lanes: &LanePool, capacity: &CapacityController) -> LaneId {
        // `min_by_key` returns the first of equally minimal elements.
        capacity
            .active_lane_ids()
            .min_by_key(|&lane| lanes.load(lane))
            .unwrap_or_else(|| LaneId::from(0))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{CustomerId, LaneError};
    use rstest::rstest;

    /// Builds a pool with the given loads, and a controller with all of them open.
    fn setup(loads: &[usize]) -> Result<(LanePool, CapacityController), LaneError> {
        let mut lanes = LanePool::new(loads.len());
        let mut next_customer = 0;
        for (lane, &load) in loads.iter().enumerate() {
            for _ in 0..load {
                next_customer += 1;
                lanes.request(LaneId::from(lane), CustomerId::from(next_customer))?;
            }
        }
        let mut capacity = CapacityController::new(loads.len(), 1);
        let mut probe = LanePool::new(loads.len());
        for lane in 0..loads.len() {
            probe.request(LaneId::from(lane), CustomerId::from(0))?;
            capacity.update(&probe);
        }
        assert_eq!(capacity.active_lanes(), loads.len());
        Ok((lanes, capacity))
    }

    #[rstest]
    #[case(&[0], 0)]
    #[case(&[0, 0, 0], 0)]
    #[case(&[3, 3, 3], 0)]
    #[case(&[2, 1, 1], 1)]
    #[case(&[2, 3, 1], 2)]
    #[case(&[4, 0, 0], 1)]
    #[case(&[1, 2, 0, 0], 2)]
    fn test_selects_least_loaded(#[case] loads: &[usize], #[case] expected: usize) {
        let (lanes, capacity) = setup(loads).unwrap();
        assert_eq!(
            ShortestQueueDispatch.dispatch(&lanes, &capacity),
            LaneId::from(expected)
        );
    }

    #[test]
    fn test_ignores_closed_lanes() -> Result<(), LaneError> {
        let mut lanes = LanePool::new(3);
        for id in 1..=5 {
            lanes.request(LaneId::from(0), CustomerId::from(id))?;
        }
        let capacity = CapacityController::new(3, 10);
        assert_eq!(
            ShortestQueueDispatch.dispatch(&lanes, &capacity),
            LaneId::from(0)
        );
        Ok(())
    }
}
