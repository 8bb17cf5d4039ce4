use checkout_sim::{
    run, CheckoutSimulation, ConfigError, CustomerId, DistributionFamily, FixedSampler, LaneId,
    LaneOpened, QueueSample, RunResult, SimulationConfig,
};
use float_cmp::approx_eq;
use quickcheck_macros::quickcheck;
use rand::rngs::mock::StepRng;
use rstest::rstest;
use testing::SequenceDistribution;

fn deterministic(horizon: f64) -> SimulationConfig {
    SimulationConfig {
        num_lanes: 3,
        activation_threshold: 2,
        interarrival_mean: 1.0,
        service_mean: 3.0,
        horizon,
        random_seed: Some(0),
        distribution: DistributionFamily::Deterministic,
    }
}

fn check_invariants(config: &SimulationConfig, result: &RunResult) {
    assert_eq!(result.wait_times.len(), result.customers_served());
    assert_eq!(result.service_times.len(), result.customers_served());
    assert_eq!(result.queue_samples.len(), result.customers_served());
    assert!(result.wait_times.iter().all(|&w| w >= 0.0));
    assert!(result.service_times.iter().all(|&s| s >= 0.0));
    assert!(result.lane_open_events.len() < config.num_lanes);
    for (idx, opening) in result.lane_open_events.iter().enumerate() {
        assert_eq!(opening.lane, LaneId::from(idx + 1));
    }
    assert!(result
        .lane_open_events
        .windows(2)
        .all(|w| w[0].time <= w[1].time));
    assert!(result
        .queue_samples
        .windows(2)
        .all(|w| w[0].time <= w[1].time));
    assert!(result
        .customers
        .windows(2)
        .all(|w| w[0].departure_time <= w[1].departure_time));
    for customer in &result.customers {
        assert!(customer.arrival_time < config.horizon);
        assert!(usize::from(customer.lane) < config.num_lanes);
        assert!(approx_eq!(
            f64,
            customer.arrival_time + customer.wait_time + customer.service_time,
            customer.departure_time,
            epsilon = 1e-9
        ));
    }
    let mut ids: Vec<usize> = result.customers.iter().map(|c| c.id.into()).collect();
    ids.sort_unstable();
    assert!(ids.iter().copied().eq(1..=result.customers_served()));
}

#[test]
fn test_deterministic_run() {
    let config = deterministic(6.5);
    let result = run(&config).unwrap();
    check_invariants(&config, &result);

    assert_eq!(result.wait_times, vec![0.0, 0.0, 2.0, 1.0, 3.0, 3.0]);
    assert_eq!(result.service_times, vec![3.0; 6]);
    let sample = |time, average_length| QueueSample {
        time,
        average_length,
    };
    assert_eq!(
        result.queue_samples,
        vec![
            sample(1.0, 0.0),
            sample(2.0, 1.0),
            sample(3.0, 1.0),
            sample(4.0, 1.0),
            sample(5.0, 1.5),
            sample(6.0, 1.5),
        ]
    );
    assert_eq!(
        result.lane_open_events,
        vec![LaneOpened {
            lane: LaneId::from(1),
            time: 3.0
        }]
    );
    let departures: Vec<(CustomerId, LaneId, f64)> = result
        .customers
        .iter()
        .map(|c| (c.id, c.lane, c.departure_time))
        .collect();
    let c = |id: usize| CustomerId::from(id);
    let l = |id: usize| LaneId::from(id);
    assert_eq!(
        departures,
        vec![
            (c(1), l(0), 4.0),
            (c(3), l(1), 6.0),
            (c(2), l(0), 7.0),
            (c(5), l(1), 9.0),
            (c(4), l(0), 10.0),
            (c(6), l(1), 12.0),
        ]
    );
    assert_eq!(result.final_active_lanes(), 2);
}

#[rstest]
#[case(6.5, 6)]
#[case(6.0, 5)]
#[case(1.0, 0)]
#[case(1.5, 1)]
fn test_no_arrivals_at_or_after_horizon(#[case] horizon: f64, #[case] expected: usize) {
    let result = run(&deterministic(horizon)).unwrap();
    assert_eq!(result.customers_served(), expected);
}

#[test]
fn test_customers_admitted_before_horizon_are_served() {
    let config = deterministic(6.5);
    let result = run(&config).unwrap();
    let last = result.customers.last().unwrap();
    assert!(last.departure_time > config.horizon);
}

#[test]
fn test_single_lane_never_opens_more() {
    let config = SimulationConfig {
        num_lanes: 1,
        activation_threshold: 1,
        ..deterministic(20.0)
    };
    let result = run(&config).unwrap();
    check_invariants(&config, &result);
    assert!(result.lane_open_events.is_empty());
    assert!(result.customers.iter().all(|c| c.lane == LaneId::from(0)));
}

#[test]
fn test_non_positive_service_time_aborts_run() {
    // Open: 1.0 until the first arrival; the next arrival (5.0) falls after the horizon;
    // then the first customer draws a zero service time.
    let sampler = FixedSampler::new(
        SequenceDistribution::new(vec![1.0, 5.0, 0.0]),
        StepRng::new(0, 1),
    );
    let sim = CheckoutSimulation::with_sampler(&deterministic(3.0), sampler).unwrap();
    let err = sim.finish().unwrap_err();
    assert_eq!(
        err.downcast_ref::<sim_engine::Error>(),
        Some(&sim_engine::Error::NonPositiveTimeout { duration: 0.0 })
    );
}

#[rstest]
#[case(SimulationConfig { num_lanes: 0, ..Default::default() }, ConfigError::NoLanes)]
#[case(
    SimulationConfig { interarrival_mean: f64::INFINITY, ..Default::default() },
    ConfigError::InterarrivalMean(f64::INFINITY)
)]
fn test_invalid_config_is_reported(
    #[case] config: SimulationConfig,
    #[case] expected: ConfigError,
) {
    let err = run(&config).unwrap_err();
    assert_eq!(err.downcast_ref::<ConfigError>(), Some(&expected));
}

#[test]
fn test_reference_scenario() {
    let config = SimulationConfig::default();
    let first = run(&config).unwrap();
    let second = run(&config).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    check_invariants(&config, &first);

    assert_eq!(first.customers_served(), 274);
    assert_eq!(
        first.lane_open_events,
        vec![LaneOpened {
            lane: LaneId::from(1),
            time: 21.376_595_907_775_084
        }]
    );
    let last = first.customers.last().unwrap();
    assert_eq!(last.id, CustomerId::from(271));
    assert_eq!(last.lane, LaneId::from(1));
    assert!(approx_eq!(
        f64,
        last.departure_time,
        609.273_929_749_254_4,
        epsilon = 1e-9
    ));
    assert!(last.departure_time > config.horizon);
}

#[test]
fn test_different_seeds_differ() {
    let run_with = |seed| {
        run(&SimulationConfig {
            random_seed: Some(seed),
            ..Default::default()
        })
        .unwrap()
    };
    assert_ne!(run_with(2), run_with(3));
}

#[quickcheck]
fn prop_invariants_hold(seed: u64, lanes: u8, threshold: u8) -> bool {
    let config = SimulationConfig {
        num_lanes: usize::from(lanes % 4) + 1,
        activation_threshold: usize::from(threshold % 6) + 1,
        horizon: 120.0,
        random_seed: Some(seed),
        ..Default::default()
    };
    let result = run(&config).unwrap();
    check_invariants(&config, &result);
    true
}
