use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Family of probability distributions used to sample interarrival and service times.
/// Each family is parametrized only by its mean.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Clone,
    Copy,
    strum::EnumString,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DistributionFamily {
    /// Exponential distribution; arrivals form a Poisson process.
    Exponential,
    /// Always returns the mean.
    Deterministic,
}

impl Default for DistributionFamily {
    fn default() -> Self {
        Self::Exponential
    }
}

/// Parameters of a single simulation run.
///
/// Times are expressed in minutes. The defaults reproduce the reference store: three lanes,
/// a new lane opening at ten customers, a customer every two minutes on average, four minutes of
/// service on average, and ten hours of business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Total number of checkout lanes, open or not.
    pub num_lanes: usize,
    /// Load of the last open lane at which the next lane opens.
    pub activation_threshold: usize,
    /// Mean time between consecutive arrivals.
    pub interarrival_mean: f64,
    /// Mean service time at a lane.
    pub service_mean: f64,
    /// No customers arrive at or after this time.
    pub horizon: f64,
    /// Seed of the random number generator. If missing, a random seed is drawn and logged.
    pub random_seed: Option<u64>,
    /// Distribution of interarrival and service times.
    pub distribution: DistributionFamily,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_lanes: 3,
            activation_threshold: 10,
            interarrival_mean: 2.0,
            service_mean: 4.0,
            horizon: 600.0,
            random_seed: Some(2),
            distribution: DistributionFamily::Exponential,
        }
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl SimulationConfig {
    /// Checks that all parameters are within their domains.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_lanes == 0 {
            return Err(ConfigError::NoLanes);
        }
        if self.activation_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if !positive(self.interarrival_mean) {
            return Err(ConfigError::InterarrivalMean(self.interarrival_mean));
        }
        if !positive(self.service_mean) {
            return Err(ConfigError::ServiceMean(self.service_mean));
        }
        if !positive(self.horizon) {
            return Err(ConfigError::Horizon(self.horizon));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[rstest]
    #[case(SimulationConfig { num_lanes: 0, ..Default::default() }, ConfigError::NoLanes)]
    #[case(
        SimulationConfig { activation_threshold: 0, ..Default::default() },
        ConfigError::ZeroThreshold
    )]
    #[case(
        SimulationConfig { interarrival_mean: 0.0, ..Default::default() },
        ConfigError::InterarrivalMean(0.0)
    )]
    #[case(
        SimulationConfig { service_mean: -4.0, ..Default::default() },
        ConfigError::ServiceMean(-4.0)
    )]
    #[case(SimulationConfig { horizon: 0.0, ..Default::default() }, ConfigError::Horizon(0.0))]
    #[case(
        SimulationConfig { horizon: f64::INFINITY, ..Default::default() },
        ConfigError::Horizon(f64::INFINITY)
    )]
    fn test_invalid_config(#[case] config: SimulationConfig, #[case] expected: ConfigError) {
        assert_eq!(config.validate(), Err(expected));
    }

    #[test]
    fn test_nan_mean_is_rejected() {
        let config = SimulationConfig {
            service_mean: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ServiceMean(_))
        ));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"num_lanes": 5, "distribution": "deterministic"}"#).unwrap();
        assert_eq!(
            config,
            SimulationConfig {
                num_lanes: 5,
                distribution: DistributionFamily::Deterministic,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_distribution_from_str() {
        assert_eq!(
            "exponential".parse::<DistributionFamily>().unwrap(),
            DistributionFamily::Exponential
        );
        assert_eq!(
            "deterministic".parse::<DistributionFamily>().unwrap(),
            DistributionFamily::Deterministic
        );
        assert!("gaussian".parse::<DistributionFamily>().is_err());
        assert_eq!(DistributionFamily::Deterministic.to_string(), "deterministic");
    }
}
