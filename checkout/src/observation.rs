use serde::{Deserialize, Serialize};

use crate::{CustomerId, LaneId};

/// Receives observations made during the simulation.
///
/// The simulation only ever appends observations; it never reads them back.
pub trait ObservationSink {
    /// A customer started service after waiting for `wait_time`.
    fn record_wait(&mut self, wait_time: f64);
    /// A customer finished service that took `service_time`.
    fn record_service(&mut self, service_time: f64);
    /// Average load of the open lanes at the time a customer arrived.
    fn record_queue_sample(&mut self, time: f64, average_length: f64);
    /// A new lane opened.
    fn record_lane_opened(&mut self, lane: LaneId, time: f64);
    /// A customer left the store.
    fn record_departure(&mut self, record: CustomerRecord);
}

/// Average load of open lanes at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueSample {
    /// Time of the sample.
    pub time: f64,
    /// Total load of open lanes divided by their number.
    pub average_length: f64,
}

/// A lane opening.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneOpened {
    /// Zero-based ID of the opened lane.
    pub lane: LaneId,
    /// Time of opening.
    pub time: f64,
}

/// Summary of a single customer's visit, available after departure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Customer ID.
    pub id: CustomerId,
    /// Lane at which the customer was served.
    pub lane: LaneId,
    /// Time of entering the store.
    pub arrival_time: f64,
    /// Time spent in the queue.
    pub wait_time: f64,
    /// Time spent at the cashier.
    pub service_time: f64,
    /// Time of leaving the store.
    pub departure_time: f64,
}

/// All observations of a single simulation run, in the order they were made.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Waiting times, recorded when service starts.
    pub wait_times: Vec<f64>,
    /// Service times, recorded when service ends.
    pub service_times: Vec<f64>,
    /// Average lane loads, recorded at each arrival.
    pub queue_samples: Vec<QueueSample>,
    /// Lane openings.
    pub lane_open_events: Vec<LaneOpened>,
    /// Visits of all served customers, in the order of departure.
    pub customers: Vec<CustomerRecord>,
}

impl RunResult {
    /// Number of customers that were served and left the store.
    #[must_use]
    pub fn customers_served(&self) -> usize {
        self.customers.len()
    }

    /// Number of open lanes at the end of the run.
    #[must_use]
    pub fn final_active_lanes(&self) -> usize {
        self.lane_open_events.len() + 1
    }
}

impl ObservationSink for RunResult {
    fn record_wait(&mut self, wait_time: f64) {
        self.wait_times.push(wait_time);
    }

    fn record_service(&mut self, service_time: f64) {
        self.service_times.push(service_time);
    }

    fn record_queue_sample(&mut self, time: f64, average_length: f64) {
        self.queue_samples.push(QueueSample {
            time,
            average_length,
        });
    }

    fn record_lane_opened(&mut self, lane: LaneId, time: f64) {
        self.lane_open_events.push(LaneOpened { lane, time });
    }

    fn record_departure(&mut self, record: CustomerRecord) {
        self.customers.push(record);
    }
}
