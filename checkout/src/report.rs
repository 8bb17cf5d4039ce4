//! Human-readable summaries of a simulation run.

use std::fmt;

use itertools::{Itertools, MinMaxResult};

use crate::{QueueSample, RunResult};

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 10;

/// Default width of a time bucket of the queue length series, in minutes.
pub const DEFAULT_BUCKET: f64 = 30.0;

/// Width of the longest histogram bar, in characters.
const BAR_WIDTH: usize = 40;

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let len = values.len();
    if len == 0 {
        0.0
    } else {
        values.sum::<f64>() / len as f64
    }
}

/// Aggregate statistics of a single run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Customers that left the store.
    pub customers_served: usize,
    /// Average waiting time.
    pub mean_wait: f64,
    /// Longest waiting time.
    pub max_wait: f64,
    /// Average service time.
    pub mean_service: f64,
    /// Average of the sampled mean lane loads.
    pub mean_queue_length: f64,
    /// Number of lanes opened during the run, not counting the first one.
    pub lane_openings: usize,
}

impl Summary {
    /// Summarizes the observations of a run. All averages of empty sequences are 0.
    #[must_use]
    pub fn new(result: &RunResult) -> Self {
        Self {
            customers_served: result.customers_served(),
            mean_wait: mean(result.wait_times.iter().copied()),
            max_wait: result.wait_times.iter().copied().fold(0.0, f64::max),
            mean_service: mean(result.service_times.iter().copied()),
            mean_queue_length: mean(result.queue_samples.iter().map(|s| s.average_length)),
            lane_openings: result.lane_open_events.len(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Customers served:      {}", self.customers_served)?;
        writeln!(f, "Mean waiting time:     {:.2}", self.mean_wait)?;
        writeln!(f, "Max waiting time:      {:.2}", self.max_wait)?;
        writeln!(f, "Mean service time:     {:.2}", self.mean_service)?;
        writeln!(f, "Mean queue length:     {:.2}", self.mean_queue_length)?;
        write!(f, "Lanes opened:          {}", self.lane_openings)
    }
}

/// Counts of values falling into equal-width bins between the minimum and maximum value.
///
/// Each bin includes its lower bound; the last one also includes the maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    min: f64,
    max: f64,
    counts: Vec<usize>,
}

impl Histogram {
    /// Builds a histogram with `bins` bins. Returns `None` if there are no values or no bins.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        if bins == 0 {
            return None;
        }
        let (min, max) = match values.iter().copied().minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(value) => (value, value),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        let width = (max - min) / bins as f64;
        let mut counts = vec![0; bins];
        for &value in values {
            let bin = if width > 0.0 {
                (((value - min) / width).floor() as usize).min(bins - 1)
            } else {
                0
            };
            counts[bin] += 1;
        }
        Some(Self { min, max, counts })
    }

    /// Number of values in each bin.
    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Lower and upper bound of the given bin.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn bounds(&self, bin: usize) -> (f64, f64) {
        let width = (self.max - self.min) / self.counts.len() as f64;
        let lower = self.min + width * bin as f64;
        if bin + 1 == self.counts.len() {
            (lower, self.max)
        } else {
            (lower, lower + width)
        }
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let longest = self.counts.iter().copied().max().unwrap_or(0).max(1);
        for (bin, &count) in self.counts.iter().enumerate() {
            let (lower, upper) = self.bounds(bin);
            let bar = "#".repeat(count * BAR_WIDTH / longest);
            let closing = if bin + 1 == self.counts.len() { ']' } else { ')' };
            writeln!(
                f,
                "[{:>8.2}, {:>8.2}{} {:>6} {}",
                lower, upper, closing, count, bar
            )?;
        }
        Ok(())
    }
}

/// Average queue length over time: the mean of the sampled average lane loads within each
/// time bucket of equal width. Buckets with no samples are omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueLengthSeries {
    bucket: f64,
    points: Vec<(f64, f64)>,
}

impl QueueLengthSeries {
    /// Groups time-ordered `samples` into buckets of width `bucket`.
    /// Returns `None` if there are no samples or the width is not a positive number.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn from_samples(samples: &[QueueSample], bucket: f64) -> Option<Self> {
        if samples.is_empty() || !bucket.is_finite() || bucket <= 0.0 {
            return None;
        }
        let points = samples
            .iter()
            .group_by(|sample| (sample.time / bucket).floor() as u64)
            .into_iter()
            .map(|(idx, group)| {
                let group = group.collect_vec();
                (
                    bucket * idx as f64,
                    mean(group.iter().map(|sample| sample.average_length)),
                )
            })
            .collect();
        Some(Self { bucket, points })
    }

    /// Start of each non-empty bucket paired with the mean queue length within it.
    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

impl fmt::Display for QueueLengthSeries {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let longest = self
            .points
            .iter()
            .map(|&(_, length)| length)
            .fold(0.0, f64::max);
        for &(start, length) in &self.points {
            let bar = if longest > 0.0 {
                "#".repeat((length / longest * BAR_WIDTH as f64).round() as usize)
            } else {
                String::new()
            };
            writeln!(
                f,
                "[{:>8.2}, {:>8.2}) {:>6.2} {}",
                start,
                start + self.bucket,
                length,
                bar
            )?;
        }
        Ok(())
    }
}
