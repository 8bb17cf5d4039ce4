//! Checkout lane simulation application.
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

use std::fs::File;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use eyre::WrapErr;
use indicatif::{ProgressBar, ProgressStyle};

use checkout_sim::report::{Histogram, QueueLengthSeries, Summary, DEFAULT_BINS, DEFAULT_BUCKET};
use checkout_sim::{export, CheckoutSimulation, DistributionFamily, RunResult, SimulationConfig};

/// Runs checkout lane simulation.
#[derive(Parser)]
#[command(version, author)]
struct Opt {
    /// Path to a JSON file with the simulation configuration.
    /// Any parameters given on the command line override the ones in the file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Total number of checkout lanes.
    #[arg(long)]
    lanes: Option<usize>,

    /// Load of the last open lane at which the next lane opens.
    #[arg(long)]
    threshold: Option<usize>,

    /// Mean time between arrivals, in minutes.
    #[arg(long)]
    interarrival_mean: Option<f64>,

    /// Mean service time, in minutes.
    #[arg(long)]
    service_mean: Option<f64>,

    /// Time after which no more customers arrive, in minutes.
    #[arg(long)]
    horizon: Option<f64>,

    /// Random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Distribution of interarrival and service times: `exponential` or `deterministic`.
    #[arg(long)]
    distribution: Option<DistributionFamily>,

    /// Directory to write the results to, in JSON and CSV formats.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of bins in the printed histograms.
    #[arg(long, default_value_t = DEFAULT_BINS)]
    bins: usize,

    /// Width of the time buckets of the printed average queue length, in minutes.
    #[arg(long, default_value_t = DEFAULT_BUCKET)]
    bucket: f64,

    /// Verbosity.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Store the logs this file.
    #[arg(long)]
    log_output: Option<PathBuf>,

    /// Do not log to the stderr.
    #[arg(long)]
    no_stderr: bool,
}

impl Opt {
    fn simulation_config(&self) -> eyre::Result<SimulationConfig> {
        let mut config = if let Some(path) = &self.config {
            let file = File::open(path)
                .wrap_err_with(|| format!("unable to open config file {}", path.display()))?;
            serde_json::from_reader(file).wrap_err("unable to parse config file")?
        } else {
            SimulationConfig::default()
        };
        if let Some(lanes) = self.lanes {
            config.num_lanes = lanes;
        }
        if let Some(threshold) = self.threshold {
            config.activation_threshold = threshold;
        }
        if let Some(mean) = self.interarrival_mean {
            config.interarrival_mean = mean;
        }
        if let Some(mean) = self.service_mean {
            config.service_mean = mean;
        }
        if let Some(horizon) = self.horizon {
            config.horizon = horizon;
        }
        if let Some(seed) = self.seed {
            config.random_seed = Some(seed);
        }
        if let Some(distribution) = self.distribution {
            config.distribution = distribution;
        }
        config.validate()?;
        Ok(config)
    }
}

fn set_up_logger(opt: &Opt) -> Result<(), fern::InitError> {
    let log_level = match opt.verbose {
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        3 => log::LevelFilter::Trace,
        _ => log::LevelFilter::Warn,
    };
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(log_level);
    let dispatch = if let Some(path) = &opt.log_output {
        let _ = std::fs::remove_file(path);
        dispatch.chain(
            std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .append(false)
                .open(path)?,
        )
    } else {
        dispatch
    };
    let dispatch = if opt.no_stderr {
        dispatch
    } else {
        dispatch.chain(std::io::stderr())
    };
    dispatch.apply()?;
    Ok(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn simulate(config: &SimulationConfig) -> eyre::Result<RunResult> {
    let mut sim = CheckoutSimulation::new(config)?;
    let pb = ProgressBar::new(config.horizon.ceil() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{wide_bar}] {pos}/{len} min")?
            .progress_chars("=> "),
    );
    pb.set_message("Simulating");
    while sim.step()? {
        pb.set_position(sim.time().min(config.horizon) as u64);
    }
    pb.finish_and_clear();
    sim.finish()
}

fn print_histogram(title: &str, values: &[f64], bins: usize) {
    if let Some(histogram) = Histogram::from_values(values, bins) {
        println!("\n{}\n{}", title, histogram);
    }
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let opt = Opt::parse();
    set_up_logger(&opt)?;
    let config = opt.simulation_config()?;
    log::info!("Configuration: {:?}", config);

    let result = simulate(&config)?;

    println!("{}", Summary::new(&result));
    for opening in &result.lane_open_events {
        println!(
            "Lane {} opened at {:.2}",
            opening.lane.number(),
            opening.time
        );
    }
    print_histogram("Waiting times", &result.wait_times, opt.bins);
    print_histogram("Service times", &result.service_times, opt.bins);
    if let Some(series) = QueueLengthSeries::from_samples(&result.queue_samples, opt.bucket) {
        println!("\nAverage queue length over time\n{}", series);
    }

    if let Some(dir) = &opt.output_dir {
        export::write_csv(&result, dir)?;
        export::write_json(&result, &dir.join("result.json"))?;
        log::info!("Results written to {}", dir.display());
    }
    Ok(())
}
