//! Writing simulation results to files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use eyre::WrapErr;
use serde::Serialize;

use crate::RunResult;

#[derive(Serialize)]
struct WaitRow {
    wait_time: f64,
}

#[derive(Serialize)]
struct ServiceRow {
    service_time: f64,
}

fn write_rows<T, I>(path: &Path, rows: I) -> eyre::Result<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::Writer::from_path(path)
        .wrap_err_with(|| format!("unable to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the entire result to `path` in JSON format.
///
/// # Errors
///
/// Fails if the file cannot be created or written.
pub fn write_json(result: &RunResult, path: &Path) -> eyre::Result<()> {
    let file =
        File::create(path).wrap_err_with(|| format!("unable to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result).wrap_err("unable to serialize results")?;
    writer.flush()?;
    Ok(())
}

/// Writes each sequence of observations to a separate CSV file in `dir`:
/// `waits.csv`, `services.csv`, `queue.csv`, `lanes.csv`, and `customers.csv`.
/// The directory is created if it does not exist.
///
/// # Errors
///
/// Fails if any of the files cannot be created or written.
pub fn write_csv(result: &RunResult, dir: &Path) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| format!("unable to create directory {}", dir.display()))?;
    write_rows(
        &dir.join("waits.csv"),
        result.wait_times.iter().map(|&wait_time| WaitRow { wait_time }),
    )?;
    write_rows(
        &dir.join("services.csv"),
        result
            .service_times
            .iter()
            .map(|&service_time| ServiceRow { service_time }),
    )?;
    write_rows(&dir.join("queue.csv"), &result.queue_samples)?;
    write_rows(&dir.join("lanes.csv"), &result.lane_open_events)?;
    write_rows(&dir.join("customers.csv"), &result.customers)?;
    Ok(())
}
