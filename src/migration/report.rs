//! CSV report of update outcomes.

use std::io::Write;
use std::path::Path;
use thiserror::Error;

use super::models::Outcome;

/// Default report file name, relative to the working directory.
pub const DEFAULT_REPORT_FILE: &str = "results.csv";

/// Column header of the report.
pub const REPORT_HEADER: [&str; 7] = ["id", "path", "title", "views", "rating", "result", "error"];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read report {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write `outcomes` to `path`, replacing any existing file.
pub fn write_report(path: &Path, outcomes: &[Outcome]) -> Result<(), ReportError> {
    let wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|source| ReportError::Write {
            path: path.display().to_string(),
            source,
        })?;
    write_outcomes(wtr, outcomes)
}

fn write_outcomes<W: Write>(
    mut wtr: csv::Writer<W>,
    outcomes: &[Outcome],
) -> Result<(), ReportError> {
    // Header is written explicitly so an empty report still has one.
    wtr.write_record(REPORT_HEADER)?;
    for outcome in outcomes {
        wtr.serialize(outcome)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read a report previously written by [`write_report`].
pub fn read_report(path: &Path) -> Result<Vec<Outcome>, ReportError> {
    let mut rdr = csv::Reader::from_path(path).map_err(|source| ReportError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let mut outcomes = Vec::new();
    for row in rdr.deserialize() {
        outcomes.push(row?);
    }
    Ok(outcomes)
}
