//! Parsing of the Plex library export.
//!
//! The export has no header row and four `|`-separated columns:
//! `path | title | views | rating`. Empty view/rating cells mean the value
//! is absent, not zero.

use clap::ValueEnum;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const DELIMITER: u8 = b'|';
const QUOTE: char = '"';

/// Errors that can occur while reading the Plex export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed export row {line}: {message}")]
    Malformed { line: u64, message: String },
}

/// Layout of the export file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Quoted, `|`-delimited CSV (a `"` inside a quoted field is doubled).
    #[default]
    Csv,
    /// One record per line, split on `|`, surrounding quotes stripped per field.
    Lines,
}

/// One row of the Plex export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlexRecord {
    pub path: String,
    pub title: String,
    pub views: Option<String>,
    pub rating: Option<String>,
}

impl PlexRecord {
    fn from_fields<'a>(mut fields: impl Iterator<Item = &'a str>) -> Self {
        let path = fields.next().unwrap_or_default().to_string();
        let title = fields.next().unwrap_or_default().to_string();
        let views = present(fields.next());
        let rating = present(fields.next());
        Self {
            path,
            title,
            views,
            rating,
        }
    }
}

fn present(field: Option<&str>) -> Option<String> {
    field
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Read and parse the export at `path`.
pub fn load_export(path: &Path, format: ExportFormat) -> Result<Vec<PlexRecord>, ExportError> {
    let content = std::fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let records = parse_export(&content, format)?;
    debug!("Parsed {} rows from {:?}", records.len(), path);
    Ok(records)
}

pub fn parse_export(content: &str, format: ExportFormat) -> Result<Vec<PlexRecord>, ExportError> {
    match format {
        ExportFormat::Csv => parse_csv(content),
        ExportFormat::Lines => Ok(parse_lines(content)),
    }
}

fn parse_csv(content: &str) -> Result<Vec<PlexRecord>, ExportError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| ExportError::Malformed {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        })?;
        records.push(PlexRecord::from_fields(row.iter()));
    }
    Ok(records)
}

fn parse_lines(content: &str) -> Vec<PlexRecord> {
    // The csv reader drops a leading BOM; do the same here.
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            PlexRecord::from_fields(line.split(DELIMITER as char).map(strip_quotes))
        })
        .collect()
}

fn strip_quotes(field: &str) -> &str {
    let field = field.strip_prefix(QUOTE).unwrap_or(field);
    field.strip_suffix(QUOTE).unwrap_or(field)
}
