//! Run Output
//!
//! Writes the products of a finished run to disk: the run report as pretty
//! JSON and, when event logging was enabled, the move log as JSONL. File
//! formats live in `sim-events`; this module only does the writing.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use sim_events::{MoveEvent, RunReport};

/// File name of the run report inside the output directory.
pub const REPORT_FILE: &str = "report.json";

/// File name of the move log inside the output directory.
pub const EVENTS_FILE: &str = "events.jsonl";

/// Errors that can occur while writing run output.
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error creating the directory or writing a file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Error serializing a report or event.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Writes the run report as pretty JSON, returning the file path.
pub fn write_report(dir: &Path, report: &RunReport) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(REPORT_FILE);
    fs::write(&path, serde_json::to_string_pretty(report)?)?;
    Ok(path)
}

/// Writes the move log as JSONL, one event per line, returning the file
/// path.
pub fn write_event_log(dir: &Path, events: &[MoveEvent]) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(EVENTS_FILE);
    let mut lines = String::new();
    for event in events {
        lines.push_str(&event.to_jsonl()?);
        lines.push('\n');
    }
    fs::write(&path, lines)?;
    Ok(path)
}
