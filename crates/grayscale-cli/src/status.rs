//! Status sinks for the command line.

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use grayscale_core::{ConversionReport, StatusSink};
use serde::Serialize;

/// One JSON object per converted image.
///
/// Paths are stored lossily as strings so a non-UTF-8 path still produces a
/// line.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct JsonReport {
    pub input: String,
    pub output: Option<String>,
    pub error: Option<String>,
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl From<&ConversionReport> for JsonReport {
    fn from(report: &ConversionReport) -> Self {
        match &report.result {
            Ok(output) => Self {
                input: path_string(&report.input),
                output: Some(path_string(output)),
                error: None,
            },
            Err(err) => Self {
                input: path_string(&report.input),
                output: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Writes reports as JSON lines.
pub struct JsonLinesSink<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap()
    }
}

impl<W: Write + Send> StatusSink for JsonLinesSink<W> {
    fn report(&self, report: &ConversionReport) {
        let line = match serde_json::to_string(&JsonReport::from(report)) {
            Ok(line) => line,
            Err(err) => {
                log::error!("failed to serialize report for {}: {}", report.input.display(), err);
                return;
            }
        };

        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = writeln!(out, "{}", line) {
            log::warn!("failed to write status line: {}", err);
        }
    }
}
