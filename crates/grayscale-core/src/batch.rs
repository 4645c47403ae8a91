//! Batch driver: one independent conversion per input path.
//!
//! Every path gets its own scoped thread. A failure, or even a panic, in one
//! conversion is reported through the [`StatusSink`] and never cancels or
//! delays the others. [`run_batch`] returns only after every task has joined.

use std::any::Any;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;

use log::warn;

use crate::codec::Codec;
use crate::convert::{ConversionError, Converter};

/// Outcome of converting one input path.
#[derive(Debug)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub result: Result<PathBuf, ConversionError>,
}

impl ConversionReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(output) => write!(
                f,
                "{} converted to {}",
                self.input.display(),
                output.display()
            ),
            Err(err) => write!(f, "Failed to process {}: {}", self.input.display(), err),
        }
    }
}

/// Side channel receiving one report per image, in completion order.
///
/// Called concurrently from the conversion threads.
pub trait StatusSink: Send + Sync {
    fn report(&self, report: &ConversionReport);
}

impl<F> StatusSink for F
where
    F: Fn(&ConversionReport) + Send + Sync,
{
    fn report(&self, report: &ConversionReport) {
        self(report)
    }
}

/// Writes each report as one human-readable line.
pub struct LineSink<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> LineSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> StatusSink for LineSink<W> {
    fn report(&self, report: &ConversionReport) {
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = writeln!(out, "{}", report) {
            warn!("failed to write status line: {}", err);
        }
    }
}

/// Success and failure counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Convert every path concurrently and wait for all of them.
pub fn run_batch<C, S>(paths: &[PathBuf], converter: &Converter<C>, status: &S) -> BatchSummary
where
    C: Codec,
    S: StatusSink + ?Sized,
{
    thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .map(|path| {
                let handle = scope.spawn(move || {
                    let result = converter.convert(path);
                    if let Err(err) = &result {
                        warn!("failed to process {}: {}", path.display(), err);
                    }
                    let report = ConversionReport {
                        input: path.clone(),
                        result,
                    };
                    status.report(&report);
                    report.is_success()
                });
                (path, handle)
            })
            .collect();

        let mut summary = BatchSummary::default();
        for (path, handle) in handles {
            match handle.join() {
                Ok(true) => summary.succeeded += 1,
                Ok(false) => summary.failed += 1,
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!("conversion of {} panicked: {}", path.display(), message);
                    status.report(&ConversionReport {
                        input: path.clone(),
                        result: Err(ConversionError::Panicked(message)),
                    });
                    summary.failed += 1;
                }
            }
        }
        summary
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
