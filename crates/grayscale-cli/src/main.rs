use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use grayscale_core::{run_batch, BatchSummary, ConvertOptions, Converter, LineSink, Traversal};

mod status;

use status::JsonLinesSink;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert images to grayscale, writing <name>_bw.<ext> for each input")]
struct Args {
    /// Image files to convert (JPEG or PNG; format is detected from content)
    paths: Vec<PathBuf>,

    /// Directory for output files [default: current directory]
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Marker appended to each output file stem
    #[arg(long, default_value = grayscale_core::config::DEFAULT_SUFFIX, allow_hyphen_values = true)]
    suffix: String,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = grayscale_core::codec::DEFAULT_JPEG_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Worker threads per image; 0 or 1 converts sequentially [default: CPU count]
    #[arg(short, long)]
    workers: Option<usize>,

    /// Print one JSON object per image instead of text lines
    #[arg(long)]
    json: bool,

    /// Exit with status 1 if any image failed
    #[arg(long)]
    fail_on_error: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            suffix: self.suffix.clone(),
            output_dir: self.out_dir.clone(),
            jpeg_quality: self.quality,
            traversal: self
                .workers
                .map(Traversal::from_workers)
                .unwrap_or_default(),
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// What an invocation did.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// No paths were given; usage was printed.
    Usage,
    Completed(BatchSummary),
}

impl Outcome {
    fn exit_status(&self, fail_on_error: bool) -> u8 {
        match self {
            Outcome::Completed(summary) if fail_on_error && !summary.all_succeeded() => 1,
            _ => 0,
        }
    }
}

/// Run the batch described by `args`, writing usage or status lines to `out`.
fn run<W: Write + Send>(args: &Args, mut out: W) -> Result<Outcome> {
    if args.paths.is_empty() {
        write!(out, "{}", Args::command().render_help()).context("Failed to print usage")?;
        return Ok(Outcome::Usage);
    }

    let options = args.options();
    log::debug!("options: {:?}", options);
    let converter = Converter::new(options);

    let summary = if args.json {
        run_batch(&args.paths, &converter, &JsonLinesSink::new(out))
    } else {
        run_batch(&args.paths, &converter, &LineSink::new(out))
    };
    log::info!(
        "{} of {} images converted",
        summary.succeeded,
        summary.total()
    );

    Ok(Outcome::Completed(summary))
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let outcome = run(&args, io::stdout())?;
    Ok(ExitCode::from(outcome.exit_status(args.fail_on_error)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_paths_is_allowed() {
        let args = Args::try_parse_from(["grayscale"]).unwrap();
        assert!(args.paths.is_empty());
    }

    #[test]
    fn test_defaults_map_to_options() {
        let args = Args::try_parse_from(["grayscale", "a.jpg", "b.png"]).unwrap();
        let options = args.options();

        assert_eq!(args.paths.len(), 2);
        assert_eq!(options.suffix, "_bw");
        assert_eq!(options.output_dir, None);
        assert_eq!(options.jpeg_quality, 75);
        assert_eq!(options.traversal, Traversal::default());
    }

    #[test]
    fn test_flags_map_to_options() {
        let args = Args::try_parse_from([
            "grayscale", "--out-dir", "out", "--suffix", "-gray", "-q", "90", "-w", "1", "x.png",
        ])
        .unwrap();
        let options = args.options();

        assert_eq!(options.output_dir, Some(PathBuf::from("out")));
        assert_eq!(options.suffix, "-gray");
        assert_eq!(options.jpeg_quality, 90);
        assert_eq!(options.traversal, Traversal::Sequential);
    }

    #[test]
    fn test_quality_out_of_range_rejected() {
        assert!(Args::try_parse_from(["grayscale", "-q", "0", "a.png"]).is_err());
        assert!(Args::try_parse_from(["grayscale", "-q", "101", "a.png"]).is_err());
    }

    #[test]
    fn test_verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_paths_prints_usage_and_succeeds() {
        let args = Args::try_parse_from(["grayscale", "--fail-on-error"]).unwrap();
        let mut out = Vec::new();

        let outcome = run(&args, &mut out).unwrap();

        assert_eq!(outcome, Outcome::Usage);
        assert_eq!(outcome.exit_status(args.fail_on_error), 0);
        assert!(String::from_utf8(out).unwrap().contains("Usage:"));
    }

    #[test]
    fn test_fail_on_error_sets_exit_status() {
        let missing = "no/such/dir/missing.png";
        let mut out = Vec::new();

        let args = Args::try_parse_from(["grayscale", "--fail-on-error", missing]).unwrap();
        let outcome = run(&args, &mut out).unwrap();

        assert_eq!(
            outcome,
            Outcome::Completed(BatchSummary {
                succeeded: 0,
                failed: 1
            })
        );
        assert_eq!(outcome.exit_status(true), 1);
        assert_eq!(outcome.exit_status(false), 0);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Failed to process no/such/dir/missing.png"));
    }

    #[test]
    fn test_json_flag_writes_json_lines() {
        let args = Args::try_parse_from(["grayscale", "--json", "missing.png"]).unwrap();
        let mut out = Vec::new();

        run(&args, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("{\"input\":\"missing.png\",\"output\":null"));
    }

    #[test]
    fn test_successful_batch_exits_zero() {
        assert_eq!(
            Outcome::Completed(BatchSummary {
                succeeded: 3,
                failed: 0
            })
            .exit_status(true),
            0
        );
    }
}
