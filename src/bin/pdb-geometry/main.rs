mod logging;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdb_geometry_rs::{
    analyze_all_with, save_reports_to_csv, AnalysisConfig, LoaderConfig, MalformedPolicy,
    DEFAULT_MAX_ATOMS,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Command-line tool for computing geometric summaries of PDB structure files
#[derive(Parser, Debug)]
#[command(name = "pdb-geometry")]
#[command(
    about = "Compute center of gravity, radius of gyration and maximum atom distance of PDB files",
    long_about = None
)]
struct Cli {
    /// Structure files to analyze, in order
    #[arg(required = true, num_args = 1..)]
    paths: Vec<PathBuf>,

    /// Maximum number of ATOM records accepted per file (default: 20000)
    #[arg(long, default_value_t = DEFAULT_MAX_ATOMS)]
    max_atoms: usize,

    /// Handling of coordinate fields that are not numbers
    #[arg(long, value_enum, default_value_t = MalformedPolicy::Zero)]
    malformed: MalformedPolicy,

    /// Stop at the first file that fails
    #[arg(long)]
    fail_fast: bool,

    /// Also save the successful reports to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Show a progress bar on stderr
    #[arg(long)]
    progress: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable logging
    #[arg(short, long)]
    quiet: bool,

    /// Additionally write the log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            loader: LoaderConfig {
                max_atoms: self.max_atoms,
                policy: self.malformed,
            },
            fail_fast: self.fail_fast,
        }
    }
}

fn progress_bar(show: bool, len: usize) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} files ({percent}%)")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        eprintln!("Error: failed to set up logging: {}", e);
        std::process::exit(1);
    }
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let config = cli.analysis_config();
    let pb = progress_bar(cli.progress, cli.paths.len());
    let mut stdout_error: Option<std::io::Error> = None;

    let outcomes = analyze_all_with(&cli.paths, &config, |outcome| {
        pb.suspend(|| match &outcome.result {
            Ok(report) if stdout_error.is_none() => {
                let mut out = std::io::stdout().lock();
                if let Err(e) = write!(out, "{}", report).and_then(|_| out.flush()) {
                    stdout_error = Some(e);
                }
            }
            Ok(_) => {}
            Err(e) => eprintln!("Error: {}", e),
        });
        pb.inc(1);
    });
    pb.finish_and_clear();

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    let skipped = cli.paths.len() - outcomes.len();
    if skipped > 0 {
        eprintln!("Error: stopped after first failure, {} file(s) not analyzed", skipped);
    }

    let mut exit_code = if failed > 0 { 1 } else { 0 };

    if let Some(e) = &stdout_error {
        eprintln!("Error: failed to write report to stdout: {}", e);
        exit_code = 1;
    }

    if let Some(csv_path) = &cli.csv {
        match save_reports_to_csv(&outcomes, csv_path) {
            Ok(()) => info!("Reports saved to {}", csv_path.display()),
            Err(e) => {
                eprintln!("Error: {}", e);
                exit_code = 1;
            }
        }
    }

    info!(
        "{} of {} file(s) analyzed successfully",
        outcomes.len() - failed,
        cli.paths.len()
    );

    std::process::exit(exit_code);
}
