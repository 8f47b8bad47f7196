use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info};

use crate::errors::AnalysisError;
use crate::geometry::{centroid, max_pairwise_distance, radius_of_gyration};
use crate::loader::{load_coordinates, LoaderConfig};
use crate::structure::Coordinate;

/// Settings for analyzing a list of structure files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub loader: LoaderConfig,
    /// Stop after the first file that fails instead of analyzing the remaining ones
    pub fail_fast: bool,
}

/// Geometric summary of one structure file
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub path: PathBuf,
    pub atoms: usize,
    pub centroid: Coordinate,
    pub radius_of_gyration: f64,
    pub max_distance: f64,
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "PDB file {}, {} atoms were read",
            self.path.display(),
            self.atoms
        )?;
        writeln!(
            f,
            "Cg = {:.3} {:.3} {:.3}",
            self.centroid.x, self.centroid.y, self.centroid.z
        )?;
        writeln!(f, "Rg = {:.3}", self.radius_of_gyration)?;
        writeln!(f, "Dmax = {:.3}", self.max_distance)
    }
}

/// Result of analyzing one file of the input list
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<SummaryReport, AnalysisError>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Flat CSV row of a summary report
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    path: &'a str,
    atoms: usize,
    cg_x: f64,
    cg_y: f64,
    cg_z: f64,
    rg: f64,
    dmax: f64,
}

impl<'a> ReportRow<'a> {
    fn new(report: &'a SummaryReport, path: &'a str) -> Self {
        Self {
            path,
            atoms: report.atoms,
            cg_x: report.centroid.x,
            cg_y: report.centroid.y,
            cg_z: report.centroid.z,
            rg: report.radius_of_gyration,
            dmax: report.max_distance,
        }
    }
}

/// Load a structure file and compute its centroid, radius of gyration and maximum distance.
pub fn analyze(
    path: impl AsRef<Path>,
    config: &LoaderConfig,
) -> Result<SummaryReport, AnalysisError> {
    let path = path.as_ref();
    let coordinates = load_coordinates(path, config)?;

    let empty = || AnalysisError::EmptyStructure {
        path: path.to_path_buf(),
    };
    let cg = centroid(&coordinates).map_err(|_| empty())?;
    let rg = radius_of_gyration(&coordinates, &cg).map_err(|_| empty())?;
    let dmax = max_pairwise_distance(&coordinates);

    Ok(SummaryReport {
        path: path.to_path_buf(),
        atoms: coordinates.len(),
        centroid: cg,
        radius_of_gyration: rg,
        max_distance: dmax,
    })
}

/// Analyze each file in the given order.
///
/// Every path gets its own outcome. If `config.fail_fast` is set, analysis stops after
/// the first failure and the remaining paths get no outcome.
pub fn analyze_all<P: AsRef<Path>>(paths: &[P], config: &AnalysisConfig) -> Vec<FileOutcome> {
    analyze_all_with(paths, config, |_| {})
}

/// Like `analyze_all`, calling `on_outcome` as soon as each file is finished.
pub fn analyze_all_with<P, F>(
    paths: &[P],
    config: &AnalysisConfig,
    mut on_outcome: F,
) -> Vec<FileOutcome>
where
    P: AsRef<Path>,
    F: FnMut(&FileOutcome),
{
    let mut outcomes = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        let result = analyze(path, &config.loader);

        match &result {
            Ok(report) => info!(
                "Analyzed {}: {} atoms",
                path.display(),
                report.atoms
            ),
            Err(e) => error!("Failed to analyze {}: {}", path.display(), e),
        }

        let outcome = FileOutcome {
            path: path.to_path_buf(),
            result,
        };
        on_outcome(&outcome);

        let failed = !outcome.is_ok();
        outcomes.push(outcome);

        if failed && config.fail_fast {
            info!("Stopping after first failure");
            break;
        }
    }

    outcomes
}

/// Write the successful reports as CSV with columns `path, atoms, cg_x, cg_y, cg_z, rg, dmax`.
pub fn write_reports_csv<W: Write>(outcomes: &[FileOutcome], writer: W) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // header is written explicitly so that a run without successes still produces one
    writer
        .write_record(&["path", "atoms", "cg_x", "cg_y", "cg_z", "rg", "dmax"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for report in outcomes.iter().filter_map(|o| o.result.as_ref().ok()) {
        let path = report.path.to_string_lossy();
        writer
            .serialize(ReportRow::new(report, &path))
            .map_err(|e| format!("Failed to write CSV row: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush CSV file: {}", e))?;

    Ok(())
}

/// Save the successful reports to a CSV file
pub fn save_reports_to_csv(outcomes: &[FileOutcome], output_path: &Path) -> Result<(), String> {
    let file = std::fs::File::create(output_path)
        .map_err(|e| format!("Failed to create CSV file {}: {}", output_path.display(), e))?;
    write_reports_csv(outcomes, file)
}
