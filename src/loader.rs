use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::errors::AnalysisError;
use crate::record::{MalformedPolicy, PdbRecordParser, RecordParser};
use crate::structure::{CoordinateSet, DEFAULT_MAX_ATOMS};

/// Settings for reading coordinates from a structure file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Maximum number of coordinates accepted from one file
    pub max_atoms: usize,
    /// Handling of coordinate fields that are not numbers
    pub policy: MalformedPolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_atoms: DEFAULT_MAX_ATOMS,
            policy: MalformedPolicy::default(),
        }
    }
}

/// Read all PDB `ATOM` coordinates of a file.
///
/// # Arguments
/// * `path` - Path to the structure file
/// * `config` - Capacity and malformed-number policy
///
/// # Returns
/// Coordinates in file line order
pub fn load_coordinates(
    path: impl AsRef<Path>,
    config: &LoaderConfig,
) -> Result<CoordinateSet, AnalysisError> {
    let parser = PdbRecordParser::new(config.policy);
    load_coordinates_with(path, &parser, config.max_atoms)
}

/// Read all record coordinates of a file using the given parser.
///
/// Lines the parser rejects are dropped if its policy is `Skip` and fail the file otherwise.
pub fn load_coordinates_with<P: RecordParser + ?Sized>(
    path: impl AsRef<Path>,
    parser: &P,
    max_atoms: usize,
) -> Result<CoordinateSet, AnalysisError> {
    let path = path.as_ref();
    // parsers without a policy always fail the file on a field error
    let skip_malformed = parser.malformed_policy() == Some(MalformedPolicy::Skip);

    let file = File::open(path).map_err(|e| AnalysisError::FileOpen {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!("Opened structure file {}", path.display());

    let mut reader = BufReader::new(file);
    let mut coordinates = CoordinateSet::new(max_atoms);
    let mut buffer = Vec::new();
    let mut line_number = 0;

    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(|e| AnalysisError::Read {
                path: path.to_path_buf(),
                line: line_number + 1,
                source: e,
            })?;
        if read == 0 {
            break;
        }
        line_number += 1;

        if buffer.ends_with(b"\n") {
            buffer.pop();
            if buffer.ends_with(b"\r") {
                buffer.pop();
            }
        }

        // bytes that are not UTF-8 only matter to the parser if they sit in a record
        let line = String::from_utf8_lossy(&buffer);

        let coordinate = match parser.extract(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(e) if skip_malformed => {
                warn!(
                    "Skipping line {} of {}: {}",
                    line_number,
                    path.display(),
                    e
                );
                continue;
            }
            Err(e) => {
                return Err(AnalysisError::MalformedNumber {
                    path: path.to_path_buf(),
                    line: line_number,
                    axis: e.axis,
                    text: e.text,
                })
            }
        };

        trace!(
            "Line {}: ({}, {}, {})",
            line_number,
            coordinate.x,
            coordinate.y,
            coordinate.z
        );

        coordinates
            .push(coordinate)
            .map_err(|e| AnalysisError::CapacityExceeded {
                path: path.to_path_buf(),
                capacity: e.capacity,
            })?;
    }

    debug!(
        "Read {} coordinates from {}",
        coordinates.len(),
        path.display()
    );

    Ok(coordinates)
}
