use std::path::PathBuf;

use thiserror::Error;

use crate::record::Axis;

/// Returned when a coordinate is pushed into a full `CoordinateSet`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("coordinate set is full (capacity {capacity})")]
pub struct CapacityError {
    pub capacity: usize,
}

/// A coordinate field of a record line that could not be read as a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not parse {axis} coordinate from `{text}`")]
pub struct FieldError {
    pub axis: Axis,
    pub text: String,
}

/// Errors of the geometry calculations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("cannot compute statistics of an empty coordinate set")]
    Empty,
}

/// Errors that can occur when analyzing one structure file.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Unable to open file `{}`: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not read line {line} of file `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("File `{}` contains more than {capacity} atoms.", .path.display())]
    CapacityExceeded { path: PathBuf, capacity: usize },
    #[error("File `{}` contains 0 atoms, no statistics computed.", .path.display())]
    EmptyStructure { path: PathBuf },
    #[error("Could not parse {axis} coordinate `{text}` on line {line} of file `{}`.", .path.display())]
    MalformedNumber {
        path: PathBuf,
        line: usize,
        axis: Axis,
        text: String,
    },
}

impl AnalysisError {
    /// Path of the file the error belongs to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            AnalysisError::FileOpen { path, .. }
            | AnalysisError::Read { path, .. }
            | AnalysisError::CapacityExceeded { path, .. }
            | AnalysisError::EmptyStructure { path }
            | AnalysisError::MalformedNumber { path, .. } => path,
        }
    }

    /// Whether the error comes from the filesystem rather than from the file contents.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            AnalysisError::FileOpen { .. } | AnalysisError::Read { .. }
        )
    }
}
