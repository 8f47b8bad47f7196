pub mod errors;
pub mod geometry;
pub mod loader;
pub mod record;
pub mod report;
pub mod structure;

#[cfg(feature = "python")]
pub mod python_bindings;

// Re-export commonly used types and traits
pub use errors::{AnalysisError, CapacityError, FieldError, GeometryError};
pub use geometry::{centroid, distance, max_pairwise_distance, radius_of_gyration};
pub use loader::{load_coordinates, load_coordinates_with, LoaderConfig};
pub use record::{Axis, MalformedPolicy, PdbRecordParser, RecordFormat, RecordParser};
pub use report::{
    analyze, analyze_all, analyze_all_with, save_reports_to_csv, write_reports_csv,
    AnalysisConfig, FileOutcome, SummaryReport,
};
pub use structure::{Coordinate, CoordinateSet, DEFAULT_MAX_ATOMS};
