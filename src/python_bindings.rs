use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::errors::AnalysisError;
use crate::loader::LoaderConfig;
use crate::record::MalformedPolicy;
use crate::report::{analyze, analyze_all, AnalysisConfig, SummaryReport};

fn loader_config(max_atoms: usize, malformed: &str) -> PyResult<LoaderConfig> {
    let policy = <MalformedPolicy as clap::ValueEnum>::from_str(malformed, true)
        .map_err(PyErr::new::<pyo3::exceptions::PyValueError, _>)?;
    Ok(LoaderConfig { max_atoms, policy })
}

fn to_py_err(e: AnalysisError) -> PyErr {
    if e.is_io() {
        PyErr::new::<pyo3::exceptions::PyOSError, _>(e.to_string())
    } else {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
    }
}

fn report_to_dict<'py>(py: Python<'py>, report: &SummaryReport) -> PyResult<Bound<'py, PyDict>> {
    let py_dict = PyDict::new_bound(py);
    py_dict.set_item("path", report.path.to_string_lossy().to_string())?;
    py_dict.set_item("atoms", report.atoms)?;
    py_dict.set_item(
        "centroid",
        (report.centroid.x, report.centroid.y, report.centroid.z),
    )?;
    py_dict.set_item("rg", report.radius_of_gyration)?;
    py_dict.set_item("dmax", report.max_distance)?;
    Ok(py_dict)
}

/// Python binding for analyzing a single structure file
#[pyfunction]
#[pyo3(signature = (path, max_atoms=crate::structure::DEFAULT_MAX_ATOMS, malformed="zero"))]
fn analyze_structure(
    py: Python<'_>,
    path: &str,
    max_atoms: usize,
    malformed: &str,
) -> PyResult<PyObject> {
    let config = loader_config(max_atoms, malformed)?;
    let report = analyze(path, &config).map_err(to_py_err)?;
    Ok(report_to_dict(py, &report)?.into())
}

/// Python binding for analyzing several structure files.
/// Failed files are returned as None.
#[pyfunction]
#[pyo3(signature = (paths, max_atoms=crate::structure::DEFAULT_MAX_ATOMS, malformed="zero", fail_fast=false))]
fn analyze_structures(
    py: Python<'_>,
    paths: Vec<String>,
    max_atoms: usize,
    malformed: &str,
    fail_fast: bool,
) -> PyResult<PyObject> {
    let config = AnalysisConfig {
        loader: loader_config(max_atoms, malformed)?,
        fail_fast,
    };

    let py_results = PyList::empty_bound(py);
    for outcome in analyze_all(&paths, &config) {
        match &outcome.result {
            Ok(report) => py_results.append(report_to_dict(py, report)?)?,
            Err(_) => py_results.append(py.None())?,
        }
    }

    Ok(py_results.into())
}

/// Python module definition
#[pymodule]
fn pdb_geometry_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(analyze_structure, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_structures, m)?)?;
    m.add("__doc__", "Geometric summaries of PDB structure files")?;
    Ok(())
}
