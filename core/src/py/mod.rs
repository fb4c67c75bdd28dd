use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::bridge;
use crate::error::CoreError;

fn to_py_err(e: CoreError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// aggregate_set_json(reps_json, tempo=None, cfg=None) -> str
#[pyfunction]
#[pyo3(signature = (reps_json, tempo=None, cfg=None))]
fn aggregate_set_json(reps_json: &str, tempo: Option<&str>, cfg: Option<&str>) -> PyResult<String> {
    bridge::aggregate_set_json(reps_json, tempo, cfg).map_err(to_py_err)
}

/// replay_json(samples_json, tempo=None, cfg=None) -> str
#[pyfunction]
#[pyo3(signature = (samples_json, tempo=None, cfg=None))]
fn replay_json(py: Python<'_>, samples_json: &str, tempo: Option<&str>, cfg: Option<&str>) -> PyResult<String> {
    py.allow_threads(|| bridge::replay_json(samples_json, tempo, cfg))
        .map_err(to_py_err)
}

#[pyfunction]
fn counters_text() -> String {
    crate::counters::gather_text()
}

#[pymodule]
fn voltra_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(aggregate_set_json, m)?)?;
    m.add_function(wrap_pyfunction!(replay_json, m)?)?;
    m.add_function(wrap_pyfunction!(counters_text, m)?)?;
    Ok(())
}
