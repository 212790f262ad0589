//! # dripline-py
//!
//! PyO3 bindings exposing the dripline core to Python.
//!
//! - `error.rs` — exception bridge for the native `DriplineError`
//! - `conversions.rs` — JSON payload -> Python object conversion
//! - module surface: `parse_config`, `decode_alert`

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList, PyModule};

use dripline_core::{AlertMessage, NodeConfig};

pub mod conversions;
pub mod error;

/// Parse and validate a node configuration from a YAML document.
///
/// Raises `DriplineError` on any validation failure.
#[pyfunction]
pub fn parse_config<'py>(py: Python<'py>, yaml: &str) -> PyResult<Bound<'py, PyDict>> {
    let config = NodeConfig::from_yaml(yaml).map_err(error::to_py_err)?;
    let dict = PyDict::new(py);
    dict.set_item("nodename", config.nodename())?;
    dict.set_item("broker", config.broker())?;
    let instruments = PyDict::new(py);
    for instrument in config.instruments() {
        let entry = PyDict::new(py);
        entry.set_item("module", &instrument.module)?;
        let endpoints = PyList::empty(py);
        for endpoint in &instrument.endpoints {
            let ep = PyDict::new(py);
            ep.set_item("name", &endpoint.name)?;
            ep.set_item("module", &endpoint.module)?;
            endpoints.append(ep)?;
        }
        entry.set_item("endpoints", endpoints)?;
        instruments.set_item(&instrument.name, entry)?;
    }
    dict.set_item("instruments", instruments)?;
    Ok(dict)
}

/// Decode one alert delivery given its content encoding.
///
/// Raises `DriplineError` on an unsupported encoding or a malformed payload.
#[pyfunction]
#[pyo3(signature = (data, encoding = "application/json"))]
pub fn decode_alert<'py>(
    py: Python<'py>,
    data: &[u8],
    encoding: &str,
) -> PyResult<Bound<'py, PyDict>> {
    let message = AlertMessage::from_encoded(data, encoding).map_err(error::to_py_err)?;
    let dict = PyDict::new(py);
    dict.set_item("timestamp", &message.timestamp)?;
    dict.set_item("from", &message.payload.sender)?;
    let values = PyDict::new(py);
    if let Some(value) = &message.payload.values.value_raw {
        values.set_item("value_raw", conversions::json_to_py(py, value)?)?;
    }
    if let Some(value) = &message.payload.values.value_cal {
        values.set_item("value_cal", conversions::json_to_py(py, value)?)?;
    }
    if let Some(value) = &message.payload.values.memo {
        values.set_item("memo", conversions::json_to_py(py, value)?)?;
    }
    dict.set_item("values", values)?;
    Ok(dict)
}

#[pymodule]
fn _dripline(m: &Bound<'_, PyModule>) -> PyResult<()> {
    error::register(m)?;
    m.add_function(wrap_pyfunction!(parse_config, m)?)?;
    m.add_function(wrap_pyfunction!(decode_alert, m)?)?;
    Ok(())
}
