//! Exception bridge for the native dripline error type.
//!
//! One Python exception class, registered once at module import; translation
//! copies only the diagnostic message across the boundary. Errors of any
//! other kind are produced by their own machinery and propagate untouched.

use pyo3::exceptions::PyException;
use pyo3::prelude::*;
use pyo3::types::PyModule;

pyo3::create_exception!(
    _dripline,
    DriplineError,
    PyException,
    "Error raised by the native dripline library."
);

/// Bind the exception class under its fixed name on `m`.
///
/// Called exactly once during module initialization. Registering the class a
/// second time on the same module is a caller error and is not defended.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("DriplineError", m.py().get_type::<DriplineError>())
}

/// Translate a native dripline error into the registered Python exception.
pub fn to_py_err(err: dripline_core::DriplineError) -> PyErr {
    DriplineError::new_err(err.to_string())
}
