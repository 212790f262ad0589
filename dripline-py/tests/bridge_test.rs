use pyo3::ffi::c_str;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyModule, PyType};

use dripline_core::DriplineError as NativeError;
use dripline_py::error::{self, DriplineError};
use dripline_py::{decode_alert, parse_config};

/// Build a module with the exception class registered, as module init does.
fn bridged_module(py: Python<'_>) -> Bound<'_, PyModule> {
    let m = PyModule::new(py, "_dripline").unwrap();
    error::register(&m).unwrap();
    m
}

#[test]
fn registration_binds_class_under_fixed_name() {
    Python::with_gil(|py| {
        let m = bridged_module(py);
        let cls = m.getattr("DriplineError").unwrap();
        assert!(cls.is_instance_of::<PyType>());
        // The bound name constructs instances of the registered class.
        let instance = cls.call1(("boom",)).unwrap();
        assert!(instance.is_instance(&cls).unwrap());
    });
}

#[test]
fn translated_error_is_the_registered_class() {
    Python::with_gil(|py| {
        let err = error::to_py_err(NativeError::Connection {
            reason: "connection refused".into(),
        });
        assert!(err.is_instance_of::<DriplineError>(py));
    });
}

#[test]
fn translation_preserves_message_verbatim() {
    let natives = [
        NativeError::Connection {
            reason: "connection refused".into(),
        },
        NativeError::ConfigInvalid {
            reason: "broker missing".into(),
        },
        NativeError::UnsupportedEncoding {
            encoding: "application/msgpack".into(),
        },
        NativeError::MessageDecode { reason: "".into() },
    ];
    Python::with_gil(|py| {
        for native in natives {
            let expected = native.to_string();
            let err = error::to_py_err(native);
            assert_eq!(err.value(py).to_string(), expected);
        }
    });
}

#[test]
fn python_catch_block_receives_bridged_error() {
    Python::with_gil(|py| {
        let m = bridged_module(py);
        let globals = PyDict::new(py);
        globals
            .set_item("DriplineError", m.getattr("DriplineError").unwrap())
            .unwrap();
        let err = error::to_py_err(NativeError::Connection {
            reason: "connection refused".into(),
        });
        globals.set_item("exc", err.value(py)).unwrap();
        py.run(
            c_str!(
                r#"
try:
    raise exc
except DriplineError as e:
    caught = str(e)
"#
            ),
            Some(&globals),
            None,
        )
        .unwrap();
        let caught: String = globals
            .get_item("caught")
            .unwrap()
            .unwrap()
            .extract()
            .unwrap();
        assert_eq!(caught, "connection refused");
    });
}

#[test]
fn unrelated_error_types_are_not_intercepted() {
    Python::with_gil(|py| {
        let err = pyo3::exceptions::PyValueError::new_err("other failure");
        assert!(!err.is_instance_of::<DriplineError>(py));

        // A catch block for the bridged class does not trigger; the
        // unrelated error surfaces as itself.
        let m = bridged_module(py);
        let globals = PyDict::new(py);
        globals
            .set_item("DriplineError", m.getattr("DriplineError").unwrap())
            .unwrap();
        py.run(
            c_str!(
                r#"
try:
    try:
        raise ValueError("other failure")
    except DriplineError:
        caught = "bridged"
except ValueError:
    caught = "original"
"#
            ),
            Some(&globals),
            None,
        )
        .unwrap();
        let caught: String = globals
            .get_item("caught")
            .unwrap()
            .unwrap()
            .extract()
            .unwrap();
        assert_eq!(caught, "original");
    });
}

#[test]
fn invalid_config_raises_bridged_error_at_the_boundary() {
    Python::with_gil(|py| {
        let f = wrap_pyfunction!(parse_config, py).unwrap();
        let yaml = "nodename: example\nbroker: localhost\ninstruments:\n- name: a\n  module: m\n- name: a\n  module: m\n";
        let err = f.call1((yaml,)).unwrap_err();
        assert!(err.is_instance_of::<DriplineError>(py));
        assert_eq!(err.value(py).to_string(), "duplicate instrument name: a");
    });
}

#[test]
fn successful_call_raises_nothing() {
    Python::with_gil(|py| {
        let f = wrap_pyfunction!(decode_alert, py).unwrap();
        let data = serde_json::json!({
            "timestamp": "2016-07-12T15:04:05Z",
            "payload": { "from": "disk_status", "values": { "memo": "nominal" } }
        })
        .to_string();
        let result = f
            .call1((data.as_bytes(), "application/json"))
            .unwrap();
        let dict = result.downcast::<PyDict>().unwrap();
        let sender: String = dict
            .get_item("from")
            .unwrap()
            .unwrap()
            .extract()
            .unwrap();
        assert_eq!(sender, "disk_status");
        let values = dict.get_item("values").unwrap().unwrap();
        let memo: String = values.get_item("memo").unwrap().extract().unwrap();
        assert_eq!(memo, "nominal");
    });
}

#[test]
fn unsupported_encoding_raises_bridged_error() {
    Python::with_gil(|py| {
        let f = wrap_pyfunction!(decode_alert, py).unwrap();
        let err = f
            .call1((b"{}".as_slice(), "application/msgpack"))
            .unwrap_err();
        assert!(err.is_instance_of::<DriplineError>(py));
        assert_eq!(
            err.value(py).to_string(),
            "unsupported message encoding: application/msgpack"
        );
    });
}
