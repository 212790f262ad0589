//! Alert message schema and decoding.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{DriplineError, DriplineResult};

/// Content encoding for JSON-serialized deliveries.
pub const ENCODING_JSON: &str = "application/json";

/// Measurement values carried by an alert payload. All fields are optional;
/// a logger records whichever are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertValues {
    pub value_raw: Option<Value>,
    pub value_cal: Option<Value>,
    pub memo: Option<Value>,
}

/// Payload of an alert message.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertPayload {
    /// Name of the endpoint the alert originated from.
    #[serde(rename = "from")]
    pub sender: String,
    #[serde(default)]
    pub values: AlertValues,
}

/// One alert message as delivered on the alerts exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertMessage {
    pub timestamp: String,
    pub payload: AlertPayload,
}

impl AlertMessage {
    /// Decode a raw broker delivery given its content encoding.
    pub fn from_encoded(data: &[u8], encoding: &str) -> DriplineResult<Self> {
        match encoding {
            ENCODING_JSON => {
                serde_json::from_slice(data).map_err(|err| DriplineError::MessageDecode {
                    reason: err.to_string(),
                })
            }
            other => Err(DriplineError::UnsupportedEncoding {
                encoding: other.into(),
            }),
        }
    }
}
