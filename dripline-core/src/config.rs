//! In-memory representation of a dripline node configuration.
//!
//! A node configuration is parsed from a YAML document describing the node
//! name, the broker it talks to, and a graph of instruments, each with zero
//! or more endpoints. Validation happens at parse time:
//!
//! * names within a category must be unique — no two instruments and no two
//!   endpoints anywhere on the node may share a name;
//! * no object name may contain a period (names are routing-key segments);
//! * `nodename` and `broker` are required.
//!
//! A [`NodeConfig`] has no association with the network whatsoever: it does
//! not check that a broker is reachable at the configured address. The graph
//! is guaranteed well-formed, the network configuration is not.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{DriplineError, DriplineResult};

/// One endpoint attached to an instrument.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    pub name: String,
    pub module: String,
}

/// One instrument attached to the node.
#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentConfig {
    pub name: String,
    pub module: String,
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    nodename: String,
    broker: String,
    #[serde(default)]
    instruments: Vec<InstrumentConfig>,
}

/// Validated configuration of a dripline node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    nodename: String,
    broker: String,
    instruments: HashMap<String, InstrumentConfig>,
}

impl NodeConfig {
    /// Parse and validate a node configuration from a YAML document.
    pub fn from_yaml(yaml: &str) -> DriplineResult<Self> {
        let raw: RawConfig =
            serde_yaml::from_str(yaml).map_err(|err| DriplineError::ConfigInvalid {
                reason: err.to_string(),
            })?;

        check_name("node", &raw.nodename)?;

        let mut instruments = HashMap::with_capacity(raw.instruments.len());
        let mut endpoint_names: Vec<&str> = Vec::new();
        for instrument in &raw.instruments {
            check_name("instrument", &instrument.name)?;
            if instruments.contains_key(&instrument.name) {
                return Err(DriplineError::DuplicateName {
                    kind: "instrument".into(),
                    name: instrument.name.clone(),
                });
            }
            for endpoint in &instrument.endpoints {
                check_name("endpoint", &endpoint.name)?;
                // Endpoints are addressed node-wide, so the uniqueness check
                // spans instruments.
                if endpoint_names.contains(&endpoint.name.as_str()) {
                    return Err(DriplineError::DuplicateName {
                        kind: "endpoint".into(),
                        name: endpoint.name.clone(),
                    });
                }
                endpoint_names.push(&endpoint.name);
            }
            instruments.insert(instrument.name.clone(), instrument.clone());
        }

        Ok(Self {
            nodename: raw.nodename,
            broker: raw.broker,
            instruments,
        })
    }

    /// Read and parse a node configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> DriplineResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|err| DriplineError::ConfigInvalid {
            reason: format!("couldn't open config file {}: {err}", path.display()),
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn nodename(&self) -> &str {
        &self.nodename
    }

    /// Network address of the AMQP broker this node talks to.
    pub fn broker(&self) -> &str {
        &self.broker
    }

    /// Number of instruments attached to the node, exclusive of the node
    /// itself. Zero for a configuration with no instruments.
    pub fn instrument_count(&self) -> usize {
        self.instruments.len()
    }

    /// Look up one instrument by name.
    pub fn instrument(&self, name: &str) -> Option<&InstrumentConfig> {
        self.instruments.get(name)
    }

    pub fn instruments(&self) -> impl Iterator<Item = &InstrumentConfig> {
        self.instruments.values()
    }
}

fn check_name(kind: &str, name: &str) -> DriplineResult<()> {
    if name.is_empty() {
        return Err(DriplineError::ConfigInvalid {
            reason: format!("{kind} name is empty"),
        });
    }
    if name.contains('.') {
        return Err(DriplineError::InvalidName { name: name.into() });
    }
    Ok(())
}
