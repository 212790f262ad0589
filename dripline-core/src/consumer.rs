//! Alert consumption bound to an alerts exchange.
//!
//! The wire transport sits behind [`AlertHandler`]; the consumer owns the
//! binding keys, decodes deliveries, and dispatches decoded messages.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::{DriplineError, DriplineResult};
use crate::message::AlertMessage;

/// Default exchange the consumer binds to.
pub const DEFAULT_EXCHANGE: &str = "alerts";

/// Receives decoded alert messages.
pub trait AlertHandler: Send {
    fn on_alert(&mut self, message: &AlertMessage) -> DriplineResult<()>;
}

/// Consumer of alert messages from one exchange.
///
/// Deliveries whose routing key matches none of the binding keys are
/// skipped. Decode and handler failures are logged as warnings and
/// propagated to the caller, which decides whether to keep consuming.
pub struct AlertConsumer {
    name: String,
    exchange: String,
    keys: Vec<String>,
    handler: Option<Box<dyn AlertHandler>>,
}

impl AlertConsumer {
    /// Create a consumer bound to `exchange` with the given binding keys.
    /// The consumer name is generated from a v4 uuid.
    pub fn new(exchange: impl Into<String>, keys: Vec<String>) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self::with_name(format!("dripline.alerts-{}", &suffix[..12]), exchange, keys)
    }

    pub fn with_name(
        name: impl Into<String>,
        exchange: impl Into<String>,
        keys: Vec<String>,
    ) -> Self {
        let name = name.into();
        debug!(consumer = %name, "alert consumer initializing");
        Self {
            name,
            exchange: exchange.into(),
            keys,
            handler: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Install the handler that decoded messages are dispatched to.
    pub fn set_handler(&mut self, handler: Box<dyn AlertHandler>) {
        self.handler = Some(handler);
    }

    /// Whether `routing_key` matches any of the binding keys.
    pub fn matches(&self, routing_key: &str) -> bool {
        self.keys.iter().any(|key| topic_matches(key, routing_key))
    }

    /// Process one raw delivery.
    ///
    /// Returns `Ok(false)` when the routing key matches no binding key (the
    /// delivery is skipped), `Ok(true)` after a successful dispatch.
    pub fn handle_delivery(
        &mut self,
        routing_key: &str,
        data: &[u8],
        encoding: &str,
    ) -> DriplineResult<bool> {
        if !self.matches(routing_key) {
            debug!(consumer = %self.name, routing_key, "delivery matches no binding key");
            return Ok(false);
        }
        let message = AlertMessage::from_encoded(data, encoding).map_err(|err| {
            warn!(consumer = %self.name, %err, "failed to decode alert delivery");
            err
        })?;
        let handler = self.handler.as_mut().ok_or_else(|| DriplineError::NoHandler {
            consumer: self.name.clone(),
        })?;
        handler.on_alert(&message).map_err(|err| {
            warn!(consumer = %self.name, %err, "alert handler failed");
            err
        })?;
        Ok(true)
    }
}

impl Default for AlertConsumer {
    fn default() -> Self {
        Self::new(DEFAULT_EXCHANGE, vec!["#".into()])
    }
}

/// AMQP topic matching: keys are `.`-separated words, `*` binds exactly one
/// word, `#` binds zero or more.
fn topic_matches(pattern: &str, routing_key: &str) -> bool {
    fn rec(pattern: &[&str], key: &[&str]) -> bool {
        let Some((head, rest)) = pattern.split_first() else {
            return key.is_empty();
        };
        match *head {
            "#" => (0..=key.len()).any(|skip| rec(rest, &key[skip..])),
            "*" => !key.is_empty() && rec(rest, &key[1..]),
            word => key.first().is_some_and(|k| *k == word) && rec(rest, &key[1..]),
        }
    }
    let pattern: Vec<&str> = pattern.split('.').collect();
    let key: Vec<&str> = routing_key.split('.').collect();
    rec(&pattern, &key)
}
