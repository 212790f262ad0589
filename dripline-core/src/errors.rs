//! Error types shared across the dripline core.

/// Errors raised by the native dripline core.
///
/// The `Display` output is the diagnostic message that crosses the Python
/// boundary, so every variant carries a self-contained message.
#[derive(Debug, thiserror::Error)]
pub enum DriplineError {
    /// Broker connection failures pass the transport's message through
    /// unchanged.
    #[error("{reason}")]
    Connection { reason: String },

    #[error("invalid node configuration: {reason}")]
    ConfigInvalid { reason: String },

    #[error("duplicate {kind} name: {name}")]
    DuplicateName { kind: String, name: String },

    #[error("object name contains a period: {name}")]
    InvalidName { name: String },

    #[error("unsupported message encoding: {encoding}")]
    UnsupportedEncoding { encoding: String },

    #[error("failed to decode alert message: {reason}")]
    MessageDecode { reason: String },

    #[error("no alert handler installed for consumer {consumer}")]
    NoHandler { consumer: String },
}

/// Convenience alias used throughout the workspace.
pub type DriplineResult<T> = Result<T, DriplineError>;
