//! Error types for the peer-side ABI

/// Result type for peer method invocations
pub type PeerResult<T> = Result<T, PeerError>;

/// An error raised by a dynamic-side method.
///
/// Both fields survive the boundary crossing verbatim: the director wraps
/// them into its propagated-error category without rewording either one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{type_name}: {message}")]
pub struct PeerError {
    /// Name of the error type as the dynamic runtime reports it
    pub type_name: String,
    /// Original error message
    pub message: String,
}

impl PeerError {
    /// Create a peer error with an explicit type name
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        PeerError {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create a peer error with the runtime's generic error type
    pub fn raised(message: impl Into<String>) -> Self {
        PeerError::new("Error", message)
    }
}

/// Type mismatch while converting a boundary value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, got {got}")]
pub struct ConversionError {
    /// Expected type name
    pub expected: &'static str,
    /// Actual type name
    pub got: &'static str,
}
