//! Boundary error taxonomy and translation
//!
//! Every failure crossing the boundary is surfaced as exactly one of these
//! categories at the native call site. The director never retries, never
//! logs, and never discards an error; handling is the caller's job.

use strand_sdk::{ConversionError, PeerError};

/// Result type for director dispatch and the typed shim surface
pub type BridgeResult<T> = Result<T, BridgeError>;

/// A failure crossing the native/dynamic boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BridgeError {
    /// The contract requires an override that the dynamic subclass did not
    /// supply, and the base type has no usable default. Fatal to the call,
    /// not to the process.
    #[error("no override supplied for '{method}' and no native default exists")]
    NoDefaultImplementation {
        /// Wire name of the method
        method: &'static str,
    },

    /// Name lookup failed at invoke time despite a positive override flag:
    /// the peer was mutated after construction or already torn down. Signals
    /// a lifecycle or consistency bug in the embedding code.
    #[error("method '{method}' could not be resolved on the dynamic peer: {reason}")]
    MethodResolution {
        /// Wire name of the method
        method: &'static str,
        /// What went wrong during resolution
        reason: String,
    },

    /// The dynamic-side result did not match the declared boundary type.
    #[error("value for '{method}' could not be marshaled: expected {expected}, got {got}")]
    Marshaling {
        /// Wire name of the method
        method: &'static str,
        /// Declared type name
        expected: &'static str,
        /// Actual type name
        got: &'static str,
    },

    /// Dispatch was handed fewer arguments than the contract requires, and
    /// the missing parameter declares no default to pad from.
    #[error("required argument '{param}' of '{method}' was not supplied")]
    MissingArgument {
        /// Wire name of the method
        method: &'static str,
        /// Name of the unsatisfied parameter
        param: &'static str,
    },

    /// The dynamic-side method raised. Message and originating type name are
    /// preserved verbatim in the payload.
    #[error("dynamic peer raised {type_name}: {message}")]
    PropagatedPeer {
        /// Error type name as the dynamic runtime reported it
        type_name: String,
        /// Original error message, unmodified
        message: String,
    },

    /// Invocation attempted after `release()`. A lifecycle contract violation
    /// by the embedding code, not a transient failure.
    #[error("method invoked after the director was released")]
    UseAfterRelease,
}

impl BridgeError {
    /// Contract requires an override for `method`; none was supplied.
    pub fn no_default(method: &'static str) -> Self {
        BridgeError::NoDefaultImplementation { method }
    }

    /// Name lookup for `method` failed on the dynamic peer.
    pub fn resolution(method: &'static str, reason: impl Into<String>) -> Self {
        BridgeError::MethodResolution {
            method,
            reason: reason.into(),
        }
    }

    /// A boundary value for `method` failed conversion.
    pub fn marshaling(method: &'static str, err: ConversionError) -> Self {
        BridgeError::Marshaling {
            method,
            expected: err.expected,
            got: err.got,
        }
    }

    /// A required argument of `method` was left unsupplied.
    pub fn missing_argument(method: &'static str, param: &'static str) -> Self {
        BridgeError::MissingArgument { method, param }
    }
}

impl From<PeerError> for BridgeError {
    fn from(err: PeerError) -> Self {
        BridgeError::PropagatedPeer {
            type_name: err.type_name,
            message: err.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peer_error_payload_preserved_verbatim() {
        let raised = PeerError::new("KeyError", "unknown code");
        let translated = BridgeError::from(raised);
        match translated {
            BridgeError::PropagatedPeer {
                type_name,
                message,
            } => {
                assert_eq!(type_name, "KeyError");
                assert_eq!(message, "unknown code");
            }
            other => panic!("wrong category: {other}"),
        }
    }

    #[test]
    fn test_marshaling_carries_both_type_names() {
        let err = BridgeError::marshaling(
            "nCases",
            ConversionError {
                expected: "unsigned integer",
                got: "string",
            },
        );
        assert_eq!(
            err.to_string(),
            "value for 'nCases' could not be marshaled: expected unsigned integer, got string"
        );
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(
            BridgeError::no_default("check_ca").to_string(),
            "no override supplied for 'check_ca' and no native default exists"
        );
        assert_eq!(
            BridgeError::missing_argument("check_ca", "column").to_string(),
            "required argument 'column' of 'check_ca' was not supplied"
        );
        assert_eq!(
            BridgeError::UseAfterRelease.to_string(),
            "method invoked after the director was released"
        );
    }
}
