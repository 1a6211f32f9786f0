//! Strand SDK - Lightweight SDK for implementing dynamic peers
//!
//! This crate provides the minimal types and traits an embedding layer needs
//! to present a dynamically-typed subclass instance to a Strand director,
//! without depending on the director machinery itself.
//!
//! # Example
//!
//! ```ignore
//! use strand_sdk::{PeerError, ScriptObject, ScriptValue};
//!
//! let mut peer = ScriptObject::new("MyModel");
//! peer.define("nCases", |_args| Ok(ScriptValue::UInt(5)));
//! peer.define("alternative_code", |args| {
//!     Err(PeerError::new("KeyError", "unknown code"))
//! });
//! ```

#![warn(missing_docs)]

pub mod convert;
pub mod error;
pub mod peer;
pub mod value;

pub use convert::{FromScript, ToScript};
pub use error::{ConversionError, PeerError, PeerResult};
pub use peer::{PeerMethod, PeerObject, ScriptObject};
pub use value::ScriptValue;
