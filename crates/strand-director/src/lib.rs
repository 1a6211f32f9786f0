//! Strand director — cross-runtime virtual dispatch
//!
//! A director lets an object defined in a dynamically-typed embedding runtime
//! act as a subclass of a native base type: native code holding only a
//! base-type handle transparently invokes the dynamic-side overrides.
//!
//! Dispatch for each virtual call:
//! 1. released instance → use-after-release error;
//! 2. no override (or an explicit base call in scope) → native default, or a
//!    no-default error when the contract requires an override;
//! 3. otherwise resolve the bound-method handle (cached after first use),
//!    invoke the dynamic peer, and translate any failure into exactly one
//!    boundary error category.
//!
//! The override probe runs once at construction; the handle cache is
//! populate-once under concurrent first calls; invalidation cannot overlap an
//! in-flight invocation.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use strand_director::variant::{BaseVariant, VariantDirector, VariantSource};
//! use strand_sdk::{ScriptObject, ScriptValue};
//!
//! let mut peer = ScriptObject::new("MyModel");
//! peer.define("nCases", |_args| Ok(ScriptValue::UInt(5)));
//! let peer = Arc::new(peer);
//!
//! let shim = VariantDirector::bind(BaseVariant, &peer);
//! assert_eq!(shim.n_cases().unwrap(), 5);     // dynamic override
//! assert_eq!(shim.n_alts().unwrap(), 0);      // native default
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod contract;
pub mod director;
pub mod error;
pub mod registry;
pub mod variant;

pub use cache::HandleCache;
pub use contract::{ContractEntry, MethodContract, MissingArgument, ParamSpec, ValueKind};
pub use director::{Director, Dispatch};
pub use error::{BridgeError, BridgeResult};
pub use registry::OverrideRegistry;
pub use variant::{variant_contract, BaseVariant, VariantDirector, VariantSource};
