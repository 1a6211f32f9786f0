//! Method contracts — the fixed virtual-method table of a base type
//!
//! A contract is generated once per base type and is read-only at run time.
//! Every instance of that base type shares the same table (`Arc`), and the
//! entry index doubles as the stable slot offset for the override registry
//! and the handle cache.

use strand_sdk::ScriptValue;

/// Declared boundary type of a parameter or return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Opaque domain value; passed through unconverted
    Any,
    /// Boolean
    Bool,
    /// 64-bit signed integer
    Int,
    /// 32-bit unsigned integer
    UInt,
    /// 64-bit float
    Float,
    /// String
    Str,
    /// Sequence of 64-bit integers
    IntList,
    /// Sequence of strings
    StrList,
}

impl ValueKind {
    /// Human-readable type name, matching `ScriptValue::type_name`
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Any => "any",
            ValueKind::Bool => "boolean",
            ValueKind::Int => "integer",
            ValueKind::UInt => "unsigned integer",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
            ValueKind::IntList => "integer sequence",
            ValueKind::StrList => "string sequence",
        }
    }
}

/// A required parameter with no declared default was left unsupplied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("required argument '{param}' was not supplied and declares no default")]
pub struct MissingArgument {
    /// Name of the unsatisfied parameter
    pub param: &'static str,
}

/// A declared parameter, optionally carrying a contract-level default value.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    name: &'static str,
    kind: ValueKind,
    default: Option<ScriptValue>,
}

impl ParamSpec {
    /// Parameter name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared parameter type
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Contract-level default, if the signature declares one
    pub fn default(&self) -> Option<&ScriptValue> {
        self.default.as_ref()
    }
}

/// One virtual method in a base type's contract.
#[derive(Debug, Clone)]
pub struct ContractEntry {
    index: usize,
    name: &'static str,
    params: Vec<ParamSpec>,
    ret: ValueKind,
    has_native_default: bool,
}

impl ContractEntry {
    /// Create an entry with no parameters and a usable native default.
    pub fn new(index: usize, name: &'static str, ret: ValueKind) -> Self {
        ContractEntry {
            index,
            name,
            params: Vec::new(),
            ret,
            has_native_default: true,
        }
    }

    /// Append a required parameter.
    pub fn param(mut self, name: &'static str, kind: ValueKind) -> Self {
        self.params.push(ParamSpec {
            name,
            kind,
            default: None,
        });
        self
    }

    /// Append a parameter with a contract-level default value.
    pub fn param_default(
        mut self,
        name: &'static str,
        kind: ValueKind,
        default: ScriptValue,
    ) -> Self {
        self.params.push(ParamSpec {
            name,
            kind,
            default: Some(default),
        });
        self
    }

    /// Mark the method as having no usable native default: the dynamic
    /// subclass must supply an override or every call fails.
    pub fn require_override(mut self) -> Self {
        self.has_native_default = false;
        self
    }

    /// Stable slot index (array offset into registry and cache)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Wire name resolved on the dynamic peer
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared parameters
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Number of declared parameters
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Declared return type
    pub fn ret(&self) -> ValueKind {
        self.ret
    }

    /// Whether the base type supplies a usable default implementation
    pub fn has_native_default(&self) -> bool {
        self.has_native_default
    }

    /// Extend a short argument list with declared parameter defaults.
    ///
    /// Fails when a missing trailing parameter has no default.
    pub fn pad_args(&self, args: &[ScriptValue]) -> Result<Vec<ScriptValue>, MissingArgument> {
        let mut padded = Vec::with_capacity(self.params.len());
        padded.extend_from_slice(args);
        for spec in self.params.get(args.len()..).unwrap_or(&[]) {
            match &spec.default {
                Some(value) => padded.push(value.clone()),
                None => return Err(MissingArgument { param: spec.name }),
            }
        }
        Ok(padded)
    }
}

/// The full virtual-method table of one base type.
///
/// Immutable after construction; shared across all director instances of the
/// base type. Entry order is the slot order.
#[derive(Debug)]
pub struct MethodContract {
    entries: Vec<ContractEntry>,
}

impl MethodContract {
    /// Build a contract from an index-ordered entry list.
    ///
    /// # Panics
    /// Panics if entry indices are not exactly `0..n` in order; slot
    /// indices are array offsets and must be dense.
    pub fn new(entries: Vec<ContractEntry>) -> Self {
        for (position, entry) in entries.iter().enumerate() {
            assert_eq!(
                entry.index, position,
                "contract entry '{}' declared at slot {} but listed at position {}",
                entry.name, entry.index, position
            );
        }
        MethodContract { entries }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the contract declares no methods
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a slot index.
    ///
    /// # Panics
    /// Panics on an out-of-range index; slot indices come from the same
    /// contract and are fixed at compile time for generated shims.
    pub fn entry(&self, index: usize) -> &ContractEntry {
        &self.entries[index]
    }

    /// Entry at a slot index, if in range
    pub fn get(&self, index: usize) -> Option<&ContractEntry> {
        self.entries.get(index)
    }

    /// All entries in slot order
    pub fn entries(&self) -> &[ContractEntry] {
        &self.entries
    }

    /// First slot carrying the given wire name.
    ///
    /// Const/non-const pairs share one wire name across two slots; this
    /// returns the lower slot.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }
}
