//! The variant-model base type and its director shim
//!
//! This is the shipped example of a directed base type: a cohort/variant data
//! source with case counts and allele lookups. The wire surface (names,
//! signatures, default-availability) is the boundary contract callers depend
//! on; the domain semantics live entirely in implementations of
//! [`VariantSource`].
//!
//! Slots 0 and 1 are the mutating/read-only `ask_dna` pair: one wire name,
//! two distinct resolvable call targets, so the cache carries a slot for
//! each.

use std::sync::Arc;

use once_cell::sync::Lazy;

use strand_sdk::{FromScript, PeerObject, ScriptValue, ToScript};

use crate::contract::{ContractEntry, MethodContract, ValueKind};
use crate::director::{Director, Dispatch};
use crate::error::{BridgeError, BridgeResult};

/// Stable slot indices for the variant contract.
///
/// These are array offsets into the override registry and handle cache and
/// must never be reordered.
pub mod slots {
    /// `ask_dna`, mutating variant
    pub const ASK_DNA_MUT: usize = 0;
    /// `ask_dna`, read-only variant
    pub const ASK_DNA: usize = 1;
    /// `nCases`
    pub const N_CASES: usize = 2;
    /// `nAlts`
    pub const N_ALTS: usize = 3;
    /// `alternative_names`
    pub const ALTERNATIVE_NAMES: usize = 4;
    /// `alternative_codes`
    pub const ALTERNATIVE_CODES: usize = 5;
    /// `alternative_name`
    pub const ALTERNATIVE_NAME: usize = 6;
    /// `alternative_code`
    pub const ALTERNATIVE_CODE: usize = 7;
    /// `check_ca`
    pub const CHECK_CA: usize = 8;
    /// `check_co`
    pub const CHECK_CO: usize = 9;
    /// `variables_ca`
    pub const VARIABLES_CA: usize = 10;
    /// `variables_co`
    pub const VARIABLES_CO: usize = 11;
    /// Number of distinct resolvable call targets
    pub const SLOT_COUNT: usize = 12;
}

static CONTRACT: Lazy<Arc<MethodContract>> = Lazy::new(|| {
    Arc::new(MethodContract::new(vec![
        ContractEntry::new(slots::ASK_DNA_MUT, "ask_dna", ValueKind::Any).param_default(
            "c",
            ValueKind::Int,
            ScriptValue::Int(0),
        ),
        ContractEntry::new(slots::ASK_DNA, "ask_dna", ValueKind::Any).param_default(
            "c",
            ValueKind::Int,
            ScriptValue::Int(0),
        ),
        ContractEntry::new(slots::N_CASES, "nCases", ValueKind::UInt),
        ContractEntry::new(slots::N_ALTS, "nAlts", ValueKind::UInt),
        ContractEntry::new(slots::ALTERNATIVE_NAMES, "alternative_names", ValueKind::StrList),
        ContractEntry::new(slots::ALTERNATIVE_CODES, "alternative_codes", ValueKind::IntList),
        ContractEntry::new(slots::ALTERNATIVE_NAME, "alternative_name", ValueKind::Str)
            .param("code", ValueKind::Int),
        ContractEntry::new(slots::ALTERNATIVE_CODE, "alternative_code", ValueKind::Int)
            .param("name", ValueKind::Str),
        ContractEntry::new(slots::CHECK_CA, "check_ca", ValueKind::Bool)
            .param("column", ValueKind::Str),
        ContractEntry::new(slots::CHECK_CO, "check_co", ValueKind::Bool)
            .param("column", ValueKind::Str),
        ContractEntry::new(slots::VARIABLES_CA, "variables_ca", ValueKind::StrList),
        ContractEntry::new(slots::VARIABLES_CO, "variables_co", ValueKind::StrList),
    ]))
});

/// The shared contract table for [`VariantSource`].
pub fn variant_contract() -> Arc<MethodContract> {
    Arc::clone(&CONTRACT)
}

/// The native base type: a cohort/variant data source.
///
/// Provided method bodies are the native default implementations: an empty
/// source with no cases, no alternatives, and no variables. Native
/// subclasses override what they support; dynamic subclasses override
/// through a [`VariantDirector`].
pub trait VariantSource {
    /// Per-case allele availability summary (mutating variant). The result
    /// shape belongs to the host library; the bridge passes it through.
    fn ask_dna_mut(&mut self, c: i64) -> BridgeResult<ScriptValue> {
        let _ = c;
        Ok(ScriptValue::Null)
    }

    /// Per-case allele availability summary (read-only variant)
    fn ask_dna(&self, c: i64) -> BridgeResult<ScriptValue> {
        let _ = c;
        Ok(ScriptValue::Null)
    }

    /// Number of cases in the source
    fn n_cases(&self) -> BridgeResult<u32> {
        Ok(0)
    }

    /// Number of alternatives in the source
    fn n_alts(&self) -> BridgeResult<u32> {
        Ok(0)
    }

    /// Names of all alternatives, in code order
    fn alternative_names(&self) -> BridgeResult<Vec<String>> {
        Ok(Vec::new())
    }

    /// Codes of all alternatives
    fn alternative_codes(&self) -> BridgeResult<Vec<i64>> {
        Ok(Vec::new())
    }

    /// Name of the alternative with the given code
    fn alternative_name(&self, code: i64) -> BridgeResult<String> {
        let _ = code;
        Ok(String::new())
    }

    /// Code of the alternative with the given name
    fn alternative_code(&self, name: &str) -> BridgeResult<i64> {
        let _ = name;
        Ok(0)
    }

    /// Does a case-alternative data column with this name exist?
    fn check_ca(&self, column: &str) -> BridgeResult<bool> {
        let _ = column;
        Ok(false)
    }

    /// Does a case-only data column with this name exist?
    fn check_co(&self, column: &str) -> BridgeResult<bool> {
        let _ = column;
        Ok(false)
    }

    /// Names of the case-alternative variables
    fn variables_ca(&self) -> BridgeResult<Vec<String>> {
        Ok(Vec::new())
    }

    /// Names of the case-only variables
    fn variables_co(&self) -> BridgeResult<Vec<String>> {
        Ok(Vec::new())
    }
}

/// An empty native base: every method uses the trait defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct BaseVariant;

impl VariantSource for BaseVariant {}

/// Director shim for [`VariantSource`].
///
/// Implements the base trait by consulting the director per slot: calls fall
/// through to the wrapped native base `B` unless the dynamic peer overrode
/// the method, in which case the cached handle is invoked and its result
/// converted to the declared return type.
pub struct VariantDirector<B> {
    base: B,
    director: Director,
}

impl<B: VariantSource> VariantDirector<B> {
    /// Bind a shim over `base` to a freshly constructed dynamic peer,
    /// using the shipped contract.
    pub fn bind<P: PeerObject + 'static>(base: B, peer: &Arc<P>) -> Self {
        Self::bind_with_contract(base, peer, variant_contract())
    }

    /// Bind with an explicit contract (e.g. one marking methods
    /// override-required).
    pub fn bind_with_contract<P: PeerObject + 'static>(
        base: B,
        peer: &Arc<P>,
        contract: Arc<MethodContract>,
    ) -> Self {
        VariantDirector {
            base,
            director: Director::bind(contract, peer),
        }
    }

    /// The dispatch engine behind this shim
    pub fn director(&self) -> &Director {
        &self.director
    }

    /// Begin destruction: invalidate the handle cache and refuse further
    /// calls.
    pub fn release(&self) {
        self.director.release();
    }

    fn convert<T: FromScript>(method: &'static str, value: ScriptValue) -> BridgeResult<T> {
        T::from_script(value).map_err(|err| BridgeError::marshaling(method, err))
    }
}

impl<B: VariantSource> VariantSource for VariantDirector<B> {
    fn ask_dna_mut(&mut self, c: i64) -> BridgeResult<ScriptValue> {
        match self.director.dispatch(slots::ASK_DNA_MUT, &[c.to_script()])? {
            Dispatch::Native => self.base.ask_dna_mut(c),
            Dispatch::Value(v) => Ok(v),
        }
    }

    fn ask_dna(&self, c: i64) -> BridgeResult<ScriptValue> {
        match self.director.dispatch(slots::ASK_DNA, &[c.to_script()])? {
            Dispatch::Native => self.base.ask_dna(c),
            Dispatch::Value(v) => Ok(v),
        }
    }

    fn n_cases(&self) -> BridgeResult<u32> {
        match self.director.dispatch(slots::N_CASES, &[])? {
            Dispatch::Native => self.base.n_cases(),
            Dispatch::Value(v) => Self::convert("nCases", v),
        }
    }

    fn n_alts(&self) -> BridgeResult<u32> {
        match self.director.dispatch(slots::N_ALTS, &[])? {
            Dispatch::Native => self.base.n_alts(),
            Dispatch::Value(v) => Self::convert("nAlts", v),
        }
    }

    fn alternative_names(&self) -> BridgeResult<Vec<String>> {
        match self.director.dispatch(slots::ALTERNATIVE_NAMES, &[])? {
            Dispatch::Native => self.base.alternative_names(),
            Dispatch::Value(v) => Self::convert("alternative_names", v),
        }
    }

    fn alternative_codes(&self) -> BridgeResult<Vec<i64>> {
        match self.director.dispatch(slots::ALTERNATIVE_CODES, &[])? {
            Dispatch::Native => self.base.alternative_codes(),
            Dispatch::Value(v) => Self::convert("alternative_codes", v),
        }
    }

    fn alternative_name(&self, code: i64) -> BridgeResult<String> {
        match self
            .director
            .dispatch(slots::ALTERNATIVE_NAME, &[code.to_script()])?
        {
            Dispatch::Native => self.base.alternative_name(code),
            Dispatch::Value(v) => Self::convert("alternative_name", v),
        }
    }

    fn alternative_code(&self, name: &str) -> BridgeResult<i64> {
        match self
            .director
            .dispatch(slots::ALTERNATIVE_CODE, &[name.to_script()])?
        {
            Dispatch::Native => self.base.alternative_code(name),
            Dispatch::Value(v) => Self::convert("alternative_code", v),
        }
    }

    fn check_ca(&self, column: &str) -> BridgeResult<bool> {
        match self.director.dispatch(slots::CHECK_CA, &[column.to_script()])? {
            Dispatch::Native => self.base.check_ca(column),
            Dispatch::Value(v) => Self::convert("check_ca", v),
        }
    }

    fn check_co(&self, column: &str) -> BridgeResult<bool> {
        match self.director.dispatch(slots::CHECK_CO, &[column.to_script()])? {
            Dispatch::Native => self.base.check_co(column),
            Dispatch::Value(v) => Self::convert("check_co", v),
        }
    }

    fn variables_ca(&self) -> BridgeResult<Vec<String>> {
        match self.director.dispatch(slots::VARIABLES_CA, &[])? {
            Dispatch::Native => self.base.variables_ca(),
            Dispatch::Value(v) => Self::convert("variables_ca", v),
        }
    }

    fn variables_co(&self) -> BridgeResult<Vec<String>> {
        match self.director.dispatch(slots::VARIABLES_CO, &[])? {
            Dispatch::Native => self.base.variables_co(),
            Dispatch::Value(v) => Self::convert("variables_co", v),
        }
    }
}

impl<B> std::fmt::Debug for VariantDirector<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantDirector")
            .field("director", &self.director)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_shape() {
        let contract = variant_contract();
        assert_eq!(contract.len(), slots::SLOT_COUNT);

        // The ask_dna pair shares one wire name across two slots
        assert_eq!(contract.entry(slots::ASK_DNA_MUT).name(), "ask_dna");
        assert_eq!(contract.entry(slots::ASK_DNA).name(), "ask_dna");
        assert_eq!(contract.index_of("ask_dna"), Some(slots::ASK_DNA_MUT));

        assert_eq!(contract.entry(slots::N_CASES).name(), "nCases");
        assert_eq!(contract.entry(slots::N_ALTS).name(), "nAlts");
        assert_eq!(contract.entry(slots::CHECK_CA).name(), "check_ca");
        assert_eq!(contract.entry(slots::VARIABLES_CO).name(), "variables_co");

        // Every shipped method has a usable native default
        assert!(contract.entries().iter().all(ContractEntry::has_native_default));
    }

    #[test]
    fn test_ask_dna_declares_defaulted_argument() {
        let contract = variant_contract();
        for slot in [slots::ASK_DNA_MUT, slots::ASK_DNA] {
            let entry = contract.entry(slot);
            assert_eq!(entry.param_count(), 1);
            assert_eq!(entry.params()[0].default(), Some(&ScriptValue::Int(0)));
        }
    }

    #[test]
    fn test_base_variant_defaults() {
        let base = BaseVariant;
        assert_eq!(base.n_cases().unwrap(), 0);
        assert_eq!(base.n_alts().unwrap(), 0);
        assert!(base.alternative_names().unwrap().is_empty());
        assert!(!base.check_ca("price").unwrap());
        assert_eq!(base.ask_dna(0).unwrap(), ScriptValue::Null);
    }
}
