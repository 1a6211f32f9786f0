//! Override registry — which contract methods the dynamic peer supplies
//!
//! The probe runs exactly once, when a director is constructed. Dispatch then
//! reads a fixed boolean table instead of reflecting on the peer per call;
//! mutating the peer's method set afterwards never changes dispatch for that
//! instance.

use strand_sdk::PeerObject;

use crate::contract::MethodContract;

/// Per-instance record of which contract methods are overridden on the
/// dynamic side. Write-once at construction, read-many.
#[derive(Debug)]
pub struct OverrideRegistry {
    flags: Box<[bool]>,
}

impl OverrideRegistry {
    /// Probe the peer's declared members against the contract.
    ///
    /// `PeerObject::declares` answers for the dynamic subclass's own
    /// members only, so a shim-exported wrapper never counts as an override.
    pub fn probe(peer: &dyn PeerObject, contract: &MethodContract) -> Self {
        let flags = contract
            .entries()
            .iter()
            .map(|entry| peer.declares(entry.name()))
            .collect();
        OverrideRegistry { flags }
    }

    /// Is the method at `index` overridden on the dynamic side? O(1), never
    /// fails; out-of-range reads answer `false`.
    pub fn is_overridden(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Number of contract slots
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether the registry covers no slots
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// How many slots are overridden
    pub fn overridden_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{ContractEntry, ValueKind};
    use strand_sdk::{ScriptObject, ScriptValue};

    fn contract() -> MethodContract {
        MethodContract::new(vec![
            ContractEntry::new(0, "nCases", ValueKind::UInt),
            ContractEntry::new(1, "nAlts", ValueKind::UInt),
            ContractEntry::new(2, "variables_ca", ValueKind::StrList),
        ])
    }

    #[test]
    fn test_probe_marks_declared_methods_only() {
        let mut peer = ScriptObject::new("Partial");
        peer.define("nCases", |_| Ok(ScriptValue::UInt(5)));

        let registry = OverrideRegistry::probe(&peer, &contract());
        assert_eq!(registry.len(), 3);
        assert!(registry.is_overridden(0));
        assert!(!registry.is_overridden(1));
        assert!(!registry.is_overridden(2));
        assert_eq!(registry.overridden_count(), 1);
    }

    #[test]
    fn test_out_of_range_reads_are_false() {
        let peer = ScriptObject::new("Empty");
        let registry = OverrideRegistry::probe(&peer, &contract());
        assert!(!registry.is_overridden(99));
    }

    #[test]
    fn test_probe_is_a_snapshot() {
        // Methods added after the probe are invisible to this instance.
        let mut peer = ScriptObject::new("Mutated");
        let registry = OverrideRegistry::probe(&peer, &contract());
        peer.define("nAlts", |_| Ok(ScriptValue::UInt(3)));
        assert!(!registry.is_overridden(1));
    }
}
