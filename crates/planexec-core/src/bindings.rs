//! Append-only mapping from symbolic to runtime identifiers.
//!
//! The planner names peasants with small integers before any unit exists;
//! the runtime assigns its own ids when units spawn. [`IdentifierMap`]
//! records the association as a list of [`Binding`]s. A binding is never
//! changed or removed once made, and every lookup goes through
//! [`IdentifierMap::resolve`], which fails instead of guessing.
//!
//! # Invariants
//!
//! - A symbolic id is bound to at most one runtime id, forever.
//! - A runtime id is claimed by at most one symbolic id.

use std::collections::{BTreeMap, BTreeSet};

use planexec_types::{SymbolicId, UnitId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Errors from binding or resolving identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// No runtime unit is bound to the symbolic id. The plan and the live
    /// world have diverged.
    #[error("symbolic id {0} has no runtime binding")]
    Unbound(SymbolicId),

    /// The symbolic id is already bound to a different runtime unit.
    #[error("symbolic id {symbolic} is already bound to unit {existing}, refusing to rebind to {requested}")]
    SymbolicTaken {
        /// The symbolic id.
        symbolic: SymbolicId,
        /// The unit it is bound to.
        existing: UnitId,
        /// The unit that was offered.
        requested: UnitId,
    },

    /// The runtime unit is already claimed by another symbolic id.
    #[error("unit {unit} is already bound to symbolic id {existing}")]
    UnitTaken {
        /// The runtime unit.
        unit: UnitId,
        /// The symbolic id that owns it.
        existing: SymbolicId,
    },

    /// No symbolic slot is left to hand out.
    #[error("symbolic id space exhausted")]
    SlotsExhausted,
}

/// One symbolic-to-runtime association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Planner-side id.
    pub symbolic: SymbolicId,
    /// Runtime-side id.
    pub runtime: UnitId,
}

/// Append-only symbolic-to-runtime identifier mapping.
#[derive(Debug, Clone, Default)]
pub struct IdentifierMap {
    /// Bindings in the order they were made.
    bindings: Vec<Binding>,
    /// Lookup by symbolic id.
    by_symbolic: BTreeMap<SymbolicId, UnitId>,
    /// Reverse lookup by runtime id.
    by_unit: BTreeMap<UnitId, SymbolicId>,
    /// Lowest symbolic slot backfill may still consider.
    next_slot: u32,
}

impl IdentifierMap {
    /// An empty mapping whose backfill starts at `first_slot`.
    pub const fn new(first_slot: u32) -> Self {
        Self {
            bindings: Vec::new(),
            by_symbolic: BTreeMap::new(),
            by_unit: BTreeMap::new(),
            next_slot: first_slot,
        }
    }

    /// Bind `symbolic` to `runtime`.
    ///
    /// Returns `Ok(false)` if exactly this binding already exists.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::SymbolicTaken`] or [`BindingError::UnitTaken`]
    /// if either side is already bound elsewhere.
    pub fn bind(&mut self, symbolic: SymbolicId, runtime: UnitId) -> Result<bool, BindingError> {
        if let Some(&existing) = self.by_symbolic.get(&symbolic) {
            if existing == runtime {
                return Ok(false);
            }
            return Err(BindingError::SymbolicTaken {
                symbolic,
                existing,
                requested: runtime,
            });
        }
        if let Some(&existing) = self.by_unit.get(&runtime) {
            return Err(BindingError::UnitTaken {
                unit: runtime,
                existing,
            });
        }
        self.by_symbolic.insert(symbolic, runtime);
        self.by_unit.insert(runtime, symbolic);
        self.bindings.push(Binding { symbolic, runtime });
        Ok(true)
    }

    /// The runtime unit bound to `symbolic`.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::Unbound`] if no binding exists.
    pub fn resolve(&self, symbolic: SymbolicId) -> Result<UnitId, BindingError> {
        self.by_symbolic
            .get(&symbolic)
            .copied()
            .ok_or(BindingError::Unbound(symbolic))
    }

    /// The symbolic id that claimed `unit`, if any.
    pub fn symbolic_for(&self, unit: UnitId) -> Option<SymbolicId> {
        self.by_unit.get(&unit).copied()
    }

    /// Bind every unclaimed unit to the next unclaimed symbolic slot.
    ///
    /// Units are taken in the order given (the runtime's enumeration
    /// order); already-bound units are skipped. Returns the bindings made.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::SlotsExhausted`] if the slot counter would
    /// overflow. Bindings made before the failure are kept.
    pub fn backfill(
        &mut self,
        units: impl IntoIterator<Item = UnitId>,
    ) -> Result<Vec<Binding>, BindingError> {
        let mut added = Vec::new();
        for unit in units {
            if self.by_unit.contains_key(&unit) {
                continue;
            }
            let symbolic = self.claim_slot()?;
            self.bind(symbolic, unit)?;
            debug!(%symbolic, %unit, "backfilled identifier binding");
            added.push(Binding {
                symbolic,
                runtime: unit,
            });
        }
        Ok(added)
    }

    /// Advance past claimed slots and reserve the first free one.
    fn claim_slot(&mut self) -> Result<SymbolicId, BindingError> {
        while self.by_symbolic.contains_key(&SymbolicId::new(self.next_slot)) {
            self.next_slot = self
                .next_slot
                .checked_add(1)
                .ok_or(BindingError::SlotsExhausted)?;
        }
        let slot = SymbolicId::new(self.next_slot);
        self.next_slot = self.next_slot.saturating_add(1);
        Ok(slot)
    }

    /// Bindings in the order they were made.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound yet.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Runtime ids that have been claimed.
    pub fn bound_units(&self) -> BTreeSet<UnitId> {
        self.by_unit.keys().copied().collect()
    }
}
