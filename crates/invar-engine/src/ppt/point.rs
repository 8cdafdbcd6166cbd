//! Program points: a variable schema, the tuples buffered for it, and the
//! candidate pool inferred from them.

use tracing::{debug, warn};

use invar_core::config::InferenceConfig;
use invar_core::errors::{EngineError, ObservationError};
use invar_core::types::{
    InvariantId, ModBit, PointDecl, PptId, SmallVec3, Value, ValueObservation,
};

use super::combine::CombinedRemap;
use super::name::PptName;
use super::slot::VariableSlot;
use crate::derive::{self, derive_slots};
use crate::invariants::{CandidateFactory, DiscardInfo, Invariant, JustificationScorer};

/// Settings shared by every point during processing.
#[derive(Debug, Clone, Copy)]
pub struct ProcessContext {
    pub scorer: JustificationScorer,
    pub factory: CandidateFactory,
    pub derive_variables: bool,
    pub ignore_comparability: bool,
}

impl ProcessContext {
    pub fn from_config(config: &InferenceConfig) -> Self {
        Self {
            scorer: JustificationScorer::from_config(config),
            factory: CandidateFactory::from_config(config),
            derive_variables: config.effective_derive_variables(),
            ignore_comparability: config.effective_ignore_comparability(),
        }
    }
}

impl Default for ProcessContext {
    fn default() -> Self {
        Self::from_config(&InferenceConfig::default())
    }
}

/// Counters from processing one point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    pub samples: u64,
    pub created: usize,
    pub falsified: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum ConstantState {
    Unseen,
    Constant(Value),
    Varies,
}

#[derive(Debug)]
pub struct ProgramPoint {
    pub(crate) id: PptId,
    name: PptName,
    slots: Vec<VariableSlot>,
    tuple_arity: usize,
    pub(crate) entry: Option<PptId>,
    pub(crate) exits: Vec<PptId>,
    pub(crate) combined_exit: Option<PptId>,
    pub(crate) remap: Option<CombinedRemap>,
    pub(crate) controllers: Vec<PptId>,
    combined: bool,
    buffer: Vec<ValueObservation>,
    num_samples: u64,
    invariants: Vec<Invariant>,
    pub(crate) discarded: Vec<DiscardInfo>,
    constants: Vec<ConstantState>,
    next_invariant: usize,
}

impl ProgramPoint {
    /// Build a point from its declaration. Variables matched by `omit_var`
    /// keep their tuple position but are never related.
    pub fn from_decl(decl: &PointDecl, omit_var: impl Fn(&str) -> bool) -> Self {
        let mut next_value = 0;
        let slots = decl
            .vars
            .iter()
            .enumerate()
            .map(|(index, var)| {
                let value_index = if var.is_static_constant() {
                    None
                } else {
                    next_value += 1;
                    Some(next_value - 1)
                };
                VariableSlot::from_decl(index, var, value_index, omit_var(&var.name))
            })
            .collect();
        Self::with_slots(PptName::parse(&decl.name), slots, false)
    }

    pub(crate) fn with_slots(name: PptName, slots: Vec<VariableSlot>, combined: bool) -> Self {
        let tuple_arity = slots.iter().filter(|s| s.value_index.is_some()).count();
        Self {
            id: PptId::new(0),
            name,
            slots,
            tuple_arity,
            entry: None,
            exits: Vec::new(),
            combined_exit: None,
            remap: None,
            controllers: Vec::new(),
            combined,
            buffer: Vec::new(),
            num_samples: 0,
            invariants: Vec::new(),
            discarded: Vec::new(),
            constants: Vec::new(),
            next_invariant: 0,
        }
    }

    pub fn id(&self) -> PptId {
        self.id
    }

    pub fn name(&self) -> &PptName {
        &self.name
    }

    pub fn slots(&self) -> &[VariableSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&VariableSlot> {
        self.slots.get(index)
    }

    pub fn slot_by_name(&self, name: &str) -> Option<&VariableSlot> {
        self.slots.iter().find(|s| s.name == name)
    }

    pub fn tuple_arity(&self) -> usize {
        self.tuple_arity
    }

    /// Entry point of the function, for exit and combined exit points.
    pub fn entry(&self) -> Option<PptId> {
        self.entry
    }

    /// Numbered exits, for entry points.
    pub fn exits(&self) -> &[PptId] {
        &self.exits
    }

    pub fn combined_exit(&self) -> Option<PptId> {
        self.combined_exit
    }

    /// Alignment of this exit's tuples to its combined exit.
    pub fn remap(&self) -> Option<&CombinedRemap> {
        self.remap.as_ref()
    }

    pub fn controllers(&self) -> &[PptId] {
        &self.controllers
    }

    pub fn is_combined(&self) -> bool {
        self.combined
    }

    pub fn num_samples(&self) -> u64 {
        self.num_samples
    }

    pub fn has_samples(&self) -> bool {
        self.num_samples > 0
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Live candidates, in creation order.
    pub fn invariants(&self) -> &[Invariant] {
        &self.invariants
    }

    pub fn invariant(&self, id: InvariantId) -> Option<&Invariant> {
        self.invariants.iter().find(|inv| inv.id() == id)
    }

    pub fn invariant_mut(&mut self, id: InvariantId) -> Option<&mut Invariant> {
        self.invariants.iter_mut().find(|inv| inv.id() == id)
    }

    /// Every discard recorded at this point so far.
    pub fn discarded(&self) -> &[DiscardInfo] {
        &self.discarded
    }

    /// Value of a slot that never varied over the processed samples.
    pub fn dynamic_constant(&self, slot: usize) -> Option<&Value> {
        match self.constants.get(slot) {
            Some(ConstantState::Constant(v)) => Some(v),
            _ => None,
        }
    }

    /// Statically or dynamically constant.
    pub fn is_constant_slot(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(VariableSlot::is_static_constant)
            || self.dynamic_constant(slot).is_some()
    }

    /// Reserve the next candidate id.
    pub(crate) fn next_invariant_id(&mut self) -> InvariantId {
        let id = InvariantId::new(self.next_invariant);
        self.next_invariant += 1;
        id
    }

    /// Add a candidate built outside the point (implications).
    pub(crate) fn adopt(&mut self, invariant: Invariant) {
        self.invariants.push(invariant);
    }

    /// Coerce a raw tuple to this point's representation types. Values that
    /// cannot be coerced become missing and are reported; a tuple of the
    /// wrong arity is rejected.
    pub fn coerce(
        &self,
        mut obs: ValueObservation,
    ) -> Result<(ValueObservation, Vec<ObservationError>), ObservationError> {
        if obs.len() != self.tuple_arity {
            return Err(ObservationError::ArityMismatch {
                point: self.name.to_string(),
                found: obs.len(),
                expected: self.tuple_arity,
            });
        }
        let mut errors = Vec::new();
        for slot in &self.slots {
            let Some(t) = slot.value_index else { continue };
            let (value, modbit) = &mut obs.values[t];
            if modbit.is_missing() {
                continue;
            }
            match slot.rep_type.coerce(value) {
                Some(coerced) => *value = coerced,
                None => {
                    warn!(
                        point = %self.name,
                        variable = %slot.name,
                        value = %value,
                        expected = %slot.rep_type,
                        "malformed value treated as missing"
                    );
                    errors.push(ObservationError::Malformed {
                        point: self.name.to_string(),
                        variable: slot.name.clone(),
                        value: value.to_string(),
                        expected: slot.rep_type.to_string(),
                    });
                    *value = Value::Null;
                    *modbit = ModBit::Missing;
                }
            }
        }
        Ok((obs, errors))
    }

    /// Queue an already coerced tuple.
    pub(crate) fn push(&mut self, obs: ValueObservation) {
        self.buffer.push(obs);
    }

    /// Run the buffered tuples through the candidate pool and classify the
    /// survivors. The buffer is released whether or not processing succeeds.
    pub fn process(&mut self, ctx: &ProcessContext) -> Result<ProcessStats, EngineError> {
        let buffer = std::mem::take(&mut self.buffer);
        let mut stats = ProcessStats::default();
        if buffer.is_empty() {
            return Ok(stats);
        }

        if ctx.derive_variables && !self.slots.iter().any(VariableSlot::is_derived) {
            let derived = derive_slots(&self.slots, ctx.ignore_comparability);
            self.slots.extend(derived);
        }
        if self.constants.len() < self.slots.len() {
            self.constants.resize(self.slots.len(), ConstantState::Unseen);
        }
        if self.next_invariant == 0 {
            for (vars, kind) in ctx.factory.candidates(&self.slots) {
                let id = self.next_invariant_id();
                self.invariants.push(Invariant::new(id, vars, kind));
            }
            stats.created = self.invariants.len();
        }

        for obs in &buffer {
            let row = self.row(obs);
            self.track_constants(&row);
            stats.falsified += self.feed(&row, obs.count)?;
            stats.samples += u64::from(obs.count);
        }
        self.num_samples += stats.samples;

        for inv in &mut self.invariants {
            inv.justify(&ctx.scorer)?;
        }

        debug!(
            point = %self.name,
            samples = stats.samples,
            created = stats.created,
            falsified = stats.falsified,
            alive = self.invariants.len(),
            "processed point"
        );
        Ok(stats)
    }

    /// Values for every slot: tuple values, static constants, then derived
    /// values computed left to right.
    fn row(&self, obs: &ValueObservation) -> Vec<(Value, ModBit)> {
        let mut row: Vec<(Value, ModBit)> = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            let entry = if let Some(constant) = &slot.static_constant {
                (constant.clone(), ModBit::Unmodified)
            } else if let Some(t) = slot.value_index {
                obs.values.get(t).cloned().unwrap_or_else(derive::missing)
            } else if let Some(derivation) = &slot.derivation {
                derivation.compute(&row)
            } else {
                derive::missing()
            };
            row.push(entry);
        }
        row
    }

    fn track_constants(&mut self, row: &[(Value, ModBit)]) {
        for (state, (value, modbit)) in self.constants.iter_mut().zip(row) {
            if modbit.is_missing() {
                continue;
            }
            match state {
                ConstantState::Unseen => *state = ConstantState::Constant(value.clone()),
                ConstantState::Constant(seen) if seen != value => *state = ConstantState::Varies,
                _ => {}
            }
        }
    }

    /// Feed one row to every live candidate whose variables are all present.
    /// Returns how many were falsified.
    fn feed(&mut self, row: &[(Value, ModBit)], count: u32) -> Result<usize, EngineError> {
        let mut falsified = 0;
        for inv in &mut self.invariants {
            if inv.vars().iter().any(|v| row[v.slot].1.is_missing()) {
                continue;
            }
            let values: SmallVec3<&Value> = inv.vars().iter().map(|v| &row[v.slot].0).collect();
            if let Some(info) = inv.observe(&values, count)? {
                self.discarded.push(info);
                falsified += 1;
            }
        }
        if falsified > 0 {
            self.invariants.retain(|inv| !inv.is_destroyed());
        }
        Ok(falsified)
    }
}
