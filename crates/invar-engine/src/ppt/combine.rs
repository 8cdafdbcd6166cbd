//! Combined exit synthesis.
//!
//! A function with several exit sites gets one extra `EXIT` point whose
//! schema is the variables every exit shares. Each exit keeps an index map
//! that projects its tuples onto the combined schema.

use tracing::{debug, info};

use invar_core::errors::CombineError;
use invar_core::types::{PptId, ValueObservation};

use super::name::PptName;
use super::point::ProgramPoint;
use super::registry::PptRegistry;
use super::slot::VariableSlot;

/// How one exit's tuples line up with its combined exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedRemap {
    /// For the k-th combined variable, its position in the exit's tuple.
    tuple_positions: Vec<usize>,
    /// For each position of the exit's tuple, the combined variable it
    /// feeds, if any.
    slot_map: Vec<Option<usize>>,
}

impl CombinedRemap {
    /// Walk the exit's tuple variables in order, matching them against the
    /// combined variables. Every combined variable must be consumed.
    pub fn build(entry: &str, exit: &ProgramPoint, combined: &[String]) -> Result<Self, CombineError> {
        let mut tuple_positions = Vec::with_capacity(combined.len());
        let mut slot_map = Vec::with_capacity(exit.tuple_arity());
        for slot in exit.slots() {
            let Some(t) = slot.value_index else { continue };
            let next = tuple_positions.len();
            if combined.get(next).is_some_and(|name| *name == slot.name) {
                tuple_positions.push(t);
                slot_map.push(Some(next));
            } else {
                slot_map.push(None);
            }
        }
        if tuple_positions.len() != combined.len() {
            return Err(CombineError::StructuralMismatch {
                entry: entry.to_string(),
                exit: exit.name().to_string(),
                consumed: tuple_positions.len(),
                expected: combined.len(),
                detail: combined
                    .get(tuple_positions.len())
                    .map(|name| format!("'{name}' not found in order"))
                    .unwrap_or_default(),
            });
        }
        Ok(Self {
            tuple_positions,
            slot_map,
        })
    }

    pub fn tuple_positions(&self) -> &[usize] {
        &self.tuple_positions
    }

    pub fn slot_map(&self) -> &[Option<usize>] {
        &self.slot_map
    }

    /// The exit tuple restricted to the combined variables.
    pub fn project(&self, obs: &ValueObservation) -> ValueObservation {
        ValueObservation::new(
            self.tuple_positions
                .iter()
                .filter_map(|&t| obs.values.get(t).cloned())
                .collect(),
            obs.count,
        )
    }
}

/// Tuple-carrying slots present in every sibling, in the first sibling's
/// order. Static constants are excluded.
fn common_slots(siblings: &[&ProgramPoint]) -> Vec<VariableSlot> {
    let Some((first, rest)) = siblings.split_first() else {
        return Vec::new();
    };
    first
        .slots()
        .iter()
        .filter(|slot| slot.value_index.is_some())
        .filter(|slot| {
            rest.iter().all(|sib| {
                sib.slot_by_name(&slot.name)
                    .is_some_and(|s| s.value_index.is_some())
            })
        })
        .enumerate()
        .map(|(k, slot)| VariableSlot {
            index: k,
            value_index: Some(k),
            static_constant: None,
            derivation: None,
            ..slot.clone()
        })
        .collect()
}

/// Synthesize a combined exit for every entry with more than one exit,
/// wiring remaps and control edges. Returns the new points.
pub fn combine_exits(registry: &mut PptRegistry) -> Result<Vec<PptId>, CombineError> {
    let mut entries: Vec<PptId> = registry
        .iter()
        .filter(|p| p.name().is_enter() && p.exits().len() > 1)
        .map(ProgramPoint::id)
        .collect();
    entries.sort_by(|a, b| registry[*a].name().cmp(registry[*b].name()));

    let mut created = Vec::with_capacity(entries.len());
    for entry_id in entries {
        let entry = &registry[entry_id];
        let entry_name = entry.name().to_string();
        let combined_name = entry.name().combined_exit_name();
        if registry.id_of(&combined_name).is_some() {
            return Err(CombineError::NameCollision {
                name: combined_name,
            });
        }

        let exit_ids = entry.exits().to_vec();
        let siblings: Vec<&ProgramPoint> = exit_ids.iter().map(|id| &registry[*id]).collect();
        let slots = common_slots(&siblings);
        let names: Vec<String> = slots.iter().map(|s| s.name.clone()).collect();
        let remaps = siblings
            .iter()
            .map(|sib| CombinedRemap::build(&entry_name, sib, &names))
            .collect::<Result<Vec<_>, _>>()?;
        let controllers: Vec<PptId> = siblings
            .first()
            .map(|sib| sib.controllers().to_vec())
            .unwrap_or_default();

        let mut combined = ProgramPoint::with_slots(PptName::parse(&combined_name), slots, true);
        combined.entry = Some(entry_id);
        combined.controllers = controllers;
        let combined_id = registry.insert(combined);

        for (exit_id, remap) in exit_ids.iter().zip(remaps) {
            let exit = &mut registry[*exit_id];
            exit.combined_exit = Some(combined_id);
            exit.remap = Some(remap);
            exit.controllers.push(combined_id);
        }
        debug!(point = %combined_name, exits = exit_ids.len(), vars = names.len(), "combined exit");
        created.push(combined_id);
    }

    info!(combined = created.len(), "combined exit points");
    Ok(created)
}
