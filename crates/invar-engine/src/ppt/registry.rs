//! Arena of program points and the relations between them.

use std::ops::{Index, IndexMut};

use tracing::{debug, trace};

use invar_core::config::PointSelector;
use invar_core::errors::{ConfigError, ObservationError};
use invar_core::types::{FxHashMap, FxHashSet, PointDecl, PptId, ValueObservation};

use super::point::ProgramPoint;

/// All declared points, addressed by [`PptId`].
#[derive(Debug, Default)]
pub struct PptRegistry {
    points: Vec<ProgramPoint>,
    by_name: FxHashMap<String, PptId>,
    /// Points dropped by the selector; their trace records are ignored.
    omitted: FxHashSet<String>,
}

impl PptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declared point unless the selector drops it.
    pub fn declare(&mut self, decl: &PointDecl, selector: &PointSelector) -> Result<Option<PptId>, ConfigError> {
        if self.by_name.contains_key(&decl.name) || self.is_omitted(&decl.name) {
            return Err(ConfigError::DuplicateRegistration {
                kind: "program point".to_string(),
                name: decl.name.clone(),
            });
        }
        if !selector.keeps_point(&decl.name) {
            trace!(point = %decl.name, "point omitted");
            self.omitted.insert(decl.name.clone());
            return Ok(None);
        }
        let point = ProgramPoint::from_decl(decl, |var| !selector.keeps_var(var));
        Ok(Some(self.insert(point)))
    }

    pub(crate) fn insert(&mut self, mut point: ProgramPoint) -> PptId {
        let id = PptId::new(self.points.len());
        point.id = id;
        self.by_name.insert(point.name().to_string(), id);
        self.points.push(point);
        id
    }

    /// Wire entry/exit siblings and control edges between declared points.
    /// Numbered exits hang off the entry of the same function; method
    /// points are controlled by their class's `OBJECT` point, which is in
    /// turn controlled by the `CLASS` point.
    pub fn link(&mut self) {
        for index in 0..self.points.len() {
            let name = self.points[index].name().clone();
            let id = self.points[index].id();

            if name.is_numbered_exit() {
                if let Some(entry) = self.id_of(&name.enter_name()) {
                    self.points[index].entry = Some(entry);
                    self.points[entry.index()].exits.push(id);
                }
            }

            let controller = if name.is_object() {
                name.class_point_name()
            } else if matches!(name.tag(), super::PointTag::Class) {
                None
            } else {
                name.object_name()
            };
            if let Some(controller) = controller.and_then(|n| self.id_of(&n)) {
                if controller != id {
                    self.points[index].controllers.push(controller);
                }
            }
        }

        let order: Vec<PptId> = self.sorted_ids();
        let rank: FxHashMap<PptId, usize> = order.iter().enumerate().map(|(r, id)| (*id, r)).collect();
        for point in &mut self.points {
            point.exits.sort_by_key(|id| rank.get(id).copied().unwrap_or(usize::MAX));
        }
        debug!(points = self.points.len(), "linked program points");
    }

    pub fn id_of(&self, name: &str) -> Option<PptId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: PptId) -> Option<&ProgramPoint> {
        self.points.get(id.index())
    }

    pub fn by_name(&self, name: &str) -> Option<&ProgramPoint> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProgramPoint> {
        self.points.iter()
    }

    pub fn points_mut(&mut self) -> &mut [ProgramPoint] {
        &mut self.points
    }

    pub fn is_omitted(&self, name: &str) -> bool {
        self.omitted.contains(name)
    }

    /// Ids in processing order: by function, then CLASS, OBJECT, ENTER,
    /// EXIT, numbered exits.
    pub fn sorted_ids(&self) -> Vec<PptId> {
        let mut ids: Vec<PptId> = self.points.iter().map(ProgramPoint::id).collect();
        ids.sort_by(|a, b| self[*a].name().cmp(self[*b].name()));
        ids
    }

    /// Route one trace record to its point, and to the point's combined
    /// exit when it has one. Records for omitted points are dropped.
    /// Returns the recoverable problems found in the record.
    pub fn record(&mut self, name: &str, obs: ValueObservation) -> Result<Vec<ObservationError>, ConfigError> {
        let Some(id) = self.id_of(name) else {
            if self.is_omitted(name) {
                return Ok(Vec::new());
            }
            return Err(ConfigError::UndeclaredPoint {
                name: name.to_string(),
            });
        };
        let point = &mut self.points[id.index()];
        let (coerced, mut errors) = match point.coerce(obs) {
            Ok(ok) => ok,
            Err(err) => {
                tracing::warn!(point = %name, error = %err, "observation skipped");
                return Ok(vec![err]);
            }
        };
        let forward = point
            .combined_exit
            .zip(point.remap.as_ref())
            .map(|(combined, remap)| (combined, remap.project(&coerced)));
        point.push(coerced);

        if let Some((combined, projected)) = forward {
            match self.points[combined.index()].coerce(projected) {
                Ok((projected, more)) => {
                    errors.extend(more);
                    self.points[combined.index()].push(projected);
                }
                Err(err) => errors.push(err),
            }
        }
        Ok(errors)
    }
}

impl Index<PptId> for PptRegistry {
    type Output = ProgramPoint;

    fn index(&self, id: PptId) -> &ProgramPoint {
        &self.points[id.index()]
    }
}

impl IndexMut<PptId> for PptRegistry {
    fn index_mut(&mut self, id: PptId) -> &mut ProgramPoint {
        &mut self.points[id.index()]
    }
}
