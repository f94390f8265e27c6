//! 2-D grid world with placement, distance, and perception queries.
//!
//! # Key types
//!
//! | Type | Role |
//! |------|------|
//! | [`SpatialWorld`] | Grid of cells; registry of every live entity.       |
//! | [`Percept`]      | `(entity, effective_distance)` pair from a query.   |
//!
//! Two invariants hold at all times:
//!
//! 1. Every entity listed in a cell has a matching coordinate entry, and
//!    every coordinate entry points at a cell that lists the entity.
//! 2. Entities are never moved or destroyed by this crate; placement and
//!    sound attachment are the only mutations.
//!
//! # Perception channels
//!
//! [`SpatialWorld::nearby`] models two channels differently on purpose:
//! sight applies a hard radius cutoff at true Euclidean distance, while
//! hearing includes every sound regardless of radius at an effective
//! distance of `distance / volume`. Louder sounds therefore read as nearer
//! and remain perceivable from arbitrarily far away.
//!
//! # Example
//!
//! ```rust
//! use anima_world::SpatialWorld;
//! use anima_types::EntityKind;
//!
//! let mut world = SpatialWorld::new(5, 5);
//! let a = world.create_entity(0, 0, EntityKind::Person).unwrap();
//! let b = world.create_entity(0, 3, EntityKind::Person).unwrap();
//!
//! assert_eq!(world.distance_between(a, b).unwrap(), 3.0);
//! // b is beyond a radius of 2 ...
//! assert!(!world.nearby_from(a, 2.0).iter().any(|p| p.entity == b));
//! // ... but inside a radius of 4.
//! assert!(world.nearby_from(a, 4.0).iter().any(|p| p.entity == b));
//! ```

use std::collections::{BTreeMap, HashMap};

use anima_types::{Coords, EntityId, EntityKind, Percept, WorldError};
use tracing::{debug, warn};

// ─────────────────────────────────────────────────────────────────────────────
// SpatialWorld
// ─────────────────────────────────────────────────────────────────────────────

/// A `width × height` grid of discrete cells holding entity handles.
///
/// Cells are stored sparsely and in coordinate order, so perception scans
/// visit occupied cells deterministically: with a seeded driver RNG the whole
/// simulation replays bit-for-bit.
pub struct SpatialWorld {
    width: i32,
    height: i32,
    /// Occupied cells only. A cell may hold one person plus any sounds
    /// co-located with it.
    cells: BTreeMap<Coords, Vec<EntityId>>,
    /// Authoritative entity → coordinate map, mirror of `cells`.
    positions: HashMap<EntityId, Coords>,
    kinds: HashMap<EntityId, EntityKind>,
    next_id: u64,
}

impl SpatialWorld {
    /// Create an empty world of the given dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            cells: BTreeMap::new(),
            positions: HashMap::new(),
            kinds: HashMap::new(),
            next_id: 0,
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of registered entities (persons and sounds).
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when no entity has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Register a new entity at `(x, y)` and return its handle.
    ///
    /// # Errors
    ///
    /// - [`WorldError::OutOfBounds`] when the coordinates fall outside the
    ///   grid; nothing is created.
    /// - [`WorldError::CellOccupied`] when the target cell already holds an
    ///   entity of the same primary kind; nothing is created.
    pub fn create_entity(
        &mut self,
        x: i32,
        y: i32,
        kind: EntityKind,
    ) -> Result<EntityId, WorldError> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return Err(WorldError::OutOfBounds { x, y });
        }
        let coords = Coords::new(x, y);
        let occupied_by_same_kind = self
            .cells
            .get(&coords)
            .is_some_and(|ids| {
                ids.iter()
                    .any(|id| self.kinds[id].is_sound() == kind.is_sound())
            });
        if occupied_by_same_kind {
            return Err(WorldError::CellOccupied { x, y });
        }

        let id = self.register(coords, kind);
        debug!(%id, %coords, ?kind, "entity created");
        Ok(id)
    }

    /// Place a new sound in the same cell as `source` and return its handle.
    ///
    /// Sounds are passive: they never block placement and any number may
    /// share a cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownEntity`] when `source` is not registered;
    /// no sound is created.
    pub fn attach_sound(
        &mut self,
        source: EntityId,
        volume: f64,
    ) -> Result<EntityId, WorldError> {
        let coords = *self
            .positions
            .get(&source)
            .ok_or(WorldError::UnknownEntity(source))?;
        let id = self.register(coords, EntityKind::Sound { volume });
        debug!(%id, %coords, volume, "sound attached");
        Ok(id)
    }

    /// Registered coordinates of an entity, if any.
    pub fn coords_of(&self, entity: EntityId) -> Option<Coords> {
        self.positions.get(&entity).copied()
    }

    /// True when the entity is registered.
    pub fn contains(&self, entity: EntityId) -> bool {
        self.positions.contains_key(&entity)
    }

    /// Euclidean distance between two registered entities.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownEntity`] when either entity is not
    /// registered; no state is touched.
    pub fn distance_between(&self, a: EntityId, b: EntityId) -> Result<f64, WorldError> {
        let pa = self
            .positions
            .get(&a)
            .ok_or(WorldError::UnknownEntity(a))?;
        let pb = self
            .positions
            .get(&b)
            .ok_or(WorldError::UnknownEntity(b))?;
        Ok(pa.distance_to(*pb))
    }

    /// Scan every occupied cell and return the entities perceivable from
    /// `origin`.
    ///
    /// Ordinary entities are included only when their true distance is at
    /// most `radius`. Sounds are always included, at an effective distance
    /// of `distance / volume`; hearing has no hard cutoff.
    pub fn nearby(&self, origin: Coords, radius: f64) -> Vec<Percept> {
        let mut found = Vec::new();
        for (coords, ids) in &self.cells {
            let dist = origin.distance_to(*coords);
            for id in ids {
                match self.kinds[id] {
                    EntityKind::Sound { volume } => {
                        found.push(Percept::new(*id, dist / volume));
                    }
                    _ if dist <= radius => {
                        found.push(Percept::new(*id, dist));
                    }
                    _ => {}
                }
            }
        }
        found
    }

    /// Perception query relative to a registered entity.
    ///
    /// Returns an empty list when the entity is unknown: perception queries
    /// are tolerated defensively rather than failed, so a mind probing for a
    /// vanished anchor simply perceives nothing.
    pub fn nearby_from(&self, entity: EntityId, radius: f64) -> Vec<Percept> {
        match self.positions.get(&entity) {
            Some(coords) => self.nearby(*coords, radius),
            None => {
                warn!(%entity, "perception query for unregistered entity");
                Vec::new()
            }
        }
    }

    /// ASCII rendering of the grid: `x` for occupied cells, `·` otherwise.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cells.contains_key(&Coords::new(x, y)) {
                    out.push('x');
                } else {
                    out.push('·');
                }
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }

    fn register(&mut self, coords: Coords, kind: EntityKind) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.cells.entry(coords).or_default().push(id);
        self.positions.insert(id, coords);
        self.kinds.insert(id, kind);
        id
    }

    /// Verify the bidirectional cell/coordinate invariant. Test support.
    #[cfg(test)]
    fn is_consistent(&self) -> bool {
        let cells_ok = self.cells.iter().all(|(coords, ids)| {
            ids.iter().all(|id| self.positions.get(id) == Some(coords))
        });
        let positions_ok = self.positions.iter().all(|(id, coords)| {
            self.cells
                .get(coords)
                .is_some_and(|ids| ids.contains(id))
        });
        cells_ok && positions_ok
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
