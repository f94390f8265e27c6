use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable handle for a tracked entity, assigned by the world registry when
/// the entity is created.
///
/// Identity throughout the simulation is keyed by this handle rather than by
/// reference identity: two memories of the same entity compare equal because
/// they hold the same `EntityId`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Primary kind of a tracked entity.
///
/// A grid cell holds at most one entity of each primary kind-class: one
/// person, plus any number of sounds attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// An agent that perceives and remembers.
    Person,
    /// A passive sound source. Perception divides true distance by `volume`,
    /// so louder sounds carry farther.
    Sound { volume: f64 },
}

impl EntityKind {
    /// True for the `Sound` variant.
    pub fn is_sound(&self) -> bool {
        matches!(self, EntityKind::Sound { .. })
    }
}

/// Integer cell coordinates in the world grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coords {
    pub x: i32,
    pub y: i32,
}

impl Coords {
    /// Create a new coordinate pair.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another cell.
    pub fn distance_to(&self, other: Coords) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A perceived entity together with its effective distance from the observer.
///
/// For ordinary entities the distance is the true Euclidean distance; for
/// sounds it is the volume-attenuated distance computed by the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percept {
    pub entity: EntityId,
    pub distance: f64,
}

impl Percept {
    pub fn new(entity: EntityId, distance: f64) -> Self {
        Self { entity, distance }
    }
}

/// Articulatory parameters emitted by an agent toward the external
/// vocal-tract synthesizer.
///
/// The simulation core never interprets these beyond carrying them across
/// the synthesizer seam; the resulting utterance is opaque except for its
/// volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Articulation {
    /// Tongue body position along the tract, normalised to `[0, 1]`.
    pub tongue_position: f64,
    /// Tongue body diameter, normalised to `[0, 1]`.
    pub tongue_diameter: f64,
    /// Constriction position along the tract, normalised to `[0, 1]`.
    pub constriction_position: f64,
    /// Constriction diameter, normalised to `[0, 1]`.
    pub constriction_diameter: f64,
    /// Utterance length in seconds.
    pub duration_s: f64,
    /// Loudness drive in `[0, 1]`.
    pub intensity: f64,
    /// Glottal tenseness in `[0, 1]`.
    pub tenseness: f64,
    /// Glottal source frequency in Hz.
    pub frequency_hz: f64,
}

/// Errors from spatial placement and lookup.
///
/// Every failure is local and non-fatal: the caller may retry with different
/// coordinates or skip the tick.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldError {
    #[error("coordinates ({x},{y}) are outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    #[error("cell ({x},{y}) already holds an entity of the same kind")]
    CellOccupied { x: i32, y: i32 },

    #[error("entity {0} is not registered in the world")]
    UnknownEntity(EntityId),
}
