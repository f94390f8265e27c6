//! A single remembered entity and the salience decay model.
//!
//! # Identity
//!
//! A memory's identity is the identity of the entity it wraps, never its
//! current salience or age. Memories live in the owning [`Mind`]'s arena and
//! are addressed by [`MemoryId`]; cross-references between memories are
//! stored as handle → weight entries rather than direct references, so the
//! cyclic association graph needs no shared ownership.
//!
//! # Decay
//!
//! [`decay`] reproduces an hourly forgetting approximation with two regimes:
//! a steep exponential drop during the first simulated hour of perception
//! ticks and a much shallower tail afterwards. The two branches are not
//! numerically equal at the regime boundary; the jump is part of the
//! reference curve.
//!
//! [`Mind`]: crate::mind::Mind

use std::collections::BTreeMap;
use std::fmt;

use anima_types::EntityId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Perception ticks per simulated hour.
///
/// Human vision refreshes around 60 times a second, which would be 216 000
/// perceives per hour; the default is scaled down for simulation throughput.
pub const DEFAULT_TICKS_PER_HOUR: u64 = 21_600;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors from association lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("no connection from this memory to {0:?}")]
    NoSuchConnection(MemoryId),
}

// ─────────────────────────────────────────────────────────────────────────────
// MemoryId
// ─────────────────────────────────────────────────────────────────────────────

/// Arena handle for a [`Memory`] inside its owning mind.
///
/// Handles are never reused: long-term memory only grows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MemoryId(pub usize);

impl fmt::Display for MemoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory
// ─────────────────────────────────────────────────────────────────────────────

/// One remembered entity: a decaying salience plus weighted outgoing
/// associations to other memories of the same mind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    /// The perceived entity this memory encodes.
    object: EntityId,
    /// Current strength, recomputed from `base_salience` on every sweep.
    salience: f64,
    /// Strength at the last encoding; anchor for the decay curve.
    base_salience: f64,
    /// Ticks since the last encoding reset. Non-decreasing while resident
    /// in long-term memory.
    age: u64,
    /// Outgoing association weights. Repeated co-perception accumulates;
    /// weights are never overwritten or reduced. Ordered for deterministic
    /// graph export.
    connections: BTreeMap<MemoryId, f64>,
}

impl Memory {
    /// Encode `object` with an initial salience.
    pub fn new(object: EntityId, salience: f64) -> Self {
        Self {
            object,
            salience,
            base_salience: salience,
            age: 0,
            connections: BTreeMap::new(),
        }
    }

    /// The entity this memory wraps.
    pub fn object(&self) -> EntityId {
        self.object
    }

    /// Current salience.
    pub fn salience(&self) -> f64 {
        self.salience
    }

    /// Salience anchor set at the last encoding.
    pub fn base_salience(&self) -> f64 {
        self.base_salience
    }

    /// Ticks since the last encoding reset.
    pub fn age(&self) -> u64 {
        self.age
    }

    /// Outgoing associations as `(target, weight)` pairs in handle order.
    pub fn connections(&self) -> impl Iterator<Item = (MemoryId, f64)> + '_ {
        self.connections.iter().map(|(id, w)| (*id, *w))
    }

    /// Strengthen the association to `other` by `strength`.
    ///
    /// The edge is created at zero on first co-perception and accumulated
    /// by addition thereafter; weights never reset.
    pub fn connect(&mut self, other: MemoryId, strength: f64) {
        *self.connections.entry(other).or_insert(0.0) += strength;
    }

    /// Accumulated weight of the edge to `other`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::NoSuchConnection`] when no edge exists.
    pub fn strength_to(&self, other: MemoryId) -> Result<f64, MemoryError> {
        self.connections
            .get(&other)
            .copied()
            .ok_or(MemoryError::NoSuchConnection(other))
    }

    /// Reinforce this memory with a fresh encoding contribution.
    ///
    /// Salience increases by `contribution` and the decay anchor is reset to
    /// the new total. The age clock is deliberately NOT restarted: the decay
    /// anchor jumps while the curve's clock keeps running.
    pub(crate) fn reinforce(&mut self, contribution: f64) {
        self.salience += contribution;
        self.base_salience = self.salience;
    }

    /// Advance the age clock one tick and recompute salience from the anchor.
    pub(crate) fn sweep(&mut self, ticks_per_hour: u64) {
        self.age += 1;
        self.salience = self.base_salience * decay(self.age, ticks_per_hour);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decay curve
// ─────────────────────────────────────────────────────────────────────────────

/// Fraction of a memory's anchor salience remaining after `age_in_ticks`.
///
/// With `h = age_in_ticks / ticks_per_hour`:
///
/// ```text
/// h < 1:  e^(-0.7 · h)          (steep first-hour forgetting)
/// h ≥ 1:  e^(-0.7 · h^(1/6))    (shallow long tail)
/// ```
///
/// Based on an hourly memory-retention approximation; the regime switch at
/// one simulated hour is intentional and the branches do not meet.
pub fn decay(age_in_ticks: u64, ticks_per_hour: u64) -> f64 {
    let hours = age_in_ticks as f64 / ticks_per_hour.max(1) as f64;
    if hours < 1.0 {
        (-0.7 * hours).exp()
    } else {
        (-0.7 * hours.powf(1.0 / 6.0)).exp()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
