//! An agent's memory stores, attentional focus, and the per-tick sweep.
//!
//! # Model
//!
//! A [`Mind`] owns an arena of [`Memory`] records. The arena IS long-term
//! memory: entries are created on first encoding, mutated in place forever
//! after, and never evicted — a memory at vanishing salience is still a
//! memory. Short-term memory is a derived subset of arena handles,
//! recomputed every tick from the salience threshold, so
//! `short_term ⊆ long_term` holds after every mutation.
//!
//! # Attention
//!
//! [`Mind::set_focus`] keeps the current focus with probability
//! `attention_span` when the focused entity is still perceived (its distance
//! is refreshed). Otherwise a distance-weighted lottery runs over the
//! perception list: each candidate weighs `horizon − distance`, a uniform
//! draw is taken over the cumulative range, and the first candidate whose
//! cumulative slice covers the draw wins. Entities at or beyond the horizon
//! carry no positive weight and are effectively never chosen.
//!
//! # Encoding
//!
//! [`Mind::memorize`] turns the focused percept into a salience contribution
//! `e^((horizon/2 − distance) · mutation)` with `mutation = |N(1, 1)|`:
//! entities nearer than half the horizon encode at more than unit strength,
//! farther ones at less. Re-encoding an already-known entity adds the
//! contribution to its salience and moves the decay anchor to the new total
//! without restarting the age clock.
//!
//! # Example
//!
//! ```rust
//! use anima_mind::{Mind, MindConfig};
//! use anima_types::EntityKind;
//! use anima_world::SpatialWorld;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut world = SpatialWorld::new(5, 5);
//! let me = world.create_entity(0, 0, EntityKind::Person).unwrap();
//! world.create_entity(0, 2, EntityKind::Person).unwrap();
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(1);
//! let mut mind = Mind::new(MindConfig::default());
//! let seen = world.nearby_from(me, 3.0);
//!
//! mind.set_focus(&seen, 3.0, &mut rng);
//! mind.memorize(&seen, 3.0, &world, &mut rng);
//! mind.move_memories();
//! assert_eq!(mind.long_term_len(), 1);
//! ```

use std::collections::{BTreeSet, HashMap};

use anima_types::{EntityId, Percept};
use anima_world::SpatialWorld;
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::gauss::gaussian;
use crate::memory::{Memory, MemoryId, DEFAULT_TICKS_PER_HOUR};

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Tunable parameters of a mind, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MindConfig {
    /// Nominal long-term capacity. Carried as an inherited trait; the store
    /// itself never evicts.
    pub capacity: f64,
    /// Probability in `[0, 1]` that focus stays on the currently attended
    /// entity when it is still perceived.
    pub attention_span: f64,
    /// Salience at or above which a memory is resident in short-term memory.
    pub short_term_threshold: f64,
    /// Perception ticks per simulated hour; time base of the decay curve.
    pub ticks_per_hour: u64,
}

impl Default for MindConfig {
    fn default() -> Self {
        Self {
            capacity: 10.0,
            attention_span: 0.5,
            short_term_threshold: 1.0,
            ticks_per_hour: DEFAULT_TICKS_PER_HOUR,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mind
// ─────────────────────────────────────────────────────────────────────────────

/// One agent's long-term memory arena, derived short-term subset, and
/// current attentional focus.
pub struct Mind {
    config: MindConfig,
    /// The arena. Every entry is long-term memory; handles are indices and
    /// are never invalidated.
    memories: Vec<Memory>,
    /// Identity index: perceived entity → its memory handle.
    index: HashMap<EntityId, MemoryId>,
    /// Handles currently resident in short-term memory. Ordered so that
    /// iteration (and therefore contextualization) is deterministic.
    short_term: BTreeSet<MemoryId>,
    /// The percept currently attended to, if any.
    focus: Option<Percept>,
}

impl Mind {
    /// Construct a mind. `attention_span` is clamped to `[0, 1]` and
    /// `ticks_per_hour` to at least 1.
    pub fn new(config: MindConfig) -> Self {
        let config = MindConfig {
            attention_span: config.attention_span.clamp(0.0, 1.0),
            ticks_per_hour: config.ticks_per_hour.max(1),
            ..config
        };
        Self {
            config,
            memories: Vec::new(),
            index: HashMap::new(),
            short_term: BTreeSet::new(),
            focus: None,
        }
    }

    /// The configuration fixed at construction.
    pub fn config(&self) -> &MindConfig {
        &self.config
    }

    /// The currently attended percept, if any.
    pub fn focus(&self) -> Option<Percept> {
        self.focus
    }

    /// Number of long-term memories. Non-decreasing for the life of the mind.
    pub fn long_term_len(&self) -> usize {
        self.memories.len()
    }

    /// Number of memories currently resident in short-term memory.
    pub fn short_term_len(&self) -> usize {
        self.short_term.len()
    }

    /// Shared access to a memory by handle.
    pub fn memory(&self, id: MemoryId) -> Option<&Memory> {
        self.memories.get(id.0)
    }

    /// Iterate every long-term memory with its handle.
    pub fn long_term(&self) -> impl Iterator<Item = (MemoryId, &Memory)> {
        self.memories
            .iter()
            .enumerate()
            .map(|(i, m)| (MemoryId(i), m))
    }

    // ─── attention ───────────────────────────────────────────────────────────

    /// Move attentional focus over the current perception list.
    ///
    /// Leaves focus untouched when `perceived` is empty. Otherwise, with
    /// probability `attention_span`, sticks to the currently focused entity
    /// if it is still in the list (refreshing its distance); in every other
    /// case the distance-weighted lottery selects a new focus.
    pub fn set_focus<R: Rng + ?Sized>(
        &mut self,
        perceived: &[Percept],
        horizon: f64,
        rng: &mut R,
    ) {
        if perceived.is_empty() {
            return;
        }

        let p: f64 = rng.r#gen();
        if p <= self.config.attention_span {
            if let Some(current) = self.focus {
                if let Some(kept) = perceived.iter().find(|p| p.entity == current.entity) {
                    // Same entity, refreshed distance.
                    self.focus = Some(*kept);
                    return;
                }
            }
        }

        // Lottery: cumulative weights of (horizon - distance), nearer is
        // heavier. A uniform draw over the cumulative range picks the winner.
        let total: f64 = perceived.iter().map(|p| horizon - p.distance).sum();
        let gaze = if total > 0.0 {
            rng.gen_range(0.0..total)
        } else if total < 0.0 {
            rng.gen_range(total..0.0)
        } else {
            0.0
        };
        let mut remaining = total;
        for percept in perceived {
            remaining -= horizon - percept.distance;
            if gaze >= remaining {
                trace!(entity = %percept.entity, distance = percept.distance, "focus shifted");
                self.focus = Some(*percept);
                return;
            }
        }
    }

    // ─── encoding ────────────────────────────────────────────────────────────

    /// Encode the focused percept into long-term memory and associate it
    /// with the co-perceived short-term memories.
    ///
    /// A no-op when nothing is focused. The salience contribution is
    /// `e^((horizon/2 − distance) · |N(1,1)|)`; an existing memory is
    /// reinforced (anchor moves, age clock does not restart), a new entity
    /// gets a fresh memory.
    pub fn memorize<R: Rng + ?Sized>(
        &mut self,
        perceived: &[Percept],
        horizon: f64,
        world: &SpatialWorld,
        rng: &mut R,
    ) {
        let Some(focus) = self.focus else {
            return;
        };

        let mutation = gaussian(rng, 1.0, 1.0).abs();
        let contribution = ((horizon / 2.0 - focus.distance) * mutation).exp();

        let id = match self.index.get(&focus.entity).copied() {
            Some(id) => {
                self.memories[id.0].reinforce(contribution);
                id
            }
            None => {
                let id = MemoryId(self.memories.len());
                self.memories.push(Memory::new(focus.entity, contribution));
                self.index.insert(focus.entity, id);
                debug!(entity = %focus.entity, salience = contribution, "memory encoded");
                id
            }
        };

        self.contextualize(id, perceived, world);
    }

    /// Connect `core` to every other co-perceived entity that currently has
    /// a short-term representation, weighting each edge by the physical
    /// distance between the two entities in the world.
    ///
    /// Entities known only to long-term memory are ignored: association
    /// requires the counterpart to be actively held in short-term memory.
    fn contextualize(&mut self, core: MemoryId, perceived: &[Percept], world: &SpatialWorld) {
        let core_object = self.memories[core.0].object();
        for percept in perceived {
            let Some(&other) = self.index.get(&percept.entity) else {
                continue;
            };
            if other == core || !self.short_term.contains(&other) {
                continue;
            }
            match world.distance_between(core_object, percept.entity) {
                Ok(distance) => self.memories[core.0].connect(other, distance),
                Err(err) => {
                    warn!(%err, "skipping association for unresolvable percept");
                }
            }
        }
    }

    // ─── decay sweep ─────────────────────────────────────────────────────────

    /// Age and decay every long-term memory, then rebuild short-term
    /// membership from the salience threshold.
    ///
    /// The demotion pass runs before the promotion pass every tick, so
    /// `short_term ⊆ long_term` holds continuously.
    pub fn move_memories(&mut self) {
        let ticks_per_hour = self.config.ticks_per_hour;
        for memory in &mut self.memories {
            memory.sweep(ticks_per_hour);
        }

        let threshold = self.config.short_term_threshold;
        let memories = &self.memories;
        self.short_term
            .retain(|id| memories[id.0].salience() >= threshold);
        for (i, memory) in self.memories.iter().enumerate() {
            if memory.salience() >= threshold {
                self.short_term.insert(MemoryId(i));
            }
        }
    }

    // ─── recall ──────────────────────────────────────────────────────────────

    /// Look up an entity's memory in the short-term store.
    pub fn recall_short(&self, object: EntityId) -> Option<&Memory> {
        self.index
            .get(&object)
            .filter(|id| self.short_term.contains(id))
            .map(|id| &self.memories[id.0])
    }

    /// Look up an entity's memory anywhere in long-term memory.
    pub fn recall_long(&self, object: EntityId) -> Option<&Memory> {
        self.index.get(&object).map(|id| &self.memories[id.0])
    }

    /// True when the handle is currently resident in short-term memory.
    pub fn is_short_term(&self, id: MemoryId) -> bool {
        self.short_term.contains(&id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use anima_types::EntityKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const HORIZON: f64 = 3.0;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    /// 5×5 world with an observer at (0,0) and two others in sight range.
    fn small_world() -> (SpatialWorld, EntityId, EntityId, EntityId) {
        let mut world = SpatialWorld::new(5, 5);
        let me = world.create_entity(0, 0, EntityKind::Person).unwrap();
        let near = world.create_entity(0, 1, EntityKind::Person).unwrap();
        let far = world.create_entity(0, 2, EntityKind::Person).unwrap();
        (world, me, near, far)
    }

    fn mind_with(attention_span: f64, threshold: f64) -> Mind {
        Mind::new(MindConfig {
            attention_span,
            short_term_threshold: threshold,
            ..MindConfig::default()
        })
    }

    // ── construction ────────────────────────────────────────────────────────

    #[test]
    fn attention_span_is_clamped_to_unit_interval() {
        let mind = mind_with(1.7, 1.0);
        assert_eq!(mind.config().attention_span, 1.0);
        let mind = mind_with(-0.3, 1.0);
        assert_eq!(mind.config().attention_span, 0.0);
    }

    // ── set_focus ───────────────────────────────────────────────────────────

    #[test]
    fn set_focus_on_empty_perception_is_a_no_op() {
        let mut mind = mind_with(0.5, 1.0);
        mind.set_focus(&[], HORIZON, &mut rng(1));
        assert!(mind.focus().is_none());
    }

    #[test]
    fn set_focus_single_candidate_is_always_chosen() {
        let mut mind = mind_with(0.0, 1.0);
        let seen = [Percept::new(EntityId(5), 1.0)];
        mind.set_focus(&seen, HORIZON, &mut rng(2));
        assert_eq!(mind.focus().unwrap().entity, EntityId(5));
    }

    #[test]
    fn sticky_focus_never_moves_at_full_attention_span() {
        // attention_span = 1.0: the retention draw always succeeds, so as
        // long as the focused entity stays perceived, focus never changes.
        let mut mind = mind_with(1.0, 1.0);
        let mut rng = rng(3);
        let seen = [
            Percept::new(EntityId(1), 1.0),
            Percept::new(EntityId(2), 0.5),
        ];
        mind.set_focus(&seen, HORIZON, &mut rng);
        let first = mind.focus().unwrap().entity;
        for _ in 0..50 {
            mind.set_focus(&seen, HORIZON, &mut rng);
            assert_eq!(mind.focus().unwrap().entity, first);
        }
    }

    #[test]
    fn sticky_focus_refreshes_distance() {
        let mut mind = mind_with(1.0, 1.0);
        let mut rng = rng(4);
        mind.set_focus(&[Percept::new(EntityId(1), 2.0)], HORIZON, &mut rng);
        // Same entity, now nearer.
        mind.set_focus(&[Percept::new(EntityId(1), 0.5)], HORIZON, &mut rng);
        let focus = mind.focus().unwrap();
        assert_eq!(focus.entity, EntityId(1));
        assert_eq!(focus.distance, 0.5);
    }

    #[test]
    fn focus_lottery_runs_when_previous_focus_left_perception() {
        let mut mind = mind_with(1.0, 1.0);
        let mut rng = rng(5);
        mind.set_focus(&[Percept::new(EntityId(1), 1.0)], HORIZON, &mut rng);
        // Entity 1 vanished; even at full attention span the lottery must run.
        mind.set_focus(&[Percept::new(EntityId(2), 1.0)], HORIZON, &mut rng);
        assert_eq!(mind.focus().unwrap().entity, EntityId(2));
    }

    #[test]
    fn focus_lottery_prefers_nearer_candidates() {
        // Weight near = 2.9, far = 0.1: the near entity should win almost
        // every independent draw.
        let near = Percept::new(EntityId(1), 0.1);
        let far = Percept::new(EntityId(2), 2.9);
        let mut rng = rng(6);
        let mut near_wins = 0;
        for _ in 0..200 {
            let mut mind = mind_with(0.0, 1.0);
            mind.set_focus(&[near, far], HORIZON, &mut rng);
            if mind.focus().unwrap().entity == near.entity {
                near_wins += 1;
            }
        }
        assert!(near_wins > 170, "near entity won only {near_wins}/200");
    }

    // ── memorize ────────────────────────────────────────────────────────────

    #[test]
    fn memorize_without_focus_is_a_no_op() {
        let (world, ..) = small_world();
        let mut mind = mind_with(0.5, 1.0);
        mind.memorize(&[], HORIZON, &world, &mut rng(7));
        assert_eq!(mind.long_term_len(), 0);
    }

    #[test]
    fn memorize_creates_a_memory_for_a_new_entity() {
        let (world, me, near, _) = small_world();
        let mut mind = mind_with(1.0, 1.0);
        let mut rng = rng(8);
        let seen = world.nearby_from(me, HORIZON);
        mind.set_focus(&seen, HORIZON, &mut rng);
        mind.memorize(&seen, HORIZON, &world, &mut rng);

        assert_eq!(mind.long_term_len(), 1);
        let focused = mind.focus().unwrap().entity;
        assert!(mind.recall_long(focused).is_some());
        // Entities never focused are not encoded.
        if focused != near {
            assert!(mind.recall_long(near).is_none());
        }
    }

    #[test]
    fn memorize_reinforces_and_moves_the_anchor() {
        let (world, _, near, _) = small_world();
        let mut mind = mind_with(1.0, 1.0);
        let mut rng = rng(9);
        let seen = [Percept::new(near, 1.0)];

        mind.set_focus(&seen, HORIZON, &mut rng);
        mind.memorize(&seen, HORIZON, &world, &mut rng);
        let first = mind.recall_long(near).unwrap().salience();

        mind.memorize(&seen, HORIZON, &world, &mut rng);
        let memory = mind.recall_long(near).unwrap();
        assert!(memory.salience() > first, "salience must accumulate");
        assert_eq!(memory.base_salience(), memory.salience());
        assert_eq!(mind.long_term_len(), 1, "same entity, same memory");
    }

    #[test]
    fn long_term_memory_never_shrinks() {
        let (world, me, ..) = small_world();
        let mut mind = mind_with(0.0, 1.0);
        let mut rng = rng(10);
        let seen = world.nearby_from(me, HORIZON);
        let mut previous = 0;
        for _ in 0..100 {
            mind.set_focus(&seen, HORIZON, &mut rng);
            mind.memorize(&seen, HORIZON, &world, &mut rng);
            mind.move_memories();
            let now = mind.long_term_len();
            assert!(now >= previous);
            previous = now;
        }
    }

    // ── contextualize ───────────────────────────────────────────────────────

    #[test]
    fn contextualize_links_only_short_term_co_percepts() {
        let (world, _, near, far) = small_world();
        let mut mind = mind_with(1.0, 0.0);
        let mut rng = rng(11);

        // Encode `far` and promote it into short-term memory (threshold 0).
        let seen_far = [Percept::new(far, 0.5)];
        mind.set_focus(&seen_far, HORIZON, &mut rng);
        mind.memorize(&seen_far, HORIZON, &world, &mut rng);
        mind.move_memories();
        assert!(mind.recall_short(far).is_some());

        // Shift focus to `near` (the old focus left perception, so even at
        // full attention span the lottery must pick the only candidate),
        // then encode while both are perceived: an edge near → far must
        // appear, weighted by their world distance (1.0 apart on the grid:
        // (0,1) to (0,2)).
        let seen_both = [Percept::new(near, 1.0), Percept::new(far, 2.0)];
        mind.set_focus(&[Percept::new(near, 1.0)], HORIZON, &mut rng);
        mind.memorize(&seen_both, HORIZON, &world, &mut rng);

        let core = mind.recall_long(near).unwrap();
        let (target, weight) = core.connections().next().expect("one edge");
        assert_eq!(mind.memory(target).unwrap().object(), far);
        assert_eq!(weight, world.distance_between(near, far).unwrap());
    }

    #[test]
    fn contextualize_ignores_long_term_only_memories() {
        let (world, _, near, far) = small_world();
        // Threshold high enough that nothing is ever promoted.
        let mut mind = mind_with(1.0, f64::INFINITY);
        let mut rng = rng(12);

        let seen_far = [Percept::new(far, 0.5)];
        mind.set_focus(&seen_far, HORIZON, &mut rng);
        mind.memorize(&seen_far, HORIZON, &world, &mut rng);
        mind.move_memories();

        let seen_both = [Percept::new(near, 1.0), Percept::new(far, 2.0)];
        mind.set_focus(&[Percept::new(near, 1.0)], HORIZON, &mut rng);
        mind.memorize(&seen_both, HORIZON, &world, &mut rng);

        let core = mind.recall_long(near).unwrap();
        assert_eq!(core.connections().count(), 0);
    }

    #[test]
    fn repeated_co_perception_accumulates_edge_weight() {
        let (world, _, near, far) = small_world();
        let mut mind = mind_with(1.0, 0.0);
        let mut rng = rng(13);

        let seen_far = [Percept::new(far, 0.5)];
        mind.set_focus(&seen_far, HORIZON, &mut rng);
        mind.memorize(&seen_far, HORIZON, &world, &mut rng);
        mind.move_memories();

        let seen_both = [Percept::new(near, 1.0), Percept::new(far, 2.0)];
        mind.set_focus(&[Percept::new(near, 1.0)], HORIZON, &mut rng);
        mind.memorize(&seen_both, HORIZON, &world, &mut rng);
        mind.memorize(&seen_both, HORIZON, &world, &mut rng);

        let unit = world.distance_between(near, far).unwrap();
        let core = mind.recall_long(near).unwrap();
        let (_, weight) = core.connections().next().unwrap();
        assert_eq!(weight, 2.0 * unit);
    }

    // ── move_memories ───────────────────────────────────────────────────────

    #[test]
    fn short_term_is_always_a_subset_of_long_term() {
        let (world, me, ..) = small_world();
        let mut mind = mind_with(0.3, 0.5);
        let mut rng = rng(14);
        let seen = world.nearby_from(me, HORIZON);
        for _ in 0..200 {
            mind.set_focus(&seen, HORIZON, &mut rng);
            mind.memorize(&seen, HORIZON, &world, &mut rng);
            mind.move_memories();
            assert!(mind.short_term_len() <= mind.long_term_len());
            // Every short-term handle resolves to an arena entry.
            for (id, _) in mind.long_term() {
                if mind.is_short_term(id) {
                    assert!(mind.memory(id).is_some());
                }
            }
        }
    }

    #[test]
    fn decayed_memories_leave_short_term_but_never_long_term() {
        let (world, _, _, far) = small_world();
        let mut mind = Mind::new(MindConfig {
            attention_span: 1.0,
            short_term_threshold: 0.5,
            ticks_per_hour: 10,
            ..MindConfig::default()
        });
        let mut rng = rng(15);

        // Beyond half the horizon the encoding exponent is negative, so the
        // initial salience is at most 1 whatever the mutation draw; fifty
        // simulated hours of decay then push it below any threshold >= 0.27.
        let seen = [Percept::new(far, 2.0)];
        mind.set_focus(&seen, HORIZON, &mut rng);
        mind.memorize(&seen, HORIZON, &world, &mut rng);
        assert!(mind.recall_long(far).unwrap().salience() <= 1.0);

        for _ in 0..500 {
            mind.move_memories();
        }
        assert!(mind.recall_short(far).is_none(), "below the threshold");
        let memory = mind.recall_long(far).expect("still in long-term");
        assert!(memory.salience() < 0.5);
        assert_eq!(memory.age(), 500);
    }

    #[test]
    fn sweep_ages_every_memory_exactly_once_per_tick() {
        let (world, me, ..) = small_world();
        let mut mind = mind_with(0.0, 1.0);
        let mut rng = rng(16);
        let seen = world.nearby_from(me, HORIZON);
        mind.set_focus(&seen, HORIZON, &mut rng);
        mind.memorize(&seen, HORIZON, &world, &mut rng);

        for expected in 1..=5u64 {
            mind.move_memories();
            for (_, memory) in mind.long_term() {
                assert_eq!(memory.age(), expected);
            }
        }
    }

    // ── recall ──────────────────────────────────────────────────────────────

    #[test]
    fn recall_returns_none_for_unknown_entities() {
        let mind = mind_with(0.5, 1.0);
        assert!(mind.recall_long(EntityId(99)).is_none());
        assert!(mind.recall_short(EntityId(99)).is_none());
    }
}
