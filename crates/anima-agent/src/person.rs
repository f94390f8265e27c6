//! The embodied agent: perception pipeline, vocal action, naming.
//!
//! A [`Person`] perceives entities in its environment, forms memories of
//! them, and converses through a [`VocalTract`]. Each call to
//! [`Person::perceive`] is one complete simulation tick:
//!
//! ```text
//! nearby_from → set_focus → memorize → move_memories → age += 1
//! ```
//!
//! There is no state machine between the stages; a tick always runs all of
//! them, and a person with nothing in sight simply ages.

use std::fmt;

use anima_mind::Mind;
use anima_types::{Articulation, EntityId, Percept};
use anima_world::SpatialWorld;
use rand::Rng;
use tracing::{debug, info};

use crate::heredity::MindParams;
use crate::vocal::{
    VocalTract, VoiceError, DURATION_MAX_S, FREQUENCY_MAX_HZ, FREQUENCY_MIN_HZ,
};

/// Default perception radius, in cells.
pub const DEFAULT_HORIZON: f64 = 3.0;

// ─────────────────────────────────────────────────────────────────────────────
// NameRegistry
// ─────────────────────────────────────────────────────────────────────────────

/// Hands out person names in a fixed order.
///
/// Owned by the driver and passed in at construction, so two simulations
/// never share naming state. When the pool is exhausted the names repeat
/// with a generation suffix (`grant`, …, `ashley`, `grant-2`, …).
pub struct NameRegistry {
    pool: Vec<&'static str>,
    counter: usize,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self {
            pool: vec![
                "grant", "ethan", "jennifer", "brent", "braun", "kevin", "claudia", "brian",
                "dane", "hunter", "clinton", "ashley",
            ],
            counter: 0,
        }
    }

    /// The next unused name.
    pub fn next_name(&mut self) -> String {
        let index = self.counter % self.pool.len();
        let generation = self.counter / self.pool.len();
        self.counter += 1;
        if generation == 0 {
            self.pool[index].to_string()
        } else {
            format!("{}-{}", self.pool[index], generation + 1)
        }
    }

    /// Names handed out so far.
    pub fn issued(&self) -> usize {
        self.counter
    }
}

impl Default for NameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Person
// ─────────────────────────────────────────────────────────────────────────────

/// One agent: a named body in the world with exclusive ownership of a mind.
pub struct Person {
    id: EntityId,
    name: String,
    age: u64,
    horizon: f64,
    perceiving: Vec<Percept>,
    mind: Mind,
}

impl Person {
    /// Construct a person for an entity already registered in the world.
    ///
    /// `ticks_per_hour` fixes the time base of the mind's decay curve.
    pub fn new(id: EntityId, name: String, params: MindParams, ticks_per_hour: u64) -> Self {
        info!(%id, %name, ?params, "person created");
        Self {
            id,
            name,
            age: 0,
            horizon: DEFAULT_HORIZON,
            perceiving: Vec::new(),
            mind: Mind::new(params.into_config(ticks_per_hour)),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ticks lived so far.
    pub fn age(&self) -> u64 {
        self.age
    }

    /// Perception radius in cells.
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// What was in range on the most recent tick.
    pub fn perceiving(&self) -> &[Percept] {
        &self.perceiving
    }

    pub fn mind(&self) -> &Mind {
        &self.mind
    }

    /// Run one perception tick against the world.
    pub fn perceive<R: Rng + ?Sized>(&mut self, world: &SpatialWorld, rng: &mut R) {
        self.perceiving = world.nearby_from(self.id, self.horizon);
        self.mind.set_focus(&self.perceiving, self.horizon, rng);
        self.mind.memorize(&self.perceiving, self.horizon, world, rng);
        self.mind.move_memories();
        self.age += 1;
    }

    /// Vocalise: drive the tract with a random articulation and attach the
    /// resulting sound to the world at this person's cell.
    ///
    /// Returns the sound's entity id so the driver can track it.
    ///
    /// # Errors
    ///
    /// [`VoiceError::Synthesis`] when the tract rejects the articulation,
    /// [`VoiceError::Placement`] when this person is not in the world.
    pub fn act<R: Rng + ?Sized>(
        &mut self,
        world: &mut SpatialWorld,
        tract: &mut dyn VocalTract,
        rng: &mut R,
    ) -> Result<EntityId, VoiceError> {
        let articulation = self.babble(rng);
        let utterance = tract.synthesize(&articulation)?;
        let sound = world.attach_sound(self.id, utterance.volume)?;
        debug!(
            speaker = %self.name,
            %sound,
            volume = utterance.volume,
            frequency_hz = articulation.frequency_hz,
            "utterance placed"
        );
        Ok(sound)
    }

    /// An unlearned articulation: every parameter uniform over the tract's
    /// producible range. Language acquisition would narrow these draws.
    fn babble<R: Rng + ?Sized>(&self, rng: &mut R) -> Articulation {
        Articulation {
            tongue_position: rng.gen_range(0.0..1.0),
            tongue_diameter: rng.gen_range(0.0..1.0),
            constriction_position: rng.gen_range(0.0..1.0),
            constriction_diameter: rng.gen_range(0.0..1.0),
            duration_s: rng.gen_range(0.0..DURATION_MAX_S),
            intensity: rng.gen_range(0.0..1.0),
            tenseness: rng.gen_range(0.0..1.0),
            frequency_hz: rng.gen_range(FREQUENCY_MIN_HZ..FREQUENCY_MAX_HZ),
        }
    }

    /// Multi-line human-readable report for the driver's console output.
    pub fn stats(&self, world: &SpatialWorld) -> String {
        let coords = world
            .coords_of(self.id)
            .map_or_else(|| "nowhere".to_string(), |c| c.to_string());
        let focus = self
            .mind
            .focus()
            .map_or_else(|| "none".to_string(), |f| format!("{} at {:.2}", f.entity, f.distance));
        format!(
            "{}\n  age: {}\n  coords: {}\n  horizon: {}\n  capacity: {:.2}\n  attention span: {:.2}\n  perceiving: {}\n  focus: {}\n  memories: {} long-term / {} short-term",
            self.name,
            self.age,
            coords,
            self.horizon,
            self.mind.config().capacity,
            self.mind.config().attention_span,
            self.perceiving.len(),
            focus,
            self.mind.long_term_len(),
            self.mind.short_term_len(),
        )
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
