//! Mind trait generation and inheritance.
//!
//! A newborn agent either draws its mind traits fresh from population-level
//! distributions or inherits a parent's traits with small Gaussian
//! mutations. Either way the attention span is clamped to `[0, 1]`
//! afterwards, since it is used directly as a probability.

use anima_mind::{gaussian, MindConfig, DEFAULT_TICKS_PER_HOUR};
use rand::Rng;

/// Heritable mind traits, before they are fixed into a [`MindConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MindParams {
    pub capacity: f64,
    pub attention_span: f64,
    pub short_term_threshold: f64,
}

impl MindParams {
    /// Draw fresh traits from the population distributions:
    /// capacity `N(10, 2)`, attention span `N(0.5, 0.2)`, short-term
    /// threshold `|N(1, 0.25)|`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            capacity: gaussian(rng, 10.0, 2.0),
            attention_span: gaussian(rng, 0.5, 0.2),
            short_term_threshold: gaussian(rng, 1.0, 0.25).abs(),
        }
        .clamped()
    }

    /// Inherit a parent's traits with small mutations: capacity `+N(0, 1)`,
    /// attention span `+N(0, 0.05)`, short-term threshold `+N(0, 0.05)`.
    pub fn inherit<R: Rng + ?Sized>(parent: &MindParams, rng: &mut R) -> Self {
        Self {
            capacity: parent.capacity + gaussian(rng, 0.0, 1.0),
            attention_span: parent.attention_span + gaussian(rng, 0.0, 0.05),
            short_term_threshold: parent.short_term_threshold + gaussian(rng, 0.0, 0.05),
        }
        .clamped()
    }

    /// Fix these traits into a mind configuration.
    pub fn into_config(self, ticks_per_hour: u64) -> MindConfig {
        MindConfig {
            capacity: self.capacity,
            attention_span: self.attention_span,
            short_term_threshold: self.short_term_threshold,
            ticks_per_hour,
        }
    }

    fn clamped(mut self) -> Self {
        self.attention_span = self.attention_span.clamp(0.0, 1.0);
        self
    }
}

impl Default for MindParams {
    /// The population means, unmutated.
    fn default() -> Self {
        Self {
            capacity: 10.0,
            attention_span: 0.5,
            short_term_threshold: 1.0,
        }
    }
}

/// Shorthand for [`MindParams::into_config`] with the default tick rate.
impl From<MindParams> for MindConfig {
    fn from(params: MindParams) -> Self {
        params.into_config(DEFAULT_TICKS_PER_HOUR)
    }
}
