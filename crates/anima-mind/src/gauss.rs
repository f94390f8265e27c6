//! Box–Muller normal sampling.
//!
//! The simulation needs Gaussian draws for encoding-strength mutations and
//! for trait inheritance; a full distributions crate is not worth the pull
//! for one transform.

use rand::Rng;

/// Draw one sample from `N(mean, sd²)`.
///
/// Standard Box–Muller: two uniform draws mapped through the polar form.
/// The first uniform is kept away from zero so the logarithm stays finite.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, sd: f64) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
    mean + sd * z
}
