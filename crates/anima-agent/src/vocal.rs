//! Generic `VocalTract` trait for speech synthesizers.
//!
//! Synthesizer backends implement this trait; a [`Person`][crate::Person]
//! only ever talks to the trait, so the actual audio engine (an articulatory
//! model, a network service, a test double) can be swapped without touching
//! agent logic. The simulation core never looks inside an [`Utterance`]
//! beyond its volume.

use anima_types::{Articulation, WorldError};
use thiserror::Error;

/// Lowest voiced frequency a tract accepts, Hz.
pub const FREQUENCY_MIN_HZ: f64 = 20.0;
/// Highest voiced frequency a tract accepts, Hz.
pub const FREQUENCY_MAX_HZ: f64 = 5_000.0;
/// Longest single utterance, seconds.
pub const DURATION_MAX_S: f64 = 10.0;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Failures while vocalising.
#[derive(Error, Debug)]
pub enum VoiceError {
    /// The synthesizer rejected the articulation.
    #[error("synthesis failed: {0}")]
    Synthesis(String),
    /// The produced sound could not be placed into the world.
    #[error("could not place utterance: {0}")]
    Placement(#[from] WorldError),
}

// ─────────────────────────────────────────────────────────────────────────────
// Utterance
// ─────────────────────────────────────────────────────────────────────────────

/// The audible result of one articulation.
///
/// Opaque to the simulation apart from `volume`, which drives hearing
/// attenuation once the sound is attached to the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Utterance {
    pub volume: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// VocalTract
// ─────────────────────────────────────────────────────────────────────────────

/// A speech synthesizer driven by articulatory parameters.
pub trait VocalTract: Send + Sync {
    /// Stable identifier for this tract backend, e.g. `"sine"`.
    fn id(&self) -> &str;

    /// Render one articulation into an audible utterance.
    ///
    /// # Errors
    ///
    /// Returns [`VoiceError::Synthesis`] when the articulation is outside
    /// the backend's producible range.
    fn synthesize(&mut self, articulation: &Articulation) -> Result<Utterance, VoiceError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// SineTract
// ─────────────────────────────────────────────────────────────────────────────

/// Reference tract: a plain sine voice.
///
/// Ignores the tongue and constriction shape entirely and produces a tone at
/// the requested frequency. Volume is the articulation's intensity scaled by
/// the tract's output gain.
pub struct SineTract {
    gain: f64,
}

impl SineTract {
    pub fn new(gain: f64) -> Self {
        Self { gain }
    }
}

impl Default for SineTract {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl VocalTract for SineTract {
    fn id(&self) -> &str {
        "sine"
    }

    fn synthesize(&mut self, articulation: &Articulation) -> Result<Utterance, VoiceError> {
        if !(FREQUENCY_MIN_HZ..=FREQUENCY_MAX_HZ).contains(&articulation.frequency_hz) {
            return Err(VoiceError::Synthesis(format!(
                "frequency {} Hz outside producible range {FREQUENCY_MIN_HZ}..={FREQUENCY_MAX_HZ}",
                articulation.frequency_hz
            )));
        }
        if !(0.0..=DURATION_MAX_S).contains(&articulation.duration_s) {
            return Err(VoiceError::Synthesis(format!(
                "duration {} s outside 0..={DURATION_MAX_S}",
                articulation.duration_s
            )));
        }
        Ok(Utterance {
            volume: articulation.intensity * self.gain,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articulation(frequency_hz: f64, duration_s: f64, intensity: f64) -> Articulation {
        Articulation {
            tongue_position: 0.5,
            tongue_diameter: 0.5,
            constriction_position: 0.5,
            constriction_diameter: 0.5,
            duration_s,
            intensity,
            tenseness: 0.5,
            frequency_hz,
        }
    }

    /// Minimal in-process tract used only for tests.
    struct MockTract {
        last_frequency: f64,
    }

    impl VocalTract for MockTract {
        fn id(&self) -> &str {
            "mock"
        }

        fn synthesize(&mut self, articulation: &Articulation) -> Result<Utterance, VoiceError> {
            self.last_frequency = articulation.frequency_hz;
            Ok(Utterance { volume: 2.0 })
        }
    }

    #[test]
    fn mock_tract_receives_the_articulation() {
        let mut tract = MockTract { last_frequency: 0.0 };
        let utterance = tract.synthesize(&articulation(440.0, 1.0, 0.5)).unwrap();
        assert_eq!(tract.last_frequency, 440.0);
        assert_eq!(utterance.volume, 2.0);
    }

    #[test]
    fn sine_tract_scales_intensity_by_gain() {
        let mut tract = SineTract::new(0.5);
        let utterance = tract.synthesize(&articulation(440.0, 1.0, 0.8)).unwrap();
        assert!((utterance.volume - 0.4).abs() < 1e-12);
    }

    #[test]
    fn sine_tract_rejects_out_of_range_frequency() {
        let mut tract = SineTract::default();
        let err = tract.synthesize(&articulation(6_000.0, 1.0, 0.5)).unwrap_err();
        assert!(matches!(err, VoiceError::Synthesis(_)));
    }

    #[test]
    fn sine_tract_rejects_out_of_range_duration() {
        let mut tract = SineTract::default();
        let err = tract.synthesize(&articulation(440.0, 11.0, 0.5)).unwrap_err();
        assert!(matches!(err, VoiceError::Synthesis(_)));
    }
}
