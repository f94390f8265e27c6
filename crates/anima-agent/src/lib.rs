//! `anima-agent` – embodied agents over the world and mind crates.
//!
//! A [`Person`][person::Person] owns one [`Mind`][anima_mind::Mind], carries
//! a name and a perception horizon, runs the per-tick perception pipeline,
//! and vocalises through the [`VocalTract`][vocal::VocalTract] seam.
//!
//! # Modules
//!
//! - [`person`] – the agent itself: perception pipeline, vocal action, and a
//!   human-readable stats report; plus [`NameRegistry`][person::NameRegistry].
//! - [`heredity`] – [`MindParams`][heredity::MindParams]: Gaussian trait
//!   generation and parent-to-child inheritance with small mutations.
//! - [`vocal`] – the [`VocalTract`][vocal::VocalTract] trait, the opaque
//!   [`Utterance`][vocal::Utterance], and a sine-wave reference tract.
//! - [`telemetry`] – `tracing` subscriber initialisation for binaries.

pub mod heredity;
pub mod person;
pub mod telemetry;
pub mod vocal;

pub use heredity::MindParams;
pub use person::{NameRegistry, Person};
pub use vocal::{SineTract, Utterance, VocalTract, VoiceError};
