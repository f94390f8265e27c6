//! `anima-world` – the spatial substrate.
//!
//! Owns the authoritative mapping from every live entity to its grid cell
//! and answers the distance and proximity queries that perception and memory
//! association are built on.
//!
//! # Modules
//!
//! - [`grid`] – [`SpatialWorld`][grid::SpatialWorld]: a 2-D grid of discrete
//!   cells with entity placement, sound attachment, Euclidean distance
//!   queries, and radius-bounded perception with distance-attenuated hearing.

pub mod grid;

pub use grid::SpatialWorld;
