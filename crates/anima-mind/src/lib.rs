//! `anima-mind` – the cognitive memory subsystem.
//!
//! Encodes perceived entities into a weighted, decaying association graph,
//! selects attentional focus stochastically, and promotes or demotes
//! memories between the short-term and long-term stores on every simulated
//! tick.
//!
//! # Modules
//!
//! - [`memory`] – [`Memory`][memory::Memory]: one remembered entity with a
//!   decaying salience, an age counter, and accumulated weighted edges to
//!   other memories; plus the two-regime [`decay`][memory::decay] curve.
//! - [`mind`] – [`Mind`][mind::Mind]: an agent's long-term memory arena and
//!   derived short-term subset; focus selection, encoding, association, and
//!   the per-tick decay/promotion sweep.
//! - [`graph`] – [`MemoryGraph`][graph::MemoryGraph]: serialisable export of
//!   the association graph for an external visualiser (edge weights for
//!   drawing, salience for node sizing).
//! - [`gauss`] – [`gaussian`][gauss::gaussian]: Box–Muller normal sampling
//!   over any [`rand::Rng`].

pub mod gauss;
pub mod graph;
pub mod memory;
pub mod mind;

pub use gauss::gaussian;
pub use graph::{GraphEdge, GraphNode, MemoryGraph};
pub use memory::{decay, Memory, MemoryError, MemoryId, DEFAULT_TICKS_PER_HOUR};
pub use mind::{Mind, MindConfig};
