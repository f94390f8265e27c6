//! Serialisable snapshot of a mind's association graph.
//!
//! The snapshot is meant for an external visualiser: nodes carry salience
//! (for sizing) and short-term residency (for colouring), edges carry the
//! accumulated association weight (for thickness). Isolated nodes are
//! included — a memory with no associations is still a memory.

use anima_types::EntityId;
use serde::{Deserialize, Serialize};

use crate::memory::MemoryId;
use crate::mind::Mind;

/// One memory in the exported graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: MemoryId,
    pub object: EntityId,
    pub salience: f64,
    pub age: u64,
    pub short_term: bool,
}

/// One directed association in the exported graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: MemoryId,
    pub to: MemoryId,
    pub weight: f64,
}

/// A whole-mind snapshot at one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl MemoryGraph {
    /// Snapshot `mind`'s entire long-term store.
    ///
    /// Nodes and edges come out in handle order, so two snapshots of the
    /// same mind state serialise identically.
    pub fn snapshot(mind: &Mind) -> Self {
        let mut nodes = Vec::with_capacity(mind.long_term_len());
        let mut edges = Vec::new();
        for (id, memory) in mind.long_term() {
            nodes.push(GraphNode {
                id,
                object: memory.object(),
                salience: memory.salience(),
                age: memory.age(),
                short_term: mind.is_short_term(id),
            });
            for (to, weight) in memory.connections() {
                edges.push(GraphEdge { from: id, to, weight });
            }
        }
        Self { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mind::MindConfig;
    use anima_types::{EntityKind, Percept};
    use anima_world::SpatialWorld;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn encoded_mind() -> (Mind, EntityId, EntityId) {
        let mut world = SpatialWorld::new(5, 5);
        let a = world.create_entity(0, 1, EntityKind::Person).unwrap();
        let b = world.create_entity(0, 2, EntityKind::Person).unwrap();

        let mut mind = Mind::new(MindConfig {
            attention_span: 1.0,
            short_term_threshold: 0.0,
            ..MindConfig::default()
        });
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let seen_b = [Percept::new(b, 0.5)];
        mind.set_focus(&seen_b, 3.0, &mut rng);
        mind.memorize(&seen_b, 3.0, &world, &mut rng);
        mind.move_memories();

        // b left perception, so focus must shift to a before the second
        // encoding associates the two.
        let seen_both = [Percept::new(a, 1.0), Percept::new(b, 2.0)];
        mind.set_focus(&[Percept::new(a, 1.0)], 3.0, &mut rng);
        mind.memorize(&seen_both, 3.0, &world, &mut rng);
        mind.move_memories();

        (mind, a, b)
    }

    #[test]
    fn snapshot_carries_every_memory_and_edge() {
        let (mind, a, b) = encoded_mind();
        let graph = MemoryGraph::snapshot(&mind);

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);

        let edge = &graph.edges[0];
        let from = &graph.nodes[edge.from.0];
        let to = &graph.nodes[edge.to.0];
        assert_eq!(from.object, a);
        assert_eq!(to.object, b);
        assert_eq!(edge.weight, 1.0); // (0,1) and (0,2) are one cell apart
    }

    #[test]
    fn isolated_memories_appear_as_nodes() {
        let mut world = SpatialWorld::new(3, 3);
        let lone = world.create_entity(1, 1, EntityKind::Person).unwrap();

        let mut mind = Mind::new(MindConfig {
            attention_span: 1.0,
            ..MindConfig::default()
        });
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let seen = [Percept::new(lone, 0.0)];
        mind.set_focus(&seen, 3.0, &mut rng);
        mind.memorize(&seen, 3.0, &world, &mut rng);

        let graph = MemoryGraph::snapshot(&mind);
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
        assert_eq!(graph.nodes[0].object, lone);
    }

    #[test]
    fn snapshot_serialises_deterministically() {
        let (mind, ..) = encoded_mind();
        let first = serde_json::to_string(&MemoryGraph::snapshot(&mind)).unwrap();
        let second = serde_json::to_string(&MemoryGraph::snapshot(&mind)).unwrap();
        assert_eq!(first, second);

        let back: MemoryGraph = serde_json::from_str(&first).unwrap();
        assert_eq!(back, MemoryGraph::snapshot(&mind));
    }
}
