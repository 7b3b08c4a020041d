//! Routing trait and the default A* implementation.
//!
//! # Pluggability
//!
//! The engine calls routing via the [`Planner`] trait so hosts can swap in a
//! custom implementation (contraction hierarchies, behavioral detours)
//! without touching the engine core.  The default [`AStarPlanner`] is
//! sufficient for editor-scale graphs.
//!
//! # Cost model
//!
//! Costs accumulate each edge's `weight` — the congestion-inflated dynamic
//! cost in seconds, as of the weights snapshot at call time.  The heuristic
//! is straight-line distance to the goal divided by the fastest free-flow
//! speed on the map; no traversal can beat a straight line at top speed and
//! every dynamic weight is ≥ its free-flow weight, so the heuristic never
//! overestimates and the returned path is optimal under the snapshot.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use fleet_core::{EdgeId, NodeId};

use crate::error::{SpatialError, SpatialResult};
use crate::graph::RoadGraph;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a planning query: an ordered edge sequence and its summed
/// dynamic cost in seconds.
#[derive(Debug, Clone)]
pub struct Route {
    /// Edges to traverse in order, from source to destination.
    pub edges: Vec<EdgeId>,
    /// Total weighted cost under the weights snapshot at call time.
    pub total_cost: f64,
}

impl Route {
    /// `true` if source and destination were the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── Planner trait ─────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine over the current dynamic weights.
pub trait Planner {
    /// Compute a minimum-cost route from `from` to `to`.
    ///
    /// `from == to` yields an empty route of cost zero.  Closed edges are
    /// never part of the result.
    fn plan(&self, graph: &RoadGraph, from: NodeId, to: NodeId) -> SpatialResult<Route>;
}

// ── AStarPlanner ──────────────────────────────────────────────────────────────

/// Best-first search with the admissible free-flow heuristic.
///
/// Frontier entries order by `(f, node id)` so ties among equal-score nodes
/// resolve to the lowest id — runs are reproducible.  Complexity is
/// O(E log V) with the binary-heap frontier.
pub struct AStarPlanner;

/// Heap entry.  `g` rides along so stale entries can be recognized on pop
/// without a separate closed set.
///
/// Equality is defined over the ordering key `(f, node)` — `g` is payload,
/// so `PartialEq` is hand-written to stay consistent with `Ord`.
#[derive(Copy, Clone, Debug)]
struct FrontierEntry {
    f: f64,
    g: f64,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Planner for AStarPlanner {
    fn plan(&self, graph: &RoadGraph, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        graph.node(from).ok_or(SpatialError::NodeNotFound(from))?;
        let goal_pos = graph.node(to).ok_or(SpatialError::NodeNotFound(to))?.pos;

        if from == to {
            return Ok(Route { edges: vec![], total_cost: 0.0 });
        }

        // Heuristic divisor: the fastest free-flow speed among open edges.
        // 0.0 (no open edges) degrades the search to plain Dijkstra.
        let max_speed = graph
            .edges()
            .filter(|e| !e.closed)
            .map(|e| e.base_speed)
            .fold(0.0_f64, f64::max);

        // best[v] = lowest known cost to reach v; prev[v] = edge that did it.
        let mut best: FxHashMap<NodeId, f64> = FxHashMap::default();
        let mut prev: FxHashMap<NodeId, EdgeId> = FxHashMap::default();
        let mut heap: BinaryHeap<Reverse<FrontierEntry>> = BinaryHeap::new();

        best.insert(from, 0.0);
        heap.push(Reverse(FrontierEntry { f: 0.0, g: 0.0, node: from }));

        while let Some(Reverse(entry)) = heap.pop() {
            if entry.node == to {
                return Ok(reconstruct(graph, &prev, from, to, entry.g));
            }
            // Stale entry: a cheaper path to this node was found after push.
            if best.get(&entry.node).is_some_and(|&g| entry.g > g) {
                continue;
            }

            for &edge_id in graph.out_edges(entry.node) {
                let edge = match graph.edge(edge_id) {
                    Some(e) if !e.closed => e,
                    _ => continue,
                };
                let g = entry.g + edge.weight;
                if best.get(&edge.to).is_none_or(|&known| g < known) {
                    best.insert(edge.to, g);
                    prev.insert(edge.to, edge_id);
                    let h = if max_speed > 0.0 {
                        graph
                            .node(edge.to)
                            .map_or(0.0, |n| n.pos.distance(goal_pos) / max_speed)
                    } else {
                        0.0
                    };
                    heap.push(Reverse(FrontierEntry { f: g + h, g, node: edge.to }));
                }
            }
        }

        Err(SpatialError::NoPathFound { from, to })
    }
}

fn reconstruct(
    graph: &RoadGraph,
    prev: &FxHashMap<NodeId, EdgeId>,
    from: NodeId,
    to: NodeId,
    total_cost: f64,
) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        // prev always holds an entry for every settled node other than the
        // start; the loop terminates because each step moves strictly
        // backwards along the discovered tree.
        let Some(&e) = prev.get(&cur) else { break };
        edges.push(e);
        cur = graph.edge(e).map_or(from, |edge| edge.from);
    }
    edges.reverse();
    Route { edges, total_cost }
}
