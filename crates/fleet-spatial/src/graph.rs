//! Road graph representation with live-edit support.
//!
//! # Data layout
//!
//! The graph must absorb node/edge/beacon insertions and removals at any
//! point in a run, so entities live in id-keyed `FxHashMap` stores rather
//! than a build-once CSR layout.  Two derived indexes are maintained
//! incrementally on every edit:
//!
//! - `out_edges: NodeId → Vec<EdgeId>` — adjacency, for near-constant-time
//!   neighbor expansion in the planner;
//! - the id allocators — ids are handed out monotonically and never reused,
//!   so a stale handle held by a caller can only miss, never alias.
//!
//! # Cascade contracts
//!
//! Removing a node removes every edge touching it; removing an edge purges
//! it from every beacon's mapping.  Dangling cross-references are therefore
//! impossible by construction.  Operations on unknown ids are no-ops.

use rustc_hash::FxHashMap;

use fleet_core::{BeaconId, EdgeId, NodeId, Vec2};

use crate::congestion::dynamic_weight;
use crate::error::{SpatialError, SpatialResult};

// ── Entities ──────────────────────────────────────────────────────────────────

/// A fixed graph vertex (junction or facility).  Immutable once created.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub pos: Vec2,
}

/// A directed, capacity-limited arc between two nodes.
///
/// `length`, `capacity`, `base_speed` and `free_flow_secs` are structural;
/// `load`, `weight` and `closed` are dynamic.  `weight` is recomputed from
/// `load` every tick by [`RoadGraph::recompute_weights`] and is the only
/// cost the planner ever accumulates.
#[derive(Clone, Debug)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    /// Physical length in length units.
    pub length: f64,
    /// Maximum simultaneous occupants before the overflow policy applies.
    pub capacity: u32,
    /// Free-flow traversal speed in units/second.
    pub base_speed: f64,
    /// Free-flow traversal time in seconds (`length / base_speed`).
    pub free_flow_secs: f64,
    /// Number of agents currently occupying this edge.
    pub load: u32,
    /// Congestion-inflated traversal cost in seconds.
    pub weight: f64,
    /// Explicitly closed by an editor; never offered by the planner.
    pub closed: bool,
}

/// A fixed positioning reference point mapped to the edges it covers.
#[derive(Clone, Debug)]
pub struct Beacon {
    pub id: BeaconId,
    pub pos: Vec2,
    /// Edges whose signal coverage this beacon represents.  Every entry
    /// references an existing edge (cascade-purged on edge removal).
    pub edges: Vec<EdgeId>,
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// The mutable road topology: nodes, edges, beacons, and the adjacency index.
pub struct RoadGraph {
    nodes: FxHashMap<NodeId, Node>,
    edges: FxHashMap<EdgeId, Edge>,
    beacons: FxHashMap<BeaconId, Beacon>,

    /// Outgoing-edge adjacency index, updated on every edge edit.
    out_edges: FxHashMap<NodeId, Vec<EdgeId>>,

    next_node: NodeId,
    next_edge: EdgeId,
    next_beacon: BeaconId,
}

impl Default for RoadGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl RoadGraph {
    /// An empty graph with all id allocators at zero.
    pub fn new() -> Self {
        Self {
            nodes: FxHashMap::default(),
            edges: FxHashMap::default(),
            beacons: FxHashMap::default(),
            out_edges: FxHashMap::default(),
            next_node: NodeId(0),
            next_edge: EdgeId(0),
            next_beacon: BeaconId(0),
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn beacon_count(&self) -> usize {
        self.beacons.len()
    }

    // ── Node operations ───────────────────────────────────────────────────

    /// Add a node and return its handle.
    pub fn add_node(&mut self, pos: Vec2) -> NodeId {
        let id = self.next_node;
        self.next_node = id.next();
        self.nodes.insert(id, Node { id, pos });
        self.out_edges.insert(id, Vec::new());
        id
    }

    /// Remove a node.  Cascades: every edge touching the node is removed
    /// (which in turn purges beacon mappings).  Unknown id → no-op.
    pub fn remove_node(&mut self, id: NodeId) {
        if self.nodes.remove(&id).is_none() {
            return;
        }
        let touching: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|e| e.from == id || e.to == id)
            .map(|e| e.id)
            .collect();
        for edge in touching {
            self.remove_edge(edge);
        }
        self.out_edges.remove(&id);
    }

    // ── Edge operations ───────────────────────────────────────────────────

    /// Add a directed edge.
    ///
    /// Validates structure at creation time: both endpoints must exist,
    /// `length` and `base_speed` must be positive and finite, and
    /// `capacity >= 1` (the congestion formula divides by it).  The edge
    /// starts open, unloaded, at its free-flow weight.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        length: f64,
        capacity: u32,
        base_speed: f64,
    ) -> SpatialResult<EdgeId> {
        if !self.nodes.contains_key(&from) {
            return Err(SpatialError::NodeNotFound(from));
        }
        if !self.nodes.contains_key(&to) {
            return Err(SpatialError::NodeNotFound(to));
        }
        if !(length > 0.0 && length.is_finite()) {
            return Err(SpatialError::InvalidEdge(format!("length {length} must be positive")));
        }
        if capacity == 0 {
            return Err(SpatialError::InvalidEdge("capacity must be >= 1".into()));
        }
        if !(base_speed > 0.0 && base_speed.is_finite()) {
            return Err(SpatialError::InvalidEdge(format!(
                "base_speed {base_speed} must be positive"
            )));
        }

        let id = self.next_edge;
        self.next_edge = id.next();
        let free_flow_secs = length / base_speed;
        self.edges.insert(
            id,
            Edge {
                id,
                from,
                to,
                length,
                capacity,
                base_speed,
                free_flow_secs,
                load: 0,
                weight: free_flow_secs,
                closed: false,
            },
        );
        self.out_edges.entry(from).or_default().push(id);
        Ok(id)
    }

    /// Remove an edge, purging it from the adjacency index and from every
    /// beacon mapping.  Unknown id → no-op.
    pub fn remove_edge(&mut self, id: EdgeId) {
        let Some(edge) = self.edges.remove(&id) else {
            return;
        };
        if let Some(out) = self.out_edges.get_mut(&edge.from) {
            out.retain(|&e| e != id);
        }
        for beacon in self.beacons.values_mut() {
            beacon.edges.retain(|&e| e != id);
        }
    }

    /// Open or close an edge.  Closed edges are never offered as planner
    /// neighbors and block agent entry.  Unknown id → no-op.
    pub fn set_edge_closed(&mut self, id: EdgeId, closed: bool) {
        if let Some(edge) = self.edges.get_mut(&id) {
            edge.closed = closed;
        }
    }

    // ── Beacon operations ─────────────────────────────────────────────────

    /// Add a beacon, auto-mapped to the nearest edge by point-to-segment
    /// distance.  With no edges in the graph the mapping starts empty and
    /// stays empty until [`remap_beacon`](Self::remap_beacon) is called.
    pub fn add_beacon(&mut self, pos: Vec2) -> BeaconId {
        let id = self.next_beacon;
        self.next_beacon = id.next();
        let edges = self.nearest_edge(pos).into_iter().collect();
        self.beacons.insert(id, Beacon { id, pos, edges });
        id
    }

    /// Remove a beacon.  Unknown id → no-op.
    pub fn remove_beacon(&mut self, id: BeaconId) {
        self.beacons.remove(&id);
    }

    /// Replace a beacon's mapping with an explicit edge list.
    ///
    /// Every entry must reference an existing edge — the invariant the
    /// cascade contracts protect.  Unknown beacon id → no-op.
    pub fn map_beacon(&mut self, id: BeaconId, edges: Vec<EdgeId>) -> SpatialResult<()> {
        if let Some(&missing) = edges.iter().find(|e| !self.edges.contains_key(e)) {
            return Err(SpatialError::InvalidEdge(format!(
                "beacon mapping references missing edge {missing}"
            )));
        }
        if let Some(beacon) = self.beacons.get_mut(&id) {
            beacon.edges = edges;
        }
        Ok(())
    }

    /// Re-map a beacon to its current nearest edge — the externally
    /// triggered repair for beacons added before any edge existed, or after
    /// heavy topology edits.  Unknown id → no-op.
    pub fn remap_beacon(&mut self, id: BeaconId) {
        let Some(pos) = self.beacons.get(&id).map(|b| b.pos) else {
            return;
        };
        let edges: Vec<EdgeId> = self.nearest_edge(pos).into_iter().collect();
        if let Some(beacon) = self.beacons.get_mut(&id) {
            beacon.edges = edges;
        }
    }

    /// The edge whose segment lies closest to `pos`, ties broken by lowest
    /// edge id.  Linear scan: O(E), fine at editor scale and robust under
    /// arbitrary live edits (no index to rebuild).
    pub fn nearest_edge(&self, pos: Vec2) -> Option<EdgeId> {
        let mut ids: Vec<EdgeId> = self.edges.keys().copied().collect();
        ids.sort_unstable();
        let mut best: Option<(f64, EdgeId)> = None;
        for id in ids {
            let edge = &self.edges[&id];
            let a = self.nodes[&edge.from].pos;
            let b = self.nodes[&edge.to].pos;
            let d = pos.segment_distance(a, b);
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, id));
            }
        }
        best.map(|(_, id)| id)
    }

    // ── Dynamic state ─────────────────────────────────────────────────────

    /// Recompute every edge's dynamic weight from its current load.
    ///
    /// Pure per-edge; order-independent.  Called once per tick after the
    /// motion phase so the re-planner sees post-move congestion.
    pub fn recompute_weights(&mut self, alpha: f64, beta: f64) {
        for edge in self.edges.values_mut() {
            edge.weight =
                dynamic_weight(edge.load, edge.capacity, edge.free_flow_secs, alpha, beta);
        }
    }

    /// Reset all dynamic edge state: loads to zero, weights back to
    /// free-flow.  Closed flags are topology edits and survive.
    pub fn reset_dynamic_state(&mut self) {
        for edge in self.edges.values_mut() {
            edge.load = 0;
            edge.weight = edge.free_flow_secs;
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Mutable edge access — used by the engine's motion phase to maintain
    /// the load counters.
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(&id)
    }

    pub fn beacon(&self, id: BeaconId) -> Option<&Beacon> {
        self.beacons.get(&id)
    }

    /// Outgoing edges of `node`.  Unknown node → empty slice.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> &[EdgeId] {
        self.out_edges.get(&node).map_or(&[], Vec::as_slice)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn beacons(&self) -> impl Iterator<Item = &Beacon> {
        self.beacons.values()
    }

    /// Beacon ids in ascending order — the fixed iteration order the
    /// localization filter uses so RNG draws are reproducible.
    pub fn beacon_ids_sorted(&self) -> Vec<BeaconId> {
        let mut ids: Vec<BeaconId> = self.beacons.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
