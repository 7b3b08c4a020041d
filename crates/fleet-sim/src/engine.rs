//! The `Engine` — owns all simulation state and drives the tick loop.
//!
//! The engine is an explicit value with single-writer semantics: an external
//! driver calls [`tick`](Engine::tick) on a fixed cadence, and topology
//! edits must never race a tick (enforced by ownership — every operation
//! takes `&mut self`).  There is no internal locking and no I/O inside a
//! tick; concurrent hosts put the engine behind one owning task.

use fleet_core::{AgentId, BeaconId, EdgeId, NodeId, SimParams, SimRng, Vec2};
use fleet_spatial::{AStarPlanner, Planner, RoadGraph, SpatialError};

use crate::agent::{Agent, AgentState};
use crate::error::{EngineError, EngineResult};
use crate::locate;
use crate::map::{LoadedMap, MapSpec};
use crate::motion;
use crate::observer::EngineObserver;
use crate::stats::{FleetStats, StatsSnapshot};

// ── TickReport ────────────────────────────────────────────────────────────────

/// What happened during one tick; consumed by observers and tests.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Agents that reached their destination and left the active set.
    pub finished: Vec<AgentId>,
    /// Agents whose remaining plan was replaced at a re-plan boundary.
    pub rerouted: Vec<AgentId>,
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// The simulation engine.
///
/// # Type parameter
///
/// `P` is the routing algorithm; [`AStarPlanner`] by default.  Swap it at
/// compile time for a different planner with no runtime overhead.
pub struct Engine<P: Planner = AStarPlanner> {
    graph: RoadGraph,
    planner: P,
    params: SimParams,
    rng: SimRng,

    /// Active agents in spawn order.  Iteration order is part of the
    /// determinism contract (RNG draws happen per agent, in this order).
    agents: Vec<Agent>,

    stats: FleetStats,
    ticks: u64,
    ticks_since_replan: u64,
    next_agent: AgentId,
}

impl Engine<AStarPlanner> {
    /// Engine with the default A* planner.  Validates `params`; the noise
    /// source is seeded here, so equal seeds give bit-identical runs.
    pub fn new(params: SimParams, seed: u64) -> EngineResult<Self> {
        Self::with_planner(params, seed, AStarPlanner)
    }
}

impl<P: Planner> Engine<P> {
    pub fn with_planner(params: SimParams, seed: u64, planner: P) -> EngineResult<Self> {
        params.validate()?;
        Ok(Self {
            graph: RoadGraph::new(),
            planner,
            params,
            rng: SimRng::new(seed),
            agents: Vec::new(),
            stats: FleetStats::default(),
            ticks: 0,
            ticks_since_replan: 0,
            next_agent: AgentId(0),
        })
    }

    // ── Topology loading & reset ──────────────────────────────────────────

    /// Replace the topology wholesale and reset all dynamic state.
    ///
    /// Beacons with an empty `edges` list are auto-mapped to their nearest
    /// edge.  On error the previous topology and run state are untouched.
    pub fn load_map(&mut self, spec: &MapSpec) -> EngineResult<LoadedMap> {
        let mut graph = RoadGraph::new();

        let nodes: Vec<NodeId> = spec
            .nodes
            .iter()
            .map(|n| graph.add_node(Vec2::new(n.x, n.y)))
            .collect();

        let mut edges = Vec::with_capacity(spec.edges.len());
        for (i, e) in spec.edges.iter().enumerate() {
            let &from = nodes
                .get(e.from)
                .ok_or_else(|| EngineError::Map(format!("edge {i}: no node {}", e.from)))?;
            let &to = nodes
                .get(e.to)
                .ok_or_else(|| EngineError::Map(format!("edge {i}: no node {}", e.to)))?;
            edges.push(graph.add_edge(from, to, e.length, e.capacity, e.base_speed)?);
        }

        let mut beacons = Vec::with_capacity(spec.beacons.len());
        for (i, b) in spec.beacons.iter().enumerate() {
            let id = graph.add_beacon(Vec2::new(b.x, b.y));
            if !b.edges.is_empty() {
                let mapped = b
                    .edges
                    .iter()
                    .map(|&j| {
                        edges.get(j).copied().ok_or_else(|| {
                            EngineError::Map(format!("beacon {i}: no edge {j}"))
                        })
                    })
                    .collect::<EngineResult<Vec<EdgeId>>>()?;
                graph.map_beacon(id, mapped)?;
            }
            beacons.push(id);
        }

        self.graph = graph;
        self.reset_run_state();
        Ok(LoadedMap { nodes, edges, beacons })
    }

    /// Keep the topology; reset loads, weights (back to free-flow), agents,
    /// and all counters.
    pub fn clear_simulation(&mut self) {
        self.graph.reset_dynamic_state();
        self.reset_run_state();
    }

    fn reset_run_state(&mut self) {
        self.agents.clear();
        self.stats = FleetStats::default();
        self.ticks = 0;
        self.ticks_since_replan = 0;
        self.next_agent = AgentId(0);
    }

    // ── Live topology edits ───────────────────────────────────────────────

    pub fn add_node(&mut self, pos: Vec2) -> NodeId {
        self.graph.add_node(pos)
    }

    /// Remove a node; every edge touching it goes through the agent-aware
    /// [`remove_edge`](Self::remove_edge) first.  Unknown id → no-op.
    pub fn remove_node(&mut self, id: NodeId) {
        let touching: Vec<EdgeId> = self
            .graph
            .edges()
            .filter(|e| e.from == id || e.to == id)
            .map(|e| e.id)
            .collect();
        for edge in touching {
            self.remove_edge(edge);
        }
        self.graph.remove_node(id);
    }

    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        length: f64,
        capacity: u32,
        base_speed: f64,
    ) -> EngineResult<EdgeId> {
        Ok(self.graph.add_edge(from, to, length, capacity, base_speed)?)
    }

    /// Remove an edge.  Agents whose current-edge reference is the removed
    /// edge (traversing it, or halted at its boundary) are despawned without
    /// trip credit; every other plan is truncated at the removed edge and
    /// repaired by a later re-plan.  Unknown id → no-op.
    pub fn remove_edge(&mut self, id: EdgeId) {
        self.agents.retain(|a| a.edge != Some(id));
        for agent in &mut self.agents {
            if let Some(i) = agent.plan.iter().position(|&e| e == id) {
                agent.plan.truncate(i);
            }
        }
        self.graph.remove_edge(id);
    }

    pub fn add_beacon(&mut self, pos: Vec2) -> BeaconId {
        self.graph.add_beacon(pos)
    }

    pub fn remove_beacon(&mut self, id: BeaconId) {
        self.graph.remove_beacon(id);
    }

    pub fn remap_beacon(&mut self, id: BeaconId) {
        self.graph.remap_beacon(id);
    }

    pub fn set_edge_closed(&mut self, id: EdgeId, closed: bool) {
        self.graph.set_edge_closed(id, closed);
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// Spawn a truck at `start` heading for `destination`.
    ///
    /// Plans under the current weights, samples the agent's fixed speed from
    /// the configured range, enters the first edge (incrementing its load)
    /// and starts it `Moving`.  Entry at spawn is unconditional: the
    /// overflow policy gates only in-flight edge handoffs, so a spawn onto a
    /// saturated edge joins it immediately (and is priced by the congestion
    /// weight) even under `ClosedWhenFull`.  On any failure — unknown node,
    /// no path, or a trivial start==destination route — no agent is created
    /// and the engine is unchanged.
    pub fn spawn_truck(&mut self, start: NodeId, destination: NodeId) -> EngineResult<AgentId> {
        let start_pos = self
            .graph
            .node(start)
            .ok_or(SpatialError::NodeNotFound(start))?
            .pos;
        let route = self.planner.plan(&self.graph, start, destination)?;
        if route.edges.is_empty() {
            return Err(EngineError::EmptyRoute { start });
        }

        let speed = self
            .rng
            .gen_range(self.params.agent_speed_min..=self.params.agent_speed_max);
        let id = self.next_agent;
        self.next_agent = id.next();

        let mut agent = Agent::new(id, start_pos, destination, speed, route.edges);
        let head = agent.plan[0];
        motion::enter_edge(&mut agent, &mut self.graph, head);
        self.agents.push(agent);
        Ok(id)
    }

    // ── The tick loop ─────────────────────────────────────────────────────

    /// Advance the simulation by one fixed step of `dt` seconds.
    ///
    /// Atomic from the caller's perspective: runs to completion, no partial
    /// application.  Phase order is fixed; see the crate-level docs.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        let dt = self.params.dt;
        self.ticks += 1;
        self.ticks_since_replan += 1;
        self.stats.elapsed_secs = self.ticks as f64 * dt;

        // ── ① Motion ──────────────────────────────────────────────────────
        for agent in self.agents.iter_mut() {
            if agent.state == AgentState::Moving {
                motion::advance(
                    agent,
                    &mut self.graph,
                    dt,
                    self.params.overflow_policy,
                    &mut self.stats,
                );
            }
        }

        // ── ② Prune ───────────────────────────────────────────────────────
        //
        // Finished agents leave before localization/replanning so they never
        // receive those updates.
        self.agents.retain(|a| {
            if a.state == AgentState::Finished {
                report.finished.push(a.id);
                false
            } else {
                true
            }
        });

        // ── ③ Localization (post-move positions) ──────────────────────────
        let beacon_ids = self.graph.beacon_ids_sorted();
        if !beacon_ids.is_empty() {
            let now = self.stats.elapsed_secs;
            let threshold = self.params.hysteresis_threshold;
            let sigma = self.params.localization_noise_sigma;
            for agent in self.agents.iter_mut() {
                let Some(candidate) = locate::instantaneous_candidate(
                    &self.graph,
                    &beacon_ids,
                    agent.pos,
                    sigma,
                    &mut self.rng,
                ) else {
                    continue;
                };
                if agent.loc.observe(candidate, threshold, now) {
                    agent.loc.edge = self
                        .graph
                        .beacon(candidate)
                        .and_then(|b| b.edges.first().copied());
                }
            }
        }

        // ── ④ Weights (post-move loads) ───────────────────────────────────
        self.graph.recompute_weights(
            self.params.congestion_sensitivity,
            self.params.congestion_exponent,
        );

        // ── ⑤ Re-plan boundary ────────────────────────────────────────────
        if self.ticks_since_replan >= self.params.replan_interval_ticks() {
            self.ticks_since_replan = 0;
            self.replan_agents(&mut report);
        }

        report
    }

    /// Run `n` ticks, feeding each tick's events to `observer`.
    pub fn run_ticks<O: EngineObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            let report = self.tick();
            for &agent in &report.finished {
                observer.on_trip_completed(agent);
            }
            for &agent in &report.rerouted {
                observer.on_reroute(agent);
            }
            let stats = self.stats();
            observer.on_tick_end(self.ticks, &stats);
        }
    }

    /// Re-route every eligible agent under the just-recomputed weights.
    ///
    /// `Moving`: plan from the current edge's target node; on success the
    /// remaining plan becomes `[current] + new` and the reroute counter
    /// bumps unconditionally (even for an identical path).  `Waiting`: plan
    /// from the boundary node and attempt entry of the new head once —
    /// there is no other way a waiting agent resumes.  `NoPathFound` leaves
    /// the old plan untouched in both cases.
    fn replan_agents(&mut self, report: &mut TickReport) {
        let policy = self.params.overflow_policy;
        for agent in self.agents.iter_mut() {
            let Some(current) = agent.edge else { continue };
            let Some(boundary) = self.graph.edge(current).map(|e| e.to) else {
                continue;
            };
            match agent.state {
                AgentState::Moving => {
                    match self.planner.plan(&self.graph, boundary, agent.destination) {
                        Ok(route) => {
                            agent.plan = std::iter::once(current).chain(route.edges).collect();
                            agent.reroutes += 1;
                            report.rerouted.push(agent.id);
                        }
                        Err(_) => {}
                    }
                }
                AgentState::Waiting => {
                    match self.planner.plan(&self.graph, boundary, agent.destination) {
                        Ok(route) if route.edges.is_empty() => {
                            // The blocked remainder looped back to a node the
                            // agent is already standing on — the trip is done.
                            agent.plan.clear();
                            agent.state = AgentState::Finished;
                            self.stats.record_trip(agent.total_time, agent.total_distance);
                        }
                        Ok(route) => {
                            agent.plan = route.edges.into();
                            agent.reroutes += 1;
                            report.rerouted.push(agent.id);
                            let head = agent.plan[0];
                            if self
                                .graph
                                .edge(head)
                                .is_some_and(|e| motion::can_enter(e, policy))
                            {
                                motion::enter_edge(agent, &mut self.graph, head);
                            }
                        }
                        Err(_) => {}
                    }
                }
                _ => {}
            }
        }
        // A waiting agent may have finished in place above.
        self.agents.retain(|a| {
            if a.state == AgentState::Finished {
                report.finished.push(a.id);
                false
            } else {
                true
            }
        });
    }

    // ── Read access ───────────────────────────────────────────────────────

    /// Point-in-time statistics snapshot for external viewers.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot(self.agents.len(), self.params.mean_speed())
    }

    /// Active agents in spawn order (read-only; viewers copy what they need).
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Completed ticks since construction or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Elapsed simulation seconds (`ticks × dt`).
    pub fn elapsed_secs(&self) -> f64 {
        self.stats.elapsed_secs
    }
}
