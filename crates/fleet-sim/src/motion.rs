//! Per-tick agent advancement and the edge-entry policy.
//!
//! These are free functions rather than `Engine` methods so the borrow
//! splits stay obvious: each call takes exactly one `&mut Agent` and the
//! `&mut RoadGraph`, and per-agent updates never read another agent's
//! in-progress state.

use fleet_core::{OverflowPolicy, Vec2};
use fleet_spatial::{Edge, RoadGraph};

use crate::agent::{Agent, AgentState};
use crate::stats::FleetStats;

/// Entry check for a plan-head edge.
///
/// An explicitly closed edge is never enterable.  A capacity-saturated edge
/// is enterable under [`OverflowPolicy::Queue`] (over-capacity occupancy is
/// allowed, priced by the congestion weight) and blocked under
/// [`OverflowPolicy::ClosedWhenFull`] (full ⇒ treated as closed).
#[inline]
pub fn can_enter(edge: &Edge, policy: OverflowPolicy) -> bool {
    if edge.closed {
        return false;
    }
    match policy {
        OverflowPolicy::Queue => true,
        OverflowPolicy::ClosedWhenFull => edge.load < edge.capacity,
    }
}

/// Put `agent` onto `edge`: bump the edge load, reset progress, snap the
/// position to the edge's source node, and mark the agent `Moving`.
///
/// The caller has already verified the edge exists and is enterable (or, at
/// spawn, that entry is unconditional).
pub fn enter_edge(agent: &mut Agent, graph: &mut RoadGraph, edge: fleet_core::EdgeId) {
    let start_pos = graph
        .edge(edge)
        .and_then(|e| graph.node(e.from))
        .map(|n| n.pos);
    if let Some(e) = graph.edge_mut(edge) {
        e.load += 1;
    }
    agent.edge = Some(edge);
    agent.progress = 0.0;
    if let Some(pos) = start_pos {
        agent.pos = pos;
    }
    agent.state = AgentState::Moving;
}

/// Advance one `Moving` agent by `dt` seconds.
///
/// Implements the motion step: progress accrual, position interpolation,
/// edge completion with load handoff, plan consumption, and the
/// Finished/Waiting transitions.  Progress does not carry across edges — a
/// completed edge's overshoot is discarded and the next edge starts at 0.
pub fn advance(
    agent: &mut Agent,
    graph: &mut RoadGraph,
    dt: f64,
    policy: OverflowPolicy,
    stats: &mut FleetStats,
) {
    debug_assert_eq!(agent.state, AgentState::Moving);
    let Some(edge_id) = agent.edge else {
        // A Moving agent always has a current edge; tolerate the impossible
        // rather than poisoning the tick.
        agent.state = AgentState::Waiting;
        return;
    };
    let Some((from_pos, to_pos, length)) = edge_geometry(graph, edge_id) else {
        agent.state = AgentState::Waiting;
        return;
    };

    let step = agent.speed * dt;
    agent.progress += step;
    agent.total_distance += step;
    agent.total_time += dt;
    agent.pos = from_pos.lerp(to_pos, (agent.progress / length).min(1.0));

    if agent.progress < length {
        return;
    }

    // ── Edge completed ────────────────────────────────────────────────────
    if let Some(e) = graph.edge_mut(edge_id) {
        e.load = e.load.saturating_sub(1);
    }
    if agent.plan.front() == Some(&edge_id) {
        agent.plan.pop_front();
    }

    if agent.plan.is_empty() {
        agent.pos = to_pos;
        agent.state = AgentState::Finished;
        stats.record_trip(agent.total_time, agent.total_distance);
        return;
    }

    let head = agent.plan[0];
    match graph.edge(head) {
        Some(next) if can_enter(next, policy) => enter_edge(agent, graph, head),
        // Blocked (or the head vanished under a live edit): halt at the
        // boundary node, contributing no load.  No per-tick recheck — only
        // the periodic re-planner can resume this agent.
        _ => {
            agent.pos = to_pos;
            agent.state = AgentState::Waiting;
        }
    }
}

fn edge_geometry(graph: &RoadGraph, edge: fleet_core::EdgeId) -> Option<(Vec2, Vec2, f64)> {
    let e = graph.edge(edge)?;
    let from = graph.node(e.from)?.pos;
    let to = graph.node(e.to)?.pos;
    Some((from, to, e.length))
}
