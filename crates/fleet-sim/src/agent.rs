//! Per-agent state: position, plan, lifecycle, and trip metrics.

use std::collections::VecDeque;

use fleet_core::{AgentId, EdgeId, NodeId, Vec2};

use crate::locate::Localization;

/// Lifecycle of a mobile agent.
///
/// `Broken` is reserved for host-driven incident injection; no engine
/// transition produces it today, but viewers already render it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentState {
    Idle,
    Moving,
    Waiting,
    Broken,
    /// Terminal; the agent is pruned from the active set at the end of the
    /// motion phase of the tick in which it is reached.
    Finished,
}

/// A simulated truck following a plan toward its destination.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id: AgentId,

    /// Interpolated position along the current edge.
    pub pos: Vec2,

    /// Edge currently being traversed (or, while `Waiting`, the edge just
    /// completed — its target node is where the agent is halted).
    pub edge: Option<EdgeId>,

    /// Distance progressed along `edge`, in length units.
    pub progress: f64,

    /// Fixed traversal speed in units/second, sampled once at spawn.
    pub speed: f64,

    pub state: AgentState,

    /// Remaining ordered edge sequence.  While `Moving`, the head equals the
    /// current edge.
    pub plan: VecDeque<EdgeId>,

    /// Trip goal.
    pub destination: NodeId,

    /// Beacon-based localization sub-state.
    pub loc: Localization,

    // ── Trip metrics ──────────────────────────────────────────────────────
    pub total_distance: f64,
    pub total_time: f64,
    pub reroutes: u32,
}

impl Agent {
    /// A freshly spawned agent: `Idle` at `pos`, plan installed but no edge
    /// entered yet — the spawner enters the first edge immediately after.
    pub fn new(
        id: AgentId,
        pos: Vec2,
        destination: NodeId,
        speed: f64,
        plan: Vec<EdgeId>,
    ) -> Self {
        Self {
            id,
            pos,
            edge: None,
            progress: 0.0,
            speed,
            state: AgentState::Idle,
            plan: plan.into(),
            destination,
            loc: Localization::new(),
            total_distance: 0.0,
            total_time: 0.0,
            reroutes: 0,
        }
    }
}
