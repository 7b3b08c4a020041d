//! Load-driven congestion cost model.
//!
//! A volume-delay function in the BPR family:
//!
//! ```text
//! weight = T0 * (1 + α · (n / C)^β)
//! ```
//!
//! Pure and memoryless — the engine recomputes it for every edge every tick
//! from the load measured after the motion phase.  For fixed `C`, `T0`, `α`,
//! `β` it is monotonic non-decreasing in `n`, and always ≥ `T0` (congestion
//! factor ≥ 1), which is what makes the planner's free-flow heuristic
//! admissible.

/// Dynamic traversal cost in seconds for an edge carrying `load` agents.
///
/// `capacity` must be ≥ 1 — the graph rejects zero-capacity edges at
/// creation, so the division is always defined here.
#[inline]
pub fn dynamic_weight(load: u32, capacity: u32, free_flow_secs: f64, alpha: f64, beta: f64) -> f64 {
    debug_assert!(capacity >= 1, "zero-capacity edge reached the cost model");
    let ratio = load as f64 / capacity as f64;
    free_flow_secs * (1.0 + alpha * ratio.powf(beta))
}
