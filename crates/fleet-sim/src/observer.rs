//! Engine observer trait for progress reporting and event collection.

use fleet_core::AgentId;

use crate::stats::StatsSnapshot;

/// Callbacks invoked by [`Engine::run_ticks`][crate::Engine::run_ticks] at
/// tick boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — completion printer
///
/// ```rust,ignore
/// struct CompletionPrinter;
///
/// impl EngineObserver for CompletionPrinter {
///     fn on_trip_completed(&mut self, agent: AgentId) {
///         println!("{agent} arrived");
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called after every tick with a fresh stats snapshot.
    fn on_tick_end(&mut self, _tick: u64, _stats: &StatsSnapshot) {}

    /// Called once per agent that reached its destination this tick.
    fn on_trip_completed(&mut self, _agent: AgentId) {}

    /// Called once per agent whose plan was replaced at a re-plan boundary.
    fn on_reroute(&mut self, _agent: AgentId) {}
}

/// An [`EngineObserver`] that does nothing.  Use when driving the engine
/// without progress callbacks.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
