//! `fleet-sim` — the tick orchestrator and public engine API.
//!
//! # Tick phases
//!
//! ```text
//! tick():
//!   ① Motion        — advance every Moving agent; complete edges, apply the
//!                     edge-entry policy, transition Finished/Waiting.
//!   ② Prune         — drop agents that reached Finished this tick.
//!   ③ Localization  — noisy beacon candidate + hysteresis filter, at the
//!                     post-move positions.
//!   ④ Weights       — recompute every edge's congestion cost from the
//!                     post-move loads.
//!   ⑤ Re-plan       — at counter-driven boundaries, reroute Moving agents
//!                     and retry blocked Waiting agents under fresh weights.
//! ```
//!
//! The ordering is load-bearing: re-planning must see post-move congestion
//! and post-move localization, never stale pre-tick values.
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`agent`]    | `Agent`, `AgentState`                                  |
//! | [`locate`]   | `Localization`, `Lock`, candidate selection            |
//! | [`motion`]   | per-tick advancement and the edge-entry policy         |
//! | [`engine`]   | `Engine`, `TickReport`, the public operations          |
//! | [`map`]      | `MapSpec` and friends for wholesale topology loads     |
//! | [`stats`]    | `FleetStats` aggregates, `StatsSnapshot`               |
//! | [`observer`] | `EngineObserver`, `NoopObserver`                       |
//! | [`error`]    | `EngineError`, `EngineResult<T>`                       |

pub mod agent;
pub mod engine;
pub mod error;
pub mod locate;
pub mod map;
pub mod motion;
pub mod observer;
pub mod stats;


pub use agent::{Agent, AgentState};
pub use engine::{Engine, TickReport};
pub use error::{EngineError, EngineResult};
pub use locate::{Localization, Lock};
pub use map::{BeaconSpec, EdgeSpec, LoadedMap, MapSpec, NodeSpec};
pub use observer::{EngineObserver, NoopObserver};
pub use stats::{FleetStats, StatsSnapshot};
