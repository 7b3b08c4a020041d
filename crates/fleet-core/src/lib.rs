//! `fleet-core` — foundational types for the `fleetsim` traffic engine.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It
//! intentionally has no `fleet-*` dependencies and minimal external ones
//! (only `rand`/`rand_distr` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`ids`]    | `NodeId`, `EdgeId`, `BeaconId`, `AgentId`              |
//! | [`geo`]    | `Vec2`, point-to-segment distance, interpolation       |
//! | [`params`] | `SimParams`, `OverflowPolicy`                          |
//! | [`rng`]    | `SimRng` (seeded, with Gaussian noise sampling)        |
//! | [`error`]  | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.       |

pub mod error;
pub mod geo;
pub mod ids;
pub mod params;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::Vec2;
pub use ids::{AgentId, BeaconId, EdgeId, NodeId};
pub use params::{OverflowPolicy, SimParams};
pub use rng::SimRng;
