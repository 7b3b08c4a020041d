//! `fleet-spatial` — road graph, congestion cost model, and routing.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`graph`]      | `RoadGraph` (nodes, edges, beacons, adjacency index)      |
//! | [`congestion`] | `dynamic_weight` — the load-driven edge cost function     |
//! | [`router`]     | `Planner` trait, `Route`, `AStarPlanner`                  |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.        |

pub mod congestion;
pub mod error;
pub mod graph;
pub mod router;


pub use congestion::dynamic_weight;
pub use error::{SpatialError, SpatialResult};
pub use graph::{Beacon, Edge, Node, RoadGraph};
pub use router::{AStarPlanner, Planner, Route};
