//! Spatial-subsystem error type.
//!
//! Everything here is non-fatal by design: a failed plan skips one spawn or
//! one reroute, and an invalid edge description is rejected before it can
//! corrupt the graph.  Unknown ids passed to removal operations are handled
//! as no-ops and never reach this enum.

use thiserror::Error;

use fleet_core::NodeId;

/// Errors produced by `fleet-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no path found from {from} to {to}")]
    NoPathFound { from: NodeId, to: NodeId },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("invalid edge: {0}")]
    InvalidEdge(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
