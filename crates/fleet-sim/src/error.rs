//! Engine error type.
//!
//! Every variant is non-fatal and locally contained: a failed spawn creates
//! no agent, a failed map load leaves the previous topology in place, and
//! nothing here ever aborts a tick.

use thiserror::Error;

use fleet_core::{CoreError, NodeId};
use fleet_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("routing failed: {0}")]
    Routing(#[from] SpatialError),

    #[error("spawn at {start} has an empty route (start equals destination)")]
    EmptyRoute { start: NodeId },

    #[error("map description invalid: {0}")]
    Map(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
