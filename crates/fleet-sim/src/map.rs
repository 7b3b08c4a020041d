//! Wholesale map descriptions for [`Engine::load_map`][crate::Engine::load_map].
//!
//! Descriptions reference entities positionally (`edges[i].from` indexes
//! into `nodes`) so an editor can serialize a map without knowing which ids
//! the engine will allocate.  `load_map` returns the allocated handles in
//! the same order.

/// One node of a map description.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSpec {
    pub x: f64,
    pub y: f64,
}

/// One directed edge of a map description.  `from`/`to` index into
/// `MapSpec::nodes`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeSpec {
    pub from: usize,
    pub to: usize,
    pub length: f64,
    pub capacity: u32,
    pub base_speed: f64,
}

/// One beacon of a map description.  `edges` indexes into `MapSpec::edges`;
/// leave it empty to have the engine auto-map the beacon to its nearest
/// edge.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeaconSpec {
    pub x: f64,
    pub y: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub edges: Vec<usize>,
}

/// A complete topology description.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapSpec {
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
    pub beacons: Vec<BeaconSpec>,
}

/// Handles allocated by a successful `load_map`, index-aligned with the
/// description that produced them.
#[derive(Clone, Debug)]
pub struct LoadedMap {
    pub nodes: Vec<fleet_core::NodeId>,
    pub edges: Vec<fleet_core::EdgeId>,
    pub beacons: Vec<fleet_core::BeaconId>,
}
