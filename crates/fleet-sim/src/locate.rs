//! Beacon-based localization: noisy candidate selection plus the
//! hysteresis-filtered state machine.
//!
//! Each tick every agent ranges against every beacon; the minimal noisy
//! range nominates an instantaneous candidate, and the candidate only
//! becomes the *inferred* beacon after `N` consecutive identical readings.
//! The confirmation delay suppresses oscillation when two beacons are at
//! similar range and the noise flips the winner tick to tick.

use fleet_core::{BeaconId, EdgeId, SimRng, Vec2};
use fleet_spatial::RoadGraph;

/// Confirmation state of the hysteresis filter.
///
/// Modeled as a tagged variant so "a pending candidate with no streak" and
/// similar illegal field combinations are unrepresentable.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lock {
    /// The current inferred beacon is confirmed.
    Stable,
    /// A different beacon has been read `streak` consecutive times but is
    /// not yet confirmed.
    Pending { candidate: BeaconId, streak: u32 },
}

/// Per-agent localization sub-state.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Localization {
    /// Confirmed beacon, if any.  `None` until the first commit.
    pub beacon: Option<BeaconId>,
    /// Edge inferred from the confirmed beacon's mapping.
    pub edge: Option<EdgeId>,
    pub lock: Lock,
    /// Simulation time of the last beacon switch, in seconds.
    pub last_switch_secs: f64,
}

impl Localization {
    pub fn new() -> Self {
        Self {
            beacon: None,
            edge: None,
            lock: Lock::Stable,
            last_switch_secs: 0.0,
        }
    }

    /// Feed one instantaneous candidate through the three-way hysteresis
    /// rule.  Returns `true` when the inferred beacon switched this call, so
    /// the caller can resolve the new beacon's mapped edge.
    ///
    /// The rule, exactly:
    /// 1. candidate == inferred → already stable; clear any pending state.
    /// 2. candidate == pending  → extend the streak; commit at `threshold`.
    /// 3. otherwise             → restart pending at streak 1.
    pub fn observe(&mut self, candidate: BeaconId, threshold: u32, now_secs: f64) -> bool {
        if self.beacon == Some(candidate) {
            self.lock = Lock::Stable;
            return false;
        }
        match self.lock {
            Lock::Pending { candidate: pending, streak } if pending == candidate => {
                let streak = streak + 1;
                if streak >= threshold {
                    self.beacon = Some(candidate);
                    self.lock = Lock::Stable;
                    self.last_switch_secs = now_secs;
                    true
                } else {
                    self.lock = Lock::Pending { candidate, streak };
                    false
                }
            }
            _ => {
                self.lock = Lock::Pending { candidate, streak: 1 };
                false
            }
        }
    }
}

impl Default for Localization {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the beacon with minimal noisy range from `pos`.
///
/// Each range is the true Euclidean distance plus an independent zero-mean
/// Gaussian sample of deviation `sigma`.  `beacon_ids` must be in ascending
/// order: the scan consumes one RNG draw per beacon in that fixed order
/// (reproducibility), and strict `<` comparison makes exact ties resolve to
/// the lowest id.  Returns `None` when there are no beacons.
pub fn instantaneous_candidate(
    graph: &RoadGraph,
    beacon_ids: &[BeaconId],
    pos: Vec2,
    sigma: f64,
    rng: &mut SimRng,
) -> Option<BeaconId> {
    let mut best: Option<(f64, BeaconId)> = None;
    for &id in beacon_ids {
        let Some(beacon) = graph.beacon(id) else { continue };
        let range = pos.distance(beacon.pos) + rng.gaussian(sigma);
        if best.is_none_or(|(b, _)| range < b) {
            best = Some((range, id));
        }
    }
    best.map(|(_, id)| id)
}
