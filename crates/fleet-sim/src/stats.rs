//! Fleet-wide trip aggregates and the externally visible snapshot.

/// Running sums over completed trips.  Updated at the moment an agent
/// reaches `Finished`; read by [`snapshot`](FleetStats::snapshot).
#[derive(Clone, Debug, Default)]
pub struct FleetStats {
    /// Elapsed simulation seconds (ticks × dt).
    pub elapsed_secs: f64,
    pub completed_trips: u64,
    /// Sum of the travel time of every completed trip.
    pub completed_travel_secs: f64,
    /// Sum of the distance of every completed trip.
    pub completed_distance: f64,
}

impl FleetStats {
    /// Fold a finished agent's trip into the aggregates.
    pub fn record_trip(&mut self, travel_secs: f64, distance: f64) {
        self.completed_trips += 1;
        self.completed_travel_secs += travel_secs;
        self.completed_distance += distance;
    }

    /// Produce the viewer-facing snapshot.
    ///
    /// `mean_speed` is the midpoint of the configured agent speed range; the
    /// approximate average delay compares actual travel time against the
    /// idealized `distance / mean_speed` baseline, floored at zero.
    pub fn snapshot(&self, active_agents: usize, mean_speed: f64) -> StatsSnapshot {
        let trips = self.completed_trips;
        let avg_travel_secs = if trips > 0 {
            self.completed_travel_secs / trips as f64
        } else {
            0.0
        };
        let avg_delay_secs = if trips > 0 && mean_speed > 0.0 {
            let ideal = self.completed_distance / mean_speed;
            ((self.completed_travel_secs - ideal) / trips as f64).max(0.0)
        } else {
            0.0
        };
        StatsSnapshot {
            elapsed_secs: self.elapsed_secs,
            active_agents,
            completed_trips: trips,
            avg_travel_secs,
            total_distance: self.completed_distance,
            avg_delay_secs,
        }
    }
}

/// Point-in-time statistics copy handed to external viewers.  Never a live
/// reference into engine state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSnapshot {
    pub elapsed_secs: f64,
    pub active_agents: usize,
    pub completed_trips: u64,
    pub avg_travel_secs: f64,
    pub total_distance: f64,
    /// Approximate average delay per completed trip, floored at zero.
    pub avg_delay_secs: f64,
}
