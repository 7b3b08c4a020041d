//! crossroads — smallest end-to-end demo of the fleet simulation engine.
//!
//! A depot and a warehouse are connected by two competing routes: a short
//! highway with capacity 2 and a longer ring road with capacity 6.  Trucks
//! spawn in waves at the depot; halfway through the run the highway closes
//! for "maintenance" and the periodic re-planner pushes traffic onto the
//! ring road until it reopens.

use std::time::Instant;

use anyhow::Result;

use fleet_core::{AgentId, OverflowPolicy, SimParams};
use fleet_sim::{
    AgentState, BeaconSpec, EdgeSpec, Engine, EngineObserver, MapSpec, NodeSpec, StatsSnapshot,
};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED: u64 = 42;
const TRUCK_WAVES: usize = 6;
const TRUCKS_PER_WAVE: usize = 3;
const WAVE_GAP_TICKS: u64 = 10;
const CLOSURE_AT_TICK: u64 = 60;
const REOPEN_AT_TICK: u64 = 120;
const TOTAL_TICKS: u64 = 240;
const REPORT_EVERY_TICKS: u64 = 30;

// ── Map ───────────────────────────────────────────────────────────────────────

/// depot ── highway ──▶ warehouse          (1 000 u, cap 2, 25 u/s)
/// depot ──▶ ring_a ──▶ ring_b ──▶ warehouse (3 × 600 u, cap 6, 20 u/s)
///
/// Beacons sit along each corridor; the ring beacon is mapped to both of its
/// adjacent segments explicitly, the rest auto-map to their nearest edge.
fn crossroads_map() -> MapSpec {
    MapSpec {
        nodes: vec![
            NodeSpec { x: 0.0, y: 0.0 },       // 0: depot
            NodeSpec { x: 1_000.0, y: 0.0 },   // 1: warehouse
            NodeSpec { x: 300.0, y: 400.0 },   // 2: ring_a
            NodeSpec { x: 700.0, y: 400.0 },   // 3: ring_b
        ],
        edges: vec![
            EdgeSpec { from: 0, to: 1, length: 1_000.0, capacity: 2, base_speed: 25.0 },
            EdgeSpec { from: 0, to: 2, length: 600.0, capacity: 6, base_speed: 20.0 },
            EdgeSpec { from: 2, to: 3, length: 600.0, capacity: 6, base_speed: 20.0 },
            EdgeSpec { from: 3, to: 1, length: 600.0, capacity: 6, base_speed: 20.0 },
        ],
        beacons: vec![
            BeaconSpec { x: 500.0, y: 20.0, edges: vec![] },       // highway midpoint
            BeaconSpec { x: 500.0, y: 420.0, edges: vec![1, 2] },  // ring, both inbound legs
            BeaconSpec { x: 850.0, y: 300.0, edges: vec![] },      // ring exit
        ],
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct ConsoleObserver {
    completed: usize,
    rerouted: usize,
}

impl EngineObserver for ConsoleObserver {
    fn on_tick_end(&mut self, tick: u64, stats: &StatsSnapshot) {
        if tick % REPORT_EVERY_TICKS == 0 {
            println!(
                "t={:>4} s  active {:>2}  done {:>2}  avg trip {:>6.1} s  avg delay {:>5.1} s",
                stats.elapsed_secs,
                stats.active_agents,
                stats.completed_trips,
                stats.avg_travel_secs,
                stats.avg_delay_secs,
            );
        }
    }

    fn on_trip_completed(&mut self, _agent: AgentId) {
        self.completed += 1;
    }

    fn on_reroute(&mut self, _agent: AgentId) {
        self.rerouted += 1;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== crossroads — fleet simulation demo ===");
    println!("Trucks: {}  |  Seed: {SEED}", TRUCK_WAVES * TRUCKS_PER_WAVE);
    println!();

    let params = SimParams {
        dt: 1.0,
        hysteresis_threshold: 3,
        localization_noise_sigma: 8.0,
        congestion_sensitivity: 1.0,
        congestion_exponent: 2.0,
        replan_interval_secs: 10.0,
        agent_speed_min: 15.0,
        agent_speed_max: 25.0,
        overflow_policy: OverflowPolicy::ClosedWhenFull,
    };

    let mut engine = Engine::new(params, SEED)?;
    let map = engine.load_map(&crossroads_map())?;
    let depot = map.nodes[0];
    let warehouse = map.nodes[1];
    let highway = map.edges[0];
    println!(
        "Map: {} nodes, {} edges, {} beacons",
        engine.graph().node_count(),
        engine.graph().edge_count(),
        engine.graph().beacon_count()
    );
    println!();

    let mut observer = ConsoleObserver::default();
    let t0 = Instant::now();

    for _ in 0..TRUCK_WAVES {
        for _ in 0..TRUCKS_PER_WAVE {
            engine.spawn_truck(depot, warehouse)?;
        }
        engine.run_ticks(WAVE_GAP_TICKS, &mut observer);
        if engine.ticks() == CLOSURE_AT_TICK {
            println!("-- highway closed for maintenance --");
            engine.set_edge_closed(highway, true);
        }
    }

    while engine.ticks() < TOTAL_TICKS {
        if engine.ticks() == REOPEN_AT_TICK {
            println!("-- highway reopened --");
            engine.set_edge_closed(highway, false);
        }
        engine.run_ticks(1, &mut observer);
    }

    let elapsed = t0.elapsed();
    println!();
    println!("Simulation complete in {:.3} s wall clock", elapsed.as_secs_f64());
    println!(
        "  trips completed : {}  ({} reroute events)",
        observer.completed, observer.rerouted
    );

    let stragglers: Vec<_> = engine
        .agents()
        .iter()
        .filter(|a| a.state != AgentState::Finished)
        .collect();
    if !stragglers.is_empty() {
        println!();
        println!("{:<10} {:<9} {:<10} {:<8}", "Truck", "State", "Beacon", "Reroutes");
        println!("{}", "-".repeat(40));
        for agent in stragglers {
            println!(
                "{:<10} {:<9} {:<10} {:<8}",
                agent.id.0,
                match agent.state {
                    AgentState::Idle => "idle",
                    AgentState::Moving => "moving",
                    AgentState::Waiting => "waiting",
                    AgentState::Broken => "broken",
                    AgentState::Finished => "finished",
                },
                agent.loc.beacon.map_or_else(|| "-".into(), |b| b.0.to_string()),
                agent.reroutes,
            );
        }
    }

    Ok(())
}
