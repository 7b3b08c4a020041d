//! Unit tests for fleet-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, BeaconId, EdgeId, NodeId};

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(NodeId(100) > NodeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(BeaconId::INVALID.0, u32::MAX);
    }

    #[test]
    fn next_advances() {
        assert_eq!(EdgeId(6).next(), EdgeId(7));
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }
}

#[cfg(test)]
mod geo {
    use crate::Vec2;

    #[test]
    fn zero_distance() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        let d = Vec2::new(0.0, 0.0).distance(Vec2::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 20.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(5.0, 10.0));
        // Out-of-range t clamps rather than extrapolating.
        assert_eq!(a.lerp(b, 2.0), b);
    }

    #[test]
    fn segment_distance_perpendicular() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let d = Vec2::new(5.0, 3.0).segment_distance(a, b);
        assert!((d - 3.0).abs() < 1e-12);
    }

    #[test]
    fn segment_distance_past_endpoint() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        // Closest point is the endpoint b, not the infinite line.
        let d = Vec2::new(13.0, 4.0).segment_distance(a, b);
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn segment_distance_degenerate() {
        let p = Vec2::new(1.0, 1.0);
        let d = Vec2::new(4.0, 5.0).segment_distance(p, p);
        assert!((d - 5.0).abs() < 1e-12);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..16 {
            assert_eq!(a.gen_range(0u64..1_000_000), b.gen_range(0u64..1_000_000));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SimRng::new(1);
        let mut b = SimRng::new(2);
        let va: Vec<u64> = (0..8).map(|_| a.gen_range(0u64..u64::MAX)).collect();
        let vb: Vec<u64> = (0..8).map(|_| b.gen_range(0u64..u64::MAX)).collect();
        assert_ne!(va, vb);
    }

    #[test]
    fn gaussian_zero_sigma_is_exact_zero() {
        let mut rng = SimRng::new(7);
        for _ in 0..8 {
            assert_eq!(rng.gaussian(0.0), 0.0);
        }
    }

    #[test]
    fn gaussian_is_roughly_centered() {
        let mut rng = SimRng::new(99);
        let n = 10_000;
        let mean: f64 = (0..n).map(|_| rng.gaussian(2.0)).sum::<f64>() / n as f64;
        // σ/√n ≈ 0.02; a ±0.1 band is ~5 standard errors.
        assert!(mean.abs() < 0.1, "sample mean {mean} too far from 0");
    }

    #[test]
    fn child_streams_are_independent() {
        let mut parent = SimRng::new(5);
        let mut c0 = parent.child(0);
        let mut c1 = parent.child(1);
        let a: Vec<u64> = (0..8).map(|_| c0.gen_range(0u64..u64::MAX)).collect();
        let b: Vec<u64> = (0..8).map(|_| c1.gen_range(0u64..u64::MAX)).collect();
        assert_ne!(a, b);
    }
}

#[cfg(test)]
mod params {
    use crate::{OverflowPolicy, SimParams};

    #[test]
    fn defaults_validate() {
        assert!(SimParams::default().validate().is_ok());
    }

    #[test]
    fn zero_dt_rejected() {
        let p = SimParams { dt: 0.0, ..Default::default() };
        assert!(p.validate().is_err());
    }

    #[test]
    fn zero_threshold_rejected() {
        let p = SimParams { hysteresis_threshold: 0, ..Default::default() };
        assert!(p.validate().is_err());
    }

    #[test]
    fn negative_congestion_params_rejected() {
        // α < 0 would push weights below free-flow and break the planner's
        // weight ≥ T0 guarantee.
        let p = SimParams { congestion_sensitivity: -1.0, ..Default::default() };
        assert!(p.validate().is_err());
        let q = SimParams { congestion_exponent: -2.0, ..Default::default() };
        assert!(q.validate().is_err());
        let r = SimParams { congestion_exponent: f64::NAN, ..Default::default() };
        assert!(r.validate().is_err());
    }

    #[test]
    fn inverted_speed_range_rejected() {
        let p = SimParams { agent_speed_min: 20.0, agent_speed_max: 10.0, ..Default::default() };
        assert!(p.validate().is_err());
    }

    #[test]
    fn replan_interval_rounds_up() {
        let p = SimParams { dt: 1.0, replan_interval_secs: 2.5, ..Default::default() };
        assert_eq!(p.replan_interval_ticks(), 3);
        // Interval shorter than one step still re-plans every tick.
        let q = SimParams { dt: 1.0, replan_interval_secs: 0.25, ..Default::default() };
        assert_eq!(q.replan_interval_ticks(), 1);
    }

    #[test]
    fn default_policy_is_queue() {
        assert_eq!(SimParams::default().overflow_policy, OverflowPolicy::Queue);
    }
}
