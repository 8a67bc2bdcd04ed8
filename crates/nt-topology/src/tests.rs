//! Unit tests for bounds and position tracking.

#[cfg(test)]
mod bounds {
    use nt_core::Vec3;

    use crate::bounds::TopoBounds;

    #[test]
    fn first_observation_defines_rectangle() {
        let mut b = TopoBounds::new();
        assert!(b.is_empty());
        b.widen(Vec3::new(3.0, -2.0, 0.0));
        assert!(!b.is_empty());
        assert_eq!((b.min_x, b.max_x), (3.0, 3.0));
        assert_eq!((b.min_y, b.max_y), (-2.0, -2.0));
    }

    #[test]
    fn monotone_under_any_sequence() {
        let mut b = TopoBounds::new();
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 5.0, 0.0),
            Vec3::new(-3.0, 2.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0), // interior point: no change
        ];
        let mut prev: Option<TopoBounds> = None;
        for pos in positions {
            b.widen(pos);
            if let Some(p) = prev {
                assert!(b.min_x <= p.min_x);
                assert!(b.min_y <= p.min_y);
                assert!(b.max_x >= p.max_x);
                assert!(b.max_y >= p.max_y);
            }
            prev = Some(b);
        }
        assert_eq!((b.min_x, b.max_x), (-3.0, 10.0));
        assert_eq!((b.min_y, b.max_y), (0.0, 5.0));
    }

    #[test]
    fn margin_expands_every_side() {
        let mut b = TopoBounds::new();
        b.widen(Vec3::new(0.0, 0.0, 0.0));
        b.widen(Vec3::new(10.0, 4.0, 0.0));
        let m = b.with_margin(0.1);
        assert_eq!(m.min_x, -1.0);
        assert_eq!(m.max_x, 11.0);
        assert_eq!(m.min_y, -1.0);
        assert_eq!(m.max_y, 5.0);
    }

    #[test]
    fn degenerate_bounds_get_unit_margin() {
        let mut b = TopoBounds::new();
        b.widen(Vec3::new(5.0, 5.0, 0.0));
        let m = b.with_margin(0.1);
        assert_eq!((m.min_x, m.max_x), (4.0, 6.0));
        assert_eq!((m.min_y, m.max_y), (4.0, 6.0));
    }
}

#[cfg(test)]
mod tracker {
    use nt_core::{NodeId, SimRng, Vec3};
    use rustc_hash::FxHashMap;

    use crate::source::PositionSource;
    use crate::tracker::PositionTracker;

    /// Scripted mobility state.
    #[derive(Default)]
    struct FakeMobility {
        positions: FxHashMap<NodeId, Vec3>,
    }

    impl FakeMobility {
        fn place(&mut self, node: u32, x: f64, y: f64) {
            self.positions.insert(NodeId(node), Vec3::new(x, y, 0.0));
        }
    }

    impl PositionSource for FakeMobility {
        fn position(&self, node: NodeId) -> Option<Vec3> {
            self.positions.get(&node).copied()
        }
    }

    #[test]
    fn first_poll_reports_every_placed_node() {
        let mut mob = FakeMobility::default();
        mob.place(0, 1.0, 1.0);
        mob.place(1, 2.0, 2.0);

        let mut tracker = PositionTracker::new(false);
        let mut rng = SimRng::new(0);
        let moved = tracker.poll(&mob, &[NodeId(0), NodeId(1)], &mut rng);
        assert_eq!(moved.len(), 2, "first sight counts as movement");
    }

    #[test]
    fn stationary_nodes_stay_quiet() {
        let mut mob = FakeMobility::default();
        mob.place(0, 1.0, 1.0);

        let mut tracker = PositionTracker::new(false);
        let mut rng = SimRng::new(0);
        tracker.poll(&mob, &[NodeId(0)], &mut rng);
        let moved = tracker.poll(&mob, &[NodeId(0)], &mut rng);
        assert!(moved.is_empty());
    }

    #[test]
    fn movement_beyond_epsilon_reported() {
        let mut mob = FakeMobility::default();
        mob.place(0, 1.0, 1.0);

        let mut tracker = PositionTracker::new(false);
        let mut rng = SimRng::new(0);
        tracker.poll(&mob, &[NodeId(0)], &mut rng);

        mob.place(0, 1.5, 1.0);
        let moved = tracker.poll(&mob, &[NodeId(0)], &mut rng);
        assert_eq!(moved, vec![(NodeId(0), Vec3::new(1.5, 1.0, 0.0))]);
    }

    #[test]
    fn jitter_below_epsilon_suppressed() {
        let mut mob = FakeMobility::default();
        mob.place(0, 1.0, 1.0);

        let mut tracker = PositionTracker::new(false);
        let mut rng = SimRng::new(0);
        tracker.poll(&mob, &[NodeId(0)], &mut rng);

        mob.place(0, 1.0 + 1e-9, 1.0);
        assert!(!tracker.has_moved(NodeId(0), Vec3::new(1.0 + 1e-9, 1.0, 0.0)));
        assert!(tracker.poll(&mob, &[NodeId(0)], &mut rng).is_empty());
    }

    #[test]
    fn synthesized_position_assigned_once() {
        let mob = FakeMobility::default(); // node 5 has no mobility state
        let mut tracker = PositionTracker::new(true);
        let mut rng = SimRng::new(42);

        let first = tracker.poll(&mob, &[NodeId(5)], &mut rng);
        assert_eq!(first.len(), 1, "synthesized node appears once");
        let assigned = first[0].1;

        let again = tracker.poll(&mob, &[NodeId(5)], &mut rng);
        assert!(again.is_empty(), "synthesized position is static thereafter");
        assert_eq!(tracker.position(NodeId(5)), Some(assigned));
    }

    #[test]
    fn synthesis_is_seed_deterministic() {
        let mob = FakeMobility::default();

        let mut t1 = PositionTracker::new(true);
        let mut r1 = SimRng::new(7);
        let mut t2 = PositionTracker::new(true);
        let mut r2 = SimRng::new(7);

        let a = t1.poll(&mob, &[NodeId(0)], &mut r1);
        let b = t2.poll(&mob, &[NodeId(0)], &mut r2);
        assert_eq!(a, b);
    }

    #[test]
    fn synthesis_disabled_omits_node() {
        let mob = FakeMobility::default();
        let mut tracker = PositionTracker::new(false);
        let mut rng = SimRng::new(0);

        assert!(tracker.poll(&mob, &[NodeId(9)], &mut rng).is_empty());
        assert_eq!(tracker.position(NodeId(9)), None);
        assert_eq!(tracker.placed_count(), 0);
    }

    #[test]
    fn bounds_track_observations() {
        let mut mob = FakeMobility::default();
        mob.place(0, -5.0, 3.0);
        mob.place(1, 20.0, -1.0);

        let mut tracker = PositionTracker::new(false);
        let mut rng = SimRng::new(0);
        tracker.poll(&mob, &[NodeId(0), NodeId(1)], &mut rng);

        let b = tracker.bounds();
        assert_eq!((b.min_x, b.max_x), (-5.0, 20.0));
        assert_eq!((b.min_y, b.max_y), (-1.0, 3.0));
    }
}

#[cfg(test)]
mod labels {
    use nt_core::NodeId;

    use crate::labels::NodeLabels;

    #[test]
    fn set_and_get() {
        let mut labels = NodeLabels::new();
        labels.set(NodeId(1), "gateway");
        assert_eq!(labels.get(NodeId(1)), Some("gateway"));
        assert_eq!(labels.get(NodeId(2)), None);
    }

    #[test]
    fn replace_keeps_latest() {
        let mut labels = NodeLabels::new();
        labels.set(NodeId(1), "old");
        labels.set(NodeId(1), "new");
        assert_eq!(labels.get(NodeId(1)), Some("new"));
        assert_eq!(labels.len(), 1);
    }
}
