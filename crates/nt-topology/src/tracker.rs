//! The `PositionTracker` — last-known node positions and movement detection.

use nt_core::{NodeId, SimRng, Vec3};
use rustc_hash::FxHashMap;

use crate::bounds::TopoBounds;
use crate::source::PositionSource;

/// Synthesized positions fall uniformly in `[0, SYNTH_EXTENT)` on X and Y.
const SYNTH_EXTENT: f64 = 100.0;

/// Caches the last-known position of every node for the run's duration.
///
/// Entries are created lazily the first time a node is looked at and are
/// never removed.  A node whose mobility state is missing gets a
/// deterministic pseudo-random position exactly once (if synthesis is
/// enabled) and is treated as static thereafter; with synthesis disabled
/// such nodes stay absent from position output until the mobility state
/// appears.
pub struct PositionTracker {
    last: FxHashMap<NodeId, Vec3>,
    bounds: TopoBounds,
    synthesize: bool,
}

impl PositionTracker {
    pub fn new(synthesize: bool) -> Self {
        Self {
            last: FxHashMap::default(),
            bounds: TopoBounds::new(),
            synthesize,
        }
    }

    /// The position `node` has right now, in preference order: live mobility
    /// state, cached last-known value, synthesized (when enabled).
    ///
    /// Returns `None` only for an unknown node with no mobility state and
    /// synthesis disabled.  Does not update the cache — pair with
    /// [`update`](Self::update).
    pub fn current<S: PositionSource>(
        &self,
        node: NodeId,
        source: &S,
        rng: &mut SimRng,
    ) -> Option<Vec3> {
        if let Some(pos) = source.position(node) {
            return Some(pos);
        }
        if let Some(&cached) = self.last.get(&node) {
            return Some(cached);
        }
        if self.synthesize {
            return Some(Vec3::new(
                rng.gen_range(0.0..SYNTH_EXTENT),
                rng.gen_range(0.0..SYNTH_EXTENT),
                0.0,
            ));
        }
        None
    }

    /// Pure movement check: `true` if `node` was never seen or `new_pos`
    /// differs from the cache beyond the position epsilon.
    pub fn has_moved(&self, node: NodeId, new_pos: Vec3) -> bool {
        match self.last.get(&node) {
            None => true,
            Some(&cached) => !cached.approx_eq(new_pos),
        }
    }

    /// Record `pos` as the node's last-known position.
    ///
    /// Returns `true` iff the node is first-seen or actually moved; the
    /// bounds widen on every accepted update.
    pub fn update(&mut self, node: NodeId, pos: Vec3) -> bool {
        let moved = self.has_moved(node, pos);
        if moved {
            self.last.insert(node, pos);
            self.bounds.widen(pos);
        }
        moved
    }

    /// One periodic sweep: every node whose position changed (or appeared)
    /// since the last sweep, with its new position, in input order.
    pub fn poll<S: PositionSource>(
        &mut self,
        source: &S,
        nodes: &[NodeId],
        rng: &mut SimRng,
    ) -> Vec<(NodeId, Vec3)> {
        let mut moved = Vec::new();
        for &node in nodes {
            let Some(pos) = self.current(node, source, rng) else {
                continue;
            };
            if self.update(node, pos) {
                moved.push((node, pos));
            }
        }
        moved
    }

    /// Cached last-known position, if the node has ever been placed.
    pub fn position(&self, node: NodeId) -> Option<Vec3> {
        self.last.get(&node).copied()
    }

    pub fn bounds(&self) -> &TopoBounds {
        &self.bounds
    }

    /// Number of nodes with a cached position.
    pub fn placed_count(&self) -> usize {
        self.last.len()
    }
}
