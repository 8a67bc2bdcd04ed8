//! Topology bounds — the rectangle every observed position fits in.

use nt_core::Vec3;

/// Min/max X and Y over all observed positions.
///
/// Bounds only ever widen; they never shrink, even if every node later
/// huddles in a corner.  Their single consumer is the output coordinate
/// space, which takes them with a margin so nodes at the edge stay visible.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TopoBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    observed: bool,
}

impl TopoBounds {
    /// Empty bounds; the first [`widen`](Self::widen) defines the rectangle.
    pub fn new() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
            observed: false,
        }
    }

    /// Grow the rectangle to include `pos` (X and Y only).
    pub fn widen(&mut self, pos: Vec3) {
        if !self.observed {
            self.min_x = pos.x;
            self.max_x = pos.x;
            self.min_y = pos.y;
            self.max_y = pos.y;
            self.observed = true;
            return;
        }
        self.min_x = self.min_x.min(pos.x);
        self.max_x = self.max_x.max(pos.x);
        self.min_y = self.min_y.min(pos.y);
        self.max_y = self.max_y.max(pos.y);
    }

    /// `true` until the first position is observed.
    pub fn is_empty(&self) -> bool {
        !self.observed
    }

    /// A copy expanded on every side by `fraction` of the larger extent.
    ///
    /// Degenerate rectangles (a single node, or all nodes collinear) get a
    /// one-unit margin so the output coordinate space never collapses.
    pub fn with_margin(&self, fraction: f64) -> TopoBounds {
        let extent = (self.max_x - self.min_x).max(self.max_y - self.min_y);
        let margin = if extent > 0.0 { extent * fraction } else { 1.0 };
        TopoBounds {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
            observed: self.observed,
        }
    }
}

impl Default for TopoBounds {
    fn default() -> Self {
        Self::new()
    }
}
