//! `nt-topology` — where the nodes are.
//!
//! The recorder samples node positions on a timer rather than reacting to
//! every mobility change: [`PositionTracker::poll`] sweeps all nodes,
//! reports the ones that moved (or appeared), and grows the run's
//! [`TopoBounds`] to cover everything it has seen.  Positions come from the
//! external mobility state through the narrow [`PositionSource`] trait;
//! nodes without one can be given a deterministic synthesized position.

pub mod bounds;
pub mod labels;
pub mod source;
pub mod tracker;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bounds::TopoBounds;
pub use labels::NodeLabels;
pub use source::PositionSource;
pub use tracker::PositionTracker;
