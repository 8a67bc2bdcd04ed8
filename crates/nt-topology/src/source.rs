//! The mobility collaborator surface.

use nt_core::{NodeId, Vec3};

/// Read-only access to the external mobility state.
///
/// This is the only thing the topology tracker knows about the simulation:
/// given a node, where is it right now?  `None` means the node has no
/// mobility state (the tracker may then synthesize a position, depending on
/// configuration).
pub trait PositionSource {
    fn position(&self, node: NodeId) -> Option<Vec3>;
}
