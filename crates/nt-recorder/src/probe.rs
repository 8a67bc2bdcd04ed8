//! The simulation-engine collaborator surface.

use nt_core::{NodeId, PacketHandle, SimTime};
use nt_topology::PositionSource;

/// Everything the recorder is allowed to ask the simulation engine.
///
/// The engine drives the recorder through callbacks; in return the recorder
/// reads exactly four things back: the clock, the node list, per-node
/// mobility state (via the [`PositionSource`] supertrait), and — when
/// metadata capture is on — a decoded summary of a packet's headers.
/// Nothing else of the engine is visible from this side.
pub trait SimulationProbe: PositionSource {
    /// Current simulated time.
    fn now(&self) -> SimTime;

    /// Every node currently in the simulation, in stable order.
    fn node_ids(&self) -> Vec<NodeId>;

    /// Human-readable decoded headers for `packet`, if the engine can
    /// produce them.  Only consulted when metadata capture is enabled.
    fn packet_summary(&self, _packet: PacketHandle) -> Option<String> {
        None
    }
}
