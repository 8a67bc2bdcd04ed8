//! The logical trace events, independent of any serialization format.

use nt_core::{NodeId, PacketUid, SimTime, Vec3};
use nt_topology::TopoBounds;

/// The transmit-side echo attached to a receive whose correlation succeeded.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TxRef {
    pub from: NodeId,
    pub tx_time: SimTime,
}

/// One entry in the output stream.
///
/// The topology block (`TopologyStart` … `TopologyEnd`) is declared once at
/// the head of the run; everything after it is a flat sequence of packet and
/// position events in callback order.  A `Rx` whose `tx` is `None` is a
/// correlation miss — the receive fact is recorded with the transmit
/// metadata absent, never dropped.
#[derive(Clone, PartialEq, Debug)]
pub enum TraceEvent {
    /// Opens the topology block with the output coordinate space.
    TopologyStart { bounds: TopoBounds },

    /// Declares a node: initial position and optional free-text label.
    Node {
        id: NodeId,
        pos: Vec3,
        label: Option<String>,
    },

    /// Declares a point-to-point link between two nodes.
    Link { from: NodeId, to: NodeId },

    /// Closes the topology block.
    TopologyEnd,

    /// A node's position changed (or was first observed) at `time`.
    Position {
        node: NodeId,
        time: SimTime,
        pos: Vec3,
    },

    /// Radio transmit begin.  `meta` carries decoded packet headers when
    /// metadata capture is enabled.
    WirelessTx {
        uid: PacketUid,
        from: NodeId,
        time: SimTime,
        range: f64,
        meta: Option<String>,
    },

    /// Shared-medium wire transmit begin.
    WiredTx {
        uid: PacketUid,
        from: NodeId,
        time: SimTime,
        meta: Option<String>,
    },

    /// A receive, linked to its transmit by `uid` when correlation
    /// succeeded.
    Rx {
        uid: PacketUid,
        to: NodeId,
        time: SimTime,
        tx: Option<TxRef>,
    },

    /// The synthetic no-op packet written once when a run ends before any
    /// wireless reception, so the stream is never structurally empty.
    Placeholder,
}
