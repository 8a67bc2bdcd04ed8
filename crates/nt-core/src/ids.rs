//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  `NodeId` and `DeviceId` are handed
//! to us by the simulation engine; `PacketHandle` is the engine's stable
//! identity for a packet buffer, while `PacketUid` is the run-unique identity
//! *this* system assigns at first transmit.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the inner MAX.
            pub const INVALID: $name = $name(<$inner>::MAX);
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// A node in the simulated topology, as numbered by the engine.
    pub struct NodeId(u32);
}

typed_id! {
    /// A network device attached to a node.  Device numbering is
    /// engine-global, not per-node.
    pub struct DeviceId(u32);
}

typed_id! {
    /// The engine's stable identity for a packet buffer.
    ///
    /// The handle survives copying and travels with the packet across hops,
    /// which is what makes the tagger's side-table keyed by it behave like a
    /// tag attached to the packet itself.
    pub struct PacketHandle(u64);
}

// ── PacketUid ─────────────────────────────────────────────────────────────────

/// The run-unique 64-bit identity assigned to a packet at first transmit.
///
/// UIDs are monotonically assigned starting at 1 and are never reused for
/// the lifetime of a run.  `PacketUid::NONE` (zero) marks a packet that was
/// observed at a receive point without ever having been tagged — the receive
/// is still recorded, degraded.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PacketUid(pub u64);

impl PacketUid {
    /// The "never tagged" sentinel.
    pub const NONE: PacketUid = PacketUid(0);

    /// The first UID a fresh tagger hands out.
    pub const FIRST: PacketUid = PacketUid(1);

    /// `true` for every UID a tagger actually assigned.
    #[inline]
    pub fn is_assigned(self) -> bool {
        self.0 != 0
    }

    /// The UID following `self` in allocation order.
    ///
    /// Overflowing 64 bits would take longer than any conceivable run, so
    /// wrap-around is treated as unreachable.
    #[inline]
    pub fn next(self) -> PacketUid {
        PacketUid(self.0 + 1)
    }
}

impl fmt::Display for PacketUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "uid:{}", self.0)
    }
}
