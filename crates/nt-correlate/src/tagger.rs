//! The `IdentityTagger` — run-unique packet identities.
//!
//! The counter is owned by the tagger instance, not a process global, so
//! every recorder (and every test) starts from a fresh identifier space.
//! The engine-stable [`PacketHandle`] keys a side-table of assignments; the
//! handle travels with the packet across hops, which gives the same effect
//! as a tag physically attached to the packet.

use nt_core::{PacketHandle, PacketUid};
use rustc_hash::FxHashMap;

/// Assigns and recalls run-unique packet identities.
pub struct IdentityTagger {
    next: PacketUid,
    assigned: FxHashMap<PacketHandle, PacketUid>,
}

impl IdentityTagger {
    pub fn new() -> Self {
        Self {
            next: PacketUid::FIRST,
            assigned: FxHashMap::default(),
        }
    }

    /// Return the UID carried by `packet`, allocating the next one if the
    /// packet has never been tagged.
    ///
    /// Idempotent: every later call for the same packet — at any observation
    /// point — returns the same UID.
    pub fn tag(&mut self, packet: PacketHandle) -> PacketUid {
        if let Some(&uid) = self.assigned.get(&packet) {
            return uid;
        }
        let uid = self.next;
        self.next = self.next.next();
        self.assigned.insert(packet, uid);
        uid
    }

    /// Read-only probe for the receive path.
    ///
    /// A packet that was never tagged yields `None`; the receive is then
    /// recorded as a correlation miss rather than being given a fresh UID.
    #[inline]
    pub fn lookup(&self, packet: PacketHandle) -> Option<PacketUid> {
        self.assigned.get(&packet).copied()
    }

    /// Number of packets tagged so far this run.
    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }
}

impl Default for IdentityTagger {
    fn default() -> Self {
        Self::new()
    }
}

// ── PacketTag ─────────────────────────────────────────────────────────────────

/// The 8-byte wire form of a [`PacketUid`].
///
/// For engines whose packets can carry attached bytes directly, the UID is
/// encoded big-endian so the tag round-trips through serialize/deserialize
/// and survives packet duplication.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PacketTag(pub PacketUid);

impl PacketTag {
    pub const SERIALIZED_SIZE: usize = 8;

    #[inline]
    pub fn to_bytes(self) -> [u8; 8] {
        self.0 .0.to_be_bytes()
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; 8]) -> PacketTag {
        PacketTag(PacketUid(u64::from_be_bytes(bytes)))
    }

    #[inline]
    pub fn uid(self) -> PacketUid {
        self.0
    }
}
