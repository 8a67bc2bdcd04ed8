//! The `PendingTable` — transmit-side state of in-flight packets.
//!
//! # Why this exists
//!
//! A receive notification carries only the packet and the receiving device;
//! everything else the output needs (who sent it, when, with what signal
//! range) was only visible at transmit time.  The table holds that metadata
//! from the transmit notification until the matching receives arrive.
//!
//! Receivers can fail to materialize — a broadcast nobody hears, a dropped
//! frame — so entries that are never claimed would accumulate forever.
//! [`PendingTable::purge`] is the only defense against that growth: it
//! evicts entries older than a configured bound, and a receive arriving
//! after eviction is reported as unmatched.  Lossy by design.

use nt_core::{NodeId, PacketUid, SimTime};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

// ── Transmit metadata ─────────────────────────────────────────────────────────

/// Technology-specific auxiliary fields captured at transmit time.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum TxAux {
    /// Radio transmission with a signal range in coordinate units.
    Wireless { range: f64 },

    /// Shared-medium wire transmission.
    Wired,
}

/// The receivers a transmission is expected to reach.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Expected {
    /// Known endpoints: one entry for unicast, several for multicast.
    /// The record is consumed when the last distinct listed receiver
    /// reports.
    Receivers(Vec<NodeId>),

    /// Broadcast into a shared medium — the receiver set is unknowable at
    /// transmit time.  Such records accept any number of receives and are
    /// reclaimed only by purge.
    Unknown,
}

impl Expected {
    /// Convenience constructor for the common single-receiver case.
    pub fn unicast(to: NodeId) -> Expected {
        Expected::Receivers(vec![to])
    }
}

/// Everything the transmit notification captured for one packet.
#[derive(Clone, Debug)]
pub struct PendingTx {
    pub sender: NodeId,
    pub tx_time: SimTime,
    pub aux: TxAux,
    pub expected: Expected,
}

/// The transmit-side metadata handed back on a successful correlation.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TxEcho {
    pub sender: NodeId,
    pub tx_time: SimTime,
    pub aux: TxAux,
}

// ── PendingTable ──────────────────────────────────────────────────────────────

/// One record per in-flight packet, with fan-out accounting.
struct Entry {
    tx: PendingTx,
    /// Expected receivers that have already reported.
    claimed: FxHashSet<NodeId>,
}

impl Entry {
    fn echo(&self) -> TxEcho {
        TxEcho {
            sender: self.tx.sender,
            tx_time: self.tx.tx_time,
            aux: self.tx.aux,
        }
    }
}

/// Maps [`PacketUid`] to its pending transmit record for one link
/// technology.  At most one record exists per UID at any time.
#[derive(Default)]
pub struct PendingTable {
    entries: FxHashMap<PacketUid, Entry>,
}

impl PendingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the transmit record for `uid`.
    ///
    /// An existing record for the same UID is overwritten — last writer
    /// wins, since re-transmission of an already-tagged packet is valid.
    pub fn record_tx(&mut self, uid: PacketUid, tx: PendingTx) {
        self.entries.insert(
            uid,
            Entry {
                tx,
                claimed: FxHashSet::default(),
            },
        );
    }

    /// `true` while a record for `uid` is held.
    #[inline]
    pub fn is_pending(&self, uid: PacketUid) -> bool {
        self.entries.contains_key(&uid)
    }

    /// Correlate a receive at `receiver` against the pending record.
    ///
    /// On a hit, returns the transmit metadata and consumes one fan-out
    /// slot: with a known receiver set the record is removed exactly when
    /// the last distinct listed receiver has reported — not before, not
    /// after.  Duplicate reports from the same receiver, and reports from
    /// receivers outside the expected set, still correlate but consume
    /// nothing.  With [`Expected::Unknown`] the record always survives
    /// (purge reclaims it).
    ///
    /// On a miss — never transmitted, already fully claimed, or purged —
    /// returns `None`.  The caller records the receive fact regardless.
    pub fn record_rx(&mut self, uid: PacketUid, receiver: NodeId) -> Option<TxEcho> {
        let entry = self.entries.get_mut(&uid)?;
        let echo = entry.echo();

        let exhausted = match &entry.tx.expected {
            Expected::Receivers(list) => {
                if list.contains(&receiver) {
                    entry.claimed.insert(receiver);
                }
                list.iter().all(|node| entry.claimed.contains(node))
            }
            Expected::Unknown => false,
        };

        if exhausted {
            self.entries.remove(&uid);
        }
        Some(echo)
    }

    /// Evict every record whose transmit time is older than `max_age`
    /// relative to `now`.  Returns the number of records removed.
    ///
    /// Eviction is monotone: once a record is gone, a later receive for its
    /// UID is an ordinary miss.
    pub fn purge(&mut self, now: SimTime, max_age: SimTime) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.since(entry.tx.tx_time) <= max_age);
        let removed = before - self.entries.len();
        if removed > 0 {
            trace!(removed, remaining = self.entries.len(), "purged stale pending records");
        }
        removed
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
