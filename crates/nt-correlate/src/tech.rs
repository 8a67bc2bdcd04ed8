//! Link technologies and the per-technology table set.
//!
//! Each technology delivers its notifications independently, so each gets
//! its own [`PendingTable`]; the tables never interact.  One `record` /
//! `correlate` / `purge` implementation serves all of them, selected by the
//! [`LinkTech`] tag — adding a technology means adding an enum variant, not
//! another copy of the table logic.

use nt_core::{NodeId, PacketUid, SimTime};

use crate::table::{PendingTable, PendingTx, TxEcho};

// ── LinkTech ──────────────────────────────────────────────────────────────────

/// The link technology a notification arrived from.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum LinkTech {
    /// Short-range wireless (802.11).
    Wifi,
    /// Wide-area wireless (802.16).
    Wimax,
    /// Cellular.
    Lte,
    /// Wired shared medium.
    Csma,
}

impl LinkTech {
    /// All technologies, in table-sweep order.
    pub const ALL: [LinkTech; 4] = [
        LinkTech::Wifi,
        LinkTech::Wimax,
        LinkTech::Lte,
        LinkTech::Csma,
    ];

    /// `true` for radio technologies (their transmit events carry a signal
    /// range).
    #[inline]
    pub fn is_wireless(self) -> bool {
        !matches!(self, LinkTech::Csma)
    }
}

impl std::fmt::Display for LinkTech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LinkTech::Wifi => "wifi",
            LinkTech::Wimax => "wimax",
            LinkTech::Lte => "lte",
            LinkTech::Csma => "csma",
        };
        f.write_str(name)
    }
}

// ── PendingSet ────────────────────────────────────────────────────────────────

/// One independent [`PendingTable`] per [`LinkTech`].
#[derive(Default)]
pub struct PendingSet {
    wifi: PendingTable,
    wimax: PendingTable,
    lte: PendingTable,
    csma: PendingTable,
}

impl PendingSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn table_mut(&mut self, tech: LinkTech) -> &mut PendingTable {
        match tech {
            LinkTech::Wifi => &mut self.wifi,
            LinkTech::Wimax => &mut self.wimax,
            LinkTech::Lte => &mut self.lte,
            LinkTech::Csma => &mut self.csma,
        }
    }

    fn table(&self, tech: LinkTech) -> &PendingTable {
        match tech {
            LinkTech::Wifi => &self.wifi,
            LinkTech::Wimax => &self.wimax,
            LinkTech::Lte => &self.lte,
            LinkTech::Csma => &self.csma,
        }
    }

    /// See [`PendingTable::record_tx`].
    pub fn record_tx(&mut self, tech: LinkTech, uid: PacketUid, tx: PendingTx) {
        self.table_mut(tech).record_tx(uid, tx);
    }

    /// See [`PendingTable::is_pending`].
    pub fn is_pending(&self, tech: LinkTech, uid: PacketUid) -> bool {
        self.table(tech).is_pending(uid)
    }

    /// See [`PendingTable::record_rx`].
    pub fn record_rx(&mut self, tech: LinkTech, uid: PacketUid, receiver: NodeId) -> Option<TxEcho> {
        self.table_mut(tech).record_rx(uid, receiver)
    }

    /// Purge every technology's table.  Returns the total records removed.
    pub fn purge_all(&mut self, now: SimTime, max_age: SimTime) -> usize {
        LinkTech::ALL
            .iter()
            .map(|&tech| self.table_mut(tech).purge(now, max_age))
            .sum()
    }

    /// Total records held across all technologies.
    pub fn pending_total(&self) -> usize {
        LinkTech::ALL.iter().map(|&tech| self.table(tech).len()).sum()
    }
}
