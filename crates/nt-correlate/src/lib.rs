//! `nt-correlate` — packet identity and transmit/receive correlation.
//!
//! Transmit and receive notifications arrive independently, in whatever
//! order the simulation delivers them, across several link technologies at
//! once.  This crate matches them back together:
//!
//! - [`IdentityTagger`] hands every packet a run-unique [`PacketUid`] at its
//!   first transmit and finds that UID again at every later observation
//!   point.
//! - [`PendingTable`] holds the transmit-side metadata of every in-flight
//!   packet until its receivers report (or until it is purged as stale).
//! - [`PendingSet`] keeps one independent table per [`LinkTech`] behind a
//!   single surface.
//!
//! [`PacketUid`]: nt_core::PacketUid

pub mod table;
pub mod tagger;
pub mod tech;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use table::{Expected, PendingTable, PendingTx, TxAux, TxEcho};
pub use tagger::{IdentityTagger, PacketTag};
pub use tech::{LinkTech, PendingSet};
