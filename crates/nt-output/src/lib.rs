//! `nt-output` — turning correlated events into bytes somewhere.
//!
//! Three layers, each behind its own seam:
//!
//! | Layer               | Choice made at run time                          |
//! |---------------------|--------------------------------------------------|
//! | [`TraceEvent`]      | what happened (format-independent)               |
//! | [`TraceFormat`]     | how it reads: structured XML or flat legacy lines |
//! | [`RecordSink`]      | where the bytes go: a file or a connected peer   |
//!
//! [`OutputSession`] owns all three plus the rotation policy: once a file
//! target has held its configured number of events, the session closes it
//! and continues in `<name>-1`, `<name>-2`, … without the caller noticing.
//! A sink failure flips the session into a permanent no-op — recording
//! degrades, the simulation is never disturbed.

pub mod error;
pub mod event;
pub mod format;
pub mod session;
pub mod sink;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{OutputError, OutputResult};
pub use event::{TraceEvent, TxRef};
pub use format::{FormatKind, LegacyFormat, TraceFormat, XmlFormat};
pub use session::{OutputSession, OutputTarget};
pub use sink::{FileSink, RecordSink, SocketSink};
