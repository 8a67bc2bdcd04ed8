//! `nt-recorder` — the recorder orchestrator.
//!
//! # Control flow
//!
//! ```text
//! engine callback            recorder action
//! ──────────────────────     ─────────────────────────────────────────────
//! transmit notification  →   tag packet → table the metadata → emit tx
//! receive notification   →   look up uid → consume fan-out slot → emit rx
//! periodic poll tick     →   sweep positions → emit moves → purge tables
//! ```
//!
//! Everything runs synchronously inside the engine's callbacks on a single
//! logical timeline; there is no thread and no lock.  Each entry point
//! mutates its tables *before* emitting, so a crash mid-emission leaves the
//! correlation state consistent with what actually reached the sink.
//!
//! The time window gates serialization only: out-of-window notifications
//! still update every table, so a later in-window receive correlates
//! against an out-of-window transmit.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use nt_recorder::{Recorder, RecorderConfig};
//!
//! let mut rec = Recorder::new(RecorderConfig::for_file("trace.xml"))?;
//! rec.start(&probe)?;
//! // … engine drives transmit / receive / poll callbacks …
//! rec.stop()?;
//! ```

pub mod config;
pub mod error;
pub mod probe;
pub mod recorder;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::RecorderConfig;
pub use error::{RecorderError, RecorderResult};
pub use probe::SimulationProbe;
pub use recorder::{FrameKind, Recorder, TxDescriptor};

// The two vocabulary types callers need at every notification site.
pub use nt_correlate::{Expected, LinkTech};
